//! Shared test utilities for `smote-core`.

use proptest::test_runner::Config as ProptestConfig;
use smote_test_support::proptest_profile::ProptestRunProfile;

use crate::{datasource::DataSource, error::DataSourceError};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

/// Builds a proptest configuration from the shared `PROPTEST_CASES` profile.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases);
    ProptestConfig {
        cases: profile.cases(),
        ..ProptestConfig::default()
    }
}

/// One-dimensional [`DataSource`] that counts distance evaluations.
#[derive(Clone)]
pub(crate) struct CountingSource {
    data: Vec<f64>,
    calls: Arc<AtomicUsize>,
}

impl CountingSource {
    #[must_use]
    pub(crate) fn new(data: Vec<f64>, calls: Arc<AtomicUsize>) -> Self {
        Self { data, calls }
    }

    /// Returns the backing distance counter for assertions.
    #[must_use]
    pub(crate) fn calls(&self) -> &Arc<AtomicUsize> {
        &self.calls
    }
}

impl DataSource for CountingSource {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn name(&self) -> &str {
        "counting"
    }

    fn distance(&self, left: usize, right: usize) -> Result<f64, DataSourceError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        let a = self
            .data
            .get(left)
            .ok_or(DataSourceError::OutOfBounds { index: left })?;
        let b = self
            .data
            .get(right)
            .ok_or(DataSourceError::OutOfBounds { index: right })?;
        Ok((a - b).abs())
    }
}
