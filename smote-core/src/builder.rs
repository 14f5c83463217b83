//! Builder utilities for configuring [`Smote`] runs.
//!
//! Parameters are validated once in [`SmoteBuilder::build`] so that
//! [`Smote::run`] only has to check them against the supplied sample.

use std::num::NonZeroUsize;

use crate::{Result, error::SmoteError, rate::OversamplingRate, smote::Smote};

const DEFAULT_NEIGHBOURS: usize = 5;

/// Configures and constructs [`Smote`] instances.
///
/// # Examples
/// ```
/// use smote_core::SmoteBuilder;
///
/// let smote = SmoteBuilder::new()
///     .with_sample_count(20)
///     .with_rate(300)
///     .with_neighbours(3)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(smote.sample_count().map(|count| count.get()), Some(20));
/// assert_eq!(smote.rate().percent(), 300);
/// assert_eq!(smote.neighbours().get(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct SmoteBuilder {
    sample_count: Option<usize>,
    rate: u32,
    neighbours: usize,
}

impl Default for SmoteBuilder {
    fn default() -> Self {
        Self {
            sample_count: None,
            rate: OversamplingRate::FULL.percent(),
            neighbours: DEFAULT_NEIGHBOURS,
        }
    }
}

impl SmoteBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use smote_core::SmoteBuilder;
    ///
    /// let builder = SmoteBuilder::new();
    /// assert_eq!(builder.sample_count(), None);
    /// assert_eq!(builder.rate(), 100);
    /// assert_eq!(builder.neighbours(), 5);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Limits the run to the first `count` points of the sample.
    #[must_use]
    pub fn with_sample_count(mut self, count: usize) -> Self {
        self.sample_count = Some(count);
        self
    }

    /// Returns the configured sample count, `None` meaning the whole sample.
    #[must_use]
    pub fn sample_count(&self) -> Option<usize> {
        self.sample_count
    }

    /// Sets the oversampling rate as a percentage.
    ///
    /// # Examples
    /// ```
    /// use smote_core::SmoteBuilder;
    ///
    /// let builder = SmoteBuilder::new().with_rate(50);
    /// assert_eq!(builder.rate(), 50);
    /// ```
    #[must_use]
    pub fn with_rate(mut self, percent: u32) -> Self {
        self.rate = percent;
        self
    }

    /// Returns the configured rate percentage.
    #[must_use]
    pub fn rate(&self) -> u32 {
        self.rate
    }

    /// Sets how many nearest neighbours each source point considers.
    #[must_use]
    pub fn with_neighbours(mut self, k: usize) -> Self {
        self.neighbours = k;
        self
    }

    /// Returns the configured neighbour count.
    #[must_use]
    pub fn neighbours(&self) -> usize {
        self.neighbours
    }

    /// Validates the configuration and constructs a [`Smote`] instance.
    ///
    /// # Errors
    /// Returns [`SmoteError::InvalidSampleCount`] for an explicit count of
    /// zero, [`SmoteError::InvalidRate`] for a zero rate and
    /// [`SmoteError::InvalidNeighbourCount`] for zero neighbours.
    ///
    /// # Examples
    /// ```
    /// use smote_core::{SmoteBuilder, SmoteErrorCode};
    ///
    /// let err = SmoteBuilder::new().with_neighbours(0).build().unwrap_err();
    /// assert_eq!(err.code(), SmoteErrorCode::InvalidNeighbourCount);
    /// ```
    pub fn build(self) -> Result<Smote> {
        let sample_count = self
            .sample_count
            .map(|count| {
                NonZeroUsize::new(count).ok_or(SmoteError::InvalidSampleCount { got: count })
            })
            .transpose()?;
        let rate = OversamplingRate::new(self.rate)?;
        let neighbours =
            NonZeroUsize::new(self.neighbours).ok_or(SmoteError::InvalidNeighbourCount {
                got: self.neighbours,
            })?;

        Ok(Smote::new(sample_count, rate, neighbours))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::zero_count(
        SmoteBuilder::new().with_sample_count(0),
        SmoteError::InvalidSampleCount { got: 0 },
    )]
    #[case::zero_rate(SmoteBuilder::new().with_rate(0), SmoteError::InvalidRate { got: 0 })]
    #[case::zero_neighbours(
        SmoteBuilder::new().with_neighbours(0),
        SmoteError::InvalidNeighbourCount { got: 0 },
    )]
    fn build_rejects_zero_parameters(#[case] builder: SmoteBuilder, #[case] expected: SmoteError) {
        let err = builder.build().expect_err("zero parameters must fail");
        assert_eq!(err, expected);
    }

    #[test]
    fn build_applies_defaults() {
        let smote = SmoteBuilder::new().build().expect("defaults are valid");
        assert_eq!(smote.sample_count(), None);
        assert_eq!(smote.rate(), OversamplingRate::FULL);
        assert_eq!(smote.neighbours().get(), DEFAULT_NEIGHBOURS);
    }
}
