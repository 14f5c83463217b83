//! Undersampling pre-pass used when the oversampling rate is below 100%.
//!
//! The pass never shuffles the caller's data. It draws a fresh index
//! permutation, builds a new [`Sample`] from the selected points and reports
//! how many of them the orchestrator should process.

use rand::{Rng, seq::SliceRandom};
use tracing::{debug, instrument};

use crate::{DataSource, Result, error::SmoteError, rate::OversamplingRate, sample::Sample};

/// Returns `size` distinct indices drawn uniformly from `0..len`.
///
/// The full range is permuted with a Fisher–Yates shuffle and the first
/// `size` entries are kept, so the result is a uniformly random ordered
/// subset. `size` is clamped to `len`.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use smote_core::random_subset;
///
/// let mut rng = SmallRng::seed_from_u64(7);
/// let picked = random_subset(10, 4, &mut rng);
/// assert_eq!(picked.len(), 4);
/// assert!(picked.iter().all(|&index| index < 10));
/// ```
pub fn random_subset<R: Rng + ?Sized>(len: usize, size: usize, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..len).collect();
    order.shuffle(rng);
    order.truncate(size);
    order
}

/// Outcome of the undersampling pre-pass.
#[derive(Clone, Debug, PartialEq)]
pub struct Undersampled {
    sample: Sample,
    selection: Vec<usize>,
    working_count: usize,
}

impl Undersampled {
    /// Returns the randomly selected points, in selection order.
    #[must_use]
    pub fn sample(&self) -> &Sample {
        &self.sample
    }

    /// Returns the original index of every selected point.
    #[must_use]
    pub fn selection(&self) -> &[usize] {
        &self.selection
    }

    /// Returns how many leading points of [`Undersampled::sample`] are
    /// processed, `floor(rate * count / 100)`.
    #[must_use]
    pub fn working_count(&self) -> usize {
        self.working_count
    }

    pub(crate) fn into_parts(self) -> (Sample, Vec<usize>, usize) {
        (self.sample, self.selection, self.working_count)
    }
}

/// Draws `count` random points from `sample` and scales the working count by
/// `rate`.
///
/// Both reductions are applied: the subset of size `count` is drawn first,
/// then only `floor(rate * count / 100)` of its points are processed at the
/// full 100% rate.
///
/// # Errors
/// Returns [`SmoteError::SampleCountExceedsData`] when `count` is larger than
/// the sample and [`SmoteError::InvalidSampleCount`] when `count` is zero.
#[instrument(
    name = "core.undersample",
    err,
    skip(sample, rng),
    fields(items = sample.len(), count = count, rate = rate.percent()),
)]
pub fn undersample<R: Rng + ?Sized>(
    sample: &Sample,
    count: usize,
    rate: OversamplingRate,
    rng: &mut R,
) -> Result<Undersampled> {
    if count == 0 {
        return Err(SmoteError::InvalidSampleCount { got: count });
    }
    if count > sample.len() {
        return Err(SmoteError::SampleCountExceedsData {
            requested: count,
            available: sample.len(),
        });
    }

    let selection = random_subset(sample.len(), count, rng);
    let reduced = sample
        .select(&selection)
        .map_err(|error| SmoteError::from_data_source(sample.name(), error))?;
    let working_count = rate.scale(count);
    debug!(
        selected = selection.len(),
        working_count,
        "undersampling reduced the working set"
    );

    Ok(Undersampled {
        sample: reduced,
        selection,
        working_count,
    })
}
