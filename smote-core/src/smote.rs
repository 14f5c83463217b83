//! Oversampling orchestration.
//!
//! Provides the [`Smote`] entry point that sequences the undersampling
//! pre-pass, the neighbour search and synthetic point generation.

use std::num::NonZeroUsize;

use rand::Rng;
use tracing::{info, instrument, warn};

use crate::{
    DataSource, Result,
    builder::SmoteBuilder,
    error::{DataSourceError, SmoteError},
    neighbours::NeighbourFinder,
    rate::OversamplingRate,
    result::{Provenance, SyntheticSample},
    sample::Sample,
    sampler::undersample,
    synthetic::SyntheticGenerator,
};

/// Entry point for generating synthetic minority-class points.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use smote_core::{Sample, SmoteBuilder};
///
/// let sample = Sample::try_new(vec![
///     vec![0.0, 0.0],
///     vec![10.0, 0.0],
///     vec![0.0, 10.0],
///     vec![10.0, 10.0],
/// ])?;
/// let smote = SmoteBuilder::new().with_rate(200).with_neighbours(2).build()?;
/// let synthetic = smote.run(&sample, &mut SmallRng::seed_from_u64(4))?;
/// assert_eq!(synthetic.len(), 8);
/// assert_eq!(synthetic.dimension(), Some(2));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Smote {
    sample_count: Option<NonZeroUsize>,
    rate: OversamplingRate,
    neighbours: NonZeroUsize,
}

impl Smote {
    pub(crate) fn new(
        sample_count: Option<NonZeroUsize>,
        rate: OversamplingRate,
        neighbours: NonZeroUsize,
    ) -> Self {
        Self {
            sample_count,
            rate,
            neighbours,
        }
    }

    /// Returns the configured sample count; `None` processes the whole sample.
    #[must_use]
    pub fn sample_count(&self) -> Option<NonZeroUsize> {
        self.sample_count
    }

    /// Returns the oversampling rate.
    #[must_use]
    pub fn rate(&self) -> OversamplingRate {
        self.rate
    }

    /// Returns the neighbour count `k`.
    #[must_use]
    pub fn neighbours(&self) -> NonZeroUsize {
        self.neighbours
    }

    /// Generates synthetic points for the first `T` points of `sample`.
    ///
    /// At rates of 100% or more each source point yields `N / 100` points.
    /// Below 100% a random subset of `T` points is drawn first and only
    /// `floor(N * T / 100)` of them are processed, one point each.
    ///
    /// # Errors
    /// Returns [`SmoteError::SampleCountExceedsData`] when `T` exceeds the
    /// sample, [`SmoteError::InsufficientNeighbours`] when the working set
    /// holds `k` or fewer points, and propagates data source failures. No
    /// partial result is returned.
    pub fn run<R: Rng + ?Sized>(&self, sample: &Sample, rng: &mut R) -> Result<SyntheticSample> {
        let count = self.sample_count.map_or(sample.len(), NonZeroUsize::get);
        self.run_with_count(sample, count, rng)
    }

    #[instrument(
        name = "core.smote",
        err,
        skip(self, sample, rng),
        fields(
            data_source = %sample.name(),
            items = sample.len(),
            sample_count = count,
            rate = self.rate.percent(),
            neighbours = self.neighbours.get(),
        ),
    )]
    fn run_with_count<R: Rng + ?Sized>(
        &self,
        sample: &Sample,
        count: usize,
        rng: &mut R,
    ) -> Result<SyntheticSample> {
        if count > sample.len() {
            return Err(SmoteError::SampleCountExceedsData {
                requested: count,
                available: sample.len(),
            });
        }
        let finder = NeighbourFinder::new(self.neighbours);

        let result = if self.rate.is_undersampling() {
            let (working, selection, working_count) =
                undersample(sample, count, self.rate, rng)?.into_parts();
            if let Err(error) = finder.validate(&working, working_count) {
                warn!(
                    working_count,
                    k = self.neighbours.get(),
                    "undersampled working set cannot supply the requested neighbours"
                );
                return Err(error);
            }
            let original = |index| remap(sample, &selection, index);
            generate_all(&working, working_count, 1, finder, rng, original)?
        } else {
            finder.validate(sample, count)?;
            generate_all(sample, count, self.rate.multiplier(), finder, rng, Ok)?
        };

        info!(synthetic = result.len(), "smote completed");
        Ok(result)
    }
}

fn generate_all<R, F>(
    sample: &Sample,
    count: usize,
    per_source: usize,
    finder: NeighbourFinder,
    rng: &mut R,
    original_index: F,
) -> Result<SyntheticSample>
where
    R: Rng + ?Sized,
    F: Fn(usize) -> Result<usize>,
{
    let mut output = SyntheticSample::with_capacity(count.saturating_mul(per_source));
    for source in 0..count {
        let neighbours = finder.find(sample, source, count)?;
        let generated = SyntheticGenerator.populate(sample, source, &neighbours, per_source, rng)?;
        for point in generated {
            let provenance = Provenance {
                source: original_index(point.provenance.source)?,
                neighbour: original_index(point.provenance.neighbour)?,
                gap: point.provenance.gap,
            };
            output.push(point.coordinates, provenance);
        }
    }
    Ok(output)
}

/// Maps an index into the undersampled working set back to `sample`.
fn remap(sample: &Sample, selection: &[usize], index: usize) -> Result<usize> {
    let Some(&original) = selection.get(index) else {
        let error = DataSourceError::OutOfBounds { index };
        return Err(SmoteError::from_data_source(sample.name(), error));
    };
    Ok(original)
}

/// Runs SMOTE once with explicit parameters.
///
/// Equivalent to building a [`Smote`] with
/// `SmoteBuilder::new().with_sample_count(count).with_rate(rate).with_neighbours(k)`
/// and calling [`Smote::run`].
///
/// # Errors
/// Returns the validation errors of [`SmoteBuilder::build`] and the run
/// errors of [`Smote::run`].
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use smote_core::{Sample, smote};
///
/// let sample = Sample::try_new((0..10).map(|i| vec![f64::from(i), 0.0]).collect())?;
/// let synthetic = smote(&sample, 10, 50, 3, &mut SmallRng::seed_from_u64(2))?;
/// assert_eq!(synthetic.len(), 5);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn smote<R: Rng + ?Sized>(
    sample: &Sample,
    count: usize,
    rate: u32,
    k: usize,
    rng: &mut R,
) -> Result<SyntheticSample> {
    SmoteBuilder::new()
        .with_sample_count(count)
        .with_rate(rate)
        .with_neighbours(k)
        .build()?
        .run(sample, rng)
}
