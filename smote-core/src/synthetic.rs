//! Synthetic point generation ("Populate").

use rand::{Rng, distributions::Standard};

use crate::{
    DataSource, Result,
    distance::{self, DistanceError},
    error::{DataSourceError, SmoteError},
    neighbours::NeighbourList,
    result::Provenance,
    sample::Sample,
};

/// Returns the point `source + gap * (neighbour - source)`.
///
/// The same `gap` is applied to every dimension, so for `gap` in `[0, 1]`
/// the result lies on the segment joining the two points. The blend is
/// computed as `(1 - gap) * source + gap * neighbour`, which stays finite
/// for any finite inputs.
///
/// # Errors
/// Returns [`DistanceError::DimensionMismatch`] when the points have
/// different lengths.
///
/// # Examples
/// ```
/// use smote_core::interpolate;
///
/// assert_eq!(interpolate(&[0.0, 10.0], &[10.0, 0.0], 0.25)?, vec![2.5, 7.5]);
/// # Ok::<(), smote_core::DistanceError>(())
/// ```
pub fn interpolate(source: &[f64], neighbour: &[f64], gap: f64) -> distance::Result<Vec<f64>> {
    if source.len() != neighbour.len() {
        return Err(DistanceError::DimensionMismatch {
            left: source.len(),
            right: neighbour.len(),
        });
    }
    let blended = source
        .iter()
        .zip(neighbour)
        .map(|(&s, &n)| (1.0 - gap) * s + gap * n)
        .collect();
    Ok(blended)
}

/// A synthetic point before it is attached to the output collection.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Generated {
    pub(crate) coordinates: Vec<f64>,
    pub(crate) provenance: Provenance,
}

/// Emits interpolated points between a source and its neighbours.
#[derive(Clone, Copy, Debug, Default)]
pub struct SyntheticGenerator;

impl SyntheticGenerator {
    /// Produces exactly `count` synthetic points for `source`.
    ///
    /// Each point picks one neighbour uniformly from `neighbours` and one
    /// `gap` uniformly from `[0, 1)`. Provenance indices refer to `sample`.
    ///
    /// # Errors
    /// Returns [`SmoteError::InsufficientNeighbours`] when `count > 0` and the
    /// list is empty, and a wrapped [`DataSourceError::OutOfBounds`] when an
    /// index does not exist in `sample` or in `neighbours`.
    pub(crate) fn populate<R: Rng + ?Sized>(
        self,
        sample: &Sample,
        source: usize,
        neighbours: &NeighbourList,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<Generated>> {
        if count > 0 && neighbours.is_empty() {
            return Err(SmoteError::InsufficientNeighbours {
                k: neighbours.capacity(),
                available: 0,
            });
        }
        let origin = sample
            .require(source)
            .map_err(|error| SmoteError::from_data_source(sample.name(), error))?;

        let mut generated = Vec::with_capacity(count);
        for _ in 0..count {
            let position = rng.gen_range(0..neighbours.len());
            let record = neighbours
                .get(position)
                .ok_or(DataSourceError::OutOfBounds { index: position })
                .map_err(|error| SmoteError::from_data_source(sample.name(), error))?;
            let target = sample
                .require(record.neighbour)
                .map_err(|error| SmoteError::from_data_source(sample.name(), error))?;
            let gap: f64 = rng.sample(Standard);
            let coordinates = interpolate(origin, target, gap).map_err(|error| {
                SmoteError::from_data_source(
                    sample.name(),
                    DataSourceError::from_distance(error, source, record.neighbour),
                )
            })?;
            generated.push(Generated {
                coordinates,
                provenance: Provenance {
                    source,
                    neighbour: record.neighbour,
                    gap,
                },
            });
        }
        Ok(generated)
    }

    /// Produces `count` synthetic coordinate vectors for `source`.
    ///
    /// # Errors
    /// Returns [`SmoteError::InsufficientNeighbours`] when `count > 0` and the
    /// list is empty.
    ///
    /// # Examples
    /// ```
    /// use rand::{SeedableRng, rngs::SmallRng};
    /// use smote_core::{NeighbourFinder, Sample, SyntheticGenerator};
    /// use std::num::NonZeroUsize;
    ///
    /// let sample = Sample::try_new(vec![vec![0.0, 0.0], vec![2.0, 2.0], vec![9.0, 9.0]])?;
    /// let finder = NeighbourFinder::new(NonZeroUsize::new(1).expect("non-zero"));
    /// let list = finder.find(&sample, 0, 3)?;
    /// let mut rng = SmallRng::seed_from_u64(1);
    /// let points = SyntheticGenerator.generate(&sample, 0, &list, 3, &mut rng)?;
    /// assert_eq!(points.len(), 3);
    /// assert!(points.iter().all(|p| (0.0..2.0).contains(&p[0]) && p[0] == p[1]));
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn generate<R: Rng + ?Sized>(
        self,
        sample: &Sample,
        source: usize,
        neighbours: &NeighbourList,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<Vec<f64>>> {
        let generated = self.populate(sample, source, neighbours, count, rng)?;
        Ok(generated.into_iter().map(|g| g.coordinates).collect())
    }
}
