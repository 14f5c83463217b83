//! Result types for oversampling runs.

/// Where a synthetic point came from.
///
/// `source` and `neighbour` index the sample passed to [`crate::Smote::run`],
/// even when the undersampling pre-pass reordered the working set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Provenance {
    /// Index of the source point.
    pub source: usize,
    /// Index of the neighbour the point was interpolated towards.
    pub neighbour: usize,
    /// Interpolation factor in `[0, 1)`.
    pub gap: f64,
}

/// Output of a [`crate::Smote::run`] invocation.
///
/// Synthetic points are stored in source-point order; the points of one
/// source are contiguous.
///
/// # Examples
/// ```
/// use smote_core::{Provenance, SyntheticSample};
///
/// let result = SyntheticSample::from_parts(
///     vec![vec![0.5, 0.5]],
///     vec![Provenance { source: 0, neighbour: 1, gap: 0.5 }],
/// );
/// assert_eq!(result.len(), 1);
/// assert_eq!(result.dimension(), Some(2));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SyntheticSample {
    points: Vec<Vec<f64>>,
    provenance: Vec<Provenance>,
}

impl SyntheticSample {
    /// Builds a result from parallel point and provenance lists.
    ///
    /// # Panics
    /// Panics when the two lists differ in length.
    #[must_use]
    #[track_caller]
    pub fn from_parts(points: Vec<Vec<f64>>, provenance: Vec<Provenance>) -> Self {
        assert_eq!(
            points.len(),
            provenance.len(),
            "every synthetic point needs provenance"
        );
        Self { points, provenance }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
            provenance: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, point: Vec<f64>, provenance: Provenance) {
        self.points.push(point);
        self.provenance.push(provenance);
    }

    /// Returns the number of synthetic points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns whether no point was generated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the dimensionality of the generated points.
    #[must_use]
    pub fn dimension(&self) -> Option<usize> {
        self.points.first().map(Vec::len)
    }

    /// Returns the synthetic points.
    #[must_use]
    pub fn points(&self) -> &[Vec<f64>] {
        &self.points
    }

    /// Returns the provenance of each point, in the same order.
    #[must_use]
    pub fn provenance(&self) -> &[Provenance] {
        &self.provenance
    }

    /// Iterates `(point, provenance)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&[f64], &Provenance)> {
        self.points
            .iter()
            .map(Vec::as_slice)
            .zip(self.provenance.iter())
    }

    /// Consumes the result and returns the points.
    #[must_use]
    pub fn into_points(self) -> Vec<Vec<f64>> {
        self.points
    }
}
