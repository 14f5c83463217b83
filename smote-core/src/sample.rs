//! Validated point collections.
//!
//! A [`Sample`] owns an ordered list of coordinate vectors that all share one
//! dimensionality and contain only finite values. Order defines identity for
//! neighbour lookups and carries no other meaning.

use crate::{datasource::DataSource, distance::euclidean_distance, error::DataSourceError};

const DEFAULT_NAME: &str = "sample";

/// Ordered, uniformly shaped collection of points.
///
/// # Examples
/// ```
/// use smote_core::{DataSource, Sample};
///
/// let sample = Sample::try_new(vec![vec![0.0, 0.0], vec![3.0, 4.0]])?;
/// assert_eq!(sample.len(), 2);
/// assert_eq!(sample.dimension(), 2);
/// assert_eq!(sample.distance(0, 1)?, 5.0);
/// # Ok::<(), smote_core::DataSourceError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Sample {
    points: Vec<Vec<f64>>,
    dimension: usize,
    name: String,
}

impl Sample {
    /// Validates `points` and wraps them in a sample named `"sample"`.
    ///
    /// # Errors
    /// Returns [`DataSourceError::EmptyData`] for an empty collection,
    /// [`DataSourceError::ZeroDimension`] when the first point is empty,
    /// [`DataSourceError::RaggedRow`] when a point's length differs from the
    /// first, and [`DataSourceError::NonFinite`] for NaN or infinite values.
    pub fn try_new(points: Vec<Vec<f64>>) -> Result<Self, DataSourceError> {
        Self::try_with_name(DEFAULT_NAME, points)
    }

    /// Validates `points` and wraps them in a sample with a diagnostic name.
    ///
    /// # Errors
    /// See [`Sample::try_new`].
    pub fn try_with_name(
        name: impl Into<String>,
        points: Vec<Vec<f64>>,
    ) -> Result<Self, DataSourceError> {
        let dimension = validate_points(&points)?;
        Ok(Self {
            points,
            dimension,
            name: name.into(),
        })
    }

    /// Returns the shared dimensionality of every point.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Returns the point at `index`, if present.
    #[must_use]
    pub fn point(&self, index: usize) -> Option<&[f64]> {
        self.points.get(index).map(Vec::as_slice)
    }

    /// Returns all points in order.
    #[must_use]
    pub fn points(&self) -> &[Vec<f64>] {
        &self.points
    }

    /// Consumes the sample and returns its points.
    #[must_use]
    pub fn into_points(self) -> Vec<Vec<f64>> {
        self.points
    }

    /// Builds a new sample from the points at `indices`, in that order.
    ///
    /// # Errors
    /// Returns [`DataSourceError::OutOfBounds`] for an invalid index and
    /// [`DataSourceError::EmptyData`] when `indices` is empty.
    pub fn select(&self, indices: &[usize]) -> Result<Self, DataSourceError> {
        if indices.is_empty() {
            return Err(DataSourceError::EmptyData);
        }
        let points = indices
            .iter()
            .map(|&index| {
                self.points
                    .get(index)
                    .cloned()
                    .ok_or(DataSourceError::OutOfBounds { index })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            points,
            dimension: self.dimension,
            name: self.name.clone(),
        })
    }

    pub(crate) fn require(&self, index: usize) -> Result<&[f64], DataSourceError> {
        self.point(index)
            .ok_or(DataSourceError::OutOfBounds { index })
    }
}

impl DataSource for Sample {
    fn len(&self) -> usize {
        self.points.len()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn distance(&self, i: usize, j: usize) -> Result<f64, DataSourceError> {
        let left = self.require(i)?;
        let right = self.require(j)?;
        euclidean_distance(left, right)
            .map(|distance| distance.value())
            .map_err(|error| DataSourceError::from_distance(error, i, j))
    }
}

impl TryFrom<Vec<Vec<f64>>> for Sample {
    type Error = DataSourceError;

    fn try_from(points: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::try_new(points)
    }
}

fn validate_points(points: &[Vec<f64>]) -> Result<usize, DataSourceError> {
    let Some(first) = points.first() else {
        return Err(DataSourceError::EmptyData);
    };
    let dimension = first.len();
    if dimension == 0 {
        return Err(DataSourceError::ZeroDimension);
    }

    for (row, point) in points.iter().enumerate() {
        if point.len() != dimension {
            return Err(DataSourceError::RaggedRow {
                row,
                expected: dimension,
                actual: point.len(),
            });
        }
        if let Some((column, &value)) = point.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(DataSourceError::NonFinite { row, column, value });
        }
    }
    Ok(dimension)
}
