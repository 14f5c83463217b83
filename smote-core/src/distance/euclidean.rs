use crate::distance::helpers::validate_dimensions;
use crate::distance::types::{Distance, DistanceError, Result, Vector, VectorKind};

/// Computes the Euclidean distance between two points.
///
/// Coordinates close to `f64::MAX` are rescaled before squaring, so the
/// result is exact whenever it is representable.
///
/// # Examples
///
/// ```
/// use smote_core::{DistanceError, euclidean_distance};
///
/// fn main() -> Result<(), DistanceError> {
///     let distance = euclidean_distance(&[1.0, 2.0], &[4.0, 6.0])?;
///     assert!((distance.value() - 5.0).abs() < 1e-12);
///     Ok(())
/// }
/// ```
///
/// # Errors
///
/// - [`DistanceError::ZeroLength`](crate::DistanceError::ZeroLength) when any input is empty.
/// - [`DistanceError::DimensionMismatch`](crate::DistanceError::DimensionMismatch) when input
///   lengths differ.
/// - [`DistanceError::NonFinite`](crate::DistanceError::NonFinite) when a value is NaN or
///   infinite.
/// - [`DistanceError::Overflow`](crate::DistanceError::Overflow) when the distance itself
///   exceeds `f64::MAX`.
pub fn euclidean_distance(left: &[f64], right: &[f64]) -> Result<Distance> {
    let lhs = Vector::new(left, VectorKind::Left)?;
    let rhs = Vector::new(right, VectorKind::Right)?;
    validate_dimensions(&lhs, &rhs)?;

    let sum = squared_sum(&lhs, &rhs, 1.0);
    if sum.is_finite() {
        return Ok(Distance::from_raw(sum.sqrt()));
    }
    scaled_distance(&lhs, &rhs)
}

fn squared_sum(left: &[f64], right: &[f64], scale: f64) -> f64 {
    left.iter()
        .zip(right)
        .map(|(&l, &r)| {
            let diff = r / scale - l / scale;
            diff * diff
        })
        .sum()
}

// The squares overflowed: divide by the largest magnitude so every term is
// at most 4, then restore the scale after the square root.
fn scaled_distance(left: &[f64], right: &[f64]) -> Result<Distance> {
    let scale = left
        .iter()
        .chain(right)
        .fold(0.0_f64, |largest, value| largest.max(value.abs()));
    let distance = scale * squared_sum(left, right, scale).sqrt();
    if distance.is_finite() {
        Ok(Distance::from_raw(distance))
    } else {
        Err(DistanceError::Overflow)
    }
}
