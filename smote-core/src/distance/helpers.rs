//! Shared helpers for distance implementations.

use super::types::{DistanceError, Result, Vector};

/// Ensures both points share the same dimensionality.
pub(crate) fn validate_dimensions(left: &Vector<'_>, right: &Vector<'_>) -> Result<()> {
    if left.dimension() != right.dimension() {
        return Err(DistanceError::DimensionMismatch {
            left: left.dimension(),
            right: right.dimension(),
        });
    }
    Ok(())
}
