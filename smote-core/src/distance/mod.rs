//! Euclidean distance between coordinate vectors.
//!
//! The routine validates its inputs and surfaces detailed errors so a
//! mismatched or corrupted point aborts the current computation instead of
//! leaking a NaN into the neighbour ordering.

mod euclidean;
mod helpers;
mod types;

pub use self::euclidean::euclidean_distance;
pub use self::types::{Distance, DistanceError, Result, Vector, VectorKind};
