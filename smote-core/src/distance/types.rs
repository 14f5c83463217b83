//! Domain primitives shared by the distance routines.

use core::{fmt, ops::Deref};

use thiserror::Error;

/// Identifies whether an error was produced while inspecting the left or right
/// point argument.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VectorKind {
    /// Value originating from the first argument.
    Left,
    /// Value originating from the second argument.
    Right,
}

impl fmt::Display for VectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

/// Errors emitted while computing distances.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DistanceError {
    /// Either input point had zero length.
    #[error("points must have positive dimension")]
    ZeroLength,
    /// Input points had different lengths.
    #[error("dimension mismatch: left={left}, right={right}")]
    DimensionMismatch {
        /// Dimensionality of the left-hand point.
        left: usize,
        /// Dimensionality of the right-hand point.
        right: usize,
    },
    /// Encountered a non-finite coordinate in one of the points.
    #[error("{which} point contains a non-finite value at index {index}: {value}")]
    NonFinite {
        /// Argument holding the offending coordinate.
        which: VectorKind,
        /// Position of the coordinate within the point.
        index: usize,
        /// The non-finite value itself.
        value: f64,
    },
    /// The distance between two finite points exceeds `f64::MAX`.
    #[error("distance between the points does not fit in an f64")]
    Overflow,
}

/// Convenient alias for distance computations.
pub type Result<T> = core::result::Result<T, DistanceError>;

/// Point view that validates dimensionality and finiteness on construction.
#[derive(Clone, Copy, Debug)]
pub struct Vector<'a>(&'a [f64]);

impl<'a> Vector<'a> {
    /// Validates and constructs a [`Vector`].
    ///
    /// # Errors
    ///
    /// Returns [`DistanceError::ZeroLength`] when the slice is empty and
    /// [`DistanceError::NonFinite`] when a value is NaN or infinite.
    pub fn new(values: &'a [f64], which: VectorKind) -> Result<Self> {
        if values.is_empty() {
            return Err(DistanceError::ZeroLength);
        }

        if let Some((index, value)) = values
            .iter()
            .copied()
            .enumerate()
            .find(|(_, value)| !value.is_finite())
        {
            return Err(DistanceError::NonFinite {
                which,
                index,
                value,
            });
        }

        Ok(Self(values))
    }

    /// Returns the dimensionality of the point.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.0.len()
    }
}

impl AsRef<[f64]> for Vector<'_> {
    fn as_ref(&self) -> &[f64] {
        self.0
    }
}

impl Deref for Vector<'_> {
    type Target = [f64];

    fn deref(&self) -> &Self::Target {
        self.0
    }
}

/// Distance result newtype. Always finite and non-negative.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Distance(f64);

impl Distance {
    pub(crate) fn from_raw(value: f64) -> Self {
        Self(value)
    }

    /// Returns the raw distance value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Deref for Distance {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
