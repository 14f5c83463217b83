//! Error types for the SMOTE core library.
//!
//! Defines error enums exposed by the public API, their stable codes, and a
//! convenient result alias.

use std::{fmt, sync::Arc};

use thiserror::Error;

use crate::distance::DistanceError;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced by [`crate::DataSource`] operations or while validating a
/// [`crate::Sample`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DataSourceError {
    /// Requested index was outside the source's bounds.
    #[error("index {index} is out of bounds")]
    OutOfBounds {
        /// The requested row that exceeded the source bounds.
        index: usize,
    },
    /// Compared points had different dimensions.
    #[error("dimension mismatch: left={left}, right={right}")]
    DimensionMismatch {
        /// Dimensionality of the left-hand point.
        left: usize,
        /// Dimensionality of the right-hand point.
        right: usize,
    },
    /// Data source contained no rows.
    #[error("data source contains no rows")]
    EmptyData,
    /// Data source rows must have positive dimension.
    #[error("data source points must have positive dimension")]
    ZeroDimension,
    /// A row's length differed from the first row.
    #[error("row {row} has {actual} coordinates but row 0 has {expected}")]
    RaggedRow {
        /// Offending row.
        row: usize,
        /// Dimensionality established by the first row.
        expected: usize,
        /// Dimensionality of the offending row.
        actual: usize,
    },
    /// A coordinate was NaN or infinite.
    #[error("row {row} contains a non-finite value at column {column}: {value}")]
    NonFinite {
        /// Offending row.
        row: usize,
        /// Offending coordinate position.
        column: usize,
        /// The non-finite value.
        value: f64,
    },
    /// The distance between two rows is too large to represent.
    #[error("distance between rows {row} and {other_row} overflows f64")]
    DistanceOverflow {
        /// First compared row.
        row: usize,
        /// Second compared row.
        other_row: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`DataSourceError`] variants.
    enum DataSourceErrorCode for DataSourceError {
        /// Requested index was outside the source's bounds.
        OutOfBounds => OutOfBounds { .. } => "DATA_SOURCE_OUT_OF_BOUNDS",
        /// Compared points had different dimensions.
        DimensionMismatch => DimensionMismatch { .. } => "DATA_SOURCE_DIMENSION_MISMATCH",
        /// Data source contained no rows.
        EmptyData => EmptyData => "DATA_SOURCE_EMPTY",
        /// Data source rows must have positive dimension.
        ZeroDimension => ZeroDimension => "DATA_SOURCE_ZERO_DIMENSION",
        /// A row's length differed from the first row.
        RaggedRow => RaggedRow { .. } => "DATA_SOURCE_RAGGED_ROW",
        /// A coordinate was NaN or infinite.
        NonFinite => NonFinite { .. } => "DATA_SOURCE_NON_FINITE",
        /// The distance between two rows is too large to represent.
        DistanceOverflow => DistanceOverflow { .. } => "DATA_SOURCE_DISTANCE_OVERFLOW",
    }
}

impl DataSourceError {
    /// Converts a [`DistanceError`] raised while comparing `row` against
    /// another point.
    ///
    /// Non-finite coordinates on the right-hand side are attributed to
    /// `other_row`.
    #[must_use]
    pub fn from_distance(error: DistanceError, row: usize, other_row: usize) -> Self {
        match error {
            DistanceError::ZeroLength => Self::ZeroDimension,
            DistanceError::DimensionMismatch { left, right } => {
                Self::DimensionMismatch { left, right }
            }
            DistanceError::NonFinite {
                which,
                index,
                value,
            } => Self::NonFinite {
                row: match which {
                    crate::distance::VectorKind::Left => row,
                    crate::distance::VectorKind::Right => other_row,
                },
                column: index,
                value,
            },
            DistanceError::Overflow => Self::DistanceOverflow { row, other_row },
        }
    }
}

/// Broad classification of a [`SmoteError`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorCategory {
    /// Two compared points had different lengths.
    DimensionMismatch,
    /// A numeric parameter was non-positive or too large for the sample.
    InvalidParameter,
    /// The sample itself was empty or malformed.
    InvalidInput,
}

/// Error type produced when configuring or running the oversampler.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SmoteError {
    /// Two compared points had different lengths.
    #[error("dimension mismatch: left={left}, right={right}")]
    DimensionMismatch {
        /// Dimensionality of the left-hand point.
        left: usize,
        /// Dimensionality of the right-hand point.
        right: usize,
    },
    /// The number of source points must be at least one.
    #[error("sample count must be at least 1 (got {got})")]
    InvalidSampleCount {
        /// The invalid count supplied by the caller.
        got: usize,
    },
    /// The oversampling rate must be a positive percentage.
    #[error("oversampling rate must be at least 1% (got {got})")]
    InvalidRate {
        /// The invalid rate supplied by the caller.
        got: u32,
    },
    /// At least one neighbour is required.
    #[error("neighbour count must be at least 1 (got {got})")]
    InvalidNeighbourCount {
        /// The invalid neighbour count supplied by the caller.
        got: usize,
    },
    /// The sample count exceeds the number of available points.
    #[error("sample count {requested} exceeds the {available} available points")]
    SampleCountExceedsData {
        /// Sample count supplied by the caller.
        requested: usize,
        /// Number of points in the data source.
        available: usize,
    },
    /// The working set cannot provide `k` neighbours per point.
    #[error("{k} neighbours requested but only {available} are available per point")]
    InsufficientNeighbours {
        /// Neighbour count supplied by the caller.
        k: usize,
        /// Neighbours available to each point in the working set.
        available: usize,
    },
    /// A [`crate::DataSource`] operation failed while running the algorithm.
    #[error("data source `{data_source}` failed: {error}")]
    DataSource {
        /// Identifier for the data source that produced the error.
        data_source: Arc<str>,
        #[source]
        /// Underlying data source error bubbled up by the algorithm.
        error: DataSourceError,
    },
}

define_error_codes! {
    /// Stable codes describing [`SmoteError`] variants.
    enum SmoteErrorCode for SmoteError {
        /// Two compared points had different lengths.
        DimensionMismatch => DimensionMismatch { .. } => "SMOTE_DIMENSION_MISMATCH",
        /// The number of source points must be at least one.
        InvalidSampleCount => InvalidSampleCount { .. } => "SMOTE_INVALID_SAMPLE_COUNT",
        /// The oversampling rate must be a positive percentage.
        InvalidRate => InvalidRate { .. } => "SMOTE_INVALID_RATE",
        /// At least one neighbour is required.
        InvalidNeighbourCount => InvalidNeighbourCount { .. } => "SMOTE_INVALID_NEIGHBOUR_COUNT",
        /// The sample count exceeds the number of available points.
        SampleCountExceedsData => SampleCountExceedsData { .. } => "SMOTE_SAMPLE_COUNT_EXCEEDS_DATA",
        /// The working set cannot provide `k` neighbours per point.
        InsufficientNeighbours => InsufficientNeighbours { .. } => "SMOTE_INSUFFICIENT_NEIGHBOURS",
        /// A [`crate::DataSource`] operation failed while running the algorithm.
        DataSourceFailure => DataSource { .. } => "SMOTE_DATA_SOURCE_FAILURE",
    }
}

impl SmoteError {
    /// Wraps a [`DataSourceError`] raised by `data_source`.
    ///
    /// Dimension mismatches are lifted to [`SmoteError::DimensionMismatch`]
    /// so callers see them as a first-class failure of the invocation.
    #[must_use]
    pub fn from_data_source(data_source: &str, error: DataSourceError) -> Self {
        match error {
            DataSourceError::DimensionMismatch { left, right } => {
                Self::DimensionMismatch { left, right }
            }
            error => Self::DataSource {
                data_source: Arc::from(data_source),
                error,
            },
        }
    }

    /// Returns the broad category of this error.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::DimensionMismatch { .. }
            | Self::DataSource {
                error: DataSourceError::DimensionMismatch { .. },
                ..
            } => ErrorCategory::DimensionMismatch,
            Self::InvalidSampleCount { .. }
            | Self::InvalidRate { .. }
            | Self::InvalidNeighbourCount { .. }
            | Self::SampleCountExceedsData { .. }
            | Self::InsufficientNeighbours { .. } => ErrorCategory::InvalidParameter,
            Self::DataSource { .. } => ErrorCategory::InvalidInput,
        }
    }

    /// Retrieve the inner [`DataSourceErrorCode`] when the error originated in a [`crate::DataSource`].
    pub const fn data_source_code(&self) -> Option<DataSourceErrorCode> {
        match self {
            Self::DataSource { error, .. } => Some(error.code()),
            _ => None,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, SmoteError>;
