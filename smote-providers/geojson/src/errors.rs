//! Error types raised while reading, converting and oversampling GeoJSON
//! input.

use smote_core::{DataSourceError, SmoteError};
use thiserror::Error;

/// Failures converting between GeoJSON features and coordinate vectors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoJsonError {
    /// A feature's geometry is missing or is not a `Point`.
    #[error("feature {feature} has a `{kind}` geometry; only `Point` is supported")]
    UnsupportedGeometry {
        /// Position of the feature in its collection.
        feature: usize,
        /// The geometry `type`, or `"null"` when the geometry is absent.
        kind: String,
    },
    /// A `Point` carries fewer than two coordinates.
    #[error("feature {feature} has {found} coordinates but a point needs 2")]
    MissingCoordinates {
        /// Position of the feature in its collection.
        feature: usize,
        /// Number of coordinates present.
        found: usize,
    },
    /// A coordinate is neither a finite number nor a numeric string.
    #[error("feature {feature} coordinate {position} is not a finite number: {raw}")]
    InvalidCoordinate {
        /// Position of the feature in its collection.
        feature: usize,
        /// Coordinate position within the point, 0 for `x`.
        position: usize,
        /// The offending JSON value.
        raw: String,
    },
    /// A synthetic point has too few coordinates to become a feature.
    #[error("point {index} has dimension {dimension}; features need at least 2 coordinates")]
    PointTooShort {
        /// Position of the point in the output.
        index: usize,
        /// Number of coordinates the point has.
        dimension: usize,
    },
}

/// Failures reading working data or oversampling it.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The document is neither coordinate arrays nor Point features.
    #[error("expected an array of coordinate arrays or a FeatureCollection, found {found}")]
    UnrecognisedShape {
        /// Description of the top-level value that was found.
        found: &'static str,
    },
    /// Features could not be converted to or from points.
    #[error(transparent)]
    GeoJson(#[from] GeoJsonError),
    /// The extracted points do not form a valid sample.
    #[error("invalid working data: {0}")]
    InvalidSample(#[from] DataSourceError),
    /// The oversampling run failed.
    #[error(transparent)]
    Smote(#[from] SmoteError),
    /// The document is not valid JSON for the detected shape.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    /// Writing rendered output failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
