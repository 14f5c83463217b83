//! GeoJSON adapter for the SMOTE oversampler.
//!
//! Reads either a plain array of coordinate arrays or a `FeatureCollection`
//! of `Point` features and writes synthetic points back in the same shape.

mod convert;
mod dispatch;
mod errors;
mod types;

pub use convert::{features_from_points, points_from_features};
pub use dispatch::{SmoteOutput, WorkingData, read_feature_collection, run_smote};
pub use errors::{GeoJsonError, ProviderError};
pub use types::{Feature, FeatureCollection, Geometry};
