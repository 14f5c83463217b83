//! Shape-preserving oversampling of coordinate arrays and feature collections.

use std::io::{Read, Write};

use rand::Rng;
use serde::Serialize;
use serde_json::Value;
use smote_core::{Sample, Smote};
use tracing::{debug, instrument};

use crate::{
    convert::{features_from_points, points_from_features},
    errors::ProviderError,
    types::{Feature, FeatureCollection},
};

const COORDINATES_NAME: &str = "coordinates";
const FEATURES_NAME: &str = "features";

/// Working data in one of the two accepted input shapes.
#[derive(Clone, Debug, PartialEq)]
pub enum WorkingData {
    /// A JSON array of coordinate arrays.
    Coordinates(Sample),
    /// `Point` features, from a `FeatureCollection` or a bare feature array.
    Features(FeatureCollection),
}

impl WorkingData {
    /// Reads working data, choosing the shape from the document structure.
    ///
    /// A top-level array whose elements are all arrays is read as
    /// coordinates. An object whose `type` is `"FeatureCollection"` is read as
    /// features, and so is a non-empty array whose elements are all objects
    /// with `"type": "Feature"`. Either feature form produces a
    /// `FeatureCollection` on output.
    ///
    /// # Errors
    /// Returns [`ProviderError::UnrecognisedShape`] for any other document,
    /// [`ProviderError::Json`] for malformed JSON and
    /// [`ProviderError::InvalidSample`] for empty, ragged or non-finite
    /// coordinate arrays.
    ///
    /// # Examples
    /// ```
    /// use smote_providers_geojson::WorkingData;
    ///
    /// let data = WorkingData::from_json("[[0, 0], [1, 1], [2, 0]]".as_bytes())?;
    /// assert!(matches!(data, WorkingData::Coordinates(_)));
    /// assert_eq!(data.shape(), "coordinates");
    /// # Ok::<(), smote_providers_geojson::ProviderError>(())
    /// ```
    pub fn from_json<R: Read>(reader: R) -> Result<Self, ProviderError> {
        let document: Value = serde_json::from_reader(reader)?;
        Self::from_value(document)
    }

    /// Interprets an already parsed JSON document.
    ///
    /// # Errors
    /// See [`WorkingData::from_json`].
    pub fn from_value(document: Value) -> Result<Self, ProviderError> {
        match classify(&document) {
            Shape::Coordinates => {
                let points: Vec<Vec<f64>> = serde_json::from_value(document)?;
                Ok(Self::Coordinates(Sample::try_with_name(
                    COORDINATES_NAME,
                    points,
                )?))
            }
            Shape::Features => Ok(Self::Features(serde_json::from_value(document)?)),
            Shape::FeatureArray => {
                let features: Vec<Feature> = serde_json::from_value(document)?;
                Ok(Self::Features(FeatureCollection::new(features)))
            }
            Shape::Unrecognised(found) => Err(ProviderError::UnrecognisedShape { found }),
        }
    }

    /// Returns `"coordinates"` or `"features"`.
    #[must_use]
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Coordinates(_) => COORDINATES_NAME,
            Self::Features(_) => FEATURES_NAME,
        }
    }

    /// Returns the number of input points.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Coordinates(sample) => sample.points().len(),
            Self::Features(collection) => collection.features.len(),
        }
    }

    /// Returns whether there are no input points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

enum Shape {
    Coordinates,
    Features,
    FeatureArray,
    Unrecognised(&'static str),
}

fn classify(document: &Value) -> Shape {
    match document {
        Value::Array(rows) if rows.iter().all(Value::is_array) => Shape::Coordinates,
        Value::Array(items) if is_feature_array(items) => Shape::FeatureArray,
        Value::Object(members)
            if members.get("type").and_then(Value::as_str) == Some("FeatureCollection") =>
        {
            Shape::Features
        }
        Value::Null => Shape::Unrecognised("null"),
        Value::Bool(_) => Shape::Unrecognised("a boolean"),
        Value::Number(_) => Shape::Unrecognised("a number"),
        Value::String(_) => Shape::Unrecognised("a string"),
        Value::Array(_) => Shape::Unrecognised("an array of neither coordinates nor features"),
        Value::Object(_) => Shape::Unrecognised("an object that is not a FeatureCollection"),
    }
}

fn is_feature_array(items: &[Value]) -> bool {
    !items.is_empty() && items.iter().all(is_feature)
}

fn is_feature(item: &Value) -> bool {
    item.get("type").and_then(Value::as_str) == Some("Feature")
}

/// Reads a GeoJSON `FeatureCollection`.
///
/// # Errors
/// Returns [`ProviderError::Json`] when the document is malformed or is not a
/// `FeatureCollection`.
pub fn read_feature_collection<R: Read>(reader: R) -> Result<FeatureCollection, ProviderError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Synthetic points in the same shape as the input.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SmoteOutput {
    /// Synthetic coordinate arrays.
    Coordinates(Vec<Vec<f64>>),
    /// Synthetic points wrapped as features.
    Features(FeatureCollection),
}

impl SmoteOutput {
    /// Returns the number of synthetic points.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Coordinates(points) => points.len(),
            Self::Features(collection) => collection.features.len(),
        }
    }

    /// Returns whether no synthetic point was produced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Writes the output as compact JSON.
    ///
    /// # Errors
    /// Returns [`ProviderError::Json`] when serialisation or the underlying
    /// write fails.
    pub fn write_json<W: Write>(&self, writer: W) -> Result<(), ProviderError> {
        serde_json::to_writer(writer, self)?;
        Ok(())
    }
}

/// Oversamples `data` with `smote`, returning output of the same shape.
///
/// Feature metadata is discarded on the way in; every synthetic feature is
/// tagged `{"name": "synthetic", "value": i}`.
///
/// # Errors
/// Returns [`ProviderError::GeoJson`] when features cannot be converted,
/// [`ProviderError::InvalidSample`] when the extracted points are invalid and
/// [`ProviderError::Smote`] when the run fails.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use smote_core::SmoteBuilder;
/// use smote_providers_geojson::{SmoteOutput, WorkingData, run_smote};
///
/// let data = WorkingData::from_json("[[0, 0], [10, 0], [0, 10], [10, 10]]".as_bytes())?;
/// let smote = SmoteBuilder::new().with_neighbours(1).build()?;
/// let output = run_smote(&data, &smote, &mut SmallRng::seed_from_u64(1))?;
/// assert!(matches!(output, SmoteOutput::Coordinates(ref points) if points.len() == 4));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[instrument(
    name = "geojson.run_smote",
    err,
    skip(data, smote, rng),
    fields(shape = data.shape(), points = data.len()),
)]
pub fn run_smote<R: Rng + ?Sized>(
    data: &WorkingData,
    smote: &Smote,
    rng: &mut R,
) -> Result<SmoteOutput, ProviderError> {
    match data {
        WorkingData::Coordinates(sample) => {
            let synthetic = smote.run(sample, rng)?;
            Ok(SmoteOutput::Coordinates(synthetic.into_points()))
        }
        WorkingData::Features(collection) => {
            let points = points_from_features(&collection.features)?;
            debug!(points = points.len(), "extracted point features");
            let sample = Sample::try_with_name(FEATURES_NAME, points)?;
            let synthetic = smote.run(&sample, rng)?;
            Ok(SmoteOutput::Features(features_from_points(
                synthetic.points(),
            )?))
        }
    }
}
