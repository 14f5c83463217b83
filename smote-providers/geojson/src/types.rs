//! Serde model of the GeoJSON subset read and written by the adapter.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
enum CollectionKind {
    #[default]
    FeatureCollection,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
enum FeatureKind {
    #[default]
    Feature,
}

/// A GeoJSON `FeatureCollection`.
///
/// # Examples
/// ```
/// use smote_providers_geojson::FeatureCollection;
///
/// let json = r#"{"type":"FeatureCollection","features":[]}"#;
/// let collection: FeatureCollection = serde_json::from_str(json)?;
/// assert!(collection.features.is_empty());
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    kind: CollectionKind,
    /// Features in document order.
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Wraps `features` in a collection.
    #[must_use]
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            kind: CollectionKind::FeatureCollection,
            features,
        }
    }
}

/// A single GeoJSON `Feature`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    kind: FeatureKind,
    /// Free-form metadata; `null` in the document maps to `None`.
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
    /// The feature geometry; `null` in the document maps to `None`.
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

impl Feature {
    /// Builds a feature from optional properties and a geometry.
    #[must_use]
    pub fn new(properties: Option<Map<String, Value>>, geometry: Geometry) -> Self {
        Self {
            kind: FeatureKind::Feature,
            properties,
            geometry: Some(geometry),
        }
    }
}

/// A GeoJSON geometry object.
///
/// Coordinates are kept as raw JSON so that numeric strings and geometry
/// kinds other than `Point` can be reported precisely during conversion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// The geometry `type`, e.g. `"Point"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Raw coordinate payload.
    #[serde(default)]
    pub coordinates: Value,
}

impl Geometry {
    /// Builds a `Point` geometry at `[x, y]`.
    ///
    /// # Examples
    /// ```
    /// use smote_providers_geojson::Geometry;
    ///
    /// let point = Geometry::point(1.5, -2.0);
    /// assert_eq!(point.kind, "Point");
    /// assert_eq!(serde_json::to_string(&point)?, r#"{"type":"Point","coordinates":[1.5,-2.0]}"#);
    /// # Ok::<(), serde_json::Error>(())
    /// ```
    #[must_use]
    pub fn point(x: f64, y: f64) -> Self {
        Self {
            kind: POINT.to_owned(),
            coordinates: Value::Array(vec![Value::from(x), Value::from(y)]),
        }
    }

    /// Returns whether this is a `Point` geometry.
    #[must_use]
    pub fn is_point(&self) -> bool {
        self.kind == POINT
    }
}

pub(crate) const POINT: &str = "Point";
