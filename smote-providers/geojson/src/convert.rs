//! Conversion between GeoJSON point features and coordinate vectors.

use serde_json::{Map, Value};

use crate::{
    errors::GeoJsonError,
    types::{Feature, FeatureCollection, Geometry},
};

const SYNTHETIC_NAME: &str = "synthetic";

/// Extracts `[x, y]` from every `Point` feature, discarding metadata.
///
/// Coordinates may be JSON numbers or numeric strings; strings are read up to
/// the longest numeric prefix, so `"12.5abc"` yields `12.5`. Coordinates past
/// the second (such as altitude) are ignored.
///
/// # Errors
/// Returns [`GeoJsonError::UnsupportedGeometry`] for missing or non-`Point`
/// geometries, [`GeoJsonError::MissingCoordinates`] when fewer than two
/// coordinates are present and [`GeoJsonError::InvalidCoordinate`] when a
/// coordinate is not a finite number.
///
/// # Examples
/// ```
/// use smote_providers_geojson::{FeatureCollection, points_from_features};
///
/// let json = r#"{"type":"FeatureCollection","features":[
///     {"type":"Feature","properties":{"id":7},"geometry":{"type":"Point","coordinates":[1.5,"2.25"]}}
/// ]}"#;
/// let collection: FeatureCollection = serde_json::from_str(json)?;
/// assert_eq!(points_from_features(&collection.features)?, vec![vec![1.5, 2.25]]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn points_from_features(features: &[Feature]) -> Result<Vec<Vec<f64>>, GeoJsonError> {
    features
        .iter()
        .enumerate()
        .map(|(index, feature)| point_from_feature(index, feature))
        .collect()
}

fn point_from_feature(feature: usize, item: &Feature) -> Result<Vec<f64>, GeoJsonError> {
    let Some(geometry) = item.geometry.as_ref() else {
        return Err(GeoJsonError::UnsupportedGeometry {
            feature,
            kind: "null".to_owned(),
        });
    };
    if !geometry.is_point() {
        return Err(GeoJsonError::UnsupportedGeometry {
            feature,
            kind: geometry.kind.clone(),
        });
    }
    let coordinates = geometry
        .coordinates
        .as_array()
        .map_or(&[][..], Vec::as_slice);
    if coordinates.len() < 2 {
        return Err(GeoJsonError::MissingCoordinates {
            feature,
            found: coordinates.len(),
        });
    }
    coordinates
        .iter()
        .take(2)
        .enumerate()
        .map(|(position, raw)| {
            coordinate(raw).ok_or_else(|| GeoJsonError::InvalidCoordinate {
                feature,
                position,
                raw: raw.to_string(),
            })
        })
        .collect()
}

fn coordinate(raw: &Value) -> Option<f64> {
    let value = match raw {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => parse_numeric_prefix(text),
        _ => None,
    }?;
    value.is_finite().then_some(value)
}

/// Parses the longest prefix of `text` (after leading whitespace) that forms
/// a decimal number.
pub(crate) fn parse_numeric_prefix(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let integer_digits = count_digits(bytes, end);
    end += integer_digits;
    let mut mantissa_digits = integer_digits;
    if bytes.get(end) == Some(&b'.') {
        let fraction = count_digits(bytes, end + 1);
        if mantissa_digits > 0 || fraction > 0 {
            end += 1 + fraction;
            mantissa_digits += fraction;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent = end + 1;
        if matches!(bytes.get(exponent), Some(b'+' | b'-')) {
            exponent += 1;
        }
        let exponent_digits = count_digits(bytes, exponent);
        if exponent_digits > 0 {
            end = exponent + exponent_digits;
        }
    }
    trimmed.get(..end)?.parse().ok()
}

/// Counts the ASCII digits in `bytes` starting at `start`.
fn count_digits(bytes: &[u8], start: usize) -> usize {
    bytes
        .iter()
        .skip(start)
        .take_while(|byte| byte.is_ascii_digit())
        .count()
}

/// Wraps each point as a `Point` feature tagged as synthetic.
///
/// The `i`-th point gets the properties `{"name": "synthetic", "value": i}`;
/// coordinates past the second are dropped.
///
/// # Errors
/// Returns [`GeoJsonError::PointTooShort`] for points with fewer than two
/// coordinates.
///
/// # Examples
/// ```
/// use smote_providers_geojson::features_from_points;
///
/// let collection = features_from_points(&[vec![3.0, 4.0]])?;
/// let json = serde_json::to_value(&collection)?;
/// assert_eq!(json["features"][0]["properties"]["name"], "synthetic");
/// assert_eq!(json["features"][0]["properties"]["value"], 0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn features_from_points(points: &[Vec<f64>]) -> Result<FeatureCollection, GeoJsonError> {
    let features = points
        .iter()
        .enumerate()
        .map(|(index, point)| match point.as_slice() {
            [x, y, ..] => Ok(Feature::new(
                Some(synthetic_properties(index)),
                Geometry::point(*x, *y),
            )),
            _ => Err(GeoJsonError::PointTooShort {
                index,
                dimension: point.len(),
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(FeatureCollection::new(features))
}

fn synthetic_properties(index: usize) -> Map<String, Value> {
    let mut properties = Map::new();
    properties.insert("name".to_owned(), Value::from(SYNTHETIC_NAME));
    properties.insert("value".to_owned(), Value::from(index));
    properties
}
