//! Public behaviour of the GeoJSON adapter.

use proptest::{prelude::*, test_runner::Config as ProptestConfig};
use rand::{SeedableRng, rngs::SmallRng};
use serde_json::{Value, json};
use smote_core::{SmoteBuilder, SmoteError};
use smote_providers_geojson::{
    ProviderError, SmoteOutput, WorkingData, features_from_points, points_from_features,
    read_feature_collection, run_smote,
};
use smote_test_support::{
    fixtures::square_corners, proptest_profile::ProptestRunProfile, tracing::RecordingLayer,
};

fn stations() -> Value {
    json!({
        "type": "FeatureCollection",
        "features": square_corners()
            .into_iter()
            .enumerate()
            .map(|(id, point)| json!({
                "type": "Feature",
                "properties": {"station": id, "brand": "fuel"},
                "geometry": {"type": "Point", "coordinates": [point[0], point[1].to_string()]},
            }))
            .collect::<Vec<_>>(),
    })
}

#[test]
fn features_in_features_out() {
    let data = WorkingData::from_value(stations()).expect("collection parses");
    let smote = SmoteBuilder::new()
        .with_rate(200)
        .with_neighbours(2)
        .build()
        .expect("configuration is valid");
    let output = run_smote(&data, &smote, &mut SmallRng::seed_from_u64(31)).expect("run succeeds");

    let SmoteOutput::Features(collection) = output else {
        panic!("feature input must produce feature output");
    };
    assert_eq!(collection.features.len(), 8);
    for (index, feature) in collection.features.iter().enumerate() {
        let properties = feature.properties.as_ref().expect("synthetic properties");
        assert_eq!(properties.get("name"), Some(&json!("synthetic")));
        assert_eq!(properties.get("value"), Some(&json!(index)));
        assert!(properties.get("station").is_none());
    }
    for point in points_from_features(&collection.features).expect("output converts back") {
        assert!(point.iter().all(|c| (0.0..=10.0).contains(c)));
    }
}

#[test]
fn bare_feature_arrays_produce_a_collection() {
    let features = stations()["features"].clone();
    let data = WorkingData::from_value(features).expect("feature array parses");
    let smote = SmoteBuilder::new()
        .with_neighbours(1)
        .build()
        .expect("configuration is valid");
    let output = run_smote(&data, &smote, &mut SmallRng::seed_from_u64(8)).expect("run succeeds");

    let json = serde_json::to_value(&output).expect("output serialises");
    assert_eq!(json["type"], "FeatureCollection");
    assert_eq!(json["features"].as_array().map(Vec::len), Some(4));
}

#[test]
fn coordinates_in_coordinates_out() {
    let data = WorkingData::from_json("[[0, 0], [10, 0], [0, 10], [10, 10]]".as_bytes())
        .expect("coordinates parse");
    let smote = SmoteBuilder::new()
        .with_neighbours(1)
        .build()
        .expect("configuration is valid");
    let output = run_smote(&data, &smote, &mut SmallRng::seed_from_u64(4)).expect("run succeeds");

    let mut buffer = Vec::new();
    output.write_json(&mut buffer).expect("write succeeds");
    let written: Vec<Vec<f64>> = serde_json::from_slice(&buffer).expect("output is JSON");
    assert_eq!(written.len(), 4);
    assert!(written.iter().all(|point| point.len() == 2));
}

#[test]
fn core_failures_are_wrapped() {
    let data = WorkingData::from_json("[[0, 0], [1, 1], [2, 2]]".as_bytes())
        .expect("coordinates parse");
    let smote = SmoteBuilder::new().build().expect("defaults are valid");
    let (result, layer) =
        RecordingLayer::capture(|| run_smote(&data, &smote, &mut SmallRng::seed_from_u64(0)));

    let want = SmoteError::InsufficientNeighbours { k: 5, available: 2 };
    assert!(matches!(result, Err(ProviderError::Smote(e)) if e == want));
    let span = layer
        .span("geojson.run_smote")
        .expect("adapter span must exist");
    assert_eq!(span.field("shape"), Some("coordinates"));
    assert_eq!(span.field("points"), Some("3"));
}

#[test]
fn read_feature_collection_parses_documents() {
    let text = stations().to_string();
    let collection = read_feature_collection(text.as_bytes()).expect("collection parses");
    assert_eq!(
        points_from_features(&collection.features).expect("points convert"),
        square_corners()
    );
}

fn quarter_degrees() -> impl Strategy<Value = f64> {
    (-720_i32..720).prop_map(|quarters| f64::from(quarters) / 4.0)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: ProptestRunProfile::load(64).cases(),
        ..ProptestConfig::default()
    })]

    #[test]
    fn feature_round_trip_reproduces_coordinates(
        points in prop::collection::vec(prop::collection::vec(quarter_degrees(), 2), 1..16),
    ) {
        let collection = features_from_points(&points).expect("points have two coordinates");
        let text = serde_json::to_string(&collection).expect("collection serialises");
        let parsed = read_feature_collection(text.as_bytes()).expect("collection parses");
        prop_assert_eq!(points_from_features(&parsed.features).expect("points convert"), points);
    }
}
