//! End-to-end behaviour of the oversampling pipeline.

mod common;

use common::{assert_on_segment, sample};
use rand::{SeedableRng, rngs::SmallRng};
use rstest::{fixture, rstest};
use smote_core::{
    DataSource, DataSourceErrorCode, ErrorCategory, Sample, SmoteBuilder, SmoteError,
    SmoteErrorCode, SyntheticSample, smote,
};
use smote_test_support::{
    fixtures::{grid, square_corners},
    tracing::RecordingLayer,
};
use tracing::Level;

#[fixture]
fn square() -> Sample {
    sample(square_corners())
}

#[fixture]
fn ten_points() -> Sample {
    sample(grid(5, 2))
}

fn seeded(sample: &Sample, count: usize, rate: u32, k: usize, seed: u64) -> SyntheticSample {
    smote(sample, count, rate, k, &mut SmallRng::seed_from_u64(seed)).expect("run succeeds")
}

#[rstest]
fn square_corners_interpolate_towards_first_nearest_neighbour(square: Sample) {
    let mut rng = SmallRng::seed_from_u64(2024);
    let synthetic = smote(&square, 4, 100, 1, &mut rng).expect("run succeeds");

    assert_eq!(synthetic.len(), 4);
    assert_eq!(synthetic.dimension(), Some(2));
    let neighbours: Vec<usize> = synthetic.iter().map(|(_, p)| p.neighbour).collect();
    assert_eq!(neighbours, vec![1, 0, 0, 1]);

    for (point, provenance) in synthetic.iter() {
        let source = square.point(provenance.source).expect("source exists");
        let neighbour = square
            .point(provenance.neighbour)
            .expect("neighbour exists");
        let distance = square
            .distance(provenance.source, provenance.neighbour)
            .expect("indices are valid");
        assert!((distance - 10.0).abs() < 1e-12);
        assert_on_segment(point, source, neighbour, provenance.gap);
    }
}

#[rstest]
fn half_rate_processes_half_of_a_random_subset(ten_points: Sample) {
    let mut rng = SmallRng::seed_from_u64(5);
    let synthetic = smote(&ten_points, 10, 50, 3, &mut rng).expect("run succeeds");

    assert_eq!(synthetic.len(), 5);
    let mut sources: Vec<usize> = synthetic.iter().map(|(_, p)| p.source).collect();
    sources.sort_unstable();
    sources.dedup();
    assert_eq!(sources.len(), 5, "each processed source yields one point");
    for (point, provenance) in synthetic.iter() {
        let source = ten_points.point(provenance.source).expect("source exists");
        let neighbour = ten_points
            .point(provenance.neighbour)
            .expect("neighbour exists");
        assert_on_segment(point, source, neighbour, provenance.gap);
    }
}

#[rstest]
fn too_many_neighbours_is_an_invalid_parameter() {
    let small = sample(vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![0.0, 1.0]]);
    let err = smote(&small, 3, 100, 5, &mut SmallRng::seed_from_u64(1))
        .expect_err("five neighbours cannot exist among three points");

    assert_eq!(
        err,
        SmoteError::InsufficientNeighbours { k: 5, available: 2 }
    );
    assert_eq!(err.code(), SmoteErrorCode::InsufficientNeighbours);
    assert_eq!(err.category(), ErrorCategory::InvalidParameter);
}

#[rstest]
#[case::full(100)]
#[case::multiple(400)]
#[case::undersampled(70)]
fn equal_seeds_reproduce_output(ten_points: Sample, #[case] rate: u32) {
    let first = seeded(&ten_points, 10, rate, 2, 77);
    let second = seeded(&ten_points, 10, rate, 2, 77);
    assert_eq!(first, second);
}

#[rstest]
fn run_leaves_the_sample_untouched(ten_points: Sample) {
    let before = ten_points.clone();
    let synthetic = seeded(&ten_points, 10, 30, 1, 8);
    assert_eq!(synthetic.len(), 3);
    assert_eq!(ten_points, before);
}

#[rstest]
fn prefix_count_limits_sources_and_neighbours(ten_points: Sample) {
    let synthetic = seeded(&ten_points, 4, 200, 2, 3);
    assert_eq!(synthetic.len(), 8);
    for provenance in synthetic.provenance() {
        assert!(provenance.source < 4 && provenance.neighbour < 4);
    }
}

#[rstest]
fn distances_beyond_f64_are_reported() {
    let extremes = sample(vec![vec![1e308], vec![-1e308], vec![0.0]]);
    let err = smote(&extremes, 3, 300, 2, &mut SmallRng::seed_from_u64(1))
        .expect_err("1e308 and -1e308 are 2e308 apart");

    assert_eq!(err.code(), SmoteErrorCode::DataSourceFailure);
    assert_eq!(err.category(), ErrorCategory::InvalidInput);
    assert_eq!(
        err.data_source_code(),
        Some(DataSourceErrorCode::DistanceOverflow)
    );
}

#[rstest]
fn coordinates_near_f64_max_stay_on_their_segments() {
    let extremes = sample(vec![vec![f64::MAX], vec![f64::MAX / 2.0], vec![0.0]]);
    let synthetic = seeded(&extremes, 3, 300, 2, 1);

    assert_eq!(synthetic.len(), 9);
    for (point, provenance) in synthetic.iter() {
        let from = extremes.point(provenance.source).expect("source");
        let to = extremes.point(provenance.neighbour).expect("neighbour");
        for ((&value, &start), &end) in point.iter().zip(from).zip(to) {
            assert!(value.is_finite(), "{value} is not finite");
            assert!((start.min(end)..=start.max(end)).contains(&value));
        }
    }
}

#[rstest]
fn run_records_span_and_completion_event(square: Sample) {
    let smote = SmoteBuilder::new()
        .with_neighbours(1)
        .build()
        .expect("configuration is valid");
    let (result, layer) =
        RecordingLayer::capture(|| smote.run(&square, &mut SmallRng::seed_from_u64(0)));
    assert_eq!(result.expect("run succeeds").len(), 4);

    let span = layer
        .span("core.smote")
        .expect("core.smote span must exist");
    assert_eq!(span.field("data_source"), Some("sample"));
    assert_eq!(span.field("items"), Some("4"));
    assert_eq!(span.field("sample_count"), Some("4"));
    assert_eq!(span.field("rate"), Some("100"));
    assert_eq!(span.field("neighbours"), Some("1"));
    let searches = layer
        .spans()
        .into_iter()
        .filter(|span| span.name == "core.neighbours")
        .count();
    assert_eq!(searches, 4);

    let completed = layer
        .event_with_message("smote completed")
        .expect("completion event must exist");
    assert_eq!(completed.level, Level::INFO);
    assert_eq!(completed.field("synthetic"), Some("4"));
}

#[rstest]
fn undersampling_logs_reduced_working_set(ten_points: Sample) {
    let mut rng = SmallRng::seed_from_u64(12);
    let (result, layer) = RecordingLayer::capture(|| smote(&ten_points, 10, 50, 2, &mut rng));
    assert_eq!(result.expect("run succeeds").len(), 5);

    let span = layer
        .span("core.undersample")
        .expect("core.undersample span must exist");
    assert_eq!(span.field("count"), Some("10"));
    assert_eq!(span.field("rate"), Some("50"));
    let reduced = layer
        .event_with_message("undersampling reduced the working set")
        .expect("debug event must exist");
    assert_eq!(reduced.level, Level::DEBUG);
    assert_eq!(reduced.field("working_count"), Some("5"));
}

#[rstest]
fn rejected_working_set_emits_warning(ten_points: Sample) {
    let mut rng = SmallRng::seed_from_u64(12);
    let (result, layer) = RecordingLayer::capture(|| smote(&ten_points, 10, 5, 1, &mut rng));
    assert_eq!(
        result.expect_err("no point survives the reduction"),
        SmoteError::InsufficientNeighbours { k: 1, available: 0 }
    );

    let warnings = layer.events_at(Level::WARN);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].field("working_count"), Some("0"));
    let errors = layer.events_at(Level::ERROR);
    let mut reported = errors.iter().filter_map(|e| e.field("error"));
    assert!(reported.any(|message| message.contains("neighbours")));
}
