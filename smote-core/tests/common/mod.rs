use smote_core::Sample;

#[must_use]
pub fn sample(points: Vec<Vec<f64>>) -> Sample {
    Sample::try_new(points).expect("fixture points must form a valid sample")
}

/// Asserts that `point` lies on the segment between `source` and `neighbour`
/// at the interpolation factor `gap`.
pub fn assert_on_segment(point: &[f64], source: &[f64], neighbour: &[f64], gap: f64) {
    assert!((0.0..1.0).contains(&gap), "gap {gap} outside [0, 1)");
    assert_eq!(point.len(), source.len());
    for ((&value, &from), &to) in point.iter().zip(source).zip(neighbour) {
        let low = from.min(to);
        let high = from.max(to);
        assert!(
            (low - 1e-9..=high + 1e-9).contains(&value),
            "{value} is not between {from} and {to}"
        );
        assert!((value - (from + gap * (to - from))).abs() < 1e-9);
    }
}
