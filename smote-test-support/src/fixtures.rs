//! Point sets shared by the workspace test suites.

/// The corners of a 10 × 10 square: `[0,0]`, `[10,0]`, `[0,10]`, `[10,10]`.
///
/// Every corner has two nearest neighbours at distance 10.
#[must_use]
pub fn square_corners() -> Vec<Vec<f64>> {
    vec![
        vec![0.0, 0.0],
        vec![10.0, 0.0],
        vec![0.0, 10.0],
        vec![10.0, 10.0],
    ]
}

/// Points on a `columns × rows` integer grid, row by row.
///
/// # Examples
/// ```
/// use smote_test_support::fixtures::grid;
///
/// let points = grid(2, 5);
/// assert_eq!(points.len(), 10);
/// assert_eq!(points[3], vec![1.0, 1.0]);
/// ```
#[must_use]
pub fn grid(columns: u32, rows: u32) -> Vec<Vec<f64>> {
    (0..rows)
        .flat_map(|y| (0..columns).map(move |x| vec![f64::from(x), f64::from(y)]))
        .collect()
}
