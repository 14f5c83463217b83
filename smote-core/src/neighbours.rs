//! Exhaustive k-nearest-neighbour search over a prefix of a data source.
//!
//! Every query scans all other points in the prefix, so a full pass costs
//! O(T²) distance evaluations plus O(T² log k) for the list re-sorts. This is
//! the dominant cost for large samples. A bounded max-heap would lower the
//! sorting term, but it must keep the selection identical, including the
//! first-accepted-wins tie rule.

use std::num::NonZeroUsize;

use tracing::instrument;

use crate::{
    Result,
    datasource::DataSource,
    error::{DataSourceError, SmoteError},
};

/// A candidate neighbour considered while building a [`NeighbourList`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NeighbourRecord {
    /// Index of the query point.
    pub source: usize,
    /// Index of the candidate neighbour.
    pub neighbour: usize,
    /// Distance between the two points.
    pub distance: f64,
}

/// Ascending, bounded list of the nearest neighbours of one point.
///
/// # Examples
/// ```
/// use smote_core::{NeighbourList, NeighbourRecord};
/// use std::num::NonZeroUsize;
///
/// let mut list = NeighbourList::new(NonZeroUsize::new(2).expect("non-zero"));
/// for (neighbour, distance) in [(1, 4.0), (2, 1.0), (3, 2.0)] {
///     list.offer(NeighbourRecord { source: 0, neighbour, distance });
/// }
/// let order: Vec<usize> = list.iter().map(|r| r.neighbour).collect();
/// assert_eq!(order, [2, 3]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct NeighbourList {
    capacity: NonZeroUsize,
    records: Vec<NeighbourRecord>,
}

impl NeighbourList {
    /// Creates an empty list holding at most `capacity` records.
    #[must_use]
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            capacity,
            records: Vec::with_capacity(capacity.get().saturating_add(1)),
        }
    }

    /// Offers a candidate, returning whether it was accepted.
    ///
    /// While the list is below capacity every candidate is accepted. Once
    /// full, a candidate is accepted only if it is strictly closer than the
    /// current worst entry. Accepted candidates are appended and the list is
    /// stable-sorted, so equal distances keep their acceptance order.
    pub fn offer(&mut self, record: NeighbourRecord) -> bool {
        if self.records.len() >= self.capacity.get() {
            let Some(worst) = self.records.last() else {
                return false;
            };
            if record.distance >= worst.distance {
                return false;
            }
        }
        self.records.push(record);
        self.records.sort_by(by_distance);
        self.records.truncate(self.capacity.get());
        true
    }

    /// Returns the maximum number of records.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Returns the number of records held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns whether no record has been accepted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the record at `position` (0 is the nearest).
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&NeighbourRecord> {
        self.records.get(position)
    }

    /// Iterates records from nearest to farthest.
    pub fn iter(&self) -> impl Iterator<Item = &NeighbourRecord> {
        self.records.iter()
    }

    /// Returns the records as a slice, nearest first.
    #[must_use]
    pub fn as_slice(&self) -> &[NeighbourRecord] {
        &self.records
    }
}

fn by_distance(left: &NeighbourRecord, right: &NeighbourRecord) -> std::cmp::Ordering {
    left.distance.total_cmp(&right.distance)
}

/// Computes k-nearest-neighbour lists within the first `T` points of a
/// [`DataSource`].
#[derive(Clone, Copy, Debug)]
pub struct NeighbourFinder {
    k: NonZeroUsize,
}

impl NeighbourFinder {
    /// Creates a finder that keeps `k` neighbours per point.
    #[must_use]
    pub fn new(k: NonZeroUsize) -> Self {
        Self { k }
    }

    /// Returns the configured neighbour count.
    #[must_use]
    pub fn k(&self) -> NonZeroUsize {
        self.k
    }

    /// Checks that a prefix of `candidates` points can satisfy `k` for every
    /// point of `source`.
    ///
    /// # Errors
    /// Returns [`SmoteError::SampleCountExceedsData`] when the prefix is
    /// longer than the source and [`SmoteError::InsufficientNeighbours`] when
    /// `k > candidates - 1`.
    pub fn validate<D: DataSource>(&self, source: &D, candidates: usize) -> Result<()> {
        if candidates > source.len() {
            return Err(SmoteError::SampleCountExceedsData {
                requested: candidates,
                available: source.len(),
            });
        }
        let available = candidates.saturating_sub(1);
        if self.k.get() > available {
            return Err(SmoteError::InsufficientNeighbours {
                k: self.k.get(),
                available,
            });
        }
        Ok(())
    }

    /// Returns the `k` nearest neighbours of `query` among points
    /// `0..candidates`, excluding `query` itself.
    ///
    /// # Errors
    /// Fails as [`NeighbourFinder::validate`] does, returns
    /// [`DataSourceError::OutOfBounds`] (wrapped) when `query` lies outside
    /// the prefix, and propagates distance failures from `source`. No partial
    /// list is ever returned.
    ///
    /// # Examples
    /// ```
    /// use smote_core::{NeighbourFinder, Sample};
    /// use std::num::NonZeroUsize;
    ///
    /// let sample = Sample::try_new(vec![vec![0.0], vec![5.0], vec![1.0], vec![3.0]])?;
    /// let finder = NeighbourFinder::new(NonZeroUsize::new(2).expect("non-zero"));
    /// let list = finder.find(&sample, 0, sample.points().len())?;
    /// let nearest: Vec<usize> = list.iter().map(|r| r.neighbour).collect();
    /// assert_eq!(nearest, [2, 3]);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[instrument(
        name = "core.neighbours",
        level = "trace",
        err,
        skip(self, source),
        fields(k = self.k.get()),
    )]
    pub fn find<D: DataSource>(
        &self,
        source: &D,
        query: usize,
        candidates: usize,
    ) -> Result<NeighbourList> {
        self.validate(source, candidates)?;
        if query >= candidates {
            return Err(SmoteError::from_data_source(
                source.name(),
                DataSourceError::OutOfBounds { index: query },
            ));
        }

        let others: Vec<usize> = (0..candidates).filter(|&j| j != query).collect();
        let distances = source
            .batch_distances(query, &others)
            .map_err(|error| SmoteError::from_data_source(source.name(), error))?;

        let mut list = NeighbourList::new(self.k);
        for (&neighbour, distance) in others.iter().zip(distances) {
            list.offer(NeighbourRecord {
                source: query,
                neighbour,
                distance,
            });
        }
        Ok(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Sample;
    use crate::test_utils::CountingSource;
    use rstest::rstest;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    fn k(value: usize) -> NonZeroUsize {
        NonZeroUsize::new(value).expect("test k must be non-zero")
    }

    fn record(neighbour: usize, distance: f64) -> NeighbourRecord {
        NeighbourRecord {
            source: 0,
            neighbour,
            distance,
        }
    }

    #[test]
    fn offer_accepts_unconditionally_below_capacity() {
        let mut list = NeighbourList::new(k(3));
        assert!(list.offer(record(1, 9.0)));
        assert!(list.offer(record(2, 1.0)));
        assert!(list.offer(record(3, 5.0)));
        let order: Vec<usize> = list.iter().map(|r| r.neighbour).collect();
        assert_eq!(order, vec![2, 3, 1]);
    }

    #[test]
    fn offer_rejects_candidates_not_strictly_closer_than_worst() {
        let mut list = NeighbourList::new(k(2));
        list.offer(record(1, 1.0));
        list.offer(record(2, 3.0));
        assert!(!list.offer(record(3, 3.0)));
        assert!(!list.offer(record(4, 7.0)));
        assert!(list.offer(record(5, 2.0)));
        let order: Vec<usize> = list.iter().map(|r| r.neighbour).collect();
        assert_eq!(order, vec![1, 5]);
        assert_eq!(list.len(), list.capacity());
    }

    #[test]
    fn offer_keeps_first_accepted_among_ties() {
        let mut list = NeighbourList::new(k(2));
        list.offer(record(1, 2.0));
        list.offer(record(2, 2.0));
        list.offer(record(3, 1.0));
        let order: Vec<usize> = list.iter().map(|r| r.neighbour).collect();
        assert_eq!(order, vec![3, 1]);
    }

    #[test]
    fn find_excludes_query_and_sorts_ascending() {
        let sample = Sample::try_new(vec![
            vec![0.0, 0.0],
            vec![4.0, 0.0],
            vec![0.0, 0.0],
            vec![1.0, 1.0],
            vec![-2.0, 0.0],
        ])
        .expect("sample is valid");
        let list = k_finder(3).find(&sample, 0, 5).expect("search succeeds");

        let neighbours: Vec<usize> = list.iter().map(|r| r.neighbour).collect();
        assert_eq!(neighbours, vec![2, 3, 4]);
        assert!(list.iter().all(|r| r.source == 0));
        let ascending = list
            .as_slice()
            .windows(2)
            .all(|pair| pair[0].distance <= pair[1].distance);
        assert!(ascending);
        assert_eq!(list.get(0).map(|r| r.distance), Some(0.0));
    }

    #[test]
    fn find_only_scans_the_prefix() {
        let calls = Arc::new(AtomicUsize::new(0));
        let source = CountingSource::new(vec![0.0, 10.0, 20.0, 0.5], Arc::clone(&calls));
        let list = k_finder(1).find(&source, 0, 3).expect("search succeeds");

        assert_eq!(list.get(0).map(|r| r.neighbour), Some(1));
        assert_eq!(calls.load(Ordering::Relaxed), 2);
    }

    #[rstest]
    #[case::k_equals_population(3, 3, 2)]
    #[case::k_exceeds_population(5, 3, 2)]
    #[case::single_point(1, 1, 0)]
    fn find_rejects_insufficient_neighbours(
        #[case] requested: usize,
        #[case] candidates: usize,
        #[case] available: usize,
    ) {
        let sample =
            Sample::try_new(vec![vec![0.0], vec![1.0], vec![2.0]]).expect("sample is valid");
        let err = k_finder(requested)
            .find(&sample, 0, candidates)
            .expect_err("k must not exceed T - 1");
        assert_eq!(
            err,
            SmoteError::InsufficientNeighbours {
                k: requested,
                available,
            }
        );
    }

    #[test]
    fn find_rejects_prefix_longer_than_source() {
        let sample = Sample::try_new(vec![vec![0.0], vec![1.0]]).expect("sample is valid");
        let err = k_finder(1)
            .find(&sample, 0, 3)
            .expect_err("prefix exceeds the sample");
        assert_eq!(
            err,
            SmoteError::SampleCountExceedsData {
                requested: 3,
                available: 2,
            }
        );
    }

    #[test]
    fn find_rejects_query_outside_prefix() {
        let sample =
            Sample::try_new(vec![vec![0.0], vec![1.0], vec![2.0]]).expect("sample is valid");
        let err = k_finder(1)
            .find(&sample, 2, 2)
            .expect_err("query 2 is outside the prefix");
        assert_eq!(
            err.data_source_code(),
            Some(crate::DataSourceErrorCode::OutOfBounds)
        );
    }

    fn k_finder(value: usize) -> NeighbourFinder {
        NeighbourFinder::new(k(value))
    }
}
