//! Property tests for distance, neighbour search and generation.

mod common;

use std::num::NonZeroUsize;

use common::{assert_on_segment, sample};
use proptest::{prelude::*, test_runner::Config as ProptestConfig};
use rand::{SeedableRng, rngs::SmallRng};
use smote_core::{DataSource, NeighbourFinder, euclidean_distance, smote};
use smote_test_support::proptest_profile::ProptestRunProfile;

fn points(max_len: usize) -> impl Strategy<Value = Vec<Vec<f64>>> {
    (1_usize..4).prop_flat_map(move |dimension| {
        prop::collection::vec(
            prop::collection::vec(-100.0_f64..100.0, dimension),
            2..max_len,
        )
    })
}

fn pair() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    (1_usize..6).prop_flat_map(|dimension| {
        (
            prop::collection::vec(-1.0e6_f64..1.0e6, dimension),
            prop::collection::vec(-1.0e6_f64..1.0e6, dimension),
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: ProptestRunProfile::load(64).cases(),
        ..ProptestConfig::default()
    })]

    #[test]
    fn distance_is_symmetric_and_non_negative((left, right) in pair()) {
        let forward = euclidean_distance(&left, &right).expect("finite inputs");
        let backward = euclidean_distance(&right, &left).expect("finite inputs");
        prop_assert!(forward.value() >= 0.0);
        prop_assert_eq!(forward.value(), backward.value());
        prop_assert_eq!(euclidean_distance(&left, &left).expect("finite inputs").value(), 0.0);
    }

    #[test]
    fn unequal_lengths_are_rejected(left in prop::collection::vec(-1.0_f64..1.0, 1..5), extra in 1_usize..3) {
        let right = vec![0.0; left.len() + extra];
        prop_assert!(euclidean_distance(&left, &right).is_err());
    }

    #[test]
    fn neighbour_lists_hold_the_k_nearest(points in points(12), k_seed in any::<usize>(), query_seed in any::<usize>()) {
        let sample = sample(points);
        let len = sample.len();
        let k = 1 + k_seed % (len - 1);
        let query = query_seed % len;
        let finder = NeighbourFinder::new(NonZeroUsize::new(k).expect("k is positive"));
        let list = finder.find(&sample, query, len).expect("k <= T - 1");

        prop_assert_eq!(list.len(), k);
        prop_assert!(list.iter().all(|record| record.neighbour != query));
        prop_assert!(list.as_slice().windows(2).all(|w| w[0].distance <= w[1].distance));
        let worst = list.as_slice().last().map(|r| r.distance).expect("list is non-empty");
        for other in (0..len).filter(|&j| j != query) {
            if list.iter().all(|record| record.neighbour != other) {
                let distance = sample.distance(query, other).expect("indices are valid");
                prop_assert!(distance >= worst);
            }
        }
    }

    #[test]
    fn full_rate_emits_t_times_multiplier(points in points(10), rate in 100_u32..600, seed in any::<u64>()) {
        let sample = sample(points);
        let count = sample.len();
        let synthetic = smote(&sample, count, rate, 1, &mut SmallRng::seed_from_u64(seed))
            .expect("run succeeds");
        prop_assert_eq!(synthetic.len(), count * (rate / 100) as usize);
    }

    #[test]
    fn synthetic_points_lie_on_segments(points in points(10), rate in 1_u32..400, seed in any::<u64>()) {
        let sample = sample(points);
        let count = sample.len();
        match smote(&sample, count, rate, 1, &mut SmallRng::seed_from_u64(seed)) {
            Ok(synthetic) => {
                for (point, provenance) in synthetic.iter() {
                    let source = sample.point(provenance.source).expect("source exists");
                    let neighbour = sample.point(provenance.neighbour).expect("neighbour exists");
                    assert_on_segment(point, source, neighbour, provenance.gap);
                }
            }
            Err(error) => {
                prop_assert!(rate < 100, "only undersampled runs may be too small: {error}");
                prop_assert!(rate as usize * count / 100 < 2);
            }
        }
    }
}
