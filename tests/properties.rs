//! Property tests: the pruned tree search must agree with a linear scan.

use proptest::prelude::*;
use vptree_search::{
    BoundedCandidateSet, Candidate, DistanceMetric, LinearScan, Point, Vector, VpTreeBuilder,
};

const DIM: usize = 4;

fn point_set() -> impl Strategy<Value = Vec<Vec<f64>>> {
    prop::collection::vec(prop::collection::vec(-100.0f64..100.0, DIM), 0..120)
}

fn query() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-120.0f64..120.0, DIM)
}

fn to_points(raw: &[Vec<f64>]) -> Vec<Point<usize>> {
    raw.iter()
        .enumerate()
        .map(|(i, v)| Point::new(i, v.clone()))
        .collect()
}

/// True when two results differ only by the order of equal-distance hits.
fn same_distances(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-9)
}

proptest! {
    #[test]
    fn tree_matches_linear_scan(
        raw in point_set(),
        q in query(),
        k in 1usize..20,
        seed in any::<u64>(),
    ) {
        let points = to_points(&raw);
        let scan = LinearScan::new(points.clone()).unwrap();
        let tree = VpTreeBuilder::new().seed(seed).build(points).unwrap();
        let q = Vector::new(q);

        let got: Vec<f64> = tree.search_with_distances(&q, k).unwrap().iter().map(|n| n.distance).collect();
        let want: Vec<f64> = scan.search(&q, k).unwrap().iter().map(|n| n.distance).collect();
        prop_assert!(same_distances(&got, &want), "tree {:?} vs scan {:?}", got, want);
    }

    #[test]
    fn manhattan_tree_matches_linear_scan(
        raw in point_set(),
        q in query(),
        k in 1usize..10,
        seed in any::<u64>(),
    ) {
        let points = to_points(&raw);
        let scan = LinearScan::with_metric(points.clone(), DistanceMetric::Manhattan).unwrap();
        let tree = VpTreeBuilder::new()
            .metric(DistanceMetric::Manhattan)
            .seed(seed)
            .build(points)
            .unwrap();
        let q = Vector::new(q);

        let got: Vec<f64> = tree.search_with_distances(&q, k).unwrap().iter().map(|n| n.distance).collect();
        let want: Vec<f64> = scan.search(&q, k).unwrap().iter().map(|n| n.distance).collect();
        prop_assert!(same_distances(&got, &want));
    }

    #[test]
    fn large_k_returns_everything_sorted(raw in point_set(), q in query(), seed in any::<u64>()) {
        let n = raw.len();
        let tree = VpTreeBuilder::new().seed(seed).build(to_points(&raw)).unwrap();
        let hits = tree.search_with_distances(&Vector::new(q), n + 5).unwrap();

        prop_assert_eq!(hits.len(), n);
        prop_assert!(hits.windows(2).all(|w| w[0].distance <= w[1].distance));
        let mut ids: Vec<usize> = hits.iter().map(|h| h.id).collect();
        ids.sort_unstable();
        prop_assert_eq!(ids, (0..n).collect::<Vec<_>>());
    }

    #[test]
    fn smaller_k_is_prefix(
        raw in point_set(),
        q in query(),
        k1 in 1usize..10,
        extra in 1usize..10,
        seed in any::<u64>(),
    ) {
        let tree = VpTreeBuilder::new().seed(seed).build(to_points(&raw)).unwrap();
        let q = Vector::new(q);
        let short = tree.search_with_distances(&q, k1).unwrap();
        let long = tree.search_with_distances(&q, k1 + extra).unwrap();

        prop_assert!(short.len() <= long.len());
        let short_d: Vec<f64> = short.iter().map(|n| n.distance).collect();
        let long_d: Vec<f64> = long.iter().take(short.len()).map(|n| n.distance).collect();
        prop_assert!(same_distances(&short_d, &long_d));
    }

    #[test]
    fn candidate_set_keeps_k_smallest(
        distances in prop::collection::vec(0.0f64..1000.0, 0..200),
        capacity in 1usize..30,
    ) {
        let mut set = BoundedCandidateSet::new(capacity).unwrap();
        for (i, &d) in distances.iter().enumerate() {
            set.offer(d, i);
        }

        let mut expected = distances.clone();
        expected.sort_by(f64::total_cmp);
        expected.truncate(capacity);

        let kept: Vec<Candidate<usize>> = set.into_sorted_vec();
        let got: Vec<f64> = kept.iter().map(|c| c.distance).collect();
        prop_assert_eq!(got, expected);
    }
}

#[test]
fn empty_tree_returns_nothing_for_any_k() {
    let tree = VpTreeBuilder::new().build(Vec::<Point<usize>>::new()).unwrap();
    for k in [1, 2, 100] {
        assert!(tree.search(&Vector::new(vec![0.0; DIM]), k).unwrap().is_empty());
    }
}
