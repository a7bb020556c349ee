//! Vantage-point tree: construction and pruned k-nearest-neighbor search.
//!
//! Each node holds a pivot point and a threshold equal to the median distance
//! from the pivot to the points of its subtree. Points strictly closer than the
//! threshold go left, the rest go right. Search walks the tree with a bounded
//! best-k set and skips any subtree that the triangle inequality proves cannot
//! hold a point closer than the current worst of the best k.
//!
//! Nodes live in an arena and both build and search run on explicit work-lists,
//! so degenerate inputs (e.g. many identical vectors, giving an O(n) tall tree)
//! cannot overflow the call stack.

use tracing::{debug, trace};

use crate::candidates::BoundedCandidateSet;
use crate::distance::{Euclidean, Metric};
use crate::error::{Result, VpTreeError};
use crate::pivot::{PivotSelector, RandomPivot};
use crate::point::{Neighbor, Point};
use crate::vector::Vector;

/// Index of a node in the tree's arena.
type NodeId = usize;

/// A single tree node.
#[derive(Debug, Clone)]
pub struct VpNode<I> {
    pivot: Point<I>,
    /// Median distance from `pivot` to the points of this subtree.
    threshold: f64,
    /// Points with distance < threshold.
    left: Option<NodeId>,
    /// Points with distance >= threshold, pivot excluded.
    right: Option<NodeId>,
}

impl<I> VpNode<I> {
    pub fn pivot(&self) -> &Point<I> {
        &self.pivot
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Counters gathered during a single search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes whose pivot was compared against the query.
    pub nodes_visited: usize,
    /// Child subtrees skipped by the triangle-inequality bound.
    pub subtrees_pruned: usize,
}

/// An immutable VP-tree over identified feature vectors.
///
/// Searching takes `&self` and allocates its own candidate set, so a built
/// tree can be shared behind an `Arc` and queried from many threads at once.
#[derive(Debug, Clone)]
pub struct VpTree<I, M = Euclidean> {
    nodes: Vec<VpNode<I>>,
    root: Option<NodeId>,
    metric: M,
    dimension: Option<usize>,
    height: usize,
}

impl<I> VpTree<I, Euclidean> {
    /// Build with the Euclidean metric and an entropy-seeded random pivot.
    pub fn build(points: impl IntoIterator<Item = Point<I>>) -> Result<Self> {
        VpTreeBuilder::new().build(points)
    }
}

impl<I, M: Metric> VpTree<I, M> {
    /// Number of points stored in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Vector dimension enforced on queries, if known.
    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    /// Number of levels from the root to the deepest leaf; zero when empty.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn metric(&self) -> &M {
        &self.metric
    }

    pub fn root(&self) -> Option<&VpNode<I>> {
        self.root.map(|id| &self.nodes[id])
    }

    /// Iterate over every stored point, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Point<I>> {
        self.nodes.iter().map(|n| &n.pivot)
    }

    /// Identifiers of the `k` nearest points, closest first.
    pub fn search(&self, query: &Vector, k: usize) -> Result<Vec<I>>
    where
        I: Clone,
    {
        let (candidates, _) = self.collect(query, k)?;
        Ok(candidates
            .into_results()
            .into_iter()
            .map(|id| self.nodes[id].pivot.id.clone())
            .collect())
    }

    /// Like [`search`](Self::search), keeping each hit's distance.
    pub fn search_with_distances(&self, query: &Vector, k: usize) -> Result<Vec<Neighbor<I>>>
    where
        I: Clone,
    {
        self.search_with_stats(query, k).map(|(hits, _)| hits)
    }

    /// Search and report how much of the tree was visited.
    pub fn search_with_stats(
        &self,
        query: &Vector,
        k: usize,
    ) -> Result<(Vec<Neighbor<I>>, SearchStats)>
    where
        I: Clone,
    {
        let (candidates, stats) = self.collect(query, k)?;
        let hits = candidates
            .into_sorted_vec()
            .into_iter()
            .map(|c| Neighbor {
                id: self.nodes[c.item].pivot.id.clone(),
                distance: c.distance,
            })
            .collect();
        Ok((hits, stats))
    }

    /// The single closest point, or `None` for an empty tree.
    pub fn nearest(&self, query: &Vector) -> Result<Option<Neighbor<I>>>
    where
        I: Clone,
    {
        Ok(self.search_with_distances(query, 1)?.into_iter().next())
    }

    /// Run independent searches in parallel against this tree.
    pub fn search_batch(&self, queries: &[Vector], k: usize) -> Result<Vec<Vec<I>>>
    where
        I: Clone + Send + Sync,
        M: Sync,
    {
        use rayon::prelude::*;

        queries
            .par_iter()
            .map(|query| self.search(query, k))
            .collect()
    }

    fn collect(
        &self,
        query: &Vector,
        k: usize,
    ) -> Result<(BoundedCandidateSet<NodeId>, SearchStats)> {
        let mut candidates = BoundedCandidateSet::new(k)?;
        if let Some(dimension) = self.dimension {
            query.check_dimension(dimension)?;
        }
        query.check_finite()?;

        let mut stats = SearchStats::default();
        let mut pending: Vec<Step> = self.root.map(Step::Visit).into_iter().collect();

        while let Some(step) = pending.pop() {
            match step {
                Step::Visit(id) => {
                    let node = &self.nodes[id];
                    let d = self
                        .metric
                        .distance(query.as_slice(), node.pivot.vector.as_slice());
                    stats.nodes_visited += 1;
                    candidates.offer(d, id);

                    if node.is_leaf() {
                        continue;
                    }

                    let (near, far) = if d < node.threshold {
                        ((node.left, Side::Left), (node.right, Side::Right))
                    } else {
                        ((node.right, Side::Right), (node.left, Side::Left))
                    };
                    // Far side goes on the stack first so it is judged only after
                    // the near side has tightened the bound.
                    for (child, side) in [far, near] {
                        if let Some(child) = child {
                            pending.push(Step::Consider {
                                child,
                                side,
                                d,
                                threshold: node.threshold,
                            });
                        }
                    }
                }
                Step::Consider {
                    child,
                    side,
                    d,
                    threshold,
                } => {
                    let reachable = match candidates.worst_distance() {
                        None => true,
                        Some(w) => match side {
                            Side::Left => d - w < threshold,
                            Side::Right => d + w >= threshold,
                        },
                    };
                    if reachable {
                        pending.push(Step::Visit(child));
                    } else {
                        stats.subtrees_pruned += 1;
                    }
                }
            }
        }

        trace!(
            k,
            found = candidates.len(),
            visited = stats.nodes_visited,
            pruned = stats.subtrees_pruned,
            "vp-tree search complete"
        );
        Ok((candidates, stats))
    }
}

#[derive(Debug, Clone, Copy)]
enum Side {
    Left,
    Right,
}

#[derive(Debug)]
enum Step {
    Visit(NodeId),
    /// Decide whether `child` can still hold a candidate, given the query's
    /// distance `d` to the parent pivot.
    Consider {
        child: NodeId,
        side: Side,
        d: f64,
        threshold: f64,
    },
}

#[derive(Debug, Clone, Copy)]
enum Link {
    Root,
    Left(NodeId),
    Right(NodeId),
}

/// Configures and builds a [`VpTree`].
#[derive(Debug, Clone)]
pub struct VpTreeBuilder<M = Euclidean, P = RandomPivot> {
    metric: M,
    pivot: P,
    dimension: Option<usize>,
    require_non_empty: bool,
}

impl VpTreeBuilder {
    /// Euclidean metric, entropy-seeded random pivots.
    pub fn new() -> Self {
        Self {
            metric: Euclidean,
            pivot: RandomPivot::from_entropy(),
            dimension: None,
            require_non_empty: false,
        }
    }
}

impl Default for VpTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<M, P> VpTreeBuilder<M, P> {
    pub fn metric<M2: Metric>(self, metric: M2) -> VpTreeBuilder<M2, P> {
        VpTreeBuilder {
            metric,
            pivot: self.pivot,
            dimension: self.dimension,
            require_non_empty: self.require_non_empty,
        }
    }

    pub fn pivot_selector<P2>(self, pivot: P2) -> VpTreeBuilder<M, P2> {
        VpTreeBuilder {
            metric: self.metric,
            pivot,
            dimension: self.dimension,
            require_non_empty: self.require_non_empty,
        }
    }

    /// Use a random pivot seeded with `seed`, making construction reproducible.
    pub fn seed(self, seed: u64) -> VpTreeBuilder<M, RandomPivot> {
        self.pivot_selector(RandomPivot::seeded(seed))
    }

    /// Require every point (and every later query) to have `dimension` components.
    pub fn dimension(mut self, dimension: usize) -> Self {
        self.dimension = Some(dimension);
        self
    }

    /// Fail with `EmptyInput` instead of returning an empty tree.
    pub fn require_non_empty(mut self, require: bool) -> Self {
        self.require_non_empty = require;
        self
    }

    pub fn build<I>(mut self, points: impl IntoIterator<Item = Point<I>>) -> Result<VpTree<I, M>>
    where
        M: Metric,
        P: PivotSelector<I>,
    {
        let points: Vec<Point<I>> = points.into_iter().collect();
        if points.is_empty() && self.require_non_empty {
            return Err(VpTreeError::EmptyInput);
        }

        let dimension = self.dimension.or_else(|| points.first().map(Point::dimension));
        if let Some(dimension) = dimension {
            for point in &points {
                point.vector.check_dimension(dimension)?;
            }
        }
        for point in &points {
            point.vector.check_finite()?;
        }

        let total = points.len();
        let mut nodes: Vec<VpNode<I>> = Vec::with_capacity(total);
        let mut root = None;
        let mut height = 0;
        let mut pending = vec![(points, Link::Root, 1usize)];

        while let Some((mut set, link, depth)) = pending.pop() {
            if set.is_empty() {
                continue;
            }
            height = height.max(depth);

            let pivot = set.swap_remove(self.pivot.select(&set));
            let distances: Vec<f64> = set
                .iter()
                .map(|p| {
                    self.metric
                        .distance(pivot.vector.as_slice(), p.vector.as_slice())
                })
                .collect();

            // The pivot's own zero distance takes part in the median.
            let mut all = Vec::with_capacity(distances.len() + 1);
            all.push(0.0);
            all.extend_from_slice(&distances);
            let threshold = median(&mut all);

            let (mut left, mut right) = (Vec::new(), Vec::new());
            for (point, d) in set.into_iter().zip(distances) {
                if d < threshold {
                    left.push(point);
                } else {
                    right.push(point);
                }
            }

            let id = nodes.len();
            nodes.push(VpNode {
                pivot,
                threshold,
                left: None,
                right: None,
            });
            match link {
                Link::Root => root = Some(id),
                Link::Left(parent) => nodes[parent].left = Some(id),
                Link::Right(parent) => nodes[parent].right = Some(id),
            }

            pending.push((right, Link::Right(id), depth + 1));
            pending.push((left, Link::Left(id), depth + 1));
        }

        debug!(points = total, height, "built vp-tree");
        Ok(VpTree {
            nodes,
            root,
            metric: self.metric,
            dimension,
            height,
        })
    }
}

/// Median of a non-empty slice; the mean of the two middle values for even
/// lengths. Reorders `values`.
fn median(values: &mut [f64]) -> f64 {
    let n = values.len();
    let mid = n / 2;
    let (lower, upper, _) = values.select_nth_unstable_by(mid, f64::total_cmp);
    let upper = *upper;
    if n % 2 == 1 {
        upper
    } else {
        let lower_max = lower.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        (lower_max + upper) / 2.0
    }
}
