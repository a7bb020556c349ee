//! Brute-force linear scan — O(n) k-NN search, the ground truth for the tree.

use crate::distance::{Euclidean, Metric};
use crate::error::{Result, VpTreeError};
use crate::point::{Neighbor, Point};
use crate::vector::Vector;

/// Computes the distance to every stored point on each query.
#[derive(Debug, Clone)]
pub struct LinearScan<I, M = Euclidean> {
    points: Vec<Point<I>>,
    metric: M,
    dimension: Option<usize>,
}

impl<I> LinearScan<I, Euclidean> {
    pub fn new(points: Vec<Point<I>>) -> Result<Self> {
        Self::with_metric(points, Euclidean)
    }
}

impl<I, M: Metric> LinearScan<I, M> {
    /// Create a scan over `points`, which must all share one dimension.
    pub fn with_metric(points: Vec<Point<I>>, metric: M) -> Result<Self> {
        let dimension = points.first().map(Point::dimension);
        if let Some(dimension) = dimension {
            for point in &points {
                point.vector.check_dimension(dimension)?;
            }
        }
        for point in &points {
            point.vector.check_finite()?;
        }
        Ok(Self {
            points,
            metric,
            dimension,
        })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The `k` nearest points sorted by distance ascending.
    pub fn search(&self, query: &Vector, k: usize) -> Result<Vec<Neighbor<I>>>
    where
        I: Clone,
    {
        if k == 0 {
            return Err(VpTreeError::InvalidCapacity { capacity: k });
        }
        if let Some(dimension) = self.dimension {
            query.check_dimension(dimension)?;
        }
        query.check_finite()?;

        let mut results: Vec<Neighbor<I>> = self
            .points
            .iter()
            .map(|p| Neighbor {
                id: p.id.clone(),
                distance: self.metric.distance(query.as_slice(), p.vector.as_slice()),
            })
            .collect();

        results.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        results.truncate(k);
        Ok(results)
    }
}
