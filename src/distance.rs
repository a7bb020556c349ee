//! Distance metrics for vector similarity
//!
//! The VP-tree prunes with the triangle inequality, so every metric used here
//! must be a true metric: non-negative, symmetric, zero only for identical
//! vectors, and subadditive.

use crate::error::{Result, VpTreeError};
use crate::vector::Vector;
use serde::{Deserialize, Serialize};

/// A distance function over equal-length vectors.
pub trait Metric {
    /// Distance between two slices of equal length.
    fn distance(&self, a: &[f64], b: &[f64]) -> f64;

    /// Distance between two vectors, failing on a dimension mismatch.
    fn distance_checked(&self, a: &Vector, b: &Vector) -> Result<f64> {
        if !a.has_same_dimension(b) {
            return Err(VpTreeError::DimensionMismatch {
                expected: a.dimension(),
                actual: b.dimension(),
            });
        }
        Ok(self.distance(a.as_slice(), b.as_slice()))
    }
}

/// Euclidean (L2) distance. The default metric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Euclidean;

impl Metric for Euclidean {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        euclidean_distance(a, b)
    }
}

/// Adapts a plain function or closure into a [`Metric`].
#[derive(Debug, Clone, Copy)]
pub struct FnMetric<F>(pub F);

impl<F> Metric for FnMetric<F>
where
    F: Fn(&[f64], &[f64]) -> f64,
{
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        (self.0)(a, b)
    }
}

/// Metrics selectable from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    /// Euclidean (L2) distance
    #[default]
    Euclidean,
    /// Manhattan (L1) distance
    Manhattan,
}

impl Metric for DistanceMetric {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        match self {
            DistanceMetric::Euclidean => euclidean_distance(a, b),
            DistanceMetric::Manhattan => manhattan_distance(a, b),
        }
    }
}

/// Compute Euclidean (L2) distance between two slices
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

/// Compute Manhattan (L1) distance between two slices
pub fn manhattan_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).sum()
}
