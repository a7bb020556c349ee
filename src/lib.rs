//! # vptree-search
//!
//! Similarity search over fixed-dimension feature vectors with a
//! vantage-point tree.
//!
//! This library provides:
//! - A VP-tree with median-distance partitioning and pruned k-NN search
//! - Pluggable metrics (Euclidean by default) and pivot selection strategies
//! - A bounded best-k candidate set
//! - A brute-force linear scan for ground truth
//! - JSON configuration and dataset loading
//!
//! ## Example
//!
//! ```rust
//! use vptree_search::{Point, Vector, VpTreeBuilder};
//!
//! let points = vec![
//!     Point::new("A", vec![0.0, 0.0]),
//!     Point::new("B", vec![10.0, 0.0]),
//!     Point::new("C", vec![0.0, 10.0]),
//!     Point::new("D", vec![10.0, 10.0]),
//! ];
//! let tree = VpTreeBuilder::new().seed(42).build(points).unwrap();
//!
//! let results = tree.search(&Vector::new(vec![1.0, 1.0]), 2).unwrap();
//! assert_eq!(results[0], "A");
//! ```

pub mod candidates;
pub mod config;
pub mod dataset;
pub mod distance;
pub mod error;
pub mod features;
pub mod linear;
pub mod pivot;
pub mod point;
pub mod tree;
pub mod vector;

pub use candidates::{BoundedCandidateSet, Candidate};
pub use config::IndexConfig;
pub use distance::{DistanceMetric, Euclidean, FnMetric, Metric};
pub use error::{Result, VpTreeError};
pub use features::{FeatureExtractor, RandomFeatures};
pub use linear::LinearScan;
pub use pivot::{FirstPivot, PivotSelector, PivotStrategy, RandomPivot};
pub use point::{Neighbor, Point};
pub use tree::{SearchStats, VpNode, VpTree, VpTreeBuilder};
pub use vector::Vector;
