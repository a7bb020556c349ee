//! Index configuration, loadable from JSON.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::distance::DistanceMetric;
use crate::error::{Result, VpTreeError};
use crate::pivot::PivotStrategy;
use crate::point::Point;
use crate::tree::{VpTree, VpTreeBuilder};

/// How to build an index.
///
/// Every field has a default, so `{}` is a valid config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexConfig {
    pub metric: DistanceMetric,
    pub pivot: PivotStrategy,
    /// Seed for random pivot selection; entropy when absent.
    pub seed: Option<u64>,
    /// Expected vector dimension, checked at build time when set.
    pub dimension: Option<usize>,
    /// Treat an empty point set as an error.
    pub require_non_empty: bool,
}

impl IndexConfig {
    /// Parse a config from JSON text.
    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| VpTreeError::ConfigError(e.to_string()))
    }

    /// Read a config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Build a tree over `points` as this config describes.
    pub fn build_tree<I>(
        &self,
        points: impl IntoIterator<Item = Point<I>>,
    ) -> Result<VpTree<I, DistanceMetric>> {
        let mut builder = VpTreeBuilder::new()
            .metric(self.metric)
            .pivot_selector(self.pivot.selector::<I>(self.seed))
            .require_non_empty(self.require_non_empty);
        if let Some(dimension) = self.dimension {
            builder = builder.dimension(dimension);
        }
        builder.build(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Vector;

    #[test]
    fn test_empty_object_is_default() {
        let config = IndexConfig::from_json_str("{}").unwrap();
        assert_eq!(config, IndexConfig::default());
        assert_eq!(config.metric, DistanceMetric::Euclidean);
        assert_eq!(config.pivot, PivotStrategy::Random);
    }

    #[test]
    fn test_parse_full_config() {
        let config = IndexConfig::from_json_str(
            r#"{"metric": "manhattan", "pivot": "first", "seed": 42, "dimension": 2, "require_non_empty": true}"#,
        )
        .unwrap();
        assert_eq!(config.metric, DistanceMetric::Manhattan);
        assert_eq!(config.pivot, PivotStrategy::First);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.dimension, Some(2));
        assert!(config.require_non_empty);
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(matches!(
            IndexConfig::from_json_str(r#"{"leaf_size": 8}"#),
            Err(VpTreeError::ConfigError(_))
        ));
    }

    #[test]
    fn test_build_tree_from_config() {
        let config = IndexConfig {
            seed: Some(9),
            ..IndexConfig::default()
        };
        let points = (0..20).map(|i| Point::new(i, vec![i as f64, 0.0]));
        let tree = config.build_tree(points).unwrap();
        assert_eq!(tree.len(), 20);
        let ids = tree.search(&Vector::new(vec![4.2, 0.0]), 2).unwrap();
        assert_eq!(ids, vec![4, 5]);
    }

    #[test]
    fn test_build_tree_enforces_policy() {
        let config = IndexConfig {
            require_non_empty: true,
            ..IndexConfig::default()
        };
        assert!(matches!(
            config.build_tree(Vec::<Point<u8>>::new()),
            Err(VpTreeError::EmptyInput)
        ));

        let config = IndexConfig {
            dimension: Some(3),
            ..IndexConfig::default()
        };
        assert!(matches!(
            config.build_tree(vec![Point::new(0u8, vec![1.0])]),
            Err(VpTreeError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        fs::write(&path, r#"{"pivot": "first"}"#).unwrap();
        let config = IndexConfig::from_json_file(&path).unwrap();
        assert_eq!(config.pivot, PivotStrategy::First);
    }
}
