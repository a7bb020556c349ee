//! Points: an identifier paired with its feature vector.

use serde::{Deserialize, Serialize};

use crate::vector::Vector;

/// An identified feature vector. The identifier is opaque to the index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point<I> {
    pub id: I,
    pub vector: Vector,
}

impl<I> Point<I> {
    pub fn new(id: I, vector: impl Into<Vector>) -> Self {
        Self {
            id,
            vector: vector.into(),
        }
    }

    pub fn dimension(&self) -> usize {
        self.vector.dimension()
    }
}

/// A search hit: the matching identifier and its distance to the query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Neighbor<I> {
    pub id: I,
    pub distance: f64,
}
