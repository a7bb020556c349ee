//! Loading point sets from JSON.
//!
//! A dataset file is a JSON array of `{ "id": ..., "vector": [...] }` objects.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, VpTreeError};
use crate::point::Point;

/// Decode points from JSON bytes.
pub fn from_json<I: DeserializeOwned>(bytes: &[u8]) -> Result<Vec<Point<I>>> {
    serde_json::from_slice(bytes).map_err(|e| VpTreeError::SerializationError(e.to_string()))
}

/// Encode points to pretty-printed JSON bytes.
pub fn to_json<I: Serialize>(points: &[Point<I>]) -> Result<Vec<u8>> {
    serde_json::to_vec_pretty(points).map_err(|e| VpTreeError::SerializationError(e.to_string()))
}

/// Read a dataset file.
pub fn load_points<I: DeserializeOwned>(path: impl AsRef<Path>) -> Result<Vec<Point<I>>> {
    let bytes = fs::read(path)?;
    from_json(&bytes)
}

/// Write a dataset file.
pub fn save_points<I: Serialize>(path: impl AsRef<Path>, points: &[Point<I>]) -> Result<()> {
    fs::write(path, to_json(points)?)?;
    Ok(())
}
