//! Feature vector type

use crate::error::{Result, VpTreeError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A fixed-length feature vector in n-dimensional space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vector {
    data: Vec<f64>,
}

impl Vector {
    /// Create a new vector from a Vec<f64>
    pub fn new(data: Vec<f64>) -> Self {
        Self { data }
    }

    /// Get the dimension of the vector
    pub fn dimension(&self) -> usize {
        self.data.len()
    }

    /// Get the underlying data as a slice
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Check if this vector has the same dimension as another
    pub fn has_same_dimension(&self, other: &Vector) -> bool {
        self.dimension() == other.dimension()
    }

    /// Fail with `DimensionMismatch` unless this vector has `expected` components.
    pub fn check_dimension(&self, expected: usize) -> Result<()> {
        if self.dimension() != expected {
            return Err(VpTreeError::DimensionMismatch {
                expected,
                actual: self.dimension(),
            });
        }
        Ok(())
    }

    /// Fail with `InvalidVector` if any component is NaN or infinite.
    ///
    /// Non-finite components break the metric axioms the tree prunes with.
    pub fn check_finite(&self) -> Result<()> {
        match self.data.iter().position(|x| !x.is_finite()) {
            Some(i) => Err(VpTreeError::InvalidVector {
                reason: format!("Non-finite component {} at index {}", self.data[i], i),
            }),
            None => Ok(()),
        }
    }
}

impl From<Vec<f64>> for Vector {
    fn from(data: Vec<f64>) -> Self {
        Self::new(data)
    }
}

impl FromStr for Vector {
    type Err = VpTreeError;

    /// Parse a vector from a comma-separated string
    fn from_str(s: &str) -> Result<Self> {
        let data: Result<Vec<f64>> = s
            .split(',')
            .map(|x| {
                x.trim()
                    .parse::<f64>()
                    .map_err(|_| VpTreeError::InvalidVector {
                        reason: format!("Invalid float: {:?}", x.trim()),
                    })
            })
            .collect();
        let vector = Vector::new(data?);
        vector.check_finite()?;
        Ok(vector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_creation() {
        let v = Vector::new(vec![1.0, 2.0, 3.0]);
        assert_eq!(v.dimension(), 3);
        assert_eq!(v.as_slice(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_check_finite() {
        assert!(Vector::new(vec![0.0, -1.5, 1e300]).check_finite().is_ok());
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                Vector::new(vec![1.0, bad]).check_finite(),
                Err(VpTreeError::InvalidVector { .. })
            ));
        }
    }

    #[test]
    fn test_from_str_rejects_non_finite() {
        for text in ["NaN", "1.0, inf", "-inf, 2.0"] {
            assert!(matches!(
                text.parse::<Vector>(),
                Err(VpTreeError::InvalidVector { .. })
            ));
        }
    }

    #[test]
    fn test_from_str() {
        let v: Vector = "1.0, 2.0, 3.0".parse().unwrap();
        assert_eq!(v.dimension(), 3);
        assert_eq!(v.as_slice(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_from_str_rejects_garbage() {
        assert!(matches!(
            "1.0,abc".parse::<Vector>(),
            Err(VpTreeError::InvalidVector { .. })
        ));
        assert!(matches!(
            "".parse::<Vector>(),
            Err(VpTreeError::InvalidVector { .. })
        ));
    }

    #[test]
    fn test_check_dimension() {
        let v = Vector::new(vec![1.0, 2.0]);
        assert!(v.check_dimension(2).is_ok());
        assert!(matches!(
            v.check_dimension(3),
            Err(VpTreeError::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_serde_transparent() {
        let v: Vector = serde_json::from_str("[0.5, 1.5]").unwrap();
        assert_eq!(v.as_slice(), &[0.5, 1.5]);
        assert_eq!(serde_json::to_string(&v).unwrap(), "[0.5,1.5]");
    }
}
