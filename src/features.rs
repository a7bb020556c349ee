//! Feature extraction boundary.
//!
//! The index never looks at source content; it only needs fixed-dimension
//! vectors. `RandomFeatures` is a stand-in extractor that ignores its input and
//! draws uniform components in `[0, 1)`, for demos and benchmarks until a real
//! embedding model is plugged in.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Result;
use crate::point::Point;
use crate::vector::Vector;

/// Turns a source item (an image path, a document, ...) into a feature vector.
pub trait FeatureExtractor<S: ?Sized> {
    /// Dimension of every vector this extractor produces.
    fn dimension(&self) -> usize;

    fn extract(&mut self, source: &S) -> Result<Vector>;

    /// Extract features for each source, pairing them with the source's id.
    fn extract_points<'a, I>(
        &mut self,
        sources: impl IntoIterator<Item = (I, &'a S)>,
    ) -> Result<Vec<Point<I>>>
    where
        S: 'a,
    {
        sources
            .into_iter()
            .map(|(id, source)| Ok(Point::new(id, self.extract(source)?)))
            .collect()
    }
}

/// Uniform random features, independent of the source.
#[derive(Debug, Clone)]
pub struct RandomFeatures {
    dimension: usize,
    rng: StdRng,
}

impl RandomFeatures {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(dimension: usize, seed: u64) -> Self {
        Self {
            dimension,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draw one vector.
    pub fn sample(&mut self) -> Vector {
        Vector::new((0..self.dimension).map(|_| self.rng.gen::<f64>()).collect())
    }
}

impl<S: ?Sized> FeatureExtractor<S> for RandomFeatures {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn extract(&mut self, _source: &S) -> Result<Vector> {
        Ok(self.sample())
    }
}
