//! Vantage point selection strategies.
//!
//! Pivot choice affects tree balance and therefore search speed, never the
//! search result.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::point::Point;

/// Chooses the vantage point for a node from the points assigned to it.
pub trait PivotSelector<I> {
    /// Return an index into `points`. Only called with a non-empty slice.
    fn select(&mut self, points: &[Point<I>]) -> usize;
}

/// Uniform random choice. Seed it for reproducible trees.
#[derive(Debug, Clone)]
pub struct RandomPivot {
    rng: StdRng,
}

impl RandomPivot {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for RandomPivot {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl<I> PivotSelector<I> for RandomPivot {
    fn select(&mut self, points: &[Point<I>]) -> usize {
        self.rng.gen_range(0..points.len())
    }
}

/// Always the first point of the node's set.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstPivot;

impl<I> PivotSelector<I> for FirstPivot {
    fn select(&mut self, _points: &[Point<I>]) -> usize {
        0
    }
}

/// Pivot strategies selectable from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PivotStrategy {
    #[default]
    Random,
    First,
}

impl PivotStrategy {
    /// Instantiate the strategy. `seed` only applies to `Random`.
    pub fn selector<I>(self, seed: Option<u64>) -> Box<dyn PivotSelector<I> + Send> {
        match self {
            PivotStrategy::Random => Box::new(match seed {
                Some(seed) => RandomPivot::seeded(seed),
                None => RandomPivot::from_entropy(),
            }),
            PivotStrategy::First => Box::new(FirstPivot),
        }
    }
}

impl<I, S: PivotSelector<I> + ?Sized> PivotSelector<I> for Box<S> {
    fn select(&mut self, points: &[Point<I>]) -> usize {
        (**self).select(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(n: usize) -> Vec<Point<usize>> {
        (0..n).map(|i| Point::new(i, vec![i as f64])).collect()
    }

    #[test]
    fn test_seeded_random_is_reproducible() {
        let pts = points(50);
        let mut a = RandomPivot::seeded(7);
        let mut b = RandomPivot::seeded(7);
        for _ in 0..20 {
            assert_eq!(a.select(&pts), b.select(&pts));
        }
    }

    #[test]
    fn test_random_stays_in_bounds() {
        let pts = points(3);
        let mut sel = RandomPivot::seeded(1);
        for _ in 0..100 {
            assert!(sel.select(&pts) < 3);
        }
    }

    #[test]
    fn test_first_pivot() {
        assert_eq!(FirstPivot.select(&points(5)), 0);
    }

    #[test]
    fn test_boxed_strategy() {
        let pts = points(4);
        let mut sel = PivotStrategy::First.selector::<usize>(None);
        assert_eq!(sel.select(&pts), 0);
    }
}
