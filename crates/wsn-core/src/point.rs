//! Planar coordinate type for node placement.
//!
//! Nodes live in the unit square `[0, 1] × [0, 1]`.  `Point` uses `f64`
//! because the connectivity rule `distance ≤ rc` is evaluated near its
//! threshold for every candidate pair; single precision would flip edges
//! that sit on the boundary.

use crate::SimRng;

/// A position in the plane, normally inside the unit square.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Sample a point uniformly from `[0, 1) × [0, 1)`.
    ///
    /// Draws `x` first, then `y`.  The order is part of the reproducibility
    /// contract: the same seed always yields the same layout.
    pub fn random_in_unit_square(rng: &mut SimRng) -> Self {
        let x = rng.gen_range(0.0..1.0);
        let y = rng.gen_range(0.0..1.0);
        Self { x, y }
    }

    /// Squared Euclidean distance.  Prefer this for threshold comparisons.
    #[inline]
    pub fn distance_sq(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Euclidean distance.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        self.distance_sq(other).sqrt()
    }

    /// `true` if the point lies inside the closed unit square.
    #[inline]
    pub fn in_unit_square(self) -> bool {
        (0.0..=1.0).contains(&self.x) && (0.0..=1.0).contains(&self.y)
    }

    #[inline]
    pub fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.4}, {:.4})", self.x, self.y)
    }
}
