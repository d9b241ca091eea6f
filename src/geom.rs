// src/geom.rs

// Plain 2D geometry used by the layout and curve passes. Coordinates are
// compared with an explicit L1 tolerance rather than exact float equality,
// so points can be used for occupancy checks via linear scans.

use std::ops::{Add, Neg, Sub};

/// Tolerance for treating two points as the same location.
pub const EPS: f64 = 1e-5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// L1 (Manhattan) distance, used for shell expansion and tolerance checks.
    pub fn l1_dist(&self, other: &Point) -> f64 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Squared Euclidean distance, used for intra-shell ranking. Never needs
    /// the square root since it only ever feeds comparisons.
    pub fn l2_dist_sq(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn dot(&self, other: &Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// True when the two points coincide within [`EPS`] (L1 metric).
    pub fn approx_eq(&self, other: &Point) -> bool {
        self.l1_dist(other) < EPS
    }

    /// Point reflection of `self` through `center`: the unique point such
    /// that `center` is the midpoint of the segment between them.
    pub fn reflect_through(&self, center: &Point) -> Point {
        Point {
            x: 2.0 * center.x - self.x,
            y: 2.0 * center.y - self.y,
        }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point {
            x: -self.x,
            y: -self.y,
        }
    }
}
