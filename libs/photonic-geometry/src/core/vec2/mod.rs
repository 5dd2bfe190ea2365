//! 2D point definitions for the geometry kernel.
//!
//! Provides the `Point` alias for `glam::DVec2` and the distance/angle
//! helpers every component recipe leans on.

pub use glam::DVec2 as Point;

use crate::error::{Error, Result};

/// Euclidean distance between two points.
///
/// # Examples
/// ```
/// use photonic_geometry::core::vec2::{distance, Point};
///
/// assert_eq!(distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0)), 5.0);
/// ```
pub fn distance(p1: Point, p2: Point) -> f64 {
    p1.distance(p2)
}

/// Exact radian angle of the displacement `p2 - p1`, in (−π, π].
///
/// Unlike [`cardinal_direction`](crate::cardinal_direction) this is not
/// restricted to axis-aligned displacements.
pub fn angle_of(p1: Point, p2: Point) -> f64 {
    let d = p2 - p1;
    d.y.atan2(d.x)
}

/// Fails with a geometry error if either coordinate of `p` is not finite.
pub fn ensure_finite(p: Point, what: &str) -> Result<Point> {
    if p.is_finite() {
        Ok(p)
    } else {
        Err(Error::geometry(format!(
            "{what} has a non-finite coordinate: ({}, {})",
            p.x, p.y
        )))
    }
}

/// Distance from `p` to the closed segment `a`–`b`.
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len2 = ab.length_squared();
    if len2 == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Rotates `p` counter-clockwise about the origin by the angle whose
/// sine and cosine are given.
#[inline]
pub fn rotate_sin_cos(p: Point, sin: f64, cos: f64) -> Point {
    Point::new(p.x * cos - p.y * sin, p.x * sin + p.y * cos)
}
