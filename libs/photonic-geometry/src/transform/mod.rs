//! # Rigid Transforms
//!
//! Placement of canonical-frame geometry: an optional reflection about the
//! x axis, then a rotation, then a translation.
//!
//! ```text
//! T(p) = translation + R(θ) · M · p        M = diag(1, ±1)
//! ```
//!
//! Rotations by whole quarter turns are stored as [`Rotation::Quarter`] and
//! applied with exact 0/±1 coefficients, so cardinal directions stay
//! cardinal and axis-aligned coordinates do not pick up rounding noise.

use std::f64::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

use crate::core::direction::{exact_sin_cos, normalize_angle, quarter_turns_of, Direction};
use crate::core::polygon::Polygon;
use crate::core::vec2::{rotate_sin_cos, Point};
use crate::error::{Error, Result};

// =============================================================================
// ROTATION
// =============================================================================

/// Counter-clockwise rotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Rotation {
    /// `k` quarter turns, `k ∈ 0..4`.
    Quarter(u8),
    /// Arbitrary angle in radians, normalized to (−π, π].
    Angle(f64),
}

impl Rotation {
    /// No rotation.
    pub const IDENTITY: Rotation = Rotation::Quarter(0);

    /// Rotation by `angle`, snapped to a quarter turn when it is one.
    pub fn from_angle(angle: f64) -> Result<Self> {
        if !angle.is_finite() {
            return Err(Error::InvalidDirection { angle });
        }
        Ok(match quarter_turns_of(angle) {
            Some(k) => Self::quarters(k),
            None => Rotation::Angle(normalize_angle(angle)),
        })
    }

    /// Rotation by `k` quarter turns.
    pub fn quarters(k: i64) -> Self {
        Rotation::Quarter(k.rem_euclid(4) as u8)
    }

    /// Angle in radians.
    pub fn angle(self) -> f64 {
        match self {
            Rotation::Quarter(k) => normalize_angle(f64::from(k) * FRAC_PI_2),
            Rotation::Angle(a) => a,
        }
    }

    /// `(sin, cos)`, exact for quarter turns.
    fn sin_cos(self) -> (f64, f64) {
        match self {
            Rotation::Quarter(0) => (0.0, 1.0),
            Rotation::Quarter(1) => (1.0, 0.0),
            Rotation::Quarter(2) => (0.0, -1.0),
            Rotation::Quarter(_) => (-1.0, 0.0),
            Rotation::Angle(a) => exact_sin_cos(a),
        }
    }

    fn negated(self) -> Self {
        match self {
            Rotation::Quarter(k) => Self::quarters(-i64::from(k)),
            Rotation::Angle(a) => Rotation::Angle(normalize_angle(-a)),
        }
    }

    fn compose(self, other: Rotation) -> Self {
        match (self, other) {
            (Rotation::Quarter(a), Rotation::Quarter(b)) => {
                Self::quarters(i64::from(a) + i64::from(b))
            }
            (a, b) => {
                let sum = a.angle() + b.angle();
                match quarter_turns_of(sum) {
                    Some(k) => Self::quarters(k),
                    None => Rotation::Angle(normalize_angle(sum)),
                }
            }
        }
    }

    fn apply_direction(self, direction: Direction) -> Result<Direction> {
        match self {
            Rotation::Quarter(k) => Ok(direction.validate()?.rotate_quarters(i64::from(k))),
            Rotation::Angle(a) => direction.rotate_by(a),
        }
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// =============================================================================
// TRANSFORM
// =============================================================================

/// Reflection, rotation and translation, applied in that order.
///
/// ## Example
///
/// ```rust
/// use photonic_geometry::transform::Transform;
/// use photonic_geometry::{Direction, Point};
/// use std::f64::consts::FRAC_PI_2;
///
/// let t = Transform::rotate(FRAC_PI_2)?.then(&Transform::translate(Point::new(5.0, 0.0)));
/// assert_eq!(t.apply_point(Point::new(1.0, 0.0)), Point::new(5.0, 1.0));
/// assert_eq!(t.apply_direction(Direction::East)?, Direction::North);
/// # Ok::<(), photonic_geometry::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Transform {
    /// Reflect about the x axis before rotating.
    pub mirror: bool,
    /// Rotation about the origin.
    pub rotation: Rotation,
    /// Translation applied last.
    pub translation: Point,
}

impl Transform {
    /// The identity transform.
    pub fn identity() -> Self {
        Self::default()
    }

    /// Translation by `offset`.
    pub fn translate(offset: Point) -> Self {
        Self {
            translation: offset,
            ..Self::default()
        }
    }

    /// Rotation about the origin by `angle` radians.
    pub fn rotate(angle: f64) -> Result<Self> {
        Ok(Self {
            rotation: Rotation::from_angle(angle)?,
            ..Self::default()
        })
    }

    /// Reflection about the x axis.
    pub fn reflect_vert() -> Self {
        Self {
            mirror: true,
            ..Self::default()
        }
    }

    /// Whether this is the identity.
    pub fn is_identity(&self) -> bool {
        !self.mirror && self.rotation == Rotation::IDENTITY && self.translation == Point::ZERO
    }

    /// Maps a point.
    pub fn apply_point(&self, p: Point) -> Point {
        let local = if self.mirror { Point::new(p.x, -p.y) } else { p };
        let (sin, cos) = self.rotation.sin_cos();
        self.translation + rotate_sin_cos(local, sin, cos)
    }

    /// Maps a direction; quarter-turn rotations keep cardinal symbols
    /// cardinal.
    pub fn apply_direction(&self, direction: Direction) -> Result<Direction> {
        let local = if self.mirror {
            direction.validate()?.mirrored()
        } else {
            direction
        };
        self.rotation.apply_direction(local)
    }

    /// Maps every vertex of a polygon. Reflections reverse the vertex order
    /// so the winding stays counter-clockwise.
    pub fn apply_polygon(&self, polygon: &Polygon) -> Polygon {
        let mut points: Vec<Point> = polygon.points.iter().map(|p| self.apply_point(*p)).collect();
        if self.mirror {
            points.reverse();
        }
        Polygon::new(points, polygon.layer)
    }

    /// Cascade: `self` first, then `next`.
    pub fn then(&self, next: &Transform) -> Transform {
        let rotation = if next.mirror {
            self.rotation.negated()
        } else {
            self.rotation
        };
        Transform {
            mirror: self.mirror != next.mirror,
            rotation: next.rotation.compose(rotation),
            translation: next.apply_point(self.translation),
        }
    }

    /// The transform undoing `self`.
    pub fn inverse(&self) -> Transform {
        let rotation = if self.mirror {
            self.rotation
        } else {
            self.rotation.negated()
        };
        let undo = Transform {
            mirror: self.mirror,
            rotation,
            translation: Point::ZERO,
        };
        Transform {
            translation: -undo.apply_point(self.translation),
            ..undo
        }
    }
}

#[cfg(test)]
mod tests;
