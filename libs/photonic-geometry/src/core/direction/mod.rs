//! Propagation directions.
//!
//! A [`Direction`] is either one of the four cardinal symbols or an
//! arbitrary angle. Every rotation in the crate goes through
//! [`Direction::to_angle`] or the exact quarter-turn path in
//! [`Direction::rotate_quarters`], so cardinal values never drift into
//! `89.9999…°`.
//!
//! Angle convention: EAST = 0, NORTH = π/2, WEST = π, SOUTH = −π/2; all
//! normalized angles lie in (−π, π].

use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::fmt;

use config::constants::{ANGLE_EPSILON, TOLERANCE};
use serde::{Deserialize, Serialize};

use crate::core::vec2::{ensure_finite, Point};
use crate::error::{Error, Result};

// =============================================================================
// DIRECTION
// =============================================================================

/// Direction of propagation or of an outward-facing port.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    /// +x
    East,
    /// +y
    North,
    /// −x
    West,
    /// −y
    South,
    /// Arbitrary angle in radians, counter-clockwise from +x.
    Angle(f64),
}

impl Direction {
    /// Builds a direction from an angle, snapping exact multiples of π/2
    /// (within [`ANGLE_EPSILON`]) to the matching cardinal symbol.
    ///
    /// # Examples
    /// ```
    /// use photonic_geometry::Direction;
    /// use std::f64::consts::FRAC_PI_2;
    ///
    /// assert_eq!(Direction::from_angle(FRAC_PI_2).unwrap(), Direction::North);
    /// assert!(matches!(Direction::from_angle(0.3).unwrap(), Direction::Angle(_)));
    /// ```
    pub fn from_angle(angle: f64) -> Result<Self> {
        if !angle.is_finite() {
            return Err(Error::InvalidDirection { angle });
        }
        Ok(match quarter_turns_of(angle) {
            Some(k) => Self::from_quarter_turns(k),
            None => Direction::Angle(normalize_angle(angle)),
        })
    }

    /// Cardinal symbol reached after `k` counter-clockwise quarter turns
    /// from EAST.
    pub fn from_quarter_turns(k: i64) -> Self {
        match k.rem_euclid(4) {
            0 => Direction::East,
            1 => Direction::North,
            2 => Direction::West,
            _ => Direction::South,
        }
    }

    /// Number of quarter turns from EAST, for cardinal symbols only.
    pub fn quarter_turns(self) -> Option<i64> {
        match self {
            Direction::East => Some(0),
            Direction::North => Some(1),
            Direction::West => Some(2),
            Direction::South => Some(3),
            Direction::Angle(_) => None,
        }
    }

    /// Whether this is one of the four cardinal symbols.
    pub fn is_cardinal(self) -> bool {
        self.quarter_turns().is_some()
    }

    /// The single angle normalization used everywhere rotation math is
    /// needed.
    ///
    /// Fails with [`Error::InvalidDirection`] for non-finite angles.
    pub fn to_angle(self) -> Result<f64> {
        match self {
            Direction::East => Ok(0.0),
            Direction::North => Ok(FRAC_PI_2),
            Direction::West => Ok(PI),
            Direction::South => Ok(-FRAC_PI_2),
            Direction::Angle(angle) if angle.is_finite() => Ok(normalize_angle(angle)),
            Direction::Angle(angle) => Err(Error::InvalidDirection { angle }),
        }
    }

    /// Validates the direction, returning it unchanged.
    pub fn validate(self) -> Result<Self> {
        self.to_angle().map(|_| self)
    }

    /// The reverse direction: NORTH↔SOUTH, EAST↔WEST, θ → θ+π.
    pub fn opposite(self) -> Result<Self> {
        match self {
            Direction::Angle(angle) => {
                let base = Direction::Angle(angle).to_angle()?;
                Ok(Direction::Angle(normalize_angle(base + PI)))
            }
            cardinal => Ok(cardinal.rotate_quarters(2)),
        }
    }

    /// Rotates counter-clockwise by `k` quarter turns. Exact for cardinal
    /// symbols.
    pub fn rotate_quarters(self, k: i64) -> Self {
        match self.quarter_turns() {
            Some(q) => Self::from_quarter_turns(q + k),
            None => match self {
                Direction::Angle(angle) => {
                    Direction::Angle(normalize_angle(angle + k as f64 * FRAC_PI_2))
                }
                _ => self,
            },
        }
    }

    /// Rotates counter-clockwise by `angle` radians.
    ///
    /// Cardinal symbols rotated by an exact multiple of π/2 stay cardinal;
    /// any other rotation yields an arbitrary angle.
    pub fn rotate_by(self, angle: f64) -> Result<Self> {
        if !angle.is_finite() {
            return Err(Error::InvalidDirection { angle });
        }
        let base = self.to_angle()?;
        match (self.is_cardinal(), quarter_turns_of(angle)) {
            (true, Some(k)) => Ok(self.rotate_quarters(k)),
            _ => Ok(Direction::Angle(normalize_angle(base + angle))),
        }
    }

    /// Reflection about the x axis (θ → −θ).
    pub fn mirrored(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::Angle(angle) => Direction::Angle(normalize_angle(-angle)),
            other => other,
        }
    }

    /// Unit vector pointing along this direction.
    pub fn unit_vector(self) -> Result<Point> {
        let (sin, cos) = exact_sin_cos(self.to_angle()?);
        Ok(Point::new(cos, sin))
    }

    /// Whether two directions describe the same heading.
    pub fn same_heading(self, other: Direction) -> bool {
        match (self.to_angle(), other.to_angle()) {
            (Ok(a), Ok(b)) => normalize_angle(a - b).abs() <= ANGLE_EPSILON,
            _ => false,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::East => write!(f, "EAST"),
            Direction::North => write!(f, "NORTH"),
            Direction::West => write!(f, "WEST"),
            Direction::South => write!(f, "SOUTH"),
            Direction::Angle(angle) => write!(f, "{angle} rad"),
        }
    }
}

// =============================================================================
// ANGLE HELPERS
// =============================================================================

/// Normalizes an angle into (−π, π].
///
/// # Examples
/// ```
/// use photonic_geometry::normalize_angle;
/// use std::f64::consts::PI;
///
/// assert_eq!(normalize_angle(-PI), PI);
/// assert_eq!(normalize_angle(0.0), 0.0);
/// ```
pub fn normalize_angle(angle: f64) -> f64 {
    let mut a = angle.rem_euclid(TAU);
    if a > PI {
        a -= TAU;
    }
    a
}

/// Returns `k` when `angle` is within [`ANGLE_EPSILON`] of `k·π/2`.
pub fn quarter_turns_of(angle: f64) -> Option<i64> {
    if !angle.is_finite() {
        return None;
    }
    let k = (angle / FRAC_PI_2).round();
    if (angle - k * FRAC_PI_2).abs() <= ANGLE_EPSILON {
        Some(k as i64)
    } else {
        None
    }
}

/// `(sin, cos)` of `angle`, returning exact 0/±1 values for multiples of
/// π/2.
pub fn exact_sin_cos(angle: f64) -> (f64, f64) {
    match quarter_turns_of(angle).map(|k| k.rem_euclid(4)) {
        Some(0) => (0.0, 1.0),
        Some(1) => (1.0, 0.0),
        Some(2) => (0.0, -1.0),
        Some(_) => (-1.0, 0.0),
        None => angle.sin_cos(),
    }
}

// =============================================================================
// PRIMITIVES
// =============================================================================

/// Classifies `p2 - p1` into a cardinal direction.
///
/// Components within [`TOLERANCE`] of zero are snapped; anything further
/// off-axis fails loudly, as does a zero-length or non-finite displacement.
///
/// # Examples
/// ```
/// use photonic_geometry::{cardinal_direction, Direction, Point};
///
/// let dir = cardinal_direction(Point::new(0.0, 0.0), Point::new(-100.0, 0.0)).unwrap();
/// assert_eq!(dir, Direction::West);
/// assert!(cardinal_direction(Point::new(0.0, 0.0), Point::new(1.0, 1.0)).is_err());
/// ```
pub fn cardinal_direction(p1: Point, p2: Point) -> Result<Direction> {
    ensure_finite(p1, "start point")?;
    ensure_finite(p2, "end point")?;
    let d = p2 - p1;
    let (flat_x, flat_y) = (d.x.abs() <= TOLERANCE, d.y.abs() <= TOLERANCE);
    match (flat_x, flat_y) {
        (true, true) => Err(Error::geometry(format!(
            "zero-length segment between ({}, {}) and ({}, {})",
            p1.x, p1.y, p2.x, p2.y
        ))),
        (true, false) if d.y > 0.0 => Ok(Direction::North),
        (true, false) => Ok(Direction::South),
        (false, true) if d.x > 0.0 => Ok(Direction::East),
        (false, true) => Ok(Direction::West),
        (false, false) => Err(Error::geometry(format!(
            "segment from ({}, {}) to ({}, {}) is not axis-aligned (dx = {}, dy = {}); \
             waypoints must differ in exactly one coordinate",
            p1.x, p1.y, p2.x, p2.y, d.x, d.y
        ))),
    }
}

/// Signed angle swept turning from `from` to `to`, in (−π, π],
/// counter-clockwise positive.
///
/// # Examples
/// ```
/// use photonic_geometry::{turn_angle, Direction};
/// use std::f64::consts::FRAC_PI_2;
///
/// assert_eq!(turn_angle(Direction::East, Direction::North).unwrap(), FRAC_PI_2);
/// assert_eq!(turn_angle(Direction::North, Direction::East).unwrap(), -FRAC_PI_2);
/// ```
pub fn turn_angle(from: Direction, to: Direction) -> Result<f64> {
    if let (Some(a), Some(b)) = (from.quarter_turns(), to.quarter_turns()) {
        return Ok(match (b - a).rem_euclid(4) {
            0 => 0.0,
            1 => FRAC_PI_2,
            2 => PI,
            _ => -FRAC_PI_2,
        });
    }
    Ok(normalize_angle(to.to_angle()? - from.to_angle()?))
}

/// Moves `point` by `distance` along `direction`. Exact for cardinal
/// directions.
pub fn translate(point: Point, distance: f64, direction: Direction) -> Result<Point> {
    if !distance.is_finite() {
        return Err(Error::geometry(format!(
            "translation distance must be finite, got {distance}"
        )));
    }
    let offset = match direction {
        Direction::East => Point::new(distance, 0.0),
        Direction::North => Point::new(0.0, distance),
        Direction::West => Point::new(-distance, 0.0),
        Direction::South => Point::new(0.0, -distance),
        Direction::Angle(_) => direction.unit_vector()? * distance,
    };
    Ok(point + offset)
}

/// Free-function form of [`Direction::opposite`].
pub fn opposite(direction: Direction) -> Result<Direction> {
    direction.opposite()
}

#[cfg(test)]
mod tests;
