//! # Ports
//!
//! A port is a waveguide end: a position plus the outward propagation
//! direction. Components are authored with their input port at the origin
//! pointing WEST and extending EAST; placement maps that canonical port
//! onto a caller-supplied [`Port`].

use serde::{Deserialize, Serialize};

use crate::core::direction::{opposite, Direction};
use crate::core::vec2::{ensure_finite, Point};
use crate::error::Result;
use crate::transform::Transform;

/// Named attachment point of a component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Port {
    /// Attachment position.
    pub position: Point,
    /// Outward propagation direction.
    pub direction: Direction,
}

impl Port {
    /// Creates a port, rejecting non-finite positions and directions.
    pub fn new(position: Point, direction: Direction) -> Result<Self> {
        ensure_finite(position, "port position")?;
        Ok(Self {
            position,
            direction: direction.validate()?,
        })
    }

    /// Same position, reversed direction.
    pub fn flipped(&self) -> Result<Port> {
        Ok(Port {
            position: self.position,
            direction: flip_direction(self.direction)?,
        })
    }

    /// The port mapped through `transform`.
    pub fn transformed(&self, transform: &Transform) -> Result<Port> {
        compose(self, transform)
    }

    /// Whether two ports coincide to within `tolerance` and face the same
    /// way.
    pub fn coincides_with(&self, other: &Port, tolerance: f64) -> bool {
        self.position.distance(other.position) <= tolerance
            && self.direction.same_heading(other.direction)
    }
}

/// Reverses a port direction.
pub fn flip_direction(direction: Direction) -> Result<Direction> {
    opposite(direction)
}

/// Applies `transform` to a port's position and direction.
///
/// Quarter-turn rotations keep cardinal directions cardinal; any other
/// rotation turns them into arbitrary angles.
pub fn compose(port: &Port, transform: &Transform) -> Result<Port> {
    Ok(Port {
        position: transform.apply_point(port.position),
        direction: transform.apply_direction(port.direction)?,
    })
}

/// The rigid transform that carries `anchor` onto `target`.
///
/// `target.direction` is the direction the placed component extends; the
/// anchor ends up at `target.position` facing the opposite way, so it
/// mates with an outward port pointing along `target.direction`.
pub fn placement_transform(anchor: &Port, target: &Port) -> Result<Transform> {
    let target = Port::new(target.position, target.direction)?;
    let facing = flip_direction(anchor.direction)?;
    let rotation = Transform::rotate(target.direction.to_angle()? - facing.to_angle()?)?;
    let offset = target.position - rotation.apply_point(anchor.position);
    Ok(rotation.then(&Transform::translate(offset)))
}
