//! # Error Types
//!
//! Error types for geometry construction. All errors are deterministic
//! functions of their inputs and carry the values that violated the
//! constraint.
//!
//! ## Error Policy
//!
//! - NO fallback mechanisms when a build fails
//! - All failures propagate to the caller of the top-level build
//! - A component either builds completely or returns an error

use config::constants::ConfigError;
use thiserror::Error;

use crate::core::vec2::Point;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while building photonic geometry.
///
/// ## Example
///
/// ```rust
/// use photonic_geometry::{cardinal_direction, Error, Point};
///
/// match cardinal_direction(Point::new(0.0, 0.0), Point::new(3.0, 4.0)) {
///     Ok(dir) => println!("heading {dir:?}"),
///     Err(Error::Geometry { message }) => eprintln!("bad waypoints: {message}"),
///     Err(e) => eprintln!("other error: {e}"),
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Malformed point or direction input: a non axis-aligned waypoint
    /// where a 90° corner is required, a zero-length segment, or a
    /// non-finite coordinate.
    #[error("Geometry error: {message}")]
    Geometry {
        /// Description of the violated constraint.
        message: String,
    },

    /// A bend needs more straight run than the waypoints provide.
    #[error(
        "Insufficient run between ({}, {}) and ({}, {}): bends need {required} but only {available} is available",
        .start.x, .start.y, .end.x, .end.y
    )]
    InsufficientRun {
        /// First waypoint of the segment.
        start: Point,
        /// Second waypoint of the segment.
        end: Point,
        /// Distance between the waypoints.
        available: f64,
        /// Run consumed by the bends at both ends of the segment.
        required: f64,
    },

    /// A parametric curve produced a non-finite point or a zero tangent.
    #[error("Degenerate curve at t = {t}: {reason}")]
    DegenerateCurve {
        /// Curve parameter at which the failure was detected.
        t: f64,
        /// What was wrong with the evaluation.
        reason: String,
    },

    /// A direction is neither a cardinal symbol nor a finite angle.
    #[error("Invalid direction: angle {angle} is not finite")]
    InvalidDirection {
        /// The offending angle value.
        angle: f64,
    },

    /// A component-level parameter is outside its documented domain.
    #[error("Invalid parameter '{name}' = {value}: {constraint}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Supplied value.
        value: f64,
        /// The constraint it violated.
        constraint: String,
    },

    /// A component has no port with the requested name.
    #[error("Component '{component}' has no port named '{port}'")]
    UnknownPort {
        /// Component name.
        component: String,
        /// Requested port name.
        port: String,
    },

    /// Invalid build configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    /// Shorthand for a [`Error::Geometry`] error.
    pub fn geometry(message: impl Into<String>) -> Self {
        Error::Geometry {
            message: message.into(),
        }
    }

    /// Shorthand for an [`Error::InvalidParameter`] error.
    pub fn invalid_parameter(
        name: impl Into<String>,
        value: f64,
        constraint: impl Into<String>,
    ) -> Self {
        Error::InvalidParameter {
            name: name.into(),
            value,
            constraint: constraint.into(),
        }
    }
}

// =============================================================================
// RESULT TYPE ALIAS
// =============================================================================

/// Result type alias for geometry operations.
pub type Result<T> = std::result::Result<T, Error>;

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Test error display messages carry the offending values.
    #[test]
    fn test_error_display() {
        let err = Error::InsufficientRun {
            start: Point::new(0.0, 0.0),
            end: Point::new(30.0, 0.0),
            available: 30.0,
            required: 100.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("(30, 0)"));
        assert!(msg.contains("100"));

        let param = Error::invalid_parameter("duty_cycle", 1.5, "must lie in [0, 1]");
        assert!(param.to_string().contains("duty_cycle"));
        assert!(param.to_string().contains("1.5"));
    }

    #[test]
    fn test_config_error_converts() {
        let err: Error = ConfigError::InvalidGrid(0.0).into();
        assert!(matches!(err, Error::Config(_)));
    }

    /// Errors must cross thread boundaries for parallel mask builds.
    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
