//! # Photonic Geometry
//!
//! Curve, path-offsetting and port engine for integrated photonic mask
//! layout. Every component recipe is a linear sequence of calls into this
//! crate.
//!
//! ## Architecture
//!
//! ```text
//! WaveguideTemplate (shared, read-only)
//!       ↓
//! PathBuilder + curves → Polygon list
//!       ↓
//! Component (canonical frame) → auto_place (Transform) → Mask
//! ```
//!
//! ## Example
//!
//! ```rust
//! use photonic_geometry::path::PathBuilder;
//! use photonic_geometry::Point;
//!
//! let mut path = PathBuilder::new(Point::new(0.0, 0.0), 0.5)?;
//! path.straight(100.0)?;
//! assert_eq!(path.position(), Point::new(100.0, 0.0));
//!
//! let polygons = path.extract_polygons();
//! assert_eq!(polygons.len(), 1);
//! assert!((polygons[0].area() - 50.0).abs() < 1e-6);
//! # Ok::<(), photonic_geometry::Error>(())
//! ```
//!
//! ## Design Principles
//!
//! - **One direction type**: cardinal symbols and arbitrary angles share
//!   [`Direction`]; quarter turns stay exact
//! - **Single-owner builders**: path state lives in one build call
//! - **Fail fast**: malformed input returns an [`Error`], never clipped
//!   geometry

pub mod component;
pub mod core;
pub mod curves;
pub mod error;
pub mod mask;
pub mod path;
pub mod port;
pub mod template;
pub mod transform;

// Re-export public API
pub use component::{Component, ComponentRecipe, INPUT_PORT, OUTPUT_PORT};
pub use crate::core::direction::{
    cardinal_direction, normalize_angle, opposite, translate, turn_angle, Direction,
};
pub use crate::core::polygon::{LayerSpec, Polygon};
pub use crate::core::vec2::{angle_of, distance, Point};
pub use error::{Error, Result};
pub use mask::{ComponentId, Mask, MaskLayer};
pub use path::{PathBuilder, Profile, WaveguidePath};
pub use port::{compose, flip_direction, Port};
pub use template::{WaveguideTemplate, WaveguideTemplateBuilder};
pub use transform::{Rotation, Transform};
