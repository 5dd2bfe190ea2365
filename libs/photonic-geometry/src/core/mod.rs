//! Core value types of the geometry engine.
//!
//! Includes the `Point` alias, the `Direction` tagged variant and the
//! layered `Polygon` every path operation emits.

pub mod direction;
pub mod polygon;
pub mod vec2;
