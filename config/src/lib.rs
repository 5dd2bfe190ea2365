//! # Config Crate
//!
//! Centralized configuration constants for the photonic layout pipeline.
//! Tolerances, grid defaults and waveguide template defaults are defined
//! here so the geometry engine and the component recipes agree on them.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{TOLERANCE, DEFAULT_GRID, DEFAULT_MAX_POINTS};
//!
//! // Two coordinates closer than TOLERANCE are treated as equal
//! let dx: f64 = 4.0e-7;
//! assert!(dx.abs() <= TOLERANCE);
//!
//! // Arc discretisation keeps chord error below half the grid
//! assert!(DEFAULT_GRID / 2.0 < TOLERANCE * 1000.0);
//! assert_eq!(DEFAULT_MAX_POINTS, 199);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Units**: All lengths are micrometres, all angles radians
//! - **Mask Compatible**: Limits match what GDSII writers accept

pub mod constants;
