//! Centralized configuration values shared across the photonic layout pipeline.
//!
//! Each public item in this module documents its purpose and provides a minimal
//! usage example so that downstream crates can remain declarative and avoid
//! scattering literals.

use std::fmt;

// =============================================================================
// PRECISION
// =============================================================================

/// Tolerance (µm) below which a displacement component counts as zero.
///
/// Waypoints whose x or y differ by less than this are treated as lying on
/// the same axis, and straight runs shorter than this are dropped.
///
/// # Examples
/// ```
/// use config::constants::TOLERANCE;
/// assert_eq!(TOLERANCE, 1.0e-6);
/// ```
pub const TOLERANCE: f64 = 1.0e-6;

/// Tolerance (radians) for recognising an angle as an exact multiple of π/2.
///
/// # Examples
/// ```
/// use config::constants::{ANGLE_EPSILON, TOLERANCE};
/// assert!(ANGLE_EPSILON < TOLERANCE);
/// ```
pub const ANGLE_EPSILON: f64 = 1.0e-12;

/// Smallest tangent length a parametric curve may report before it is
/// considered degenerate.
///
/// # Examples
/// ```
/// use config::constants::MIN_TANGENT_NORM;
/// assert!(MIN_TANGENT_NORM > 0.0);
/// ```
pub const MIN_TANGENT_NORM: f64 = 1.0e-12;

// =============================================================================
// DISCRETISATION
// =============================================================================

/// Default mask grid resolution (µm).
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_GRID;
/// assert_eq!(DEFAULT_GRID, 0.001);
/// ```
pub const DEFAULT_GRID: f64 = 0.001;

/// Maximum vertex count of a single emitted polygon (the GDSII limit).
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_MAX_POINTS;
/// assert!(DEFAULT_MAX_POINTS >= 8);
/// ```
pub const DEFAULT_MAX_POINTS: usize = 199;

/// Upper bound on curve evaluations performed while adaptively sampling a
/// single parametric extension.
///
/// # Examples
/// ```
/// use config::constants::{MAX_CURVE_SAMPLES, DEFAULT_MAX_POINTS};
/// assert!(MAX_CURVE_SAMPLES > DEFAULT_MAX_POINTS);
/// ```
pub const MAX_CURVE_SAMPLES: usize = 8192;

/// Number of evenly spaced samples a parametric extension starts from
/// before adaptive refinement.
pub const INITIAL_CURVE_SAMPLES: usize = 9;

// =============================================================================
// WAVEGUIDE TEMPLATE DEFAULTS
// =============================================================================

/// Default waveguide core width (µm).
pub const DEFAULT_WG_WIDTH: f64 = 2.0;

/// Default cladding width on each side of the core (µm).
pub const DEFAULT_CLAD_WIDTH: f64 = 10.0;

/// Default bend radius (µm).
pub const DEFAULT_BEND_RADIUS: f64 = 50.0;

/// Default slot width for slotted waveguides (µm).
pub const DEFAULT_SLOT: f64 = 0.1;

/// Default period of sub-wavelength grating waveguides (µm).
pub const DEFAULT_SWG_PERIOD: f64 = 0.1;

/// Default fraction of each grating period filled with core.
pub const DEFAULT_SWG_DUTY_CYCLE: f64 = 0.5;

/// Default (layer, datatype) of waveguide cores.
pub const DEFAULT_WG_LAYER: (u16, u16) = (1, 0);

/// Default (layer, datatype) of waveguide cladding.
pub const DEFAULT_CLAD_LAYER: (u16, u16) = (2, 0);

// =============================================================================
// BUILD CONFIG
// =============================================================================

/// Immutable snapshot of the discretisation settings a path builder runs
/// with.
///
/// # Examples
/// ```
/// use config::constants::BuildConfig;
/// let config = BuildConfig::default();
/// assert!(config.tolerance > 0.0);
/// assert_eq!(config.tolerance, config.grid / 2.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildConfig {
    /// Maximum chord deviation allowed between an emitted polygon edge and
    /// the exact offset curve.
    pub tolerance: f64,
    /// Mask grid resolution.
    pub grid: f64,
    /// Vertex limit for a single emitted polygon.
    pub max_points: usize,
}

impl BuildConfig {
    /// Builds a configuration enforcing strict validation of the supplied
    /// values.
    ///
    /// # Examples
    /// ```
    /// use config::constants::BuildConfig;
    /// let cfg = BuildConfig::new(5.0e-4, 1.0e-3, 199).expect("valid config");
    /// assert_eq!(cfg.max_points, 199);
    /// ```
    pub fn new(tolerance: f64, grid: f64, max_points: usize) -> Result<Self, ConfigError> {
        if !(tolerance > 0.0) || !tolerance.is_finite() {
            return Err(ConfigError::InvalidTolerance(tolerance));
        }
        if !(grid > 0.0) || !grid.is_finite() {
            return Err(ConfigError::InvalidGrid(grid));
        }
        if max_points < 8 {
            return Err(ConfigError::InvalidMaxPoints(max_points));
        }
        Ok(Self {
            tolerance,
            grid,
            max_points,
        })
    }

    /// Configuration derived from a grid resolution: chord error is held to
    /// half a grid step.
    ///
    /// # Examples
    /// ```
    /// use config::constants::BuildConfig;
    /// let cfg = BuildConfig::for_grid(0.002).expect("valid grid");
    /// assert_eq!(cfg.tolerance, 0.001);
    /// ```
    pub fn for_grid(grid: f64) -> Result<Self, ConfigError> {
        Self::new(grid / 2.0, grid, DEFAULT_MAX_POINTS)
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_GRID / 2.0,
            grid: DEFAULT_GRID,
            max_points: DEFAULT_MAX_POINTS,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Raised when the tolerance is zero, negative or not finite.
    InvalidTolerance(f64),
    /// Raised when the grid resolution is zero, negative or not finite.
    InvalidGrid(f64),
    /// Raised when the vertex limit cannot hold a fractured polygon piece.
    InvalidMaxPoints(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTolerance(value) => {
                write!(f, "tolerance must be positive and finite: {value}")
            }
            ConfigError::InvalidGrid(value) => {
                write!(f, "grid must be positive and finite: {value}")
            }
            ConfigError::InvalidMaxPoints(value) => {
                write!(f, "max_points must be >= 8: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
