//! # Parametric Curves
//!
//! Curves map a normalized parameter `t ∈ [0, 1]` to a point in the local
//! frame of the path that extrudes them (start at the origin, heading +x).
//!
//! ## Generators
//!
//! - [`Bezier`]: closed-form Bernstein evaluation over N poles
//! - [`EulerBend`]: clothoid bend whose minimum radius of curvature equals
//!   the requested bend radius
//! - [`EulerSBend`]: two Euler bends joined by central symmetry
//! - [`SineBend`]: `y = H/2·(1 − cos πt)`, `x = L·t`
//!
//! Any `Fn(f64) -> Point` closure is also a [`Curve`] with a numerically
//! estimated tangent.

mod bezier;
mod euler;
pub mod fresnel;
mod sine;

pub use bezier::Bezier;
pub use euler::{EulerBend, EulerSBend};
pub use sine::SineBend;

use crate::core::vec2::Point;

/// Step used by the default finite-difference tangent.
const TANGENT_STEP: f64 = 1.0e-7;

/// Step used by the default finite-difference curvature.
const CURVATURE_STEP: f64 = 1.0e-4;

// =============================================================================
// CURVE TRAIT
// =============================================================================

/// A parametric curve over `t ∈ [0, 1]`.
pub trait Curve: Send + Sync {
    /// Position at `t`.
    fn point(&self, t: f64) -> Point;

    /// Derivative of [`Curve::point`] with respect to `t`.
    ///
    /// The default is a central difference, one-sided at the ends.
    fn tangent(&self, t: f64) -> Point {
        let lo = (t - TANGENT_STEP).max(0.0);
        let hi = (t + TANGENT_STEP).min(1.0);
        (self.point(hi) - self.point(lo)) / (hi - lo)
    }

    /// Heading at `t = 0`, in radians.
    fn start_angle(&self) -> f64 {
        let d = self.tangent(0.0);
        d.y.atan2(d.x)
    }

    /// Heading at `t = 1`, in radians.
    fn end_angle(&self) -> f64 {
        let d = self.tangent(1.0);
        d.y.atan2(d.x)
    }

    /// Position at `t = 1`.
    fn end_point(&self) -> Point {
        self.point(1.0)
    }

    /// Signed curvature at `t`, positive when the curve turns left.
    ///
    /// The default differentiates [`Curve::tangent`] numerically.
    fn curvature(&self, t: f64) -> f64 {
        let lo = (t - CURVATURE_STEP).max(0.0);
        let hi = (t + CURVATURE_STEP).min(1.0);
        let d = self.tangent(t);
        let dd = (self.tangent(hi) - self.tangent(lo)) / (hi - lo);
        d.perp_dot(dd) / d.length().powi(3)
    }

    /// Exact arc length when the generator knows it in closed form.
    fn arc_length(&self) -> Option<f64> {
        None
    }
}

impl<F> Curve for F
where
    F: Fn(f64) -> Point + Send + Sync,
{
    fn point(&self, t: f64) -> Point {
        self(t)
    }
}
