//! Euler (clothoid) bends.
//!
//! Curvature grows linearly with arc length from zero at the input to a
//! peak of `1/R` and falls back to zero at the output.
//!
//! ## Regimes
//!
//! - `|θ| ≤ π/2`: two mirrored spiral halves, each turning `|θ|/2`. The
//!   curvature peaks at the junction.
//! - `|θ| > π/2`: each spiral turns π/4 and a circular arc of radius `R`
//!   sweeps the remaining `|θ| − π/2` between them.
//!
//! ## Scaling
//!
//! The normalized spiral `(C(a), S(a))` has curvature `πa`. Its largest
//! curvature, at `a = a_end`, is `π·a_end`, so scaling the spiral by
//! `s = R·π·a_end` makes the minimum radius of curvature exactly `R`.
//!
//! The curve parameter is proportional to arc length.

use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2, PI};

use config::constants::ANGLE_EPSILON;

use crate::core::vec2::Point;
use crate::curves::fresnel::fresnel;
use crate::curves::Curve;
use crate::error::{Error, Result};

// =============================================================================
// EULER BEND
// =============================================================================

/// Euler bend turning by `angle` with minimum radius of curvature `radius`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EulerBend {
    angle: f64,
    radius: f64,
    sign: f64,
    /// Spiral parameter at the end of the entry spiral.
    a_end: f64,
    /// Spiral scale factor.
    scale: f64,
    /// Sweep of the central arc (zero in the small-angle regime).
    arc_sweep: f64,
    /// Centre of the central arc, positive-turn frame.
    arc_centre: Point,
    /// Entry heading of the central arc.
    arc_heading: f64,
    /// Output point, positive-turn frame.
    output: Point,
}

impl EulerBend {
    /// Builds a bend turning by `angle` (counter-clockwise positive, with
    /// `0 < |angle| ≤ π`).
    ///
    /// # Examples
    /// ```
    /// use photonic_geometry::curves::{Curve, EulerBend};
    /// use std::f64::consts::FRAC_PI_2;
    ///
    /// let bend = EulerBend::new(FRAC_PI_2, 50.0).unwrap();
    /// assert_eq!(bend.min_radius(), 50.0);
    /// assert_eq!(bend.end_angle(), FRAC_PI_2);
    /// assert!(bend.end_point().y > 0.0);
    /// ```
    pub fn new(angle: f64, radius: f64) -> Result<Self> {
        if !angle.is_finite() || angle.abs() <= ANGLE_EPSILON || angle.abs() > PI {
            return Err(Error::invalid_parameter(
                "turn",
                angle,
                "Euler bend angle must be finite, non-zero and within [-π, π]",
            ));
        }
        if !radius.is_finite() || radius <= 0.0 {
            return Err(Error::invalid_parameter(
                "radius",
                radius,
                "must be positive and finite",
            ));
        }
        let theta = angle.abs();
        let (a_end, arc_sweep) = if theta <= FRAC_PI_2 {
            ((theta / PI).sqrt(), 0.0)
        } else {
            (FRAC_1_SQRT_2, theta - FRAC_PI_2)
        };
        let scale = radius * PI * a_end;

        let (c, s) = fresnel(a_end);
        let spiral_end = Point::new(c, s) * scale;
        let arc_heading = PI * a_end * a_end / 2.0;
        let (sin_h, cos_h) = arc_heading.sin_cos();
        let arc_centre = spiral_end + Point::new(-sin_h, cos_h) * radius;
        let junction = arc_point(arc_centre, radius, arc_heading, arc_sweep);

        let (sin_t, cos_t) = theta.sin_cos();
        let rotated = Point::new(c * cos_t + s * sin_t, -c * sin_t + s * cos_t);
        let output = junction + Point::new(rotated.x, -rotated.y) * scale;

        Ok(Self {
            angle,
            radius,
            sign: angle.signum(),
            a_end,
            scale,
            arc_sweep,
            arc_centre,
            arc_heading,
            output,
        })
    }

    /// Signed turn angle.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Achieved minimum radius of curvature; equals the requested radius.
    pub fn min_radius(&self) -> f64 {
        self.radius
    }

    /// Scale applied to the normalized spiral.
    pub fn scale_factor(&self) -> f64 {
        self.scale
    }

    /// Length of one spiral section.
    fn spiral_length(&self) -> f64 {
        self.scale * self.a_end
    }

    /// Total arc length of the bend.
    pub fn total_length(&self) -> f64 {
        2.0 * self.spiral_length() + self.radius * self.arc_sweep
    }

    /// Distance from the input point to the intersection of the input and
    /// output tangent lines. `None` for a U-turn, whose tangent lines are
    /// parallel.
    pub fn dist_to_vertex(&self) -> Option<f64> {
        let theta = self.angle.abs();
        if (PI - theta).abs() <= ANGLE_EPSILON {
            return None;
        }
        if (theta - FRAC_PI_2).abs() <= ANGLE_EPSILON {
            return Some(self.output.x);
        }
        let (sin_t, cos_t) = theta.sin_cos();
        Some(self.output.x - self.output.y * cos_t / sin_t)
    }

    /// Curvature (signed by the turn direction) at parameter `t`.
    pub fn curvature_at(&self, t: f64) -> f64 {
        let u = t.clamp(0.0, 1.0) * self.total_length();
        let spiral = self.spiral_length();
        let magnitude = if u <= spiral {
            PI * (u / self.scale) / self.scale
        } else if u <= spiral + self.radius * self.arc_sweep {
            1.0 / self.radius
        } else {
            PI * ((self.total_length() - u) / self.scale) / self.scale
        };
        self.sign * magnitude
    }

    /// Point and unit heading at arc length `u`, positive-turn frame.
    fn frame_at(&self, u: f64) -> (Point, f64) {
        let spiral = self.spiral_length();
        let arc = self.radius * self.arc_sweep;
        if u <= spiral {
            let a = u / self.scale;
            let (c, s) = fresnel(a);
            (Point::new(c, s) * self.scale, PI * a * a / 2.0)
        } else if u <= spiral + arc {
            let sweep = (u - spiral) / self.radius;
            (
                arc_point(self.arc_centre, self.radius, self.arc_heading, sweep),
                self.arc_heading + sweep,
            )
        } else {
            let a = ((self.total_length() - u) / self.scale).max(0.0);
            let (c, s) = fresnel(a);
            let (sin_t, cos_t) = self.angle.abs().sin_cos();
            let x = c * cos_t + s * sin_t;
            let y = -c * sin_t + s * cos_t;
            (
                self.output + Point::new(-x, y) * self.scale,
                self.angle.abs() - PI * a * a / 2.0,
            )
        }
    }
}

/// Point reached after sweeping `sweep` counter-clockwise along the arc
/// entered with heading `heading`.
fn arc_point(centre: Point, radius: f64, heading: f64, sweep: f64) -> Point {
    let phi = heading - FRAC_PI_2 + sweep;
    centre + Point::new(phi.cos(), phi.sin()) * radius
}

impl Curve for EulerBend {
    fn point(&self, t: f64) -> Point {
        if t >= 1.0 {
            return self.end_point();
        }
        let (p, _) = self.frame_at(t.max(0.0) * self.total_length());
        Point::new(p.x, self.sign * p.y)
    }

    fn tangent(&self, t: f64) -> Point {
        let (_, heading) = self.frame_at(t.clamp(0.0, 1.0) * self.total_length());
        let (sin, cos) = heading.sin_cos();
        Point::new(cos, self.sign * sin) * self.total_length()
    }

    fn curvature(&self, t: f64) -> f64 {
        self.curvature_at(t)
    }

    fn start_angle(&self) -> f64 {
        0.0
    }

    fn end_angle(&self) -> f64 {
        self.angle
    }

    fn end_point(&self) -> Point {
        Point::new(self.output.x, self.sign * self.output.y)
    }

    fn arc_length(&self) -> Option<f64> {
        Some(self.total_length())
    }
}

// =============================================================================
// EULER S-BEND
// =============================================================================

/// S-bend from the origin to `(length, height)` made of two Euler bends
/// joined by central symmetry, so curvature is continuous through the
/// inflection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EulerSBend {
    length: f64,
    height: f64,
    half: EulerBend,
}

impl EulerSBend {
    /// Builds the S-bend; requires `length > 0`, `height ≠ 0` and
    /// `length ≥ |height|`.
    pub fn new(length: f64, height: f64) -> Result<Self> {
        if !length.is_finite() || length <= 0.0 {
            return Err(Error::invalid_parameter(
                "length",
                length,
                "must be positive and finite",
            ));
        }
        if !height.is_finite() || height == 0.0 {
            return Err(Error::invalid_parameter(
                "height",
                height,
                "must be non-zero and finite",
            ));
        }
        if length < height.abs() {
            return Err(Error::invalid_parameter(
                "length",
                length,
                format!("must be at least |height| = {}", height.abs()),
            ));
        }
        let angle = height.signum() * 2.0 * (height.abs() / length).atan();
        let unit = EulerBend::new(angle, 1.0)?;
        let radius = (height.abs() / 2.0) / unit.output.y;
        let half = EulerBend::new(angle, radius)?;
        Ok(Self {
            length,
            height,
            half,
        })
    }

    /// Achieved minimum radius of curvature.
    pub fn min_radius(&self) -> f64 {
        self.half.min_radius()
    }

    /// Total arc length.
    pub fn total_length(&self) -> f64 {
        2.0 * self.half.total_length()
    }

    /// Angle turned by each half.
    pub fn half_angle(&self) -> f64 {
        self.half.angle()
    }
}

impl Curve for EulerSBend {
    fn point(&self, t: f64) -> Point {
        let t = t.clamp(0.0, 1.0);
        if t <= 0.5 {
            self.half.point(2.0 * t)
        } else if t >= 1.0 {
            self.end_point()
        } else {
            self.end_point() - self.half.point(2.0 * (1.0 - t))
        }
    }

    fn tangent(&self, t: f64) -> Point {
        let t = t.clamp(0.0, 1.0);
        let u = if t <= 0.5 { 2.0 * t } else { 2.0 * (1.0 - t) };
        self.half.tangent(u) * 2.0
    }

    fn curvature(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        if t <= 0.5 {
            self.half.curvature_at(2.0 * t)
        } else {
            -self.half.curvature_at(2.0 * (1.0 - t))
        }
    }

    fn start_angle(&self) -> f64 {
        0.0
    }

    fn end_angle(&self) -> f64 {
        0.0
    }

    fn end_point(&self) -> Point {
        Point::new(self.length, self.height)
    }

    fn arc_length(&self) -> Option<f64> {
        Some(self.total_length())
    }
}
