use std::f64::consts::PI;

use crate::core::vec2::Point;
use crate::curves::Curve;
use crate::error::{Error, Result};

/// Sinusoidal S-bend from the origin to `(length, height)`:
/// `x = L·t`, `y = H/2·sin(πt − π/2) + H/2`.
///
/// Curvature is not continuous at the ends; see
/// [`EulerSBend`](crate::curves::EulerSBend) for the clothoid variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SineBend {
    length: f64,
    height: f64,
}

impl SineBend {
    /// Builds the bend; `length` must be positive and both values finite.
    pub fn new(length: f64, height: f64) -> Result<Self> {
        if !length.is_finite() || length <= 0.0 {
            return Err(Error::invalid_parameter(
                "length",
                length,
                "must be positive and finite",
            ));
        }
        if !height.is_finite() {
            return Err(Error::invalid_parameter("height", height, "must be finite"));
        }
        Ok(Self { length, height })
    }

    /// Smallest radius of curvature, reached at both ends:
    /// `2L² / (π² |H|)`.
    pub fn min_radius(&self) -> f64 {
        if self.height == 0.0 {
            return f64::INFINITY;
        }
        2.0 * self.length * self.length / (PI * PI * self.height.abs())
    }
}

impl Curve for SineBend {
    fn point(&self, t: f64) -> Point {
        if t >= 1.0 {
            return self.end_point();
        }
        Point::new(
            self.length * t,
            0.5 * self.height * (PI * t - PI / 2.0).sin() + 0.5 * self.height,
        )
    }

    fn tangent(&self, t: f64) -> Point {
        Point::new(self.length, 0.5 * self.height * PI * (PI * t).sin())
    }

    fn curvature(&self, t: f64) -> f64 {
        let dy = 0.5 * self.height * PI * (PI * t).sin();
        let ddy = 0.5 * self.height * PI * PI * (PI * t).cos();
        self.length * ddy / (self.length * self.length + dy * dy).powf(1.5)
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
}
