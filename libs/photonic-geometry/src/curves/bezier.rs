//! Bezier curves from N control poles.

use crate::core::direction::exact_sin_cos;
use crate::core::vec2::{angle_of, ensure_finite, rotate_sin_cos, Point};
use crate::curves::Curve;
use crate::error::{Error, Result};

/// Bezier curve of degree `poles.len() - 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Bezier {
    poles: Vec<Point>,
    binomials: Vec<f64>,
}

impl Bezier {
    /// Builds a curve from at least two finite poles.
    ///
    /// The first two and the last two poles must be distinct so the end
    /// tangents are defined.
    pub fn new(poles: Vec<Point>) -> Result<Self> {
        if poles.len() < 2 {
            return Err(Error::geometry(format!(
                "a Bezier curve needs at least 2 poles, got {}",
                poles.len()
            )));
        }
        for pole in &poles {
            ensure_finite(*pole, "Bezier pole")?;
        }
        let n = poles.len() - 1;
        if poles[0] == poles[1] || poles[n - 1] == poles[n] {
            return Err(Error::geometry(
                "the first and last pole pairs of a Bezier curve must be distinct",
            ));
        }
        Ok(Self {
            binomials: binomial_row(n),
            poles,
        })
    }

    /// Control poles.
    pub fn poles(&self) -> &[Point] {
        &self.poles
    }

    /// Curve degree.
    pub fn degree(&self) -> usize {
        self.poles.len() - 1
    }

    /// Same curve expressed in the frame whose origin is the first pole
    /// and whose +x axis points along the first tangent.
    pub fn canonical(&self) -> Self {
        let origin = self.poles[0];
        let (sin, cos) = exact_sin_cos(-self.start_angle());
        let poles = self
            .poles
            .iter()
            .map(|p| rotate_sin_cos(*p - origin, sin, cos))
            .collect();
        Self {
            poles,
            binomials: self.binomials.clone(),
        }
    }
}

/// Row `n` of Pascal's triangle.
fn binomial_row(n: usize) -> Vec<f64> {
    let mut row = Vec::with_capacity(n + 1);
    let mut c = 1.0;
    for k in 0..=n {
        row.push(c);
        c = c * (n - k) as f64 / (k + 1) as f64;
    }
    row
}

/// Σ C(n,i) (1−t)^(n−i) t^i · p_i
fn bernstein(points: &[Point], binomials: &[f64], t: f64) -> Point {
    let n = points.len() - 1;
    let s = 1.0 - t;
    points
        .iter()
        .zip(binomials)
        .enumerate()
        .map(|(i, (p, c))| *p * (c * s.powi((n - i) as i32) * t.powi(i as i32)))
        .fold(Point::ZERO, |acc, p| acc + p)
}

impl Curve for Bezier {
    fn point(&self, t: f64) -> Point {
        if t <= 0.0 {
            return self.poles[0];
        }
        if t >= 1.0 {
            return self.poles[self.poles.len() - 1];
        }
        bernstein(&self.poles, &self.binomials, t)
    }

    fn tangent(&self, t: f64) -> Point {
        let n = self.degree();
        let deltas: Vec<Point> = self.poles.windows(2).map(|w| w[1] - w[0]).collect();
        bernstein(&deltas, &binomial_row(n - 1), t.clamp(0.0, 1.0)) * n as f64
    }

    fn start_angle(&self) -> f64 {
        angle_of(self.poles[0], self.poles[1])
    }

    fn end_angle(&self) -> f64 {
        let n = self.degree();
        angle_of(self.poles[n - 1], self.poles[n])
    }

    fn end_point(&self) -> Point {
        self.poles[self.poles.len() - 1]
    }
}
