//! Sub-wavelength grating cores.
//!
//! The core is cut into teeth `period · duty_cycle` long, one at the start
//! of every period. The phase runs along the centreline across straights,
//! turns and curves, so a tooth split by an operation boundary continues
//! in the next operation.

use config::constants::{BuildConfig, TOLERANCE};
use std::f64::consts::FRAC_PI_2;

use crate::core::direction::{exact_sin_cos, translate, Direction};
use crate::core::polygon::{LayerSpec, Polygon};
use crate::core::vec2::{rotate_sin_cos, Point};
use crate::curves::Curve;
use crate::error::Result;
use crate::path::{PathBuilder, Profile};

/// Samples of the arc-length table used to place teeth along a curve.
const ARC_TABLE_SAMPLES: usize = 1024;

#[derive(Debug)]
pub(super) struct Grating {
    period: f64,
    duty_cycle: f64,
    travelled: f64,
    profile: Profile,
    layer: LayerSpec,
    config: BuildConfig,
    teeth: Vec<Polygon>,
}

impl Grating {
    pub(super) fn new(
        period: f64,
        duty_cycle: f64,
        profile: Profile,
        layer: LayerSpec,
        config: BuildConfig,
    ) -> Self {
        Self {
            period,
            duty_cycle,
            travelled: 0.0,
            profile,
            layer,
            config,
            teeth: Vec::new(),
        }
    }

    pub(super) fn into_polygons(self) -> Vec<Polygon> {
        self.teeth
    }

    /// Tooth intervals `(from, to)` within the next `length` of centreline.
    fn windows(&self, length: f64) -> Vec<(f64, f64)> {
        let tooth = self.period * self.duty_cycle;
        let mut k = (self.travelled / self.period).floor();
        let mut windows = Vec::new();
        loop {
            let from = k * self.period - self.travelled;
            if from >= length {
                break;
            }
            let (lo, hi) = (from.max(0.0), (from + tooth).min(length));
            if hi - lo > TOLERANCE {
                windows.push((lo, hi));
            }
            k += 1.0;
        }
        windows
    }

    fn tooth(&self, start: Point, heading: Direction) -> Result<PathBuilder> {
        Ok(PathBuilder::with_profile(start, self.profile)?
            .with_heading(heading)?
            .with_layer(self.layer)
            .with_config(self.config))
    }

    pub(super) fn straight(&mut self, start: Point, heading: Direction, length: f64) -> Result<()> {
        for (from, to) in self.windows(length) {
            let mut tooth = self.tooth(translate(start, from, heading)?, heading)?;
            tooth.straight(to - from)?;
            self.teeth.extend(tooth.extract_polygons());
        }
        self.travelled += length;
        Ok(())
    }

    pub(super) fn turn(
        &mut self,
        start: Point,
        heading: Direction,
        radius: f64,
        sweep: f64,
    ) -> Result<()> {
        let sign = sweep.signum();
        let phi0 = heading.to_angle()? - sign * FRAC_PI_2;
        let (sin0, cos0) = exact_sin_cos(phi0);
        let centre = start - Point::new(cos0, sin0) * radius;
        let length = radius * sweep.abs();
        for (from, to) in self.windows(length) {
            let turned = sign * from / radius;
            let (sin, cos) = exact_sin_cos(phi0 + turned);
            let at = centre + Point::new(cos, sin) * radius;
            let mut tooth = self.tooth(at, heading.rotate_by(turned)?)?;
            tooth.turn(radius, sign * (to - from) / radius)?;
            self.teeth.extend(tooth.extract_polygons());
        }
        self.travelled += length;
        Ok(())
    }

    /// Teeth along `curve`, whose centreline the core measured as `length`.
    pub(super) fn parametric(
        &mut self,
        start: Point,
        heading: Direction,
        curve: &dyn Curve,
        length: f64,
    ) -> Result<()> {
        let table = ArcTable::new(curve);
        let (sin_h, cos_h) = exact_sin_cos(heading.to_angle()?);
        let origin = curve.point(0.0);
        for (from, to) in self.windows(length) {
            let t0 = table.parameter_at(from / length);
            let t1 = table.parameter_at(to / length);
            let piece = SubCurve::new(curve, t0, t1);
            let at = start + rotate_sin_cos(curve.point(t0) - origin, sin_h, cos_h);
            let mut tooth = self.tooth(at, heading.rotate_by(piece.angle)?)?;
            tooth.parametric(&piece, None)?;
            self.teeth.extend(tooth.extract_polygons());
        }
        self.travelled += length;
        Ok(())
    }
}

// =============================================================================
// CURVE PIECES
// =============================================================================

/// Cumulative chord length of a curve, normalized to `[0, 1]`.
struct ArcTable {
    fractions: Vec<f64>,
}

impl ArcTable {
    fn new(curve: &dyn Curve) -> Self {
        let points: Vec<Point> = (0..=ARC_TABLE_SAMPLES)
            .map(|i| curve.point(i as f64 / ARC_TABLE_SAMPLES as f64))
            .collect();
        let mut fractions = Vec::with_capacity(points.len());
        let mut total = 0.0;
        fractions.push(0.0);
        for pair in points.windows(2) {
            total += pair[0].distance(pair[1]);
            fractions.push(total);
        }
        if total > 0.0 {
            for f in &mut fractions {
                *f /= total;
            }
        }
        Self { fractions }
    }

    /// Curve parameter at which `fraction` of the arc length is covered.
    fn parameter_at(&self, fraction: f64) -> f64 {
        let fraction = fraction.clamp(0.0, 1.0);
        let i = self.fractions.partition_point(|f| *f < fraction);
        if i == 0 {
            return 0.0;
        }
        if i >= self.fractions.len() {
            return 1.0;
        }
        let (lo, hi) = (self.fractions[i - 1], self.fractions[i]);
        let local = if hi > lo { (fraction - lo) / (hi - lo) } else { 0.0 };
        ((i - 1) as f64 + local) / ARC_TABLE_SAMPLES as f64
    }
}

/// The part of a curve between `t0` and `t1`, re-expressed in its own
/// local frame.
struct SubCurve<'a> {
    curve: &'a dyn Curve,
    t0: f64,
    span: f64,
    origin: Point,
    angle: f64,
    sin: f64,
    cos: f64,
}

impl<'a> SubCurve<'a> {
    fn new(curve: &'a dyn Curve, t0: f64, t1: f64) -> Self {
        let d = curve.tangent(t0);
        let angle = d.y.atan2(d.x);
        let (sin, cos) = exact_sin_cos(-angle);
        Self {
            curve,
            t0,
            span: t1 - t0,
            origin: curve.point(t0),
            angle,
            sin,
            cos,
        }
    }

    fn at(&self, u: f64) -> f64 {
        self.t0 + u.clamp(0.0, 1.0) * self.span
    }
}

impl Curve for SubCurve<'_> {
    fn point(&self, u: f64) -> Point {
        rotate_sin_cos(self.curve.point(self.at(u)) - self.origin, self.sin, self.cos)
    }

    fn tangent(&self, u: f64) -> Point {
        rotate_sin_cos(self.curve.tangent(self.at(u)) * self.span, self.sin, self.cos)
    }

    fn curvature(&self, u: f64) -> f64 {
        self.curve.curvature(self.at(u))
    }

    fn start_angle(&self) -> f64 {
        0.0
    }
}
