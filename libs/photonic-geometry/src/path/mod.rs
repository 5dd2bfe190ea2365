//! # Path Builder
//!
//! Stateful extrusion of a 1-D reference path into offset polygons.
//!
//! A [`PathBuilder`] tracks the current position, heading and cross-section
//! [`Profile`] and appends one polygon (or one per rail) for each
//! operation:
//!
//! - [`PathBuilder::straight`] / [`PathBuilder::straight_to`]
//! - [`PathBuilder::turn`] / [`PathBuilder::turn_to`]
//! - [`PathBuilder::parametric`] / [`PathBuilder::parametric_with`]
//!
//! The `_to` variants taper the profile linearly across the operation.
//!
//! ## Vertex Order
//!
//! Every polygon walks its right edge forward and its left edge backward,
//! which is counter-clockwise for any non-overlapping extrusion.
//!
//! ## Centre of Curvature
//!
//! An edge offset that would reach past the centre of curvature of a turn
//! or curve is clamped onto that centre, so a cross-section wider than the
//! bend draws its inner side as a fan. A rail lying entirely beyond the
//! centre is an error.
//!
//! ## Vertex Limit
//!
//! Polygons longer than [`BuildConfig::max_points`] are fractured into
//! consecutive pieces sharing their boundary samples.
//!
//! ## Lifecycle
//!
//! A builder is owned by exactly one component build.
//! [`PathBuilder::extract_polygons`] consumes it.

mod grating;
mod waveguide;

pub use waveguide::WaveguidePath;

use config::constants::{
    BuildConfig, ANGLE_EPSILON, INITIAL_CURVE_SAMPLES, MAX_CURVE_SAMPLES, MIN_TANGENT_NORM,
    TOLERANCE,
};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, TAU};
use tracing::{debug, trace};

use crate::core::direction::{exact_sin_cos, translate, Direction};
use crate::core::polygon::{LayerSpec, Polygon};
use crate::core::vec2::{distance_to_segment, ensure_finite, rotate_sin_cos, Point};
use crate::curves::Curve;
use crate::error::{Error, Result};
use crate::template::arc_point_count;

// =============================================================================
// PROFILE
// =============================================================================

/// Cross-section of a path: a single rail of `width`, or two rails of
/// `width` whose centres are `separation` apart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Width of each rail.
    pub width: f64,
    /// Centre-to-centre rail distance for dual-rail paths.
    pub separation: Option<f64>,
}

impl Profile {
    /// Single-rail profile.
    pub const fn single(width: f64) -> Self {
        Self {
            width,
            separation: None,
        }
    }

    /// Dual-rail profile.
    pub const fn dual(width: f64, separation: f64) -> Self {
        Self {
            width,
            separation: Some(separation),
        }
    }

    /// Whether the profile has two rails.
    pub fn is_dual(&self) -> bool {
        self.separation.is_some()
    }

    /// Outer-to-outer width of the cross-section.
    pub fn total_width(&self) -> f64 {
        self.width + self.separation.unwrap_or(0.0)
    }

    /// Checks widths are positive and the rails do not overlap.
    pub fn validate(&self) -> Result<()> {
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(Error::invalid_parameter(
                "width",
                self.width,
                "must be positive and finite",
            ));
        }
        if let Some(sep) = self.separation {
            if !sep.is_finite() || sep <= self.width {
                return Err(Error::invalid_parameter(
                    "separation",
                    sep,
                    format!("rails overlap; must exceed the rail width {}", self.width),
                ));
            }
        }
        Ok(())
    }

    /// `(right, left)` edge offsets of every rail, left of the centreline
    /// positive.
    fn edges(&self) -> Vec<(f64, f64)> {
        let half = self.width / 2.0;
        match self.separation {
            None => vec![(-half, half)],
            Some(sep) => {
                let c = sep / 2.0;
                vec![(-c - half, -c + half), (c - half, c + half)]
            }
        }
    }

    fn lerp(&self, other: &Profile, f: f64) -> Profile {
        Profile {
            width: self.width + (other.width - self.width) * f,
            separation: match (self.separation, other.separation) {
                (Some(a), Some(b)) => Some(a + (b - a) * f),
                _ => None,
            },
        }
    }
}

// =============================================================================
// PATH BUILDER
// =============================================================================

/// Single-owner path extrusion state.
///
/// ## Example
///
/// ```rust
/// use photonic_geometry::path::PathBuilder;
/// use photonic_geometry::Point;
/// use std::f64::consts::FRAC_PI_2;
///
/// let mut path = PathBuilder::new(Point::new(0.0, 0.0), 0.5).unwrap();
/// path.straight(10.0)?.turn(5.0, FRAC_PI_2)?.straight(10.0)?;
/// assert_eq!(path.position(), Point::new(15.0, 15.0));
/// let polygons = path.extract_polygons();
/// assert_eq!(polygons.len(), 3);
/// # Ok::<(), photonic_geometry::Error>(())
/// ```
#[derive(Debug)]
pub struct PathBuilder {
    position: Point,
    heading: Direction,
    profile: Profile,
    layer: LayerSpec,
    config: BuildConfig,
    length: f64,
    polygons: Vec<Polygon>,
}

/// One centreline sample in global coordinates. `t` is the fraction of
/// the operation the sample sits at.
#[derive(Debug, Clone, Copy)]
struct Sample {
    t: f64,
    point: Point,
    normal: Point,
    pivot: Option<Pivot>,
    settled: bool,
}

impl Sample {
    fn new(t: f64, point: Point, normal: Point, pivot: Option<Pivot>) -> Self {
        Self {
            t,
            point,
            normal,
            pivot,
            settled: false,
        }
    }

    /// Edge point at `offset` along the normal, clamped to the centre of
    /// curvature.
    fn offset(&self, offset: f64) -> Point {
        match self.pivot {
            Some(pivot) if pivot.reaches(offset) => pivot.centre,
            _ => self.point + self.normal * offset,
        }
    }
}

/// Centre of curvature of a sample.
#[derive(Debug, Clone, Copy)]
struct Pivot {
    centre: Point,
    /// `+1` when the centre lies left of the centreline.
    side: f64,
    radius: f64,
}

impl Pivot {
    fn reaches(&self, offset: f64) -> bool {
        self.side * offset >= self.radius
    }
}

impl PathBuilder {
    /// Starts a single-rail path of `width` at `start`, heading EAST.
    pub fn new(start: Point, width: f64) -> Result<Self> {
        Self::with_profile(start, Profile::single(width))
    }

    /// Starts a dual-rail path.
    pub fn slotted(start: Point, rail_width: f64, separation: f64) -> Result<Self> {
        Self::with_profile(start, Profile::dual(rail_width, separation))
    }

    /// Starts a path with an explicit profile.
    pub fn with_profile(start: Point, profile: Profile) -> Result<Self> {
        ensure_finite(start, "path start")?;
        profile.validate()?;
        Ok(Self {
            position: start,
            heading: Direction::East,
            profile,
            layer: LayerSpec::default(),
            config: BuildConfig::default(),
            length: 0.0,
            polygons: Vec::new(),
        })
    }

    /// Sets the initial heading.
    pub fn with_heading(mut self, heading: Direction) -> Result<Self> {
        self.heading = heading.validate()?;
        Ok(self)
    }

    /// Sets the layer emitted polygons are tagged with.
    pub fn with_layer(mut self, layer: LayerSpec) -> Self {
        self.layer = layer;
        self
    }

    /// Sets the discretisation settings.
    pub fn with_config(mut self, config: BuildConfig) -> Self {
        self.config = config;
        self
    }

    /// Current position.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Current heading.
    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Current cross-section.
    pub fn profile(&self) -> Profile {
        self.profile
    }

    /// Centreline length extruded so far.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Polygons emitted so far.
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// Ends the path and hands over its polygons.
    pub fn extract_polygons(self) -> Vec<Polygon> {
        self.polygons
    }

    // =========================================================================
    // STRAIGHT
    // =========================================================================

    /// Extends the path by a straight run along the current heading.
    pub fn straight(&mut self, length: f64) -> Result<&mut Self> {
        let profile = self.profile;
        self.straight_to(length, profile)
    }

    /// Straight run whose profile tapers linearly to `end`.
    pub fn straight_to(&mut self, length: f64, end: Profile) -> Result<&mut Self> {
        if !length.is_finite() || length < 0.0 {
            return Err(Error::invalid_parameter(
                "length",
                length,
                "must be non-negative and finite",
            ));
        }
        if length <= TOLERANCE {
            return Err(Error::geometry(format!(
                "zero-length straight segment ({length}) at ({}, {})",
                self.position.x, self.position.y
            )));
        }
        self.check_transition(&end)?;

        let start = self.position;
        let stop = translate(start, length, self.heading)?;
        let normal = self.heading.unit_vector()?.perp();
        let spine = [
            Sample::new(0.0, start, normal, None),
            Sample::new(1.0, stop, normal, None),
        ];
        self.emit(&spine, end, self.config.max_points)?;

        self.position = stop;
        self.profile = end;
        self.length += length;
        debug!(length, x = stop.x, y = stop.y, "straight segment");
        Ok(self)
    }

    // =========================================================================
    // TURN
    // =========================================================================

    /// Extends the path by a circular arc; positive `sweep` turns left.
    pub fn turn(&mut self, radius: f64, sweep: f64) -> Result<&mut Self> {
        let profile = self.profile;
        self.turn_to(radius, sweep, profile)
    }

    /// Circular arc whose profile tapers linearly to `end`.
    pub fn turn_to(&mut self, radius: f64, sweep: f64, end: Profile) -> Result<&mut Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(Error::invalid_parameter(
                "radius",
                radius,
                "must be positive and finite",
            ));
        }
        if !sweep.is_finite() || sweep.abs() <= ANGLE_EPSILON || sweep.abs() > TAU {
            return Err(Error::invalid_parameter(
                "sweep",
                sweep,
                "must be finite, non-zero and at most one full turn",
            ));
        }
        self.check_transition(&end)?;

        let sign = sweep.signum();
        let outer = radius + self.max_abs_offset(&end);

        let phi0 = self.heading.to_angle()? - sign * FRAC_PI_2;
        let (sin0, cos0) = exact_sin_cos(phi0);
        let centre = self.position - Point::new(cos0, sin0) * radius;
        let pivot = Pivot {
            centre,
            side: sign,
            radius,
        };

        let chords = arc_point_count(sweep, outer, self.config.grid);
        let spine: Vec<Sample> = (0..=chords)
            .map(|i| {
                let f = i as f64 / chords as f64;
                let (sin, cos) = exact_sin_cos(phi0 + sweep * f);
                let radial = Point::new(cos, sin);
                Sample::new(f, centre + radial * radius, radial * -sign, Some(pivot))
            })
            .collect();
        trace!(chords, radius, sweep, "arc discretised");
        self.emit(&spine, end, self.config.max_points)?;

        self.position = spine[chords].point;
        self.heading = self.heading.rotate_by(sweep)?;
        self.profile = end;
        self.length += radius * sweep.abs();
        debug!(radius, sweep, x = self.position.x, y = self.position.y, "turn");
        Ok(self)
    }

    // =========================================================================
    // PARAMETRIC
    // =========================================================================

    /// Extends the path along `curve`, given in the local frame (current
    /// position at the origin, current heading along +x).
    ///
    /// Samples are refined until every polygon edge, and the centreline,
    /// deviates from the exact offset curve by at most
    /// [`BuildConfig::tolerance`]. Fails with [`Error::DegenerateCurve`] if
    /// the curve yields a non-finite point, tangent or curvature, or a zero
    /// tangent, and with [`Error::InvalidParameter`] if the tolerance is
    /// not met within [`MAX_CURVE_SAMPLES`] samples.
    pub fn parametric(&mut self, curve: &dyn Curve, end: Option<Profile>) -> Result<&mut Self> {
        let config = self.config;
        self.parametric_in(curve, end, config)
    }

    /// [`PathBuilder::parametric`] with its own chord tolerance and vertex
    /// limit instead of the builder's.
    pub fn parametric_with(
        &mut self,
        curve: &dyn Curve,
        end: Option<Profile>,
        tolerance: f64,
        max_points: usize,
    ) -> Result<&mut Self> {
        let config = BuildConfig::new(tolerance, self.config.grid, max_points)?;
        self.parametric_in(curve, end, config)
    }

    fn parametric_in(
        &mut self,
        curve: &dyn Curve,
        end: Option<Profile>,
        config: BuildConfig,
    ) -> Result<&mut Self> {
        let end = end.unwrap_or(self.profile);
        self.check_transition(&end)?;

        let (sin_h, cos_h) = exact_sin_cos(self.heading.to_angle()?);
        let origin = curve.point(0.0);
        if !origin.is_finite() {
            return Err(Error::DegenerateCurve {
                t: 0.0,
                reason: format!("non-finite point ({}, {})", origin.x, origin.y),
            });
        }
        let start = self.position;
        let eval = |t: f64| -> Result<Sample> {
            let p = curve.point(t);
            if !p.is_finite() {
                return Err(Error::DegenerateCurve {
                    t,
                    reason: format!("non-finite point ({}, {})", p.x, p.y),
                });
            }
            let d = curve.tangent(t);
            if !d.is_finite() {
                return Err(Error::DegenerateCurve {
                    t,
                    reason: format!("non-finite tangent ({}, {})", d.x, d.y),
                });
            }
            let norm = d.length();
            if norm < MIN_TANGENT_NORM {
                return Err(Error::DegenerateCurve {
                    t,
                    reason: format!("zero-length tangent (|d| = {norm})"),
                });
            }
            let k = curve.curvature(t);
            if !k.is_finite() {
                return Err(Error::DegenerateCurve {
                    t,
                    reason: format!("non-finite curvature {k}"),
                });
            }
            let point = start + rotate_sin_cos(p - origin, sin_h, cos_h);
            let normal = rotate_sin_cos(d / norm, sin_h, cos_h).perp();
            let pivot = (k != 0.0).then(|| {
                let side = k.signum();
                let radius = 1.0 / k.abs();
                Pivot {
                    centre: point + normal * (side * radius),
                    side,
                    radius,
                }
            });
            Ok(Sample::new(t, point, normal, pivot))
        };

        let initial = INITIAL_CURVE_SAMPLES.max(2);
        let mut samples = (0..initial)
            .map(|i| eval(i as f64 / (initial - 1) as f64))
            .collect::<Result<Vec<_>>>()?;
        let offsets = self.edge_offsets(&end);
        let tolerance = config.tolerance;

        loop {
            let pending = samples[..samples.len() - 1]
                .iter()
                .filter(|s| !s.settled)
                .count();
            if pending == 0 {
                break;
            }
            if samples.len() + pending > MAX_CURVE_SAMPLES {
                return Err(Error::invalid_parameter(
                    "tolerance",
                    tolerance,
                    format!(
                        "not reached with {MAX_CURVE_SAMPLES} samples ({} settled so far)",
                        samples.len() - pending
                    ),
                ));
            }
            let mut refined = Vec::with_capacity(samples.len() + pending);
            for pair in samples.windows(2) {
                let (mut a, b) = (pair[0], pair[1]);
                if a.settled {
                    refined.push(a);
                    continue;
                }
                let mid = eval(0.5 * (a.t + b.t))?;
                let deviation = offsets
                    .iter()
                    .map(|offset| {
                        let at = |s: &Sample| s.offset(offset(s.t));
                        distance_to_segment(at(&mid), at(&a), at(&b))
                    })
                    .fold(0.0, f64::max);
                if deviation > tolerance {
                    refined.push(a);
                    refined.push(mid);
                } else {
                    a.settled = true;
                    refined.push(a);
                }
            }
            if let Some(last) = samples.last() {
                refined.push(*last);
            }
            samples = refined;
        }

        let length = curve.arc_length().unwrap_or_else(|| {
            samples
                .windows(2)
                .map(|w| w[0].point.distance(w[1].point))
                .sum()
        });
        self.emit(&samples, end, config.max_points)?;

        self.position = samples[samples.len() - 1].point;
        self.heading = self.heading.rotate_by(curve.end_angle())?;
        self.profile = end;
        self.length += length;
        debug!(
            samples = samples.len(),
            length,
            x = self.position.x,
            y = self.position.y,
            "parametric segment"
        );
        Ok(self)
    }

    // =========================================================================
    // INTERNALS
    // =========================================================================

    fn check_transition(&self, end: &Profile) -> Result<()> {
        end.validate()?;
        if end.is_dual() != self.profile.is_dual() {
            return Err(Error::geometry(
                "cannot taper between single-rail and dual-rail profiles",
            ));
        }
        Ok(())
    }

    fn max_abs_offset(&self, end: &Profile) -> f64 {
        self.profile
            .edges()
            .into_iter()
            .chain(end.edges())
            .flat_map(|(r, l)| [r.abs(), l.abs()])
            .fold(0.0, f64::max)
    }

    /// Edge offset functions of `t` checked during curve refinement: the
    /// centreline plus every rail edge.
    fn edge_offsets(&self, end: &Profile) -> Vec<Box<dyn Fn(f64) -> f64>> {
        let start = self.profile;
        let end = *end;
        let rails = start.edges().len();
        let mut edges: Vec<Box<dyn Fn(f64) -> f64>> = vec![Box::new(|_| 0.0)];
        for rail in 0..rails {
            for side in [false, true] {
                edges.push(Box::new(move |t| {
                    let (r, l) = start.lerp(&end, t).edges()[rail];
                    if side {
                        l
                    } else {
                        r
                    }
                }));
            }
        }
        edges
    }

    /// Offsets the sampled centreline into one strip per rail and appends
    /// the resulting polygons. Nothing is appended on error.
    fn emit(&mut self, spine: &[Sample], end: Profile, max_points: usize) -> Result<()> {
        let rails = self.profile.edges().len();
        let mut strips = vec![(Vec::with_capacity(spine.len()), Vec::with_capacity(spine.len())); rails];
        for sample in spine {
            let edges = self.profile.lerp(&end, sample.t).edges();
            for ((r, l), (right, left)) in edges.into_iter().zip(strips.iter_mut()) {
                if let Some(pivot) = sample.pivot {
                    if pivot.reaches(r) && pivot.reaches(l) {
                        return Err(Error::invalid_parameter(
                            "radius",
                            pivot.radius,
                            format!("rail at offsets ({r}, {l}) lies beyond the centre of curvature"),
                        ));
                    }
                }
                right.push(sample.offset(r));
                left.push(sample.offset(l));
            }
        }
        for (right, left) in strips {
            let pieces = fracture_strip(&right, &left, max_points, self.layer);
            if pieces.len() > 1 {
                trace!(pieces = pieces.len(), "polygon fractured at vertex limit");
            }
            self.polygons.extend(pieces);
        }
        Ok(())
    }
}

// =============================================================================
// POLYGON ASSEMBLY
// =============================================================================

/// Closes a strip into a polygon: right edge forward, left edge backward.
/// Repeated vertices from edges clamped onto a centre of curvature are
/// merged.
fn strip_polygon(right: &[Point], left: &[Point], layer: LayerSpec) -> Polygon {
    let mut points: Vec<Point> = right.iter().chain(left.iter().rev()).copied().collect();
    points.dedup();
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    Polygon::new(points, layer)
}

/// Splits a strip into pieces of at most `max_points` vertices that share
/// their boundary samples.
fn fracture_strip(
    right: &[Point],
    left: &[Point],
    max_points: usize,
    layer: LayerSpec,
) -> Vec<Polygon> {
    let n = right.len();
    if 2 * n <= max_points {
        return vec![strip_polygon(right, left, layer)];
    }
    let stride = (max_points / 2).max(2) - 1;
    let mut pieces = Vec::with_capacity(n / stride + 1);
    let mut begin = 0;
    while begin + 1 < n {
        let end = (begin + stride).min(n - 1);
        pieces.push(strip_polygon(
            &right[begin..=end],
            &left[begin..=end],
            layer,
        ));
        begin = end;
    }
    pieces
}
