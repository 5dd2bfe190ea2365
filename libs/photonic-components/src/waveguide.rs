//! # Waveguide Routing
//!
//! A [`Waveguide`] follows a Manhattan list of waypoints. Every interior
//! waypoint becomes a 90° corner (a circular arc of the template's bend
//! radius, or an Euler bend when the template asks for one) and the
//! straight runs between corners are shortened by the run each corner
//! consumes:
//!
//! ```text
//! circular: dl = R·tan(|θ|/2)        Euler: dl = distance to vertex
//! ```
//!
//! A segment that cannot hold the corners at both of its ends fails with
//! [`Error::InsufficientRun`] before any geometry is built.

use std::f64::consts::FRAC_PI_2;

use config::constants::TOLERANCE;
use photonic_geometry::curves::EulerBend;
use photonic_geometry::{
    cardinal_direction, distance, opposite, turn_angle, Component, ComponentRecipe, Direction,
    Error, Point, Port, Result, WaveguidePath, WaveguideTemplate, INPUT_PORT, OUTPUT_PORT,
};
use tracing::{debug, debug_span};

// =============================================================================
// TRACE VALIDATION
// =============================================================================

/// Checks a waypoint trace and returns the direction of each segment.
///
/// A trace needs at least two finite waypoints, consecutive waypoints must
/// differ in exactly one coordinate, and two consecutive segments may not
/// run along the same axis (the shared waypoint would be redundant, or the
/// route would fold back on itself).
pub fn validate_trace(trace: &[Point]) -> Result<Vec<Direction>> {
    if trace.len() < 2 {
        return Err(Error::geometry(format!(
            "a waveguide trace needs at least 2 waypoints, got {}",
            trace.len()
        )));
    }
    let directions = trace
        .windows(2)
        .map(|pair| cardinal_direction(pair[0], pair[1]))
        .collect::<Result<Vec<_>>>()?;
    for (i, pair) in directions.windows(2).enumerate() {
        let (a, b) = (pair[0].quarter_turns(), pair[1].quarter_turns());
        if let (Some(a), Some(b)) = (a, b) {
            if (a - b).rem_euclid(2) == 0 {
                let p = trace[i + 1];
                return Err(Error::geometry(format!(
                    "redundant waypoint ({}, {}): segments {} and {} both run {} then {}",
                    p.x,
                    p.y,
                    i,
                    i + 1,
                    pair[0],
                    pair[1]
                )));
            }
        }
    }
    Ok(directions)
}

/// Centreline length of `trace` routed with circular corners of the
/// template's bend radius, without building any geometry.
///
/// Each 90° corner replaces `2R` of straight run with a `πR/2` arc.
pub fn trace_length(trace: &[Point], template: &WaveguideTemplate) -> Result<f64> {
    let directions = validate_trace(trace)?;
    let radius = template.bend_radius();
    let straight: f64 = trace.windows(2).map(|p| distance(p[0], p[1])).sum();
    let corners = directions.len() - 1;
    Ok(straight - corners as f64 * (2.0 * radius - FRAC_PI_2 * radius))
}

// =============================================================================
// CORNERS
// =============================================================================

#[derive(Debug, Clone, Copy)]
enum Corner {
    Circular { radius: f64, turn: f64 },
    Euler(EulerBend),
}

impl Corner {
    fn new(template: &WaveguideTemplate, turn: f64) -> Result<Self> {
        let radius = template.bend_radius();
        if template.euler_bend() {
            Ok(Corner::Euler(EulerBend::new(turn, radius)?))
        } else {
            Ok(Corner::Circular { radius, turn })
        }
    }

    /// Straight run consumed on each adjoining segment.
    fn run(&self) -> Result<f64> {
        match self {
            Corner::Circular { radius, turn } => Ok(radius * (turn.abs() / 2.0).tan()),
            Corner::Euler(bend) => bend.dist_to_vertex().ok_or_else(|| {
                Error::geometry(format!(
                    "an Euler corner turning by {} has no vertex",
                    bend.angle()
                ))
            }),
        }
    }

    fn length(&self) -> f64 {
        match self {
            Corner::Circular { radius, turn } => radius * turn.abs(),
            Corner::Euler(bend) => bend.total_length(),
        }
    }

    fn extrude(&self, path: &mut WaveguidePath) -> Result<()> {
        match self {
            Corner::Circular { radius, turn } => path.turn(*radius, *turn)?,
            Corner::Euler(bend) => path.parametric(bend)?,
        };
        Ok(())
    }
}

// =============================================================================
// WAVEGUIDE
// =============================================================================

/// Waveguide routed through absolute waypoints.
///
/// ## Example
///
/// ```rust
/// use photonic_components::Waveguide;
/// use photonic_geometry::{ComponentRecipe, Point, WaveguideTemplate};
///
/// let wgt = WaveguideTemplate::builder().bend_radius(10.0).build()?;
/// let trace = vec![Point::new(0.0, 0.0), Point::new(50.0, 0.0), Point::new(50.0, 40.0)];
/// let wg = Waveguide::new(trace, &wgt)?;
/// let component = wg.build()?;
/// assert_eq!(component.port("output")?.position, Point::new(50.0, 40.0));
/// # Ok::<(), photonic_geometry::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Waveguide<'a> {
    template: &'a WaveguideTemplate,
    trace: Vec<Point>,
    directions: Vec<Direction>,
    corners: Vec<Corner>,
    runs: Vec<f64>,
}

impl<'a> Waveguide<'a> {
    /// Validates the trace and checks that every segment has room for the
    /// corners at its ends.
    pub fn new(trace: Vec<Point>, template: &'a WaveguideTemplate) -> Result<Self> {
        let directions = validate_trace(&trace)?;
        let corners = directions
            .windows(2)
            .map(|pair| Corner::new(template, turn_angle(pair[0], pair[1])?))
            .collect::<Result<Vec<_>>>()?;
        let corner_runs = corners.iter().map(Corner::run).collect::<Result<Vec<_>>>()?;

        let mut runs = Vec::with_capacity(directions.len());
        for (i, pair) in trace.windows(2).enumerate() {
            let available = distance(pair[0], pair[1]);
            let before = if i == 0 { 0.0 } else { corner_runs[i - 1] };
            let after = corner_runs.get(i).copied().unwrap_or(0.0);
            let required = before + after;
            if required > available + TOLERANCE {
                return Err(Error::InsufficientRun {
                    start: pair[0],
                    end: pair[1],
                    available,
                    required,
                });
            }
            runs.push(available - required);
        }

        Ok(Self {
            template,
            trace,
            directions,
            corners,
            runs,
        })
    }

    /// Waypoints.
    pub fn trace(&self) -> &[Point] {
        &self.trace
    }

    /// Centreline length including corners.
    pub fn length(&self) -> f64 {
        let straight: f64 = self.runs.iter().filter(|r| **r > TOLERANCE).sum();
        straight + self.corners.iter().map(Corner::length).sum::<f64>()
    }

    /// Input and output ports.
    pub fn ports(&self) -> Result<(Port, Port)> {
        let first = self.trace[0];
        let last = self.trace[self.trace.len() - 1];
        let input = Port::new(first, opposite(self.directions[0])?)?;
        let output = Port::new(last, self.directions[self.directions.len() - 1])?;
        Ok((input, output))
    }
}

impl ComponentRecipe for Waveguide<'_> {
    fn build(&self) -> Result<Component> {
        let span = debug_span!("waveguide", waypoints = self.trace.len());
        let _guard = span.enter();

        let mut path = WaveguidePath::new(self.template, self.trace[0], self.directions[0])?;
        for (i, run) in self.runs.iter().enumerate() {
            // Runs that the corners consume entirely are skipped.
            if *run > TOLERANCE {
                path.straight(*run)?;
            }
            if let Some(corner) = self.corners.get(i) {
                corner.extrude(&mut path)?;
            }
        }
        debug!(length = path.length(), corners = self.corners.len(), "routed");

        let (input, output) = self.ports()?;
        let mut component = Component::new("Waveguide");
        component.add_polygons(path.extract_polygons());
        component.add_port(INPUT_PORT, input)?;
        component.add_port(OUTPUT_PORT, output)?;
        Ok(component)
    }
}
