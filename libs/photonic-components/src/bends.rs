//! # Bends
//!
//! Curved components driven by the curve generators:
//!
//! - [`EBend`]: Euler bend by an arbitrary angle, placeable by its vertex
//! - [`EulerSBend`]: continuous-curvature S-bend
//! - [`SBend`]: sinusoidal S-bend
//! - [`BBend`]: Bezier bend through absolute poles
//!
//! All but [`BBend`] are authored in the canonical frame and placed with
//! [`Component::auto_place`].

use photonic_geometry::curves::{
    Bezier, Curve, EulerBend, EulerSBend as EulerSBendCurve, SineBend,
};
use photonic_geometry::template::WaveguideKind;
use photonic_geometry::{
    angle_of, normalize_angle, translate, Component, ComponentRecipe, Direction, Error, Point,
    Polygon, Port, Profile, Result, WaveguidePath, WaveguideTemplate, INPUT_PORT, OUTPUT_PORT,
};
use tracing::{debug, debug_span};

fn origin_east() -> Port {
    Port {
        position: Point::ZERO,
        direction: Direction::East,
    }
}

/// Core profile for an optional width override. Overrides apply to strip
/// waveguides only.
fn core_profile(template: &WaveguideTemplate, name: &str, width: Option<f64>) -> Result<Profile> {
    match (width, template.kind()) {
        (None, _) => Ok(template.core_profile()),
        (Some(w), WaveguideKind::Strip) if w.is_finite() && w > 0.0 => Ok(Profile::single(w)),
        (Some(w), WaveguideKind::Strip) => {
            Err(Error::invalid_parameter(name, w, "must be positive and finite"))
        }
        (Some(w), WaveguideKind::Slot { .. } | WaveguideKind::Swg { .. }) => {
            Err(Error::invalid_parameter(name, w, "width overrides need a strip waveguide"))
        }
    }
}

/// Core and cladding polygons along `curve` in the canonical frame.
fn extrude(
    template: &WaveguideTemplate,
    curve: &dyn Curve,
    start_width: Option<f64>,
    end_width: Option<f64>,
) -> Result<Vec<Polygon>> {
    let start = core_profile(template, "start_width", start_width)?;
    let end = core_profile(template, "end_width", end_width)?;
    let mut path = WaveguidePath::with_core(template, Point::ZERO, Direction::East, start)?;
    path.parametric_to(curve, end, None)?;
    Ok(path.extract_polygons())
}

/// Canonical component with ports at both ends of `curve`.
fn canonical(name: &str, curve: &dyn Curve, polygons: Vec<Polygon>) -> Result<Component> {
    let mut component = Component::new(name);
    component.add_polygons(polygons);
    component.add_port(INPUT_PORT, Port::new(Point::ZERO, Direction::West)?)?;
    component.add_port(
        OUTPUT_PORT,
        Port::new(curve.end_point(), Direction::from_angle(curve.end_angle())?)?,
    )?;
    Ok(component)
}

// =============================================================================
// EBEND
// =============================================================================

#[derive(Debug, Clone, Copy)]
enum Anchor {
    Port(Port),
    Vertex { vertex: Point, direction: Direction },
}

/// Euler bend turning by `turn` radians with the template's bend radius as
/// minimum radius of curvature.
#[derive(Debug, Clone)]
pub struct EBend<'a> {
    template: &'a WaveguideTemplate,
    turn: f64,
    start_width: Option<f64>,
    end_width: Option<f64>,
    anchor: Anchor,
}

impl<'a> EBend<'a> {
    /// Bend at the origin heading EAST. `turn` is normalized to (−π, π].
    pub fn new(template: &'a WaveguideTemplate, turn: f64) -> Self {
        Self {
            template,
            turn: normalize_angle(turn),
            start_width: None,
            end_width: None,
            anchor: Anchor::Port(origin_east()),
        }
    }

    /// Core width at the input.
    pub fn start_width(mut self, width: f64) -> Self {
        self.start_width = Some(width);
        self
    }

    /// Core width at the output.
    pub fn end_width(mut self, width: f64) -> Self {
        self.end_width = Some(width);
        self
    }

    /// Places the input on `port`, extending along its direction.
    pub fn at(mut self, port: Port) -> Self {
        self.anchor = Anchor::Port(port);
        self
    }

    /// Places the bend so its tangent lines meet at `vertex`, entering
    /// along `direction`.
    pub fn at_vertex(mut self, vertex: Point, direction: Direction) -> Self {
        self.anchor = Anchor::Vertex { vertex, direction };
        self
    }

    /// Curve in the canonical frame.
    pub fn curve(&self) -> Result<EulerBend> {
        EulerBend::new(self.turn, self.template.bend_radius())
    }

    /// Distance from the input to the tangent-line intersection; `None`
    /// for a U-turn.
    pub fn dist_to_vertex(&self) -> Result<Option<f64>> {
        Ok(self.curve()?.dist_to_vertex())
    }

    fn target(&self, curve: &EulerBend) -> Result<Port> {
        match self.anchor {
            Anchor::Port(port) => Ok(port),
            Anchor::Vertex { vertex, direction } => {
                let dl = curve.dist_to_vertex().ok_or_else(|| {
                    Error::invalid_parameter("turn", self.turn, "a U-turn has no vertex to place by")
                })?;
                Port::new(translate(vertex, -dl, direction)?, direction)
            }
        }
    }
}

impl ComponentRecipe for EBend<'_> {
    fn build(&self) -> Result<Component> {
        let span = debug_span!("ebend", turn = self.turn);
        let _guard = span.enter();

        let curve = self.curve()?;
        let polygons = extrude(self.template, &curve, self.start_width, self.end_width)?;
        let mut component = canonical("EBend", &curve, polygons)?;
        component.auto_place(&self.target(&curve)?)?;
        debug!(length = curve.total_length(), "built");
        Ok(component)
    }
}

// =============================================================================
// S-BENDS
// =============================================================================

/// Euler S-bend shifting the waveguide by `height` over `length`.
#[derive(Debug, Clone)]
pub struct EulerSBend<'a> {
    template: &'a WaveguideTemplate,
    length: f64,
    height: f64,
    start_width: Option<f64>,
    end_width: Option<f64>,
    port: Port,
}

impl<'a> EulerSBend<'a> {
    /// S-bend at the origin heading EAST.
    pub fn new(template: &'a WaveguideTemplate, length: f64, height: f64) -> Self {
        Self {
            template,
            length,
            height,
            start_width: None,
            end_width: None,
            port: origin_east(),
        }
    }

    /// Core width at the input.
    pub fn start_width(mut self, width: f64) -> Self {
        self.start_width = Some(width);
        self
    }

    /// Core width at the output.
    pub fn end_width(mut self, width: f64) -> Self {
        self.end_width = Some(width);
        self
    }

    /// Places the input on `port`.
    pub fn at(mut self, port: Port) -> Self {
        self.port = port;
        self
    }

    /// Curve in the canonical frame.
    pub fn curve(&self) -> Result<EulerSBendCurve> {
        EulerSBendCurve::new(self.length, self.height)
    }
}

impl ComponentRecipe for EulerSBend<'_> {
    fn build(&self) -> Result<Component> {
        let span = debug_span!("euler_sbend", length = self.length, height = self.height);
        let _guard = span.enter();

        let curve = self.curve()?;
        let polygons = extrude(self.template, &curve, self.start_width, self.end_width)?;
        let mut component = canonical("EulerSBend", &curve, polygons)?;
        component.auto_place(&self.port)?;
        debug!(min_radius = curve.min_radius(), "built");
        Ok(component)
    }
}

/// Sinusoidal S-bend shifting the waveguide by `height` over `length`.
#[derive(Debug, Clone)]
pub struct SBend<'a> {
    template: &'a WaveguideTemplate,
    length: f64,
    height: f64,
    port: Port,
}

impl<'a> SBend<'a> {
    /// S-bend at the origin heading EAST.
    pub fn new(template: &'a WaveguideTemplate, length: f64, height: f64) -> Self {
        Self {
            template,
            length,
            height,
            port: origin_east(),
        }
    }

    /// Places the input on `port`.
    pub fn at(mut self, port: Port) -> Self {
        self.port = port;
        self
    }

    /// Curve in the canonical frame; requires `height ≠ 0` and
    /// `length ≥ |height|`.
    pub fn curve(&self) -> Result<SineBend> {
        if !self.height.is_finite() || self.height == 0.0 {
            return Err(Error::invalid_parameter(
                "height",
                self.height,
                "must be non-zero and finite",
            ));
        }
        if self.length < self.height.abs() {
            return Err(Error::invalid_parameter(
                "length",
                self.length,
                format!("must be at least |height| = {}", self.height.abs()),
            ));
        }
        SineBend::new(self.length, self.height)
    }
}

impl ComponentRecipe for SBend<'_> {
    fn build(&self) -> Result<Component> {
        let span = debug_span!("sbend", length = self.length, height = self.height);
        let _guard = span.enter();

        let curve = self.curve()?;
        let polygons = extrude(self.template, &curve, None, None)?;
        let mut component = canonical("SBend", &curve, polygons)?;
        component.auto_place(&self.port)?;
        Ok(component)
    }
}

// =============================================================================
// BBEND
// =============================================================================

/// Bezier bend through absolute control poles.
#[derive(Debug, Clone)]
pub struct BBend<'a> {
    template: &'a WaveguideTemplate,
    poles: Vec<Point>,
}

impl<'a> BBend<'a> {
    /// Bend from `poles[0]` to the last pole.
    pub fn new(template: &'a WaveguideTemplate, poles: Vec<Point>) -> Self {
        Self { template, poles }
    }
}

impl ComponentRecipe for BBend<'_> {
    fn build(&self) -> Result<Component> {
        let span = debug_span!("bbend", poles = self.poles.len());
        let _guard = span.enter();

        let absolute = Bezier::new(self.poles.clone())?;
        let curve = absolute.canonical();
        let polygons = extrude(self.template, &curve, None, None)?;
        let mut component = canonical("BBend", &curve, polygons)?;

        let start = Direction::from_angle(absolute.start_angle())?;
        component.auto_place(&Port::new(absolute.point(0.0), start)?)?;

        // Ports come straight from the poles rather than the round trip
        // through the canonical frame.
        let poles = absolute.poles();
        let (last, before) = (poles[poles.len() - 1], poles[poles.len() - 2]);
        component.add_port(
            OUTPUT_PORT,
            Port::new(last, Direction::from_angle(angle_of(before, last))?)?,
        )?;
        Ok(component)
    }
}

#[cfg(test)]
mod tests;
