//! Linear width taper.

use config::constants::TOLERANCE;
use photonic_geometry::path::{PathBuilder, Profile};
use photonic_geometry::template::WaveguideKind;
use photonic_geometry::{
    Component, ComponentRecipe, Direction, Error, Point, Port, Result, WaveguideTemplate,
    INPUT_PORT, OUTPUT_PORT,
};
use tracing::debug_span;

/// Strip waveguide tapering from the template width to `end_width` over
/// `length`.
///
/// The cladding tapers to `end_width + 2·end_clad_width` and then runs on
/// for `extra_clad_length` past the output port.
#[derive(Debug, Clone)]
pub struct Taper<'a> {
    template: &'a WaveguideTemplate,
    length: f64,
    end_width: f64,
    end_clad_width: Option<f64>,
    extra_clad_length: Option<f64>,
    port: Port,
}

impl<'a> Taper<'a> {
    /// Taper at the origin pointing EAST.
    pub fn new(template: &'a WaveguideTemplate, length: f64, end_width: f64) -> Self {
        Self {
            template,
            length,
            end_width,
            end_clad_width: None,
            extra_clad_length: None,
            port: Port {
                position: Point::ZERO,
                direction: Direction::East,
            },
        }
    }

    /// Cladding width at the narrow end (defaults to the template's).
    pub fn end_clad_width(mut self, width: f64) -> Self {
        self.end_clad_width = Some(width);
        self
    }

    /// Cladding run past the end (defaults to `2·end_clad_width`).
    pub fn extra_clad_length(mut self, length: f64) -> Self {
        self.extra_clad_length = Some(length);
        self
    }

    /// Input position and the direction the taper extends in.
    pub fn at(mut self, port: Port) -> Self {
        self.port = port;
        self
    }

    fn validate(&self) -> Result<()> {
        match self.template.kind() {
            WaveguideKind::Strip => {}
            WaveguideKind::Slot { slot } => {
                return Err(Error::invalid_parameter(
                    "slot",
                    slot,
                    "tapers are drawn for strip waveguides only",
                ));
            }
            WaveguideKind::Swg { period, .. } => {
                return Err(Error::invalid_parameter(
                    "period",
                    period,
                    "tapers are drawn for strip waveguides only",
                ));
            }
        }
        if !self.length.is_finite() || self.length <= 0.0 {
            return Err(Error::invalid_parameter(
                "length",
                self.length,
                "must be positive and finite",
            ));
        }
        if !self.end_width.is_finite() || self.end_width <= 0.0 {
            return Err(Error::invalid_parameter(
                "end_width",
                self.end_width,
                "must be positive and finite",
            ));
        }
        for (name, value) in [
            ("end_clad_width", self.end_clad_width),
            ("extra_clad_length", self.extra_clad_length),
        ] {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(Error::invalid_parameter(name, v, "must be non-negative and finite"));
                }
            }
        }
        Ok(())
    }
}

impl ComponentRecipe for Taper<'_> {
    fn build(&self) -> Result<Component> {
        let span = debug_span!("taper", length = self.length, end_width = self.end_width);
        let _guard = span.enter();
        self.validate()?;

        let wgt = self.template;
        let config = wgt.build_config()?;
        let mut component = Component::new("Taper");

        let mut core = PathBuilder::new(Point::ZERO, wgt.core_width())?
            .with_layer(wgt.core_layer())
            .with_config(config);
        core.straight_to(self.length, Profile::single(self.end_width))?;
        component.add_polygons(core.extract_polygons());

        if let Some(clad_layer) = wgt.clad_layer() {
            let end_clad = self.end_clad_width.unwrap_or(wgt.clad_width());
            let extra = self.extra_clad_length.unwrap_or(2.0 * end_clad);
            let mut clad = PathBuilder::new(Point::ZERO, wgt.core_width() + 2.0 * wgt.clad_width())?
                .with_layer(clad_layer)
                .with_config(config);
            clad.straight_to(self.length, Profile::single(self.end_width + 2.0 * end_clad))?;
            if extra > TOLERANCE {
                clad.straight(extra)?;
            }
            component.add_polygons(clad.extract_polygons());
        }

        component.add_port(INPUT_PORT, Port::new(Point::ZERO, Direction::West)?)?;
        component.add_port(
            OUTPUT_PORT,
            Port::new(Point::new(self.length, 0.0), Direction::East)?,
        )?;
        component.auto_place(&self.port)?;
        Ok(component)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn template() -> WaveguideTemplate {
        WaveguideTemplate::builder()
            .wg_width(0.5)
            .clad_width(3.0)
            .build()
            .unwrap()
    }

    #[test]
    fn test_taper_areas_and_ports() {
        let wgt = template();
        let c = Taper::new(&wgt, 100.0, 0.3)
            .end_clad_width(5.0)
            .build()
            .unwrap();
        let polys = c.polygons();
        assert_eq!(polys.len(), 3);
        assert_relative_eq!(polys[0].area(), 100.0 * (0.5 + 0.3) / 2.0, epsilon = 1e-9);
        // 6.5 → 10.3 over 100, then 10.3 wide for 10.
        assert_relative_eq!(polys[1].area(), 100.0 * (6.5 + 10.3) / 2.0, epsilon = 1e-9);
        assert_relative_eq!(polys[2].area(), 10.0 * 10.3, epsilon = 1e-9);
        assert_eq!(c.port(OUTPUT_PORT).unwrap().position, Point::new(100.0, 0.0));
    }

    #[test]
    fn test_taper_placed_south() {
        let wgt = template();
        let target = Port::new(Point::new(10.0, 10.0), Direction::South).unwrap();
        let c = Taper::new(&wgt, 50.0, 1.0).at(target).build().unwrap();
        let out = c.port(OUTPUT_PORT).unwrap();
        assert_eq!(out.position, Point::new(10.0, -40.0));
        assert_eq!(out.direction, Direction::South);
        assert_eq!(c.port(INPUT_PORT).unwrap().direction, Direction::North);
    }

    #[test]
    fn test_taper_without_extra_cladding() {
        let wgt = template();
        let c = Taper::new(&wgt, 20.0, 1.0)
            .extra_clad_length(0.0)
            .build()
            .unwrap();
        assert_eq!(c.polygons().len(), 2);
    }

    #[test]
    fn test_taper_rejects_slot_and_bad_widths() {
        let slot = WaveguideTemplate::builder().wg_width(1.0).slot().build().unwrap();
        assert!(matches!(
            Taper::new(&slot, 10.0, 0.5).build(),
            Err(Error::InvalidParameter { .. })
        ));
        let swg = WaveguideTemplate::builder().swg().build().unwrap();
        assert!(matches!(
            Taper::new(&swg, 10.0, 0.5).build(),
            Err(Error::InvalidParameter { ref name, .. }) if name == "period"
        ));
        let wgt = template();
        assert!(Taper::new(&wgt, 10.0, 0.0).build().is_err());
        assert!(Taper::new(&wgt, -1.0, 0.5).build().is_err());
        assert!(Taper::new(&wgt, 10.0, 0.5).end_clad_width(-2.0).build().is_err());
    }
}
