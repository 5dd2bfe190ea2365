//! Core and cladding paths driven in lockstep from a template.

use crate::core::direction::Direction;
use crate::core::polygon::Polygon;
use crate::core::vec2::Point;
use crate::curves::Curve;
use crate::error::{Error, Result};
use crate::path::grating::Grating;
use crate::path::{PathBuilder, Profile};
use crate::template::WaveguideTemplate;

/// One [`PathBuilder`] for the core and one per cladding entry of the
/// template's layer stack, all following the same centreline.
///
/// Tapering operations take the final core profile and, optionally, the
/// final cladding margin on each side of the core; without a margin every
/// cladding entry keeps its current width.
///
/// Sub-wavelength grating templates draw the core as periodic teeth; the
/// cladding stays continuous. Grating cores cannot taper.
#[derive(Debug)]
pub struct WaveguidePath {
    core: PathBuilder,
    grating: Option<Grating>,
    cladding: Vec<PathBuilder>,
}

impl WaveguidePath {
    /// Starts a waveguide at `start` heading `heading`.
    pub fn new(template: &WaveguideTemplate, start: Point, heading: Direction) -> Result<Self> {
        Self::with_core(template, start, heading, template.core_profile())
    }

    /// Starts a waveguide whose core begins with `core` instead of the
    /// template's profile. Cladding widths still come from the template.
    pub fn with_core(
        template: &WaveguideTemplate,
        start: Point,
        heading: Direction,
        core: Profile,
    ) -> Result<Self> {
        let config = template.build_config()?;
        let grating = template.grating().map(|(period, duty_cycle)| {
            Grating::new(period, duty_cycle, core, template.core_layer(), config)
        });
        let core = PathBuilder::with_profile(start, core)?
            .with_heading(heading)?
            .with_layer(template.core_layer())
            .with_config(config);
        let cladding = template
            .cladding()
            .map(|entry| {
                Ok(PathBuilder::new(start, entry.width)?
                    .with_heading(heading)?
                    .with_layer(entry.layer)
                    .with_config(config))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            core,
            grating,
            cladding,
        })
    }

    /// Current centreline position.
    pub fn position(&self) -> Point {
        self.core.position()
    }

    /// Current heading.
    pub fn heading(&self) -> Direction {
        self.core.heading()
    }

    /// Current core profile.
    pub fn core_profile(&self) -> Profile {
        self.core.profile()
    }

    /// Centreline length extruded so far.
    pub fn length(&self) -> f64 {
        self.core.length()
    }

    /// Straight run on every layer.
    pub fn straight(&mut self, length: f64) -> Result<&mut Self> {
        let (start, heading) = (self.position(), self.heading());
        self.core.straight(length)?;
        if let Some(grating) = &mut self.grating {
            grating.straight(start, heading, length)?;
        }
        for clad in &mut self.cladding {
            clad.straight(length)?;
        }
        Ok(self)
    }

    /// Tapered straight run.
    pub fn straight_to(
        &mut self,
        length: f64,
        core: Profile,
        clad_margin: Option<f64>,
    ) -> Result<&mut Self> {
        self.check_taper(&core)?;
        let targets = self.clad_targets(&core, clad_margin);
        let (start, heading) = (self.position(), self.heading());
        self.core.straight_to(length, core)?;
        if let Some(grating) = &mut self.grating {
            grating.straight(start, heading, length)?;
        }
        for (clad, target) in self.cladding.iter_mut().zip(targets) {
            clad.straight_to(length, target)?;
        }
        Ok(self)
    }

    /// Circular arc on every layer.
    pub fn turn(&mut self, radius: f64, sweep: f64) -> Result<&mut Self> {
        let (start, heading) = (self.position(), self.heading());
        self.core.turn(radius, sweep)?;
        if let Some(grating) = &mut self.grating {
            grating.turn(start, heading, radius, sweep)?;
        }
        for clad in &mut self.cladding {
            clad.turn(radius, sweep)?;
        }
        Ok(self)
    }

    /// Parametric curve on every layer.
    pub fn parametric(&mut self, curve: &dyn Curve) -> Result<&mut Self> {
        let core = self.core_profile();
        self.parametric_to(curve, core, None)
    }

    /// Tapered parametric curve.
    pub fn parametric_to(
        &mut self,
        curve: &dyn Curve,
        core: Profile,
        clad_margin: Option<f64>,
    ) -> Result<&mut Self> {
        self.check_taper(&core)?;
        let targets = self.clad_targets(&core, clad_margin);
        let (start, heading, before) = (self.position(), self.heading(), self.length());
        self.core.parametric(curve, Some(core))?;
        if let Some(grating) = &mut self.grating {
            let length = self.core.length() - before;
            grating.parametric(start, heading, curve, length)?;
        }
        for (clad, target) in self.cladding.iter_mut().zip(targets) {
            clad.parametric(curve, Some(target))?;
        }
        Ok(self)
    }

    /// Core polygons followed by cladding polygons.
    pub fn extract_polygons(self) -> Vec<Polygon> {
        let mut polygons = match self.grating {
            Some(grating) => grating.into_polygons(),
            None => self.core.extract_polygons(),
        };
        for clad in self.cladding {
            polygons.extend(clad.extract_polygons());
        }
        polygons
    }

    fn check_taper(&self, core: &Profile) -> Result<()> {
        if self.grating.is_some() && *core != self.core.profile() {
            return Err(Error::geometry(
                "sub-wavelength grating cores cannot taper",
            ));
        }
        Ok(())
    }

    fn clad_targets(&self, core: &Profile, margin: Option<f64>) -> Vec<Profile> {
        self.cladding
            .iter()
            .map(|clad| match margin {
                Some(m) => Profile::single(core.total_width() + 2.0 * m),
                None => clad.profile(),
            })
            .collect()
    }
}
