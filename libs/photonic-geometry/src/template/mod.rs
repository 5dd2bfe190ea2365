//! # Waveguide Template
//!
//! Immutable description of a waveguide cross-section and the fabrication
//! process it is drawn for. One template is shared by reference across every
//! component of a mask.
//!
//! ## Layer Stack
//!
//! The stack lists `(width, layer)` entries. The first entry is the core;
//! every later entry is a cladding region drawn as a wider path around the
//! same centreline. A cladding entry no wider than the core is skipped.
//!
//! ## Resist Polarity
//!
//! | fab     | resist | effective |
//! |---------|--------|-----------|
//! | Etch    | +      | +         |
//! | Etch    | −      | −         |
//! | Liftoff | +      | −         |
//! | Liftoff | −      | +         |
//!
//! Positive resist masks are the XOR of core and cladding; negative resist
//! masks are their AND.
//!
//! ## Deserialization
//!
//! Templates deserialize through [`WaveguideTemplateBuilder::build`], so a
//! loaded template passes the same checks as one built in code.

use std::f64::consts::PI;

use config::constants::{
    BuildConfig, DEFAULT_BEND_RADIUS, DEFAULT_CLAD_LAYER, DEFAULT_CLAD_WIDTH, DEFAULT_GRID,
    DEFAULT_MAX_POINTS, DEFAULT_SLOT, DEFAULT_SWG_DUTY_CYCLE, DEFAULT_SWG_PERIOD,
    DEFAULT_WG_LAYER, DEFAULT_WG_WIDTH,
};
use serde::{Deserialize, Serialize};

use crate::core::polygon::LayerSpec;
use crate::error::{Error, Result};
use crate::path::Profile;

// =============================================================================
// ENUMS
// =============================================================================

/// Cross-section family.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaveguideKind {
    /// Single-rail waveguide.
    Strip,
    /// Two rails separated by a slot of the given width.
    Slot {
        /// Gap between the two rails.
        slot: f64,
    },
    /// Sub-wavelength grating: the core is cut into teeth of
    /// `period · duty_cycle` repeating every `period` along the centreline.
    Swg {
        /// Grating period.
        period: f64,
        /// Fraction of each period filled with core.
        duty_cycle: f64,
    },
}

/// Photoresist polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resist {
    /// Exposed regions are removed.
    Positive,
    /// Exposed regions remain.
    Negative,
}

impl Resist {
    /// The other polarity.
    pub fn inverted(self) -> Self {
        match self {
            Resist::Positive => Resist::Negative,
            Resist::Negative => Resist::Positive,
        }
    }
}

/// Fabrication process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Fab {
    /// Etching; the resist polarity is used as given.
    #[default]
    Etch,
    /// Liftoff; the resist polarity is inverted.
    Liftoff,
}

/// Boolean operation a mask writer applies between core and cladding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaskOperation {
    /// Cladding minus core (positive resist).
    Xor,
    /// Cladding intersected with core (negative resist).
    And,
}

/// One entry of the layer stack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StackLayer {
    /// Full width of the region.
    pub width: f64,
    /// Layer the region is drawn on.
    pub layer: LayerSpec,
}

// =============================================================================
// TEMPLATE
// =============================================================================

/// Shared waveguide configuration.
///
/// ## Example
///
/// ```rust
/// use photonic_geometry::template::{Resist, WaveguideTemplate};
///
/// let wgt = WaveguideTemplate::builder()
///     .wg_width(0.5)
///     .clad_width(3.0)
///     .bend_radius(10.0)
///     .resist(Resist::Positive)
///     .build()
///     .unwrap();
/// assert_eq!(wgt.core_width(), 0.5);
/// assert_eq!(wgt.clad_width(), 3.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTemplate")]
pub struct WaveguideTemplate {
    kind: WaveguideKind,
    bend_radius: f64,
    stack: Vec<StackLayer>,
    grid: f64,
    resist: Resist,
    euler_bend: bool,
    max_points: usize,
}

impl WaveguideTemplate {
    /// Starts a builder preloaded with the default strip waveguide.
    pub fn builder() -> WaveguideTemplateBuilder {
        WaveguideTemplateBuilder::default()
    }

    /// Cross-section family.
    pub fn kind(&self) -> WaveguideKind {
        self.kind
    }

    /// Minimum bend radius.
    pub fn bend_radius(&self) -> f64 {
        self.bend_radius
    }

    /// Full layer stack, core first.
    pub fn stack(&self) -> &[StackLayer] {
        &self.stack
    }

    /// Cladding entries of the stack that are wider than the core.
    pub fn cladding(&self) -> impl Iterator<Item = &StackLayer> + '_ {
        let core = self.core_width();
        self.stack.iter().skip(1).filter(move |s| s.width > core)
    }

    /// Nominal core width.
    pub fn core_width(&self) -> f64 {
        self.stack.first().map(|s| s.width).unwrap_or(0.0)
    }

    /// Core layer tag.
    pub fn core_layer(&self) -> LayerSpec {
        self.stack.first().map(|s| s.layer).unwrap_or_default()
    }

    /// Cladding width on each side of the core, taken from the first
    /// cladding entry. Zero when cladding is disabled.
    pub fn clad_width(&self) -> f64 {
        self.stack
            .get(1)
            .map(|s| ((s.width - self.core_width()) / 2.0).max(0.0))
            .unwrap_or(0.0)
    }

    /// Layer tag of the first cladding entry, `None` when cladding is
    /// disabled.
    pub fn clad_layer(&self) -> Option<LayerSpec> {
        self.cladding().next().map(|s| s.layer)
    }

    /// Width of a single rail of a slotted waveguide.
    pub fn rail_width(&self) -> Option<f64> {
        match self.kind {
            WaveguideKind::Slot { slot } => Some((self.core_width() - slot) / 2.0),
            WaveguideKind::Strip | WaveguideKind::Swg { .. } => None,
        }
    }

    /// `(period, duty_cycle)` of a sub-wavelength grating waveguide.
    pub fn grating(&self) -> Option<(f64, f64)> {
        match self.kind {
            WaveguideKind::Swg { period, duty_cycle } => Some((period, duty_cycle)),
            WaveguideKind::Strip | WaveguideKind::Slot { .. } => None,
        }
    }

    /// Centre-to-centre distance of the two rails of a slotted waveguide.
    pub fn rail_separation(&self) -> Option<f64> {
        self.rail_width().map(|rail| self.core_width() - rail)
    }

    /// Core cross-section as a path profile.
    pub fn core_profile(&self) -> Profile {
        match (self.rail_width(), self.rail_separation()) {
            (Some(rail), Some(sep)) => Profile::dual(rail, sep),
            _ => Profile::single(self.core_width()),
        }
    }

    /// Mask grid resolution.
    pub fn grid(&self) -> f64 {
        self.grid
    }

    /// Effective resist polarity after accounting for the fabrication
    /// process.
    pub fn resist(&self) -> Resist {
        self.resist
    }

    /// Whether routing corners use Euler bends.
    pub fn euler_bend(&self) -> bool {
        self.euler_bend
    }

    /// Boolean operation the resist polarity calls for.
    pub fn mask_operation(&self) -> MaskOperation {
        match self.resist {
            Resist::Positive => MaskOperation::Xor,
            Resist::Negative => MaskOperation::And,
        }
    }

    /// Layer the boolean result is written to: the cladding layer plus one.
    pub fn output_layer(&self) -> LayerSpec {
        let base = self.stack.get(1).map_or(self.core_layer(), |s| s.layer);
        LayerSpec::new(base.layer.saturating_add(1), base.datatype)
    }

    /// Discretisation settings for path builders driven by this template.
    pub fn build_config(&self) -> Result<BuildConfig> {
        Ok(BuildConfig::new(self.arc_tolerance(), self.grid, self.max_points)?)
    }

    /// Chord deviation the arc point-count rule holds to.
    pub fn arc_tolerance(&self) -> f64 {
        self.grid / 2.0
    }

    /// Number of chords an arc of `radius` sweeping `angle` needs so that
    /// no chord strays more than half a grid step from the arc.
    ///
    /// ```text
    /// n = ceil(|θ| / acos(2·(1 − grid/(2R))² − 1))
    /// ```
    pub fn num_points_for_arc(&self, angle: f64, radius: f64) -> usize {
        arc_point_count(angle, radius, self.grid)
    }
}

/// Chord count rule shared by templates and bare path builders.
pub fn arc_point_count(angle: f64, radius: f64, grid: f64) -> usize {
    let radius = radius.abs();
    if radius <= grid / 2.0 {
        return ((angle.abs() / (PI / 2.0)).ceil() as usize).max(1);
    }
    let step = (2.0 * (1.0 - 0.5 * grid / radius).powi(2) - 1.0).acos();
    ((angle.abs() / step).ceil() as usize).max(1)
}

// =============================================================================
// BUILDER
// =============================================================================

/// Validating builder for [`WaveguideTemplate`].
#[derive(Debug, Clone)]
pub struct WaveguideTemplateBuilder {
    kind: WaveguideKind,
    bend_radius: f64,
    wg_width: f64,
    clad_width: f64,
    wg_layer: LayerSpec,
    clad_layer: LayerSpec,
    stack: Option<Vec<StackLayer>>,
    grid: f64,
    resist: Resist,
    fab: Fab,
    euler_bend: bool,
    max_points: usize,
}

impl Default for WaveguideTemplateBuilder {
    fn default() -> Self {
        Self {
            kind: WaveguideKind::Strip,
            bend_radius: DEFAULT_BEND_RADIUS,
            wg_width: DEFAULT_WG_WIDTH,
            clad_width: DEFAULT_CLAD_WIDTH,
            wg_layer: DEFAULT_WG_LAYER.into(),
            clad_layer: DEFAULT_CLAD_LAYER.into(),
            stack: None,
            grid: DEFAULT_GRID,
            resist: Resist::Positive,
            fab: Fab::Etch,
            euler_bend: false,
            max_points: DEFAULT_MAX_POINTS,
        }
    }
}

impl WaveguideTemplateBuilder {
    /// Strip or slotted cross-section.
    pub fn kind(mut self, kind: WaveguideKind) -> Self {
        self.kind = kind;
        self
    }

    /// Slotted cross-section with the default slot width.
    pub fn slot(self) -> Self {
        self.kind(WaveguideKind::Slot { slot: DEFAULT_SLOT })
    }

    /// Sub-wavelength grating cross-section with the default period and
    /// duty cycle.
    pub fn swg(self) -> Self {
        self.kind(WaveguideKind::Swg {
            period: DEFAULT_SWG_PERIOD,
            duty_cycle: DEFAULT_SWG_DUTY_CYCLE,
        })
    }

    /// Minimum bend radius.
    pub fn bend_radius(mut self, radius: f64) -> Self {
        self.bend_radius = radius;
        self
    }

    /// Core width.
    pub fn wg_width(mut self, width: f64) -> Self {
        self.wg_width = width;
        self
    }

    /// Cladding width on each side of the core. Zero disables cladding.
    pub fn clad_width(mut self, width: f64) -> Self {
        self.clad_width = width;
        self
    }

    /// Core layer tag.
    pub fn wg_layer(mut self, layer: impl Into<LayerSpec>) -> Self {
        self.wg_layer = layer.into();
        self
    }

    /// Cladding layer tag.
    pub fn clad_layer(mut self, layer: impl Into<LayerSpec>) -> Self {
        self.clad_layer = layer.into();
        self
    }

    /// Explicit layer stack; overrides widths and layers set individually.
    pub fn stack(mut self, stack: Vec<StackLayer>) -> Self {
        self.stack = Some(stack);
        self
    }

    /// Mask grid resolution.
    pub fn grid(mut self, grid: f64) -> Self {
        self.grid = grid;
        self
    }

    /// Resist polarity before the fabrication process is applied.
    pub fn resist(mut self, resist: Resist) -> Self {
        self.resist = resist;
        self
    }

    /// Fabrication process.
    pub fn fab(mut self, fab: Fab) -> Self {
        self.fab = fab;
        self
    }

    /// Route corners with Euler bends instead of circular arcs.
    pub fn euler_bend(mut self, euler: bool) -> Self {
        self.euler_bend = euler;
        self
    }

    /// Vertex limit of emitted polygons.
    pub fn max_points(mut self, max_points: usize) -> Self {
        self.max_points = max_points;
        self
    }

    /// Validates the parameters and freezes the template.
    pub fn build(self) -> Result<WaveguideTemplate> {
        let stack = match self.stack {
            Some(stack) => stack,
            None => {
                ensure_positive_or_zero("clad_width", self.clad_width)?;
                vec![
                    StackLayer {
                        width: self.wg_width,
                        layer: self.wg_layer,
                    },
                    StackLayer {
                        width: self.wg_width + 2.0 * self.clad_width,
                        layer: self.clad_layer,
                    },
                ]
            }
        };
        let core = stack
            .first()
            .ok_or_else(|| Error::geometry("waveguide stack must contain a core entry"))?;
        ensure_positive("wg_width", core.width)?;
        for layer in &stack[1..] {
            ensure_positive_or_zero("stack width", layer.width)?;
        }
        ensure_positive("bend_radius", self.bend_radius)?;
        ensure_positive("grid", self.grid)?;
        if self.bend_radius < core.width / 2.0 {
            return Err(Error::invalid_parameter(
                "bend_radius",
                self.bend_radius,
                format!("must be at least half the core width ({})", core.width / 2.0),
            ));
        }
        match self.kind {
            WaveguideKind::Strip => {}
            WaveguideKind::Slot { slot } => {
                if !(slot > 0.0 && slot < core.width) {
                    return Err(Error::invalid_parameter(
                        "slot",
                        slot,
                        format!("must lie in (0, {})", core.width),
                    ));
                }
            }
            WaveguideKind::Swg { period, duty_cycle } => {
                ensure_positive("period", period)?;
                if !(duty_cycle > 0.0 && duty_cycle < 1.0) {
                    return Err(Error::invalid_parameter(
                        "duty_cycle",
                        duty_cycle,
                        "must lie in (0, 1)",
                    ));
                }
            }
        }
        let resist = match self.fab {
            Fab::Etch => self.resist,
            Fab::Liftoff => self.resist.inverted(),
        };
        let template = WaveguideTemplate {
            kind: self.kind,
            bend_radius: self.bend_radius,
            stack,
            grid: self.grid,
            resist,
            euler_bend: self.euler_bend,
            max_points: self.max_points,
        };
        template.build_config()?;
        Ok(template)
    }
}

// =============================================================================
// DESERIALIZATION
// =============================================================================

/// Serialized form of a template, checked by the builder on the way in.
#[derive(Debug, Deserialize)]
struct RawTemplate {
    kind: WaveguideKind,
    bend_radius: f64,
    stack: Vec<StackLayer>,
    grid: f64,
    resist: Resist,
    euler_bend: bool,
    max_points: usize,
}

impl TryFrom<RawTemplate> for WaveguideTemplate {
    type Error = Error;

    fn try_from(raw: RawTemplate) -> Result<Self> {
        WaveguideTemplate::builder()
            .kind(raw.kind)
            .bend_radius(raw.bend_radius)
            .stack(raw.stack)
            .grid(raw.grid)
            .resist(raw.resist)
            .euler_bend(raw.euler_bend)
            .max_points(raw.max_points)
            .build()
    }
}

fn ensure_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::invalid_parameter(name, value, "must be positive and finite"))
    }
}

fn ensure_positive_or_zero(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::invalid_parameter(name, value, "must be non-negative and finite"))
    }
}
