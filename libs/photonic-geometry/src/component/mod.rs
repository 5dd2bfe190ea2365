//! # Components
//!
//! A [`Component`] is a named group of polygons plus a map of named
//! [`Port`]s. Recipes author components in a canonical frame (input port at
//! the origin pointing WEST, geometry extending EAST) and hand placement to
//! [`Component::auto_place`], which applies one rigid transform to every
//! polygon, every port and every embedded child.
//!
//! ## Example
//!
//! ```rust
//! use photonic_geometry::component::Component;
//! use photonic_geometry::port::Port;
//! use photonic_geometry::{Direction, Point};
//!
//! let mut c = Component::new("stub");
//! c.add_port("input", Port::new(Point::ZERO, Direction::West)?)?;
//! c.add_port("output", Port::new(Point::new(10.0, 0.0), Direction::East)?)?;
//!
//! c.auto_place(&Port::new(Point::new(5.0, 5.0), Direction::North)?)?;
//! assert_eq!(c.port("output")?.direction, Direction::North);
//! assert_eq!(c.port("output")?.position, Point::new(5.0, 15.0));
//! # Ok::<(), photonic_geometry::Error>(())
//! ```

use std::collections::BTreeMap;

use tracing::{debug, debug_span};

use crate::core::polygon::Polygon;
use crate::core::vec2::Point;
use crate::error::{Error, Result};
use crate::port::{placement_transform, Port};
use crate::transform::Transform;

/// Name of the port [`Component::auto_place`] anchors on.
pub const INPUT_PORT: &str = "input";

/// Conventional name of a component's main output port.
pub const OUTPUT_PORT: &str = "output";

// =============================================================================
// COMPONENT
// =============================================================================

/// Named geometry group with ports and embedded children.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Component {
    name: String,
    polygons: Vec<Polygon>,
    ports: BTreeMap<String, Port>,
    children: Vec<Component>,
}

impl Component {
    /// Empty component.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Base name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Polygons owned directly by this component.
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// Port map.
    pub fn ports(&self) -> &BTreeMap<String, Port> {
        &self.ports
    }

    /// Embedded sub-components.
    pub fn children(&self) -> &[Component] {
        &self.children
    }

    /// Appends one polygon.
    pub fn add_polygon(&mut self, polygon: Polygon) -> &mut Self {
        self.polygons.push(polygon);
        self
    }

    /// Appends polygons.
    pub fn add_polygons(&mut self, polygons: impl IntoIterator<Item = Polygon>) -> &mut Self {
        self.polygons.extend(polygons);
        self
    }

    /// Registers or replaces a port.
    pub fn add_port(&mut self, name: impl Into<String>, port: Port) -> Result<&mut Self> {
        let port = Port::new(port.position, port.direction)?;
        self.ports.insert(name.into(), port);
        Ok(self)
    }

    /// Looks up a port by name.
    pub fn port(&self, name: &str) -> Result<Port> {
        self.ports.get(name).copied().ok_or_else(|| Error::UnknownPort {
            component: self.name.clone(),
            port: name.to_string(),
        })
    }

    /// Embeds a child and returns its index.
    pub fn add_child(&mut self, child: Component) -> usize {
        self.children.push(child);
        self.children.len() - 1
    }

    /// Re-exports port `port` of child `child` under `as_name`.
    pub fn expose_port(&mut self, child: usize, port: &str, as_name: impl Into<String>) -> Result<Port> {
        let found = self
            .children
            .get(child)
            .ok_or_else(|| {
                Error::invalid_parameter(
                    "child",
                    child as f64,
                    format!("component '{}' has {} children", self.name, self.children.len()),
                )
            })?
            .port(port)?;
        self.ports.insert(as_name.into(), found);
        Ok(found)
    }

    /// Own polygons followed by every descendant's polygons.
    pub fn all_polygons(&self) -> Vec<Polygon> {
        let mut out = self.polygons.clone();
        for child in &self.children {
            out.extend(child.all_polygons());
        }
        out
    }

    /// Axis-aligned bounds of all polygons, children included.
    pub fn bounding_box(&self) -> Option<(Point, Point)> {
        self.all_polygons()
            .iter()
            .filter_map(Polygon::bounding_box)
            .reduce(|(lo, hi), (a, b)| (lo.min(a), hi.max(b)))
    }

    /// A copy mapped through `transform`.
    pub fn transformed(&self, transform: &Transform) -> Result<Component> {
        let ports = self
            .ports
            .iter()
            .map(|(name, port)| Ok((name.clone(), port.transformed(transform)?)))
            .collect::<Result<BTreeMap<_, _>>>()?;
        let children = self
            .children
            .iter()
            .map(|child| child.transformed(transform))
            .collect::<Result<Vec<_>>>()?;
        Ok(Component {
            name: self.name.clone(),
            polygons: self.polygons.iter().map(|p| transform.apply_polygon(p)).collect(),
            ports,
            children,
        })
    }

    /// Applies `transform` in place. On error the component is unchanged.
    pub fn transform(&mut self, transform: &Transform) -> Result<&mut Self> {
        *self = self.transformed(transform)?;
        Ok(self)
    }

    /// Moves the component so port `anchor` mates with `target`: the anchor
    /// lands on `target.position` facing away from `target.direction`.
    pub fn place(&mut self, anchor: &str, target: &Port) -> Result<Transform> {
        let span = debug_span!("place", component = %self.name, anchor);
        let _guard = span.enter();

        let transform = placement_transform(&self.port(anchor)?, target)?;
        self.transform(&transform)?;
        debug!(
            x = target.position.x,
            y = target.position.y,
            direction = %target.direction,
            "placed"
        );
        Ok(transform)
    }

    /// [`Component::place`] anchored on the [`INPUT_PORT`].
    pub fn auto_place(&mut self, target: &Port) -> Result<Transform> {
        self.place(INPUT_PORT, target)
    }
}

// =============================================================================
// RECIPES
// =============================================================================

/// A parameter set that builds one component.
///
/// Implementations borrow the shared template and must be `Sync` to be
/// built in parallel by a [`Mask`](crate::mask::Mask).
pub trait ComponentRecipe {
    /// Builds the placed component.
    fn build(&self) -> Result<Component>;
}

impl<F> ComponentRecipe for F
where
    F: Fn() -> Result<Component>,
{
    fn build(&self) -> Result<Component> {
        self()
    }
}

#[cfg(test)]
mod tests;
