//! # Mask Arena
//!
//! A [`Mask`] owns every placed component of a layout behind an opaque
//! [`ComponentId`] and hands out collision-free cell names scoped to the
//! mask (`name_1`, `name_2`, …). No registry outlives the mask.
//!
//! Component builds are independent, so [`Mask::build_parallel`] maps them
//! over a rayon pool and inserts the results only if every build succeeded.

use std::collections::{BTreeMap, HashMap};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span, warn};

use crate::component::{Component, ComponentRecipe};
use crate::core::polygon::{LayerSpec, Polygon};
use crate::error::{Error, Result};
use crate::port::Port;
use crate::template::{MaskOperation, WaveguideTemplate};

/// Handle of a component stored in a [`Mask`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ComponentId(usize);

impl ComponentId {
    /// Position of the component in insertion order.
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
struct Cell {
    name: String,
    component: Component,
}

/// Description of the final boolean layer a mask writer produces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaskLayer {
    /// Boolean operation between the operands.
    pub operation: MaskOperation,
    /// Core layer operand.
    pub core: LayerSpec,
    /// Cladding layer operand.
    pub cladding: LayerSpec,
    /// Layer the result is written to.
    pub output: LayerSpec,
}

/// Arena of placed components.
#[derive(Debug, Clone, Default)]
pub struct Mask {
    name: String,
    cells: Vec<Cell>,
    name_counts: HashMap<String, usize>,
}

impl Mask {
    /// Empty mask.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Mask name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of stored components.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the mask holds no components.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Stores a component and assigns it a unique cell name.
    pub fn insert(&mut self, component: Component) -> ComponentId {
        let count = self
            .name_counts
            .entry(component.name().to_string())
            .or_insert(0);
        *count += 1;
        let name = format!("{}_{}", component.name(), count);
        let id = ComponentId(self.cells.len());
        debug!(mask = %self.name, cell = %name, "inserted component");
        self.cells.push(Cell { name, component });
        id
    }

    /// Builds a recipe and stores the result. Nothing is stored on error.
    pub fn add<R: ComponentRecipe + ?Sized>(&mut self, recipe: &R) -> Result<ComponentId> {
        let span = debug_span!("mask_add", mask = %self.name);
        let _guard = span.enter();
        Ok(self.insert(recipe.build()?))
    }

    /// Builds every recipe in parallel. Either all components are stored,
    /// in input order, or none are and the first error in input order is
    /// returned.
    pub fn build_parallel<R: ComponentRecipe + Sync>(
        &mut self,
        recipes: &[R],
    ) -> Result<Vec<ComponentId>> {
        let span = debug_span!("build_parallel", mask = %self.name, count = recipes.len());
        let _guard = span.enter();

        let built = recipes
            .par_iter()
            .map(ComponentRecipe::build)
            .collect::<Vec<Result<Component>>>()
            .into_iter()
            .collect::<Result<Vec<_>>>()?;
        Ok(built.into_iter().map(|c| self.insert(c)).collect())
    }

    /// Component behind `id`.
    pub fn get(&self, id: ComponentId) -> Option<&Component> {
        self.cells.get(id.0).map(|cell| &cell.component)
    }

    /// Unique cell name of `id`.
    pub fn cell_name(&self, id: ComponentId) -> Option<&str> {
        self.cells.get(id.0).map(|cell| cell.name.as_str())
    }

    /// Port `port` of component `id`.
    pub fn port(&self, id: ComponentId, port: &str) -> Result<Port> {
        self.get(id)
            .ok_or_else(|| {
                Error::invalid_parameter(
                    "component",
                    id.0 as f64,
                    format!("mask '{}' holds {} components", self.name, self.cells.len()),
                )
            })?
            .port(port)
    }

    /// Handles and components in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ComponentId, &Component)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, cell)| (ComponentId(i), &cell.component))
    }

    /// Every polygon in the mask, grouped by layer.
    pub fn polygons_by_layer(&self) -> BTreeMap<LayerSpec, Vec<Polygon>> {
        let mut layers: BTreeMap<LayerSpec, Vec<Polygon>> = BTreeMap::new();
        for cell in &self.cells {
            for polygon in cell.component.all_polygons() {
                layers.entry(polygon.layer).or_default().push(polygon);
            }
        }
        layers
    }

    /// The boolean layer the template's resist polarity calls for.
    ///
    /// Returns `None` when the template has no cladding layer. Warns when
    /// either operand layer is empty in this mask.
    pub fn mask_layer(&self, template: &WaveguideTemplate) -> Option<MaskLayer> {
        let core = template.core_layer();
        let cladding = template.clad_layer()?;
        let layers = self.polygons_by_layer();
        if !layers.contains_key(&core) || !layers.contains_key(&cladding) {
            warn!(
                mask = %self.name,
                core = ?core,
                cladding = ?cladding,
                "no polygons on a layer named by the waveguide template"
            );
        }
        Some(MaskLayer {
            operation: template.mask_operation(),
            core,
            cladding,
            output: template.output_layer(),
        })
    }
}

#[cfg(test)]
mod tests;
