use super::*;
use crate::component::{INPUT_PORT, OUTPUT_PORT};
use crate::core::direction::Direction;
use crate::core::vec2::Point;
use crate::path::WaveguidePath;
use crate::template::Resist;

fn straight(template: &WaveguideTemplate, x: f64, length: f64) -> Result<Component> {
    let mut path = WaveguidePath::new(template, Point::ZERO, Direction::East)?;
    path.straight(length)?;
    let end = path.position();
    let mut c = Component::new("waveguide");
    c.add_polygons(path.extract_polygons());
    c.add_port(INPUT_PORT, Port::new(Point::ZERO, Direction::West)?)?;
    c.add_port(OUTPUT_PORT, Port::new(end, Direction::East)?)?;
    c.auto_place(&Port::new(Point::new(x, 0.0), Direction::East)?)?;
    Ok(c)
}

struct StraightRecipe<'a> {
    template: &'a WaveguideTemplate,
    x: f64,
    length: f64,
}

impl ComponentRecipe for StraightRecipe<'_> {
    fn build(&self) -> Result<Component> {
        straight(self.template, self.x, self.length)
    }
}

fn template() -> WaveguideTemplate {
    WaveguideTemplate::builder()
        .wg_width(0.5)
        .clad_width(2.0)
        .build()
        .unwrap()
}

#[test]
fn test_unique_names_are_scoped_to_mask() {
    let wgt = template();
    let mut a = Mask::new("a");
    let first = a.insert(straight(&wgt, 0.0, 10.0).unwrap());
    let second = a.insert(straight(&wgt, 20.0, 10.0).unwrap());
    assert_eq!(a.cell_name(first), Some("waveguide_1"));
    assert_eq!(a.cell_name(second), Some("waveguide_2"));

    let mut b = Mask::new("b");
    let other = b.insert(straight(&wgt, 0.0, 10.0).unwrap());
    assert_eq!(b.cell_name(other), Some("waveguide_1"));
}

#[test]
fn test_port_lookup_through_handle() {
    let wgt = template();
    let mut mask = Mask::new("m");
    let id = mask.add(&StraightRecipe { template: &wgt, x: 5.0, length: 10.0 }).unwrap();
    let out = mask.port(id, OUTPUT_PORT).unwrap();
    assert_eq!(out.position, Point::new(15.0, 0.0));
    assert!(matches!(mask.port(id, "nope"), Err(Error::UnknownPort { .. })));
}

#[test]
fn test_failed_add_stores_nothing() {
    let wgt = template();
    let mut mask = Mask::new("m");
    let bad = StraightRecipe { template: &wgt, x: 0.0, length: -1.0 };
    assert!(mask.add(&bad).is_err());
    assert!(mask.is_empty());
}

#[test]
fn test_build_parallel_keeps_input_order() {
    let wgt = template();
    let recipes: Vec<_> = (0..32)
        .map(|i| StraightRecipe { template: &wgt, x: 100.0 * f64::from(i), length: 10.0 })
        .collect();
    let mut mask = Mask::new("parallel");
    let ids = mask.build_parallel(&recipes).unwrap();
    assert_eq!(ids.len(), 32);
    for (i, id) in ids.iter().enumerate() {
        let input = mask.port(*id, INPUT_PORT).unwrap();
        assert_eq!(input.position, Point::new(100.0 * i as f64, 0.0));
        assert_eq!(mask.cell_name(*id), Some(format!("waveguide_{}", i + 1).as_str()));
    }
}

#[test]
fn test_build_parallel_is_all_or_nothing() {
    let wgt = template();
    let mut recipes: Vec<_> = (0..8)
        .map(|i| StraightRecipe { template: &wgt, x: f64::from(i), length: 10.0 })
        .collect();
    recipes[5].length = 0.0;
    let mut mask = Mask::new("m");
    assert!(mask.build_parallel(&recipes).is_err());
    assert!(mask.is_empty());
}

#[test]
fn test_polygons_by_layer() {
    let wgt = template();
    let mut mask = Mask::new("m");
    mask.insert(straight(&wgt, 0.0, 10.0).unwrap());
    mask.insert(straight(&wgt, 50.0, 10.0).unwrap());
    let layers = mask.polygons_by_layer();
    assert_eq!(layers.len(), 2);
    assert_eq!(layers[&wgt.core_layer()].len(), 2);
    assert_eq!(layers[&LayerSpec::new(2, 0)].len(), 2);
}

#[test]
fn test_mask_layer_follows_resist() {
    let positive = template();
    let negative = WaveguideTemplate::builder()
        .resist(Resist::Negative)
        .build()
        .unwrap();
    let mut mask = Mask::new("m");
    mask.insert(straight(&positive, 0.0, 10.0).unwrap());

    let layer = mask.mask_layer(&positive).unwrap();
    assert_eq!(layer.operation, MaskOperation::Xor);
    assert_eq!(layer.output, LayerSpec::new(3, 0));
    assert_eq!(mask.mask_layer(&negative).unwrap().operation, MaskOperation::And);
}

#[test]
fn test_mask_layer_without_cladding() {
    let bare = WaveguideTemplate::builder().clad_width(0.0).build().unwrap();
    assert!(Mask::new("m").mask_layer(&bare).is_none());
}
