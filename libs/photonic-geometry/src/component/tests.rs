use std::f64::consts::FRAC_PI_4;

use approx::assert_relative_eq;

use super::*;
use crate::core::direction::{opposite, Direction};
use crate::core::polygon::LayerSpec;
use crate::port::flip_direction;

const LAYER: LayerSpec = LayerSpec::new(1, 0);

/// 10 × 2 strip from the origin to (10, 0) with both end ports.
fn strip() -> Component {
    let mut c = Component::new("strip");
    c.add_polygon(Polygon::new(
        vec![
            Point::new(0.0, -1.0),
            Point::new(10.0, -1.0),
            Point::new(10.0, 1.0),
            Point::new(0.0, 1.0),
        ],
        LAYER,
    ));
    c.add_port(INPUT_PORT, Port::new(Point::ZERO, Direction::West).unwrap())
        .unwrap();
    c.add_port(
        OUTPUT_PORT,
        Port::new(Point::new(10.0, 0.0), Direction::East).unwrap(),
    )
    .unwrap();
    c
}

#[test]
fn test_auto_place_east_to_north_is_exact() {
    let mut c = strip();
    c.auto_place(&Port::new(Point::new(3.0, 4.0), Direction::North).unwrap())
        .unwrap();

    let output = c.port(OUTPUT_PORT).unwrap();
    assert_eq!(output.direction, Direction::North);
    assert_eq!(output.position, Point::new(3.0, 14.0));

    let input = c.port(INPUT_PORT).unwrap();
    assert_eq!(input.position, Point::new(3.0, 4.0));
    assert_eq!(input.direction, Direction::South);

    let (lo, hi) = c.bounding_box().unwrap();
    assert_eq!(lo, Point::new(2.0, 4.0));
    assert_eq!(hi, Point::new(4.0, 14.0));
    assert!(c.polygons()[0].is_counter_clockwise());
}

#[test]
fn test_input_port_is_opposite_of_extension() {
    for target_dir in [
        Direction::East,
        Direction::North,
        Direction::West,
        Direction::South,
        Direction::Angle(0.7),
    ] {
        let mut c = strip();
        let target = Port::new(Point::new(-2.0, 9.0), target_dir).unwrap();
        c.auto_place(&target).unwrap();
        let input = c.port(INPUT_PORT).unwrap();
        assert_ne!(flip_direction(input.direction).unwrap(), input.direction);
        assert!(flip_direction(input.direction)
            .unwrap()
            .same_heading(target_dir));
        assert!(input.position.distance(target.position) < 1e-12);
    }
}

#[test]
fn test_placement_at_canonical_mate_is_identity() {
    let mut c = strip();
    let canonical = c.clone();
    let t = c
        .auto_place(&Port::new(Point::ZERO, Direction::East).unwrap())
        .unwrap();
    assert!(t.is_identity());
    assert_eq!(c, canonical);
}

#[test]
fn test_arbitrary_angle_placement() {
    let mut c = strip();
    c.auto_place(&Port::new(Point::ZERO, Direction::Angle(FRAC_PI_4)).unwrap())
        .unwrap();
    let out = c.port(OUTPUT_PORT).unwrap();
    assert_relative_eq!(out.position.x, 10.0 * FRAC_PI_4.cos(), epsilon = 1e-12);
    assert_relative_eq!(out.position.y, 10.0 * FRAC_PI_4.sin(), epsilon = 1e-12);
    assert!(matches!(out.direction, Direction::Angle(_)));
    assert_relative_eq!(c.polygons()[0].area(), 20.0, epsilon = 1e-9);
}

#[test]
fn test_auto_place_rejects_invalid_direction() {
    let mut c = strip();
    let before = c.clone();
    let target = Port {
        position: Point::ZERO,
        direction: Direction::Angle(f64::NAN),
    };
    assert!(matches!(
        c.auto_place(&target),
        Err(Error::InvalidDirection { .. })
    ));
    assert_eq!(c, before);
}

#[test]
fn test_unknown_port() {
    let c = Component::new("empty");
    assert!(matches!(
        c.port("input"),
        Err(Error::UnknownPort { .. })
    ));
    let mut c = Component::new("empty");
    assert!(c.place("missing", &Port::new(Point::ZERO, Direction::East).unwrap()).is_err());
}

#[test]
fn test_children_follow_parent_transform() {
    let mut parent = Component::new("pair");
    let idx = parent.add_child(strip());
    let mut second = strip();
    second
        .auto_place(&Port::new(Point::new(10.0, 0.0), Direction::East).unwrap())
        .unwrap();
    parent.add_child(second);
    parent.expose_port(idx, INPUT_PORT, INPUT_PORT).unwrap();
    parent.expose_port(1, OUTPUT_PORT, OUTPUT_PORT).unwrap();

    assert_eq!(parent.all_polygons().len(), 2);
    assert_eq!(parent.port(OUTPUT_PORT).unwrap().position, Point::new(20.0, 0.0));

    parent
        .auto_place(&Port::new(Point::new(0.0, 0.0), Direction::South).unwrap())
        .unwrap();
    let out = parent.port(OUTPUT_PORT).unwrap();
    assert_eq!(out.position, Point::new(0.0, -20.0));
    assert_eq!(out.direction, Direction::South);
    assert_eq!(
        parent.children()[1].port(OUTPUT_PORT).unwrap(),
        out,
        "exposed port and child port stay in sync"
    );
}

#[test]
fn test_expose_port_bad_child() {
    let mut parent = Component::new("p");
    assert!(matches!(
        parent.expose_port(3, INPUT_PORT, "x"),
        Err(Error::InvalidParameter { .. })
    ));
}

#[test]
fn test_mirror_transform_keeps_ccw() {
    let mut c = strip();
    c.transform(&Transform::reflect_vert()).unwrap();
    assert!(c.polygons()[0].is_counter_clockwise());
    assert_eq!(
        c.port(INPUT_PORT).unwrap().direction,
        opposite(Direction::East).unwrap()
    );
}

#[test]
fn test_closure_recipe() {
    let recipe = || -> Result<Component> { Ok(strip()) };
    assert_eq!(recipe.build().unwrap().name(), "strip");
}
