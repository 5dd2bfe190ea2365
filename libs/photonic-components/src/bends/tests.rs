use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use approx::assert_relative_eq;

use super::*;

fn template() -> WaveguideTemplate {
    WaveguideTemplate::builder()
        .wg_width(0.5)
        .clad_width(3.0)
        .bend_radius(25.0)
        .build()
        .unwrap()
}

#[test]
fn test_ebend_quarter_turn() {
    let wgt = template();
    let bend = EBend::new(&wgt, FRAC_PI_2);
    let dl = bend.dist_to_vertex().unwrap().unwrap();
    let c = bend.build().unwrap();

    let out = c.port(OUTPUT_PORT).unwrap();
    assert_eq!(out.direction, Direction::North);
    assert_relative_eq!(out.position.x, dl, epsilon = 1e-9);
    assert_relative_eq!(out.position.y, dl, epsilon = 1e-9);
    assert!(c.polygons().len() >= 2);
    for polygon in c.polygons() {
        assert!(!polygon.has_self_intersection());
    }
}

#[test]
fn test_ebend_right_turn_placed_north() {
    let wgt = template();
    let target = Port::new(Point::new(5.0, 5.0), Direction::North).unwrap();
    let c = EBend::new(&wgt, -FRAC_PI_2).at(target).build().unwrap();
    assert_eq!(c.port(OUTPUT_PORT).unwrap().direction, Direction::East);
    assert_eq!(c.port(INPUT_PORT).unwrap().direction, Direction::South);
    assert_eq!(c.port(INPUT_PORT).unwrap().position, Point::new(5.0, 5.0));
}

#[test]
fn test_ebend_by_vertex() {
    let wgt = template();
    let vertex = Point::new(100.0, 100.0);
    let bend = EBend::new(&wgt, FRAC_PI_2).at_vertex(vertex, Direction::East);
    let dl = bend.dist_to_vertex().unwrap().unwrap();
    let c = bend.build().unwrap();

    assert_eq!(
        c.port(INPUT_PORT).unwrap().position,
        Point::new(100.0 - dl, 100.0)
    );
    let out = c.port(OUTPUT_PORT).unwrap().position;
    assert_relative_eq!(out.x, 100.0, epsilon = 1e-9);
    assert_relative_eq!(out.y, 100.0 + dl, epsilon = 1e-9);
}

#[test]
fn test_ebend_obtuse_and_u_turn() {
    let wgt = template();
    let c = EBend::new(&wgt, 3.0 * FRAC_PI_4).build().unwrap();
    match c.port(OUTPUT_PORT).unwrap().direction {
        Direction::Angle(a) => assert_relative_eq!(a, 3.0 * FRAC_PI_4),
        other => panic!("expected an angle, got {other}"),
    }

    let u = EBend::new(&wgt, PI);
    assert_eq!(u.dist_to_vertex().unwrap(), None);
    assert_eq!(
        u.build().unwrap().port(OUTPUT_PORT).unwrap().direction,
        Direction::West
    );
    assert!(matches!(
        u.at_vertex(Point::ZERO, Direction::East).build(),
        Err(Error::InvalidParameter { .. })
    ));
}

#[test]
fn test_ebend_width_taper() {
    let wgt = template();
    let c = EBend::new(&wgt, FRAC_PI_4)
        .start_width(0.5)
        .end_width(1.0)
        .build()
        .unwrap();
    for polygon in c.polygons() {
        assert!(polygon.is_counter_clockwise());
        assert!(!polygon.has_self_intersection());
    }
}

#[test]
fn test_ebend_start_width_keeps_template_cladding() {
    let wgt = WaveguideTemplate::builder().build().unwrap();
    let bend = EBend::new(&wgt, FRAC_PI_2).start_width(0.3);
    let length = bend.curve().unwrap().total_length();
    let c = bend.build().unwrap();
    let clad_layer = wgt.clad_layer().unwrap();
    let clad_area: f64 = c
        .polygons()
        .iter()
        .filter(|p| p.layer == clad_layer)
        .map(|p| p.area())
        .sum();
    // 2 µm core plus 10 µm on each side, unchanged by the core override.
    assert_relative_eq!(clad_area, 22.0 * length, max_relative = 1e-3);
}

#[test]
fn test_ebend_tighter_than_cladding() {
    let wgt = WaveguideTemplate::builder().bend_radius(10.0).build().unwrap();
    let c = EBend::new(&wgt, FRAC_PI_2).build().unwrap();
    assert!(!c.polygons().is_empty());
    for polygon in c.polygons() {
        assert!(polygon.points.iter().all(|p| p.is_finite()));
        assert!(polygon.area() > 0.0);
    }
}

#[test]
fn test_width_override_needs_strip() {
    let slot = WaveguideTemplate::builder()
        .wg_width(1.0)
        .slot()
        .bend_radius(25.0)
        .build()
        .unwrap();
    assert!(matches!(
        EBend::new(&slot, FRAC_PI_2).end_width(0.8).build(),
        Err(Error::InvalidParameter { .. })
    ));
    assert!(EBend::new(&slot, FRAC_PI_2).build().is_ok());

    let swg = WaveguideTemplate::builder().swg().bend_radius(25.0).build().unwrap();
    assert!(matches!(
        EBend::new(&swg, FRAC_PI_2).start_width(0.8).build(),
        Err(Error::InvalidParameter { .. })
    ));
}

#[test]
fn test_euler_sbend_ports() {
    let wgt = template();
    let c = EulerSBend::new(&wgt, 200.0, 50.0).build().unwrap();
    let out = c.port(OUTPUT_PORT).unwrap();
    assert_eq!(out.position, Point::new(200.0, 50.0));
    assert_eq!(out.direction, Direction::East);

    let placed = EulerSBend::new(&wgt, 200.0, -50.0)
        .at(Port::new(Point::new(0.0, 0.0), Direction::North).unwrap())
        .build()
        .unwrap();
    let out = placed.port(OUTPUT_PORT).unwrap();
    assert_eq!(out.position, Point::new(50.0, 200.0));
    assert_eq!(out.direction, Direction::North);
}

#[test]
fn test_sbends_reject_steep_shapes() {
    let wgt = template();
    assert!(EulerSBend::new(&wgt, 10.0, 20.0).build().is_err());
    assert!(SBend::new(&wgt, 10.0, 20.0).build().is_err());
    assert!(SBend::new(&wgt, 10.0, 0.0).build().is_err());
}

#[test]
fn test_sbend_ports() {
    let wgt = template();
    let c = SBend::new(&wgt, 100.0, 20.0).build().unwrap();
    assert_eq!(c.port(OUTPUT_PORT).unwrap().position, Point::new(100.0, 20.0));
    assert_eq!(c.port(OUTPUT_PORT).unwrap().direction, Direction::East);
    assert!(c.polygons().iter().all(|p| !p.has_self_intersection()));
}

#[test]
fn test_bbend_ports_follow_poles() {
    let wgt = template();
    let poles = vec![
        Point::new(10.0, 10.0),
        Point::new(60.0, 10.0),
        Point::new(60.0, 60.0),
        Point::new(110.0, 60.0),
    ];
    let c = BBend::new(&wgt, poles).build().unwrap();
    let input = c.port(INPUT_PORT).unwrap();
    let output = c.port(OUTPUT_PORT).unwrap();
    assert_eq!(input.position, Point::new(10.0, 10.0));
    assert_eq!(input.direction, Direction::West);
    assert_eq!(output.position, Point::new(110.0, 60.0));
    assert_eq!(output.direction, Direction::East);

    // Cladding is 6.5 wide and the end tangents are horizontal.
    let (lo, hi) = c.bounding_box().unwrap();
    assert_relative_eq!(lo.x, 10.0, epsilon = 1e-9);
    assert_relative_eq!(hi.x, 110.0, epsilon = 1e-9);
    assert_relative_eq!(lo.y, 10.0 - 3.25, epsilon = 1e-9);
    assert_relative_eq!(hi.y, 60.0 + 3.25, epsilon = 1e-9);
}

#[test]
fn test_bbend_arbitrary_angle() {
    let wgt = template();
    let poles = vec![Point::new(0.0, 0.0), Point::new(50.0, 50.0), Point::new(100.0, 50.0)];
    let c = BBend::new(&wgt, poles).build().unwrap();
    match c.port(INPUT_PORT).unwrap().direction {
        Direction::Angle(a) => assert_relative_eq!(a, -3.0 * FRAC_PI_4, epsilon = 1e-12),
        other => panic!("expected an angle, got {other}"),
    }
    assert_eq!(c.port(OUTPUT_PORT).unwrap().direction, Direction::East);
}

#[test]
fn test_bbend_rejects_degenerate_poles() {
    let wgt = template();
    assert!(BBend::new(&wgt, vec![Point::ZERO]).build().is_err());
    assert!(BBend::new(&wgt, vec![Point::ZERO, Point::ZERO, Point::new(1.0, 1.0)])
        .build()
        .is_err());
}
