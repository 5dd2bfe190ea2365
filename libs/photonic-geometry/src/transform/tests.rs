use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use approx::assert_relative_eq;
use proptest::prelude::*;

use super::*;
use crate::core::polygon::LayerSpec;

#[test]
fn test_quarter_rotation_is_exact() {
    let t = Transform::rotate(FRAC_PI_2).unwrap();
    assert_eq!(t.rotation, Rotation::Quarter(1));
    assert_eq!(t.apply_point(Point::new(3.0, 0.0)), Point::new(0.0, 3.0));
    assert_eq!(t.apply_direction(Direction::East).unwrap(), Direction::North);
    assert_eq!(t.apply_direction(Direction::South).unwrap(), Direction::East);
}

#[test]
fn test_negative_quarter_snaps() {
    let t = Transform::rotate(-FRAC_PI_2).unwrap();
    assert_eq!(t.rotation, Rotation::Quarter(3));
    assert_eq!(t.apply_direction(Direction::North).unwrap(), Direction::East);
}

#[test]
fn test_arbitrary_rotation() {
    let t = Transform::rotate(FRAC_PI_4).unwrap();
    let p = t.apply_point(Point::new(1.0, 0.0));
    assert_relative_eq!(p.x, FRAC_PI_4.cos(), epsilon = 1e-12);
    assert_relative_eq!(p.y, FRAC_PI_4.sin(), epsilon = 1e-12);
    match t.apply_direction(Direction::East).unwrap() {
        Direction::Angle(a) => assert_relative_eq!(a, FRAC_PI_4, epsilon = 1e-12),
        other => panic!("expected an angle, got {other}"),
    }
}

#[test]
fn test_non_finite_rotation_rejected() {
    assert!(matches!(
        Transform::rotate(f64::NAN),
        Err(Error::InvalidDirection { .. })
    ));
}

#[test]
fn test_mirror_flips_directions() {
    let t = Transform::reflect_vert();
    assert_eq!(t.apply_point(Point::new(2.0, 3.0)), Point::new(2.0, -3.0));
    assert_eq!(t.apply_direction(Direction::North).unwrap(), Direction::South);
    assert_eq!(t.apply_direction(Direction::East).unwrap(), Direction::East);
}

#[test]
fn test_mirror_keeps_polygons_counter_clockwise() {
    let square = Polygon::new(
        vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ],
        LayerSpec::new(1, 0),
    );
    let mirrored = Transform::reflect_vert().apply_polygon(&square);
    assert!(mirrored.is_counter_clockwise());
    assert_relative_eq!(mirrored.area(), 1.0);
    assert_eq!(mirrored.layer, square.layer);
}

#[test]
fn test_then_applies_in_order() {
    let rotate = Transform::rotate(FRAC_PI_2).unwrap();
    let shift = Transform::translate(Point::new(10.0, 0.0));
    let p = Point::new(1.0, 2.0);

    let a = rotate.then(&shift);
    assert_eq!(a.apply_point(p), shift.apply_point(rotate.apply_point(p)));

    let b = shift.then(&rotate);
    assert_eq!(b.apply_point(p), rotate.apply_point(shift.apply_point(p)));
    assert_eq!(b.apply_point(p), Point::new(-2.0, 11.0));
}

#[test]
fn test_then_with_mirror() {
    let rotate = Transform::rotate(FRAC_PI_2).unwrap();
    let mirror = Transform::reflect_vert();
    let combined = rotate.then(&mirror);
    let p = Point::new(1.0, 2.0);
    assert_eq!(combined.apply_point(p), mirror.apply_point(rotate.apply_point(p)));
    assert_eq!(
        combined.apply_direction(Direction::East).unwrap(),
        Direction::South
    );
}

#[test]
fn test_inverse_round_trips() {
    let t = Transform {
        mirror: true,
        rotation: Rotation::Quarter(1),
        translation: Point::new(4.0, -7.0),
    };
    let p = Point::new(-3.0, 5.0);
    assert_eq!(t.inverse().apply_point(t.apply_point(p)), p);
    assert!(t.then(&t.inverse()).is_identity());
}

#[test]
fn test_half_turn_composition() {
    let t = Transform::rotate(PI).unwrap().then(&Transform::rotate(PI).unwrap());
    assert_eq!(t.rotation, Rotation::IDENTITY);
}

#[test]
fn test_serde_round_trip() {
    let t = Transform {
        mirror: false,
        rotation: Rotation::Angle(0.25),
        translation: Point::new(1.0, 2.0),
    };
    let json = serde_json::to_string(&t).unwrap();
    let back: Transform = serde_json::from_str(&json).unwrap();
    assert_eq!(back, t);
}

proptest! {
    #[test]
    fn prop_cascade_matches_sequential_application(
        a1 in -PI..PI,
        a2 in -PI..PI,
        m1 in any::<bool>(),
        m2 in any::<bool>(),
        tx in -100.0f64..100.0,
        ty in -100.0f64..100.0,
        px in -50.0f64..50.0,
        py in -50.0f64..50.0,
    ) {
        let t1 = Transform { mirror: m1, rotation: Rotation::from_angle(a1).unwrap(), translation: Point::new(tx, ty) };
        let t2 = Transform { mirror: m2, rotation: Rotation::from_angle(a2).unwrap(), translation: Point::new(ty, tx) };
        let p = Point::new(px, py);
        let direct = t2.apply_point(t1.apply_point(p));
        let cascaded = t1.then(&t2).apply_point(p);
        prop_assert!((direct - cascaded).length() < 1e-9);

        let back = t1.inverse().apply_point(t1.apply_point(p));
        prop_assert!((back - p).length() < 1e-9);
    }
}
