use super::*;
use approx::assert_relative_eq;
use proptest::prelude::*;
use std::f64::consts::FRAC_PI_4;

#[test]
fn test_cardinal_angles() {
    assert_eq!(Direction::East.to_angle().unwrap(), 0.0);
    assert_eq!(Direction::North.to_angle().unwrap(), FRAC_PI_2);
    assert_eq!(Direction::West.to_angle().unwrap(), PI);
    assert_eq!(Direction::South.to_angle().unwrap(), -FRAC_PI_2);
}

#[test]
fn test_non_finite_angle_is_invalid() {
    let err = Direction::Angle(f64::NAN).to_angle().unwrap_err();
    assert!(matches!(err, Error::InvalidDirection { .. }));
    assert!(Direction::from_angle(f64::INFINITY).is_err());
}

#[test]
fn test_opposite() {
    assert_eq!(Direction::North.opposite().unwrap(), Direction::South);
    assert_eq!(Direction::East.opposite().unwrap(), Direction::West);
    match Direction::Angle(FRAC_PI_4).opposite().unwrap() {
        Direction::Angle(a) => assert_relative_eq!(a, FRAC_PI_4 - PI),
        other => panic!("expected an angle, got {other:?}"),
    }
}

#[test]
fn test_turn_angle_cardinal() {
    assert_eq!(turn_angle(Direction::East, Direction::North).unwrap(), FRAC_PI_2);
    assert_eq!(turn_angle(Direction::West, Direction::North).unwrap(), -FRAC_PI_2);
    assert_eq!(turn_angle(Direction::South, Direction::East).unwrap(), FRAC_PI_2);
    assert_eq!(turn_angle(Direction::East, Direction::West).unwrap(), PI);
    assert_eq!(turn_angle(Direction::South, Direction::South).unwrap(), 0.0);
}

#[test]
fn test_cardinal_direction_snaps_within_tolerance() {
    let o = Point::new(0.0, 0.0);
    assert_eq!(
        cardinal_direction(o, Point::new(100.0, 5.0e-7)).unwrap(),
        Direction::East
    );
    assert_eq!(
        cardinal_direction(o, Point::new(-4.0e-7, -20.0)).unwrap(),
        Direction::South
    );
}

#[test]
fn test_cardinal_direction_rejects_off_axis_and_zero() {
    let o = Point::new(0.0, 0.0);
    assert!(matches!(
        cardinal_direction(o, Point::new(100.0, 1.0e-3)),
        Err(Error::Geometry { .. })
    ));
    let zero = cardinal_direction(o, Point::new(1.0e-8, 0.0)).unwrap_err();
    assert!(zero.to_string().contains("zero-length"));
    assert!(cardinal_direction(o, Point::new(f64::NAN, 0.0)).is_err());
}

#[test]
fn test_translate_cardinal_is_exact() {
    let p = Point::new(0.1, 0.2);
    assert_eq!(
        translate(p, 3.0, Direction::North).unwrap(),
        Point::new(0.1, 3.2)
    );
    assert_eq!(
        translate(p, 3.0, Direction::West).unwrap(),
        Point::new(0.1 - 3.0, 0.2)
    );
    let q = translate(Point::ZERO, 2.0, Direction::Angle(FRAC_PI_4)).unwrap();
    assert_relative_eq!(q.x, 2.0_f64.sqrt());
    assert_relative_eq!(q.y, 2.0_f64.sqrt());
}

#[test]
fn test_rotate_by_quarter_keeps_cardinal() {
    assert_eq!(Direction::East.rotate_by(FRAC_PI_2).unwrap(), Direction::North);
    assert_eq!(Direction::North.rotate_by(-PI).unwrap(), Direction::South);
    assert!(matches!(
        Direction::East.rotate_by(0.1).unwrap(),
        Direction::Angle(_)
    ));
}

#[test]
fn test_mirrored() {
    assert_eq!(Direction::North.mirrored(), Direction::South);
    assert_eq!(Direction::West.mirrored(), Direction::West);
    assert_eq!(Direction::Angle(0.5).mirrored(), Direction::Angle(-0.5));
}

#[test]
fn test_exact_sin_cos() {
    assert_eq!(exact_sin_cos(FRAC_PI_2), (1.0, 0.0));
    assert_eq!(exact_sin_cos(-FRAC_PI_2), (-1.0, 0.0));
    assert_eq!(exact_sin_cos(3.0 * FRAC_PI_2), (-1.0, 0.0));
    assert_eq!(exact_sin_cos(PI), (0.0, -1.0));
}

#[test]
fn test_serde_round_names() {
    let json = serde_json::to_string(&Direction::North).unwrap();
    assert_eq!(json, "\"NORTH\"");
}

proptest! {
    #[test]
    fn normalize_angle_range(a in -100.0f64..100.0) {
        let n = normalize_angle(a);
        prop_assert!(n > -PI && n <= PI);
        prop_assert!((n.sin() - a.sin()).abs() < 1e-9);
        prop_assert!((n.cos() - a.cos()).abs() < 1e-9);
    }

    #[test]
    fn opposite_never_equals_itself(a in -PI..PI) {
        let d = Direction::Angle(a);
        prop_assert_ne!(d.opposite().unwrap(), d);
        let back = d.opposite().unwrap().opposite().unwrap();
        prop_assert!(back.same_heading(d));
    }

    #[test]
    fn turn_angle_in_range(a in -PI..PI, b in -PI..PI) {
        let t = turn_angle(Direction::Angle(a), Direction::Angle(b)).unwrap();
        prop_assert!(t > -PI && t <= PI);
    }

    #[test]
    fn cardinal_rotations_are_exact(q in 0i64..4, k in -8i64..8) {
        let d = Direction::from_quarter_turns(q);
        let rotated = d.rotate_by(k as f64 * FRAC_PI_2).unwrap();
        prop_assert_eq!(rotated, Direction::from_quarter_turns(q + k));
    }
}
