//! Property tests for the coordinate geometry.

use proptest::prelude::*;
use survey_calc::domain::angle::{decimal_to_dms, dms_to_decimal, FULL_TURN};
use survey_calc::domain::geometry::{join, offset_to_polar, polar_to_offset};
use survey_calc_sdk::{Direction, Point};

/// Smallest absolute difference between two angles, in `[0, 180]`.
fn angle_gap(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(FULL_TURN);
    d.min(FULL_TURN - d)
}

fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol * expected.abs().max(1.0),
        "expected {expected}, got {actual}"
    );
}

proptest! {
    #[test]
    fn polar_then_inverse_recovers_distance_and_bearing(
        distance in 1e-3..1e5_f64,
        angle in -720.0..720.0_f64,
    ) {
        let offset = polar_to_offset(distance, Direction::FromEast(angle));
        let back = offset_to_polar(offset.delta_e, offset.delta_n);
        assert_close(back.distance, distance, 1e-9);
        prop_assert!(angle_gap(back.bearing_from_east, angle) < 1e-6);
        prop_assert!(angle_gap(back.azimuth, offset.azimuth) < 1e-6);
    }

    #[test]
    fn dms_polar_matches_from_east_polar(
        distance in 0.0..1e4_f64,
        degrees in 0.0..360.0_f64,
        minutes in 0.0..60.0_f64,
        seconds in 0.0..60.0_f64,
    ) {
        let azimuth = dms_to_decimal(degrees, minutes, seconds);
        let dms = polar_to_offset(
            distance,
            Direction::Azimuth { degrees, minutes, seconds },
        );
        let east = polar_to_offset(distance, Direction::FromEast(90.0 - azimuth));
        assert_close(dms.delta_e, east.delta_e, 1e-9);
        assert_close(dms.delta_n, east.delta_n, 1e-9);
    }

    #[test]
    fn join_is_antisymmetric(
        ea in -1e6..1e6_f64, na in -1e6..1e6_f64,
        eb in -1e6..1e6_f64, nb in -1e6..1e6_f64,
    ) {
        prop_assume!((ea - eb).abs() > 1e-3 || (na - nb).abs() > 1e-3);
        let a = Point::new(ea, na);
        let b = Point::new(eb, nb);
        let forward = join(a, b);
        let back = join(b, a);
        prop_assert_eq!(forward.distance.to_bits(), back.distance.to_bits());
        prop_assert!(angle_gap(forward.azimuth, back.azimuth + 180.0) < 1e-9);
    }

    #[test]
    fn join_azimuth_and_bearing_sum_to_ninety(
        ea in -1e6..1e6_f64, na in -1e6..1e6_f64,
        eb in -1e6..1e6_f64, nb in -1e6..1e6_f64,
    ) {
        let j = join(Point::new(ea, na), Point::new(eb, nb));
        prop_assert!((0.0..FULL_TURN).contains(&j.azimuth));
        prop_assert!(j.bearing_from_east > -180.0 && j.bearing_from_east <= 180.0);
        prop_assert!(angle_gap(j.azimuth + j.bearing_from_east, 90.0) < 1e-9);
        prop_assert!(j.distance >= 0.0);
    }

    #[test]
    fn join_of_a_point_with_itself_is_zero(e in -1e6..1e6_f64, n in -1e6..1e6_f64) {
        let p = Point::new(e, n);
        let j = join(p, p);
        prop_assert!(j.distance.abs() < f64::EPSILON);
        prop_assert!((j.azimuth - 90.0).abs() < f64::EPSILON);
    }

    #[test]
    fn dms_breakdown_reconstructs_angle(angle in -720.0..720.0_f64) {
        let dms = decimal_to_dms(angle, 2);
        prop_assert!(dms.minutes < 60);
        prop_assert!(dms.seconds >= 0.0 && dms.seconds < 60.0);
        let magnitude = f64::from(dms.degrees)
            + f64::from(dms.minutes) / 60.0
            + dms.seconds / 3600.0;
        let rebuilt = if dms.negative { -magnitude } else { magnitude };
        // half a hundredth of a second
        prop_assert!((rebuilt - angle).abs() <= 0.005 / 3600.0 + 1e-9);
    }
}
