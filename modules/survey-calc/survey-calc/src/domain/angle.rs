//! Angle conventions.
//!
//! Azimuth is measured clockwise from North, bearing-from-East
//! counterclockwise from the positive East axis. The two are related by
//! `azimuth = 90 - bearing_from_east` up to whole turns.

use survey_calc_sdk::Dms;

use crate::config::round_to;

pub const FULL_TURN: f64 = 360.0;
const FULL_TURN_DEGREES: u32 = 360;

const MINUTES_PER_DEGREE: f64 = 60.0;
const SECONDS_PER_DEGREE: f64 = 3600.0;
const SECONDS_PER_MINUTE: f64 = 60.0;

/// Combine a degrees/minutes/seconds triple into decimal degrees.
///
/// Components are not range-checked: 90° 75' is 91.25°.
#[must_use]
pub fn dms_to_decimal(degrees: f64, minutes: f64, seconds: f64) -> f64 {
    degrees + minutes / MINUTES_PER_DEGREE + seconds / SECONDS_PER_DEGREE
}

/// Floored modulo into `[0, 360)`.
#[must_use]
pub fn normalize_azimuth(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(FULL_TURN);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if wrapped < FULL_TURN { wrapped } else { 0.0 }
}

/// Azimuth in `[0, 360)` for a bearing measured from East.
#[must_use]
pub fn azimuth_from_east(bearing_from_east: f64) -> f64 {
    normalize_azimuth(90.0 - bearing_from_east)
}

/// Bearing from East for an azimuth, without normalization.
#[must_use]
pub fn east_from_azimuth(azimuth: f64) -> f64 {
    90.0 - azimuth
}

/// Split decimal degrees into whole degrees, whole minutes and seconds
/// rounded to `seconds_precision` places.
///
/// Rounding happens on the total number of seconds, so 359.999999° with two
/// places carries into `360° 00' 00.00"` instead of producing `60.00"`.
#[must_use]
pub fn decimal_to_dms(angle: f64, seconds_precision: u32) -> Dms {
    let negative = angle < 0.0;
    let total_seconds = round_to(angle.abs() * SECONDS_PER_DEGREE, seconds_precision);

    let degrees = (total_seconds / SECONDS_PER_DEGREE).floor();
    let remainder = total_seconds - degrees * SECONDS_PER_DEGREE;
    let minutes = (remainder / SECONDS_PER_MINUTE).floor();
    let seconds = round_to(remainder - minutes * SECONDS_PER_MINUTE, seconds_precision);

    // Both are floored and non-negative; absurd degree counts saturate.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let (degrees, minutes) = (degrees as u32, minutes as u32);

    Dms {
        negative: negative && total_seconds > 0.0,
        degrees,
        minutes,
        seconds,
    }
}

/// DMS breakdown of an azimuth in `[0, 360)`.
///
/// Unlike [`decimal_to_dms`], a seconds carry that reaches 360° wraps to 0°
/// so the breakdown stays in the same range as the azimuth.
#[must_use]
pub fn azimuth_to_dms(azimuth: f64, seconds_precision: u32) -> Dms {
    let mut dms = decimal_to_dms(azimuth, seconds_precision);
    dms.degrees %= FULL_TURN_DEGREES;
    dms
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn dms_combines_into_decimal_degrees() {
        assert_abs_diff_eq!(dms_to_decimal(45.0, 30.0, 15.0), 45.504_166_666, epsilon = 1e-8);
        assert_abs_diff_eq!(dms_to_decimal(90.0, 75.0, 0.0), 91.25, epsilon = 1e-12);
    }

    #[test]
    fn normalize_wraps_into_full_turn() {
        assert_abs_diff_eq!(normalize_azimuth(-90.0), 270.0);
        assert_abs_diff_eq!(normalize_azimuth(450.0), 90.0);
        assert_abs_diff_eq!(normalize_azimuth(360.0), 0.0);
        assert_abs_diff_eq!(normalize_azimuth(0.0), 0.0);
    }

    #[test]
    fn normalize_never_returns_full_turn() {
        let r = normalize_azimuth(-1e-20);
        assert!((0.0..FULL_TURN).contains(&r), "got {r}");
    }

    #[test]
    fn azimuth_and_east_bearing_convert_both_ways() {
        assert_abs_diff_eq!(azimuth_from_east(0.0), 90.0);
        assert_abs_diff_eq!(azimuth_from_east(90.0), 0.0);
        assert_abs_diff_eq!(azimuth_from_east(180.0), 270.0);
        assert_abs_diff_eq!(azimuth_from_east(-90.0), 180.0);
        assert_abs_diff_eq!(east_from_azimuth(0.0), 90.0);
        assert_abs_diff_eq!(east_from_azimuth(270.0), -180.0);
    }

    #[test]
    fn decimal_splits_into_dms() {
        let dms = decimal_to_dms(45.504_236_111, 2);
        assert!(!dms.negative);
        assert_eq!(dms.degrees, 45);
        assert_eq!(dms.minutes, 30);
        assert_abs_diff_eq!(dms.seconds, 15.25, epsilon = 1e-9);
    }

    #[test]
    fn seconds_rounding_carries_into_degrees() {
        let dms = decimal_to_dms(359.999_999, 2);
        assert_eq!(dms.degrees, 360);
        assert_eq!(dms.minutes, 0);
        assert_abs_diff_eq!(dms.seconds, 0.0);
        assert_eq!(dms.to_string(), "360\u{b0} 00' 00.00\"");
    }

    #[test]
    fn azimuth_carry_wraps_to_zero() {
        let dms = azimuth_to_dms(359.999_999, 2);
        assert_eq!(dms.degrees, 0);
        assert_eq!(dms.to_string(), "0\u{b0} 00' 00.00\"");

        let dms = azimuth_to_dms(359.5, 2);
        assert_eq!(dms.to_string(), "359\u{b0} 30' 00.00\"");
    }

    #[test]
    fn negative_angles_keep_their_sign() {
        let dms = decimal_to_dms(-0.5, 2);
        assert!(dms.negative);
        assert_eq!(dms.degrees, 0);
        assert_eq!(dms.minutes, 30);
        assert_eq!(dms.to_string(), "-0\u{b0} 30' 00.00\"");
    }

    #[test]
    fn vanishing_negative_rounds_to_unsigned_zero() {
        let dms = decimal_to_dms(-1e-9, 2);
        assert!(!dms.negative);
        assert_eq!(dms.to_string(), "0\u{b0} 00' 00.00\"");
    }
}
