//! Planar coordinate geometry for the polar and join methods.
//!
//! Pure functions over finite `f64` input. Nothing here rounds, validates
//! or fails; that is the caller's job.

use survey_calc_sdk::{Direction, Point};

use super::angle::{azimuth_from_east, dms_to_decimal, east_from_azimuth};

/// Cartesian offsets produced from a distance and a direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarOffset {
    pub delta_e: f64,
    pub delta_n: f64,
    pub azimuth: f64,
    pub bearing_from_east: f64,
}

/// Distance and direction of an offset vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarVector {
    pub distance: f64,
    pub azimuth: f64,
    pub bearing_from_east: f64,
}

/// Distance, direction and offsets from point A to point B.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Join {
    pub distance: f64,
    pub azimuth: f64,
    pub bearing_from_east: f64,
    pub delta_e: f64,
    pub delta_n: f64,
}

/// Offsets for `distance` along `direction`.
///
/// An azimuth given as DMS is combined but not normalized, so 400° stays
/// 400°. A bearing from East yields an azimuth in `[0, 360)`.
#[must_use]
pub fn polar_to_offset(distance: f64, direction: Direction) -> PolarOffset {
    let (azimuth, bearing_from_east) = match direction {
        Direction::Azimuth {
            degrees,
            minutes,
            seconds,
        } => {
            let azimuth = dms_to_decimal(degrees, minutes, seconds);
            (azimuth, east_from_azimuth(azimuth))
        }
        Direction::FromEast(angle) => (azimuth_from_east(angle), angle),
    };

    let (sin, cos) = bearing_from_east.to_radians().sin_cos();
    PolarOffset {
        delta_e: distance * cos,
        delta_n: distance * sin,
        azimuth,
        bearing_from_east,
    }
}

/// Distance and direction of the vector `(delta_e, delta_n)`.
///
/// Bearing from East is in `(-180, 180]`. A zero vector has bearing 0 and
/// azimuth 90.
#[must_use]
pub fn offset_to_polar(delta_e: f64, delta_n: f64) -> PolarVector {
    // -0.0 + 0.0 is +0.0, which keeps atan2 off -180
    let (delta_e, delta_n) = (delta_e + 0.0, delta_n + 0.0);
    let bearing_from_east = delta_n.atan2(delta_e).to_degrees();
    PolarVector {
        distance: delta_e.hypot(delta_n),
        azimuth: azimuth_from_east(bearing_from_east),
        bearing_from_east,
    }
}

/// Join from `a` to `b`.
#[must_use]
pub fn join(a: Point, b: Point) -> Join {
    let delta_e = b.e - a.e;
    let delta_n = b.n - a.n;
    let vector = offset_to_polar(delta_e, delta_n);
    Join {
        distance: vector.distance,
        azimuth: vector.azimuth,
        bearing_from_east: vector.bearing_from_east,
        delta_e,
        delta_n,
    }
}
