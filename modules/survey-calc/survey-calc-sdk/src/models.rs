//! Public models for the survey-calc module.
//!
//! These are transport-agnostic data structures that define the contract
//! between the calculator and its consumers. Angles are in decimal degrees,
//! coordinates are easting/northing in a shared local planar grid.

use std::fmt;

/// A point in a local planar survey grid.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub e: f64,
    pub n: f64,
}

impl Point {
    #[must_use]
    pub const fn new(e: f64, n: f64) -> Self {
        Self { e, n }
    }

    /// Offset this point by `(delta_e, delta_n)`.
    #[must_use]
    pub fn offset(self, delta_e: f64, delta_n: f64) -> Self {
        Self {
            e: self.e + delta_e,
            n: self.n + delta_n,
        }
    }
}

/// How the direction of a polar observation is expressed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Direction {
    /// Azimuth clockwise from North as a degrees/minutes/seconds triple.
    Azimuth {
        degrees: f64,
        minutes: f64,
        seconds: f64,
    },
    /// Mathematical angle counterclockwise from the positive East axis.
    FromEast(f64),
}

impl Default for Direction {
    fn default() -> Self {
        Self::FromEast(0.0)
    }
}

/// Distance and direction from a start point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PolarInput {
    pub distance: f64,
    pub direction: Direction,
    pub origin: Point,
}

/// Cartesian offsets given directly instead of distance and direction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OffsetInput {
    pub delta_e: f64,
    pub delta_n: f64,
    pub origin: Point,
}

/// Two points whose distance and direction are wanted.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct JoinInput {
    pub a: Point,
    pub b: Point,
}

/// A single calculation request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Calculation {
    Polar(PolarInput),
    Offset(OffsetInput),
    Join(JoinInput),
}

impl Calculation {
    /// The method reported back for this calculation.
    ///
    /// The offset form is the alternate input mode of the polar method.
    #[must_use]
    pub fn method(&self) -> Method {
        match self {
            Self::Polar(_) | Self::Offset(_) => Method::Polar,
            Self::Join(_) => Method::Join,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Polar,
    Join,
}

impl Method {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Polar => "polar",
            Self::Join => "join",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An angle split into whole degrees, whole minutes and decimal seconds.
///
/// The sign is carried separately so that angles between -1 and 0 degrees
/// keep it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Dms {
    pub negative: bool,
    pub degrees: u32,
    pub minutes: u32,
    pub seconds: f64,
}

impl fmt::Display for Dms {
    /// Renders as `45° 30' 15.25"`, minutes and seconds zero-padded.
    /// The formatter precision sets the seconds decimals, two by default.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.negative { "-" } else { "" };
        let places = f.precision().unwrap_or(2);
        let width = if places == 0 { 2 } else { places + 3 };
        write!(
            f,
            "{sign}{}\u{b0} {:02}' {:0width$.places$}\"",
            self.degrees, self.minutes, self.seconds
        )
    }
}

/// Outcome of a calculation, before any presentation rounding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculationResult {
    pub method: Method,
    /// Horizontal distance, never negative.
    pub distance: f64,
    /// Clockwise from North.
    pub azimuth: f64,
    /// Counterclockwise from East.
    pub bearing_from_east: f64,
    pub delta_e: f64,
    pub delta_n: f64,
    pub azimuth_dms: Dms,
    pub start_point: Point,
    pub end_point: Point,
}
