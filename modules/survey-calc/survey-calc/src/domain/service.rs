use survey_calc_sdk::{
    Calculation, CalculationResult, Direction, JoinInput, Method, OffsetInput, Point, PolarInput,
};
use tracing::{debug, instrument};

use super::angle::{azimuth_to_dms, decimal_to_dms};
use super::error::DomainError;
use super::geometry::{self, offset_to_polar, polar_to_offset};
use crate::config::{RoundingPolicy, SurveyCalcConfig};

/// Field names as they appear on the wire, used in validation errors.
pub struct CalcFields;

impl CalcFields {
    pub const DISTANCE: &'static str = "distance";
    pub const DEGREES: &'static str = "degrees";
    pub const MINUTES: &'static str = "minutes";
    pub const SECONDS: &'static str = "seconds";
    pub const ANGLE: &'static str = "angle";
    pub const EASTING: &'static str = "easting";
    pub const NORTHING: &'static str = "northing";
    pub const EA: &'static str = "ea";
    pub const NA: &'static str = "na";
    pub const EB: &'static str = "eb";
    pub const NB: &'static str = "nb";
}

/// Stateless calculator. Returns full-precision results; the REST layer
/// applies [`RoundingPolicy`] when rendering.
pub struct Service {
    config: SurveyCalcConfig,
}

impl Service {
    #[must_use]
    pub fn new(config: SurveyCalcConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn rounding(&self) -> &RoundingPolicy {
        &self.config.rounding
    }

    /// Run one calculation.
    ///
    /// # Errors
    /// `DomainError::Validation` for non-finite input or a negative polar
    /// distance, `DomainError::OutOfRange` if a finite input overflows.
    #[instrument(skip(self, input), fields(method = %input.method()))]
    pub fn calculate(&self, input: Calculation) -> Result<CalculationResult, DomainError> {
        let result = match input {
            Calculation::Polar(polar) => self.polar(polar)?,
            Calculation::Offset(offset) => self.offset(offset)?,
            Calculation::Join(pair) => self.join(pair)?,
        };
        ensure_finite(&result)?;

        debug!(
            distance = result.distance,
            azimuth = result.azimuth,
            "calculation complete"
        );
        Ok(result)
    }

    fn polar(&self, input: PolarInput) -> Result<CalculationResult, DomainError> {
        check_finite(CalcFields::DISTANCE, input.distance)?;
        if input.distance < 0.0 {
            return Err(DomainError::validation(
                CalcFields::DISTANCE,
                "must not be negative",
            ));
        }
        match input.direction {
            Direction::Azimuth {
                degrees,
                minutes,
                seconds,
            } => {
                check_finite(CalcFields::DEGREES, degrees)?;
                check_finite(CalcFields::MINUTES, minutes)?;
                check_finite(CalcFields::SECONDS, seconds)?;
            }
            Direction::FromEast(angle) => check_finite(CalcFields::ANGLE, angle)?,
        }
        check_origin(input.origin)?;

        let offset = polar_to_offset(input.distance, input.direction);
        let seconds_precision = self.rounding().seconds_precision;
        // An azimuth entered as DMS is reported as given; one derived from
        // a bearing is normalized and its breakdown must stay below 360.
        let azimuth_dms = match input.direction {
            Direction::Azimuth { .. } => decimal_to_dms(offset.azimuth, seconds_precision),
            Direction::FromEast(_) => azimuth_to_dms(offset.azimuth, seconds_precision),
        };
        Ok(CalculationResult {
            method: Method::Polar,
            distance: input.distance,
            azimuth: offset.azimuth,
            bearing_from_east: offset.bearing_from_east,
            delta_e: offset.delta_e,
            delta_n: offset.delta_n,
            azimuth_dms,
            start_point: input.origin,
            end_point: input.origin.offset(offset.delta_e, offset.delta_n),
        })
    }

    fn offset(&self, input: OffsetInput) -> Result<CalculationResult, DomainError> {
        check_finite(CalcFields::EASTING, input.delta_e)?;
        check_finite(CalcFields::NORTHING, input.delta_n)?;
        check_origin(input.origin)?;

        let vector = offset_to_polar(input.delta_e, input.delta_n);
        Ok(CalculationResult {
            method: Method::Polar,
            distance: vector.distance,
            azimuth: vector.azimuth,
            bearing_from_east: vector.bearing_from_east,
            delta_e: input.delta_e,
            delta_n: input.delta_n,
            azimuth_dms: azimuth_to_dms(vector.azimuth, self.rounding().seconds_precision),
            start_point: input.origin,
            end_point: input.origin.offset(input.delta_e, input.delta_n),
        })
    }

    fn join(&self, input: JoinInput) -> Result<CalculationResult, DomainError> {
        check_finite(CalcFields::EA, input.a.e)?;
        check_finite(CalcFields::NA, input.a.n)?;
        check_finite(CalcFields::EB, input.b.e)?;
        check_finite(CalcFields::NB, input.b.n)?;

        let j = geometry::join(input.a, input.b);
        Ok(CalculationResult {
            method: Method::Join,
            distance: j.distance,
            azimuth: j.azimuth,
            bearing_from_east: j.bearing_from_east,
            delta_e: j.delta_e,
            delta_n: j.delta_n,
            azimuth_dms: azimuth_to_dms(j.azimuth, self.rounding().seconds_precision),
            start_point: input.a,
            end_point: input.b,
        })
    }
}

fn check_finite(field: &'static str, value: f64) -> Result<(), DomainError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(DomainError::validation(field, "must be a finite number"))
    }
}

fn check_origin(origin: Point) -> Result<(), DomainError> {
    check_finite(CalcFields::EA, origin.e)?;
    check_finite(CalcFields::NA, origin.n)
}

fn ensure_finite(result: &CalculationResult) -> Result<(), DomainError> {
    for (quantity, value) in [
        ("distance", result.distance),
        ("azimuth", result.azimuth),
        ("bearing_from_east", result.bearing_from_east),
        ("delta_e", result.delta_e),
        ("delta_n", result.delta_n),
        ("end_point.e", result.end_point.e),
        ("end_point.n", result.end_point.n),
    ] {
        if !value.is_finite() {
            return Err(DomainError::OutOfRange { quantity });
        }
    }
    Ok(())
}
