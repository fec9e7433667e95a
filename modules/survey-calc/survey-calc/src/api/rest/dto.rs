//! REST DTOs for the Survey Calc module.
//!
//! Numeric request fields are kept as raw JSON until conversion so that
//! numeric strings are accepted and errors can name the offending field.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use survey_calc_sdk::{
    Calculation, CalculationResult, Direction, Dms, JoinInput, Method, OffsetInput, Point,
    PolarInput,
};

use super::error::ApiError;
use crate::config::RoundingPolicy;
use crate::domain::angle::FULL_TURN;
use crate::domain::error::DomainError;
use crate::domain::service::CalcFields;

const TYPE_FIELD: &str = "type";
const KNOWN_TYPES: [&str; 2] = ["polar", "join"];

/// Body of `POST /api/calculate/`, selected by its `type` field.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CalculateRequest {
    Polar(PolarRequest),
    Join(JoinRequest),
}

/// Polar calculation. With `easting` or `northing` present the offsets are
/// taken as given and distance and direction are derived from them.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct PolarRequest {
    #[schema(value_type = Option<f64>)]
    pub distance: Option<Value>,
    /// Use `degrees`/`minutes`/`seconds` as an azimuth instead of `angle`.
    #[serde(rename = "useAzimuth")]
    #[schema(value_type = Option<bool>)]
    pub use_azimuth: Option<Value>,
    #[schema(value_type = Option<f64>)]
    pub degrees: Option<Value>,
    #[schema(value_type = Option<f64>)]
    pub minutes: Option<Value>,
    #[schema(value_type = Option<f64>)]
    pub seconds: Option<Value>,
    /// Bearing counterclockwise from East, in degrees.
    #[schema(value_type = Option<f64>)]
    pub angle: Option<Value>,
    #[schema(value_type = Option<f64>)]
    pub easting: Option<Value>,
    #[schema(value_type = Option<f64>)]
    pub northing: Option<Value>,
    /// Start point easting.
    #[schema(value_type = Option<f64>)]
    pub ea: Option<Value>,
    /// Start point northing.
    #[schema(value_type = Option<f64>)]
    pub na: Option<Value>,
}

/// Join calculation from point A to point B.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct JoinRequest {
    #[schema(value_type = Option<f64>)]
    pub ea: Option<Value>,
    #[schema(value_type = Option<f64>)]
    pub na: Option<Value>,
    #[schema(value_type = Option<f64>)]
    pub eb: Option<Value>,
    #[schema(value_type = Option<f64>)]
    pub nb: Option<Value>,
}

impl CalculateRequest {
    /// Decode a request body.
    ///
    /// # Errors
    /// `ApiError::UnknownOperation` when `type` is missing or not a known
    /// method, `ApiError::BadRequest` for a body that is not a JSON object.
    pub fn from_json(body: Value) -> Result<Self, ApiError> {
        let Value::Object(ref map) = body else {
            return Err(ApiError::BadRequest(
                "Request body must be a JSON object".to_owned(),
            ));
        };
        match map.get(TYPE_FIELD).and_then(Value::as_str) {
            Some(kind) if KNOWN_TYPES.contains(&kind) => {}
            _ => return Err(ApiError::UnknownOperation),
        }
        serde_json::from_value(body).map_err(|e| ApiError::BadRequest(e.to_string()))
    }

    /// Convert the loosely typed body into a calculation.
    ///
    /// # Errors
    /// `ApiError::Domain` naming the first field that is not a usable number
    /// or boolean.
    pub fn into_calculation(self) -> Result<Calculation, ApiError> {
        let calculation = match self {
            Self::Polar(req) => req.into_calculation()?,
            Self::Join(req) => Calculation::Join(JoinInput {
                a: point(CalcFields::EA, req.ea, CalcFields::NA, req.na)?,
                b: point(CalcFields::EB, req.eb, CalcFields::NB, req.nb)?,
            }),
        };
        Ok(calculation)
    }
}

impl PolarRequest {
    /// Every field is parsed, including those the selected mode ignores.
    fn into_calculation(self) -> Result<Calculation, DomainError> {
        let offset_mode = self.easting.is_some() || self.northing.is_some();

        let distance = number(CalcFields::DISTANCE, self.distance)?;
        let use_azimuth = flag("useAzimuth", self.use_azimuth)?;
        let degrees = number(CalcFields::DEGREES, self.degrees)?;
        let minutes = number(CalcFields::MINUTES, self.minutes)?;
        let seconds = number(CalcFields::SECONDS, self.seconds)?;
        let angle = number(CalcFields::ANGLE, self.angle)?;
        let delta_e = number(CalcFields::EASTING, self.easting)?;
        let delta_n = number(CalcFields::NORTHING, self.northing)?;
        let origin = point(CalcFields::EA, self.ea, CalcFields::NA, self.na)?;

        if offset_mode {
            return Ok(Calculation::Offset(OffsetInput {
                delta_e,
                delta_n,
                origin,
            }));
        }

        let direction = if use_azimuth {
            Direction::Azimuth {
                degrees,
                minutes,
                seconds,
            }
        } else {
            Direction::FromEast(angle)
        };

        Ok(Calculation::Polar(PolarInput {
            distance,
            direction,
            origin,
        }))
    }
}

/// A JSON number or numeric string. Missing or `null` is zero.
fn number(field: &'static str, value: Option<Value>) -> Result<f64, DomainError> {
    let parsed = match &value {
        None | Some(Value::Null) => return Ok(0.0),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };
    match parsed {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(DomainError::validation(
            field,
            format!("expected a number, got {}", value.unwrap_or(Value::Null)),
        )),
    }
}

/// A JSON boolean. Missing or `null` is `false`.
fn flag(field: &'static str, value: Option<Value>) -> Result<bool, DomainError> {
    match value {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(b)) => Ok(b),
        Some(other) => Err(DomainError::validation(
            field,
            format!("expected a boolean, got {other}"),
        )),
    }
}

fn point(
    e_field: &'static str,
    e: Option<Value>,
    n_field: &'static str,
    n: Option<Value>,
) -> Result<Point, DomainError> {
    Ok(Point::new(number(e_field, e)?, number(n_field, n)?))
}

/// Successful calculation response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CalculateResponse {
    pub result: CalculationResultDto,
}

impl CalculateResponse {
    #[must_use]
    pub fn new(result: &CalculationResult, rounding: &RoundingPolicy) -> Self {
        Self {
            result: CalculationResultDto::from_result(result, rounding),
        }
    }
}

/// Calculation result with presentation rounding applied.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CalculationResultDto {
    pub distance: f64,
    /// Clockwise from North, in degrees.
    pub azimuth: f64,
    /// Counterclockwise from East, in degrees.
    pub bearing_from_east: f64,
    pub delta_e: f64,
    pub delta_n: f64,
    pub method: MethodDto,
    pub azimuth_dms: DmsDto,
    pub start_point: PointDto,
    pub end_point: PointDto,
}

impl CalculationResultDto {
    #[must_use]
    pub fn from_result(r: &CalculationResult, rounding: &RoundingPolicy) -> Self {
        Self {
            distance: rounding.distance(r.distance),
            azimuth: rounded_azimuth(r.azimuth, rounding),
            bearing_from_east: rounding.angle(r.bearing_from_east),
            delta_e: rounding.distance(r.delta_e),
            delta_n: rounding.distance(r.delta_n),
            method: r.method.into(),
            azimuth_dms: DmsDto::new(&r.azimuth_dms, rounding),
            start_point: PointDto::new(r.start_point, rounding),
            end_point: PointDto::new(r.end_point, rounding),
        }
    }
}

/// A normalized azimuth just below 360 must not round up to 360.
fn rounded_azimuth(azimuth: f64, rounding: &RoundingPolicy) -> f64 {
    let rounded = rounding.angle(azimuth);
    if rounded >= FULL_TURN && azimuth < FULL_TURN {
        0.0
    } else {
        rounded
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MethodDto {
    Polar,
    Join,
}

impl From<Method> for MethodDto {
    fn from(m: Method) -> Self {
        match m {
            Method::Polar => Self::Polar,
            Method::Join => Self::Join,
        }
    }
}

/// Azimuth as degrees, minutes and seconds.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DmsDto {
    pub negative: bool,
    pub degrees: u32,
    pub minutes: u32,
    pub seconds: f64,
    /// Display form, e.g. `45° 30' 15.25"`.
    pub text: String,
}

impl DmsDto {
    fn new(dms: &Dms, rounding: &RoundingPolicy) -> Self {
        Self {
            negative: dms.negative,
            degrees: dms.degrees,
            minutes: dms.minutes,
            seconds: rounding.seconds(dms.seconds),
            text: format!("{dms:.places$}", places = seconds_places(rounding)),
        }
    }
}

fn seconds_places(rounding: &RoundingPolicy) -> usize {
    usize::try_from(rounding.seconds_precision).unwrap_or(2)
}

#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct PointDto {
    pub e: f64,
    pub n: f64,
}

impl PointDto {
    fn new(p: Point, rounding: &RoundingPolicy) -> Self {
        Self {
            e: rounding.distance(p.e),
            n: rounding.distance(p.n),
        }
    }
}

/// Error body for every failed request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
