//! Configuration for the Survey Calc module.

use serde::{Deserialize, Serialize};

/// Errors raised while validating module configuration.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("rounding.{field} must be at most {max}, got {value}")]
    PrecisionTooLarge {
        field: &'static str,
        value: u32,
        max: u32,
    },
}

/// Configuration for the Survey Calc module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct SurveyCalcConfig {
    /// Decimal places applied when results are rendered.
    pub rounding: RoundingPolicy,
}

impl SurveyCalcConfig {
    /// # Errors
    /// Returns `ConfigError` if any precision exceeds what an `f64` can carry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rounding.validate()
    }
}

/// Presentation rounding, in decimal places.
///
/// Distances, deltas and points use `distance_precision`; azimuth and
/// bearing use `angle_precision`; the seconds of a DMS breakdown use
/// `seconds_precision`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct RoundingPolicy {
    pub distance_precision: u32,
    pub angle_precision: u32,
    pub seconds_precision: u32,
}

impl Default for RoundingPolicy {
    fn default() -> Self {
        Self {
            distance_precision: 4,
            angle_precision: 8,
            seconds_precision: 2,
        }
    }
}

impl RoundingPolicy {
    /// Beyond 15 decimal places an `f64` has no digits left to round.
    pub const MAX_PRECISION: u32 = 15;

    #[must_use]
    pub fn distance(&self, value: f64) -> f64 {
        round_to(value, self.distance_precision)
    }

    #[must_use]
    pub fn angle(&self, value: f64) -> f64 {
        round_to(value, self.angle_precision)
    }

    #[must_use]
    pub fn seconds(&self, value: f64) -> f64 {
        round_to(value, self.seconds_precision)
    }

    /// # Errors
    /// Returns `ConfigError::PrecisionTooLarge` for the first precision above
    /// [`Self::MAX_PRECISION`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("distance_precision", self.distance_precision),
            ("angle_precision", self.angle_precision),
            ("seconds_precision", self.seconds_precision),
        ] {
            if value > Self::MAX_PRECISION {
                return Err(ConfigError::PrecisionTooLarge {
                    field,
                    value,
                    max: Self::MAX_PRECISION,
                });
            }
        }
        Ok(())
    }
}

/// Round half away from zero to `places` decimal places.
///
/// Values too large to scale are returned unchanged. Negative zero comes
/// back as positive zero.
#[must_use]
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10_f64.powi(i32::try_from(places).unwrap_or(i32::MAX));
    let rounded = (value * factor).round() / factor;
    if rounded.is_finite() {
        rounded + 0.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = SurveyCalcConfig::default();
        assert_eq!(cfg.rounding.distance_precision, 4);
        assert_eq!(cfg.rounding.angle_precision, 8);
        assert_eq!(cfg.rounding.seconds_precision, 2);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let cfg: SurveyCalcConfig =
            serde_json::from_str(r#"{"rounding":{"distance_precision":2}}"#).unwrap();
        assert_eq!(cfg.rounding.distance_precision, 2);
        assert_eq!(cfg.rounding.angle_precision, 8);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let res: Result<SurveyCalcConfig, _> =
            serde_json::from_str(r#"{"rounding":{"distance_places":2}}"#);
        assert!(res.is_err());
    }

    #[test]
    fn test_precision_limit() {
        let cfg = SurveyCalcConfig {
            rounding: RoundingPolicy {
                angle_precision: 16,
                ..RoundingPolicy::default()
            },
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::PrecisionTooLarge {
                field: "angle_precision",
                value: 16,
                max: 15,
            })
        );
    }

    #[test]
    fn test_round_to_half_away_from_zero() {
        assert_eq!(round_to(1.234_56, 4).to_string(), "1.2346");
        assert_eq!(round_to(-2.5, 0).to_string(), "-3");
        assert_eq!(round_to(12.0, 2).to_string(), "12");
    }

    #[test]
    fn test_round_to_clears_negative_zero() {
        let r = round_to(-0.000_01, 4);
        assert!(r.is_sign_positive());
        assert_eq!(r.to_string(), "0");
    }

    #[test]
    fn test_round_to_passes_through_huge_values() {
        assert_eq!(round_to(1e300, 15).to_string(), 1e300.to_string());
    }
}
