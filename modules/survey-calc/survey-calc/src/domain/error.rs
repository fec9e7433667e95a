//! Domain error types for the Survey Calc module.

use survey_calc_sdk::SurveyCalcError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An input value is unusable for the calculation.
    #[error("Invalid value for '{field}': {message}")]
    Validation { field: String, message: String },

    /// Inputs were finite but a computed quantity overflowed.
    #[error("Calculation out of range: {quantity} is not finite")]
    OutOfRange { quantity: &'static str },
}

impl DomainError {
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<DomainError> for SurveyCalcError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation { field, message } => Self::validation(field, message),
            DomainError::OutOfRange { quantity } => Self::OutOfRange(quantity.to_owned()),
        }
    }
}
