use thiserror::Error;

/// Errors surfaced to consumers of [`crate::SurveyCalcClient`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurveyCalcError {
    /// An input field failed validation before any geometry ran.
    #[error("invalid value for '{field}': {message}")]
    Validation { field: String, message: String },

    /// Inputs were finite but the result overflowed `f64`.
    #[error("result out of range: {0}")]
    OutOfRange(String),
}

impl SurveyCalcError {
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}
