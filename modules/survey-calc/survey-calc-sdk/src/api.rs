//! `SurveyCalcClient` trait definition.

use async_trait::async_trait;

use crate::errors::SurveyCalcError;
use crate::models::{Calculation, CalculationResult};

/// Public API trait for the survey-calc module.
///
/// Implemented in-process by the module's local client, which delegates to
/// the domain service. Results are returned unrounded, except for the DMS
/// breakdown of the azimuth whose seconds follow the configured precision.
#[async_trait]
pub trait SurveyCalcClient: Send + Sync {
    /// Run a single polar, offset or join calculation.
    async fn calculate(&self, input: Calculation) -> Result<CalculationResult, SurveyCalcError>;
}
