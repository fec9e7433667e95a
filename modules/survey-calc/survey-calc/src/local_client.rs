//! Local client implementing the `SurveyCalcClient` trait.

use std::sync::Arc;

use async_trait::async_trait;
use survey_calc_sdk::{Calculation, CalculationResult, SurveyCalcClient, SurveyCalcError};

use crate::domain::service::Service;

/// In-process client that delegates to the domain service.
pub struct SurveyCalcLocalClient {
    service: Arc<Service>,
}

impl SurveyCalcLocalClient {
    #[must_use]
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl SurveyCalcClient for SurveyCalcLocalClient {
    async fn calculate(&self, input: Calculation) -> Result<CalculationResult, SurveyCalcError> {
        self.service.calculate(input).map_err(SurveyCalcError::from)
    }
}
