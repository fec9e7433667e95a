//! Module declaration for the Survey Calc module.

use std::sync::Arc;

use survey_calc_sdk::SurveyCalcClient;
use tracing::{debug, info};
use utoipa::OpenApi;

use crate::api::rest::SurveyCalcApiDoc;
use crate::config::{ConfigError, SurveyCalcConfig};
use crate::domain::service::Service;
use crate::local_client::SurveyCalcLocalClient;

/// Survey Calc module: owns the calculator service and exposes it over REST
/// and as an in-process [`SurveyCalcClient`].
#[derive(Clone)]
pub struct SurveyCalcModule {
    service: Arc<Service>,
}

impl SurveyCalcModule {
    /// Build the module from validated configuration.
    ///
    /// # Errors
    /// Returns `ConfigError` when the rounding policy is out of range.
    pub fn new(cfg: SurveyCalcConfig) -> Result<Self, ConfigError> {
        info!("Initializing survey_calc module");
        cfg.validate()?;
        debug!(
            distance_precision = cfg.rounding.distance_precision,
            angle_precision = cfg.rounding.angle_precision,
            seconds_precision = cfg.rounding.seconds_precision,
            "Loaded survey_calc config"
        );
        Ok(Self {
            service: Arc::new(Service::new(cfg)),
        })
    }

    #[must_use]
    pub fn service(&self) -> Arc<Service> {
        Arc::clone(&self.service)
    }

    #[must_use]
    pub fn client(&self) -> Arc<dyn SurveyCalcClient> {
        Arc::new(SurveyCalcLocalClient::new(self.service()))
    }

    #[must_use]
    pub fn register_rest(&self, router: axum::Router) -> axum::Router {
        info!("Registering survey_calc REST routes");
        crate::api::rest::routes::register_routes(router, self.service())
    }

    #[must_use]
    pub fn openapi() -> utoipa::openapi::OpenApi {
        SurveyCalcApiDoc::openapi()
    }
}
