//! Survey Calc module.
//!
//! Polar and join coordinate geometry for a local planar survey grid, served
//! as `POST /api/calculate/` and usable in-process through
//! [`survey_calc_sdk::SurveyCalcClient`].
#![forbid(unsafe_code)]

pub use survey_calc_sdk::{
    Calculation, CalculationResult, JoinInput, Point, SurveyCalcClient, SurveyCalcError,
};

pub mod api;
pub mod config;
pub mod domain;
pub mod local_client;
pub mod module;

pub use config::{RoundingPolicy, SurveyCalcConfig};
pub use module::SurveyCalcModule;
