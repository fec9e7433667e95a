//! Survey Calc SDK
//!
//! This crate provides the public API for the survey-calc module:
//! - `SurveyCalcClient` trait for in-process consumers
//! - Input and result models (`Calculation`, `CalculationResult`, ...)
//! - Error type (`SurveyCalcError`)
//!
//! The models are transport-agnostic. The REST layer of the module owns its
//! own DTOs and converts to and from these types.
//!
//! ```ignore
//! let client: Arc<dyn SurveyCalcClient> = module.client();
//! let result = client
//!     .calculate(Calculation::Join(JoinInput {
//!         a: Point::new(0.0, 0.0),
//!         b: Point::new(10.0, 0.0),
//!     }))
//!     .await?;
//! assert_eq!(result.method, Method::Join);
//! ```

#![forbid(unsafe_code)]

pub mod api;
pub mod errors;
pub mod models;

pub use api::SurveyCalcClient;
pub use errors::SurveyCalcError;
pub use models::{
    Calculation, CalculationResult, Direction, Dms, JoinInput, Method, OffsetInput, Point,
    PolarInput,
};
