//! REST API layer for the Survey Calc module.

use utoipa::OpenApi;

pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;

#[derive(OpenApi)]
#[openapi(
    info(title = "polarjoin", description = "Polar and join survey calculations"),
    paths(handlers::calculate),
    components(schemas(
        dto::CalculateRequest,
        dto::PolarRequest,
        dto::JoinRequest,
        dto::CalculateResponse,
        dto::CalculationResultDto,
        dto::MethodDto,
        dto::DmsDto,
        dto::PointDto,
        dto::ErrorResponse,
    )),
    tags((name = "Calculations", description = "Coordinate geometry"))
)]
pub struct SurveyCalcApiDoc;
