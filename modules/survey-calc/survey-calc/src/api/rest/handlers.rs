use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::{Extension, Json};
use serde_json::Value;

use super::dto::{CalculateRequest, CalculateResponse, ErrorResponse};
use super::error::ApiError;
use crate::domain::service::Service;

/// Run a polar or join calculation.
#[utoipa::path(
    post,
    path = "/api/calculate/",
    tag = "Calculations",
    request_body = CalculateRequest,
    responses(
        (status = 200, description = "Calculation result", body = CalculateResponse),
        (status = 400, description = "Unknown type or invalid input", body = ErrorResponse)
    )
)]
#[allow(clippy::unused_async)]
pub async fn calculate(
    Extension(svc): Extension<Arc<Service>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<CalculateResponse>, ApiError> {
    let Json(body) = body?;
    let calculation = CalculateRequest::from_json(body)?.into_calculation()?;
    let result = svc.calculate(calculation)?;
    Ok(Json(CalculateResponse::new(&result, svc.rounding())))
}
