use std::sync::Arc;

use axum::routing::post;
use axum::{Extension, Router};

use super::handlers;
use crate::domain::service::Service;

pub const CALCULATE_PATH: &str = "/api/calculate/";

/// Mount the calculation endpoint on `router`, with and without the
/// trailing slash.
#[must_use]
pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    let calc = Router::new()
        .route(CALCULATE_PATH, post(handlers::calculate))
        .route(
            CALCULATE_PATH.trim_end_matches('/'),
            post(handlers::calculate),
        )
        .layer(Extension(service));
    router.merge(calc)
}
