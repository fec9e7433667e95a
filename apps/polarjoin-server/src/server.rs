//! HTTP host: router assembly, middleware stack and the serve loop.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, StatusCode};
use axum::Router;
use survey_calc::{Calculation, JoinInput, Point, SurveyCalcClient, SurveyCalcModule};
use tokio_util::sync::CancellationToken;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::field::Empty;

use crate::config::{AppConfig, ServerConfig};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Build the full application router: calculation API, probes, `OpenAPI`
/// document and front-end, wrapped in the middleware stack.
#[must_use]
pub fn build_router(config: &AppConfig, module: &SurveyCalcModule) -> Router {
    let router = module.register_rest(Router::new());
    let router = crate::web::register_routes(router, &config.frontend, SurveyCalcModule::openapi());
    apply_middleware_stack(router, &config.server)
}

/// Layer registration order is the reverse of execution. At runtime a
/// request passes `SetRequestId`, `PropagateRequestId`, Trace, Timeout,
/// `BodyLimit` and CORS before reaching the router.
fn apply_middleware_stack(mut router: Router, cfg: &ServerConfig) -> Router {
    if cfg.cors_enabled {
        router = router.layer(crate::cors::build_cors_layer(&cfg.cors));
    }

    router = router.layer(RequestBodyLimitLayer::new(cfg.body_limit_bytes));
    router = router.layer(DefaultBodyLimit::max(cfg.body_limit_bytes));

    router = router.layer(TimeoutLayer::with_status_code(
        StatusCode::GATEWAY_TIMEOUT,
        cfg.request_timeout,
    ));

    router = apply_trace_layer(router);

    let x_request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    router = router.layer(PropagateRequestIdLayer::new(x_request_id.clone()));
    router.layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid))
}

fn apply_trace_layer(router: Router) -> Router {
    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(|req: &axum::http::Request<axum::body::Body>| {
                let rid = req
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("n/a");

                tracing::info_span!(
                    "http_request",
                    method = %req.method(),
                    uri = %req.uri().path(),
                    version = ?req.version(),
                    request_id = %rid,
                    status = Empty,
                    latency_ms = Empty,
                )
            })
            .on_response(
                |res: &axum::http::Response<axum::body::Body>,
                 latency: Duration,
                 span: &tracing::Span| {
                    span.record("status", res.status().as_u16());
                    span.record("latency_ms", latency.as_millis());
                    tracing::debug!("request completed");
                },
            ),
    )
}

/// Run a reference join, a 3-4-5 triangle, through the in-process client.
///
/// # Errors
/// Returns an error if the calculator fails or the distance is not 5.
pub async fn self_check(client: &dyn SurveyCalcClient) -> Result<()> {
    let result = client
        .calculate(Calculation::Join(JoinInput {
            a: Point::new(0.0, 0.0),
            b: Point::new(3.0, 4.0),
        }))
        .await
        .context("calculator self-check failed")?;
    if (result.distance - 5.0).abs() > 1e-9 {
        bail!("calculator self-check returned distance {}", result.distance);
    }
    tracing::debug!(azimuth = result.azimuth, "calculator self-check passed");
    Ok(())
}

/// Bind and serve until `cancel` fires, then drain in-flight requests.
///
/// # Errors
/// Returns an error if the module config is invalid, the address cannot be
/// bound, or the server fails.
pub async fn serve(config: AppConfig, cancel: CancellationToken) -> Result<()> {
    let module = SurveyCalcModule::new(config.survey_calc.clone())
        .context("invalid survey_calc configuration")?;
    let router = build_router(&config, &module);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(
        addr = %listener.local_addr()?,
        dist_dir = %config.frontend.dist_dir.display(),
        "HTTP server bound"
    );

    let shutdown = async move {
        cancel.cancelled().await;
        tracing::info!("HTTP server shutting down gracefully (cancellation)");
    };

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| anyhow::anyhow!(e))
}
