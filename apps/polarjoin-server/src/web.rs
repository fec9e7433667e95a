//! Health probes, the `OpenAPI` document and the static front-end.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::extract::Request;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde_json::json;
use tower::ServiceExt as _;
use tower_http::services::ServeDir;

use crate::config::FrontendConfig;

/// Root-level files with these extensions are served from the bundle
/// directory; every other unmatched GET gets `index.html`.
const STATIC_EXTENSIONS: [&str; 8] = ["svg", "js", "css", "png", "jpg", "jpeg", "gif", "ico"];

#[derive(Clone)]
struct Frontend {
    dist_dir: Arc<PathBuf>,
}

/// Mount probes, the `OpenAPI` document and the front-end on `router`.
#[must_use]
pub fn register_routes(
    router: Router,
    cfg: &FrontendConfig,
    openapi: utoipa::openapi::OpenApi,
) -> Router {
    let openapi_doc = Arc::new(openapi);
    let frontend = Frontend {
        dist_dir: Arc::new(cfg.dist_dir.clone()),
    };

    router
        .route("/health", get(health_check))
        .route("/healthz", get(|| async { "ok" }))
        .route(
            "/openapi.json",
            get({
                let doc = openapi_doc;
                move || async move {
                    ([(header::CACHE_CONTROL, "no-store")], Json(doc.as_ref()))
                        .into_response()
                }
            }),
        )
        .nest_service("/assets", ServeDir::new(cfg.dist_dir.join("assets")))
        .fallback_service(get(serve_frontend).layer(Extension(frontend)))
}

#[allow(clippy::unused_async)]
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy" }))
}

async fn serve_frontend(Extension(frontend): Extension<Frontend>, req: Request) -> Response {
    if has_static_extension(req.uri().path()) {
        return match ServeDir::new(frontend.dist_dir.as_path()).oneshot(req).await {
            Ok(response) => response.into_response(),
            Err(never) => match never {},
        };
    }
    index_html(&frontend.dist_dir).await
}

fn has_static_extension(path: &str) -> bool {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            STATIC_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

async fn index_html(dist_dir: &Path) -> Response {
    let path = dist_dir.join("index.html");
    match tokio::fs::read_to_string(&path).await {
        Ok(html) => (
            [(header::CACHE_CONTROL, "no-cache")],
            axum::response::Html(html),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "front-end bundle missing");
            (
                StatusCode::NOT_IMPLEMENTED,
                format!(
                    "index.html not found! Build the front-end bundle into {}",
                    dist_dir.display()
                ),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_extension_matching() {
        assert!(has_static_extension("/logo.svg"));
        assert!(has_static_extension("/favicon.ICO"));
        assert!(has_static_extension("/nested/app.js"));
        assert!(!has_static_extension("/calculator"));
        assert!(!has_static_extension("/report.pdf"));
        assert!(!has_static_extension("/"));
    }
}
