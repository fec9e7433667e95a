use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

use crate::config::CorsConfig;

/// Build a CORS layer from config. A `"*"` entry allows any value for that
/// list; unparsable entries are skipped with a warning.
#[must_use]
pub fn build_cors_layer(cfg: &CorsConfig) -> CorsLayer {
    let mut layer = CorsLayer::new();

    if cfg.allowed_origins.iter().any(|o| o == "*") {
        warn!(
            "CORS is configured with allowed_origins=['*']. \
             Any website may call the calculator from a browser."
        );
        layer = layer.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = parse_all(&cfg.allowed_origins, "origin", |s| {
            HeaderValue::from_str(s).ok()
        });
        if !origins.is_empty() {
            layer = layer.allow_origin(origins);
        }
    }

    if cfg.allowed_methods.iter().any(|m| m == "*") {
        layer = layer.allow_methods(Any);
    } else {
        let methods: Vec<Method> = parse_all(&cfg.allowed_methods, "method", |s| s.parse().ok());
        if !methods.is_empty() {
            layer = layer.allow_methods(methods);
        }
    }

    if cfg.allowed_headers.iter().any(|h| h == "*") {
        layer = layer.allow_headers(Any);
    } else {
        let headers: Vec<HeaderName> = parse_all(&cfg.allowed_headers, "header", |s| s.parse().ok());
        if !headers.is_empty() {
            layer = layer.allow_headers(headers);
        }
    }

    if cfg.max_age_seconds > 0 {
        layer = layer.max_age(Duration::from_secs(cfg.max_age_seconds));
    }

    layer
}

fn parse_all<T>(values: &[String], kind: &str, parse: impl Fn(&str) -> Option<T>) -> Vec<T> {
    values
        .iter()
        .filter_map(|v| {
            let parsed = parse(v);
            if parsed.is_none() {
                warn!(value = %v, "ignoring invalid CORS {kind}");
            }
            parsed
        })
        .collect()
}
