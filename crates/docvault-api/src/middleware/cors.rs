//! CORS layer configuration.

use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowOrigin, Any, CorsLayer};

use docvault_core::config::CorsConfig;

/// Builds a CORS tower layer from configuration. Entries that fail to parse
/// are skipped.
pub fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let wildcard = |values: &[String]| values.iter().any(|v| v == "*");

    let origins = if wildcard(&config.allowed_origins) {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            config
                .allowed_origins
                .iter()
                .filter_map(|o| o.parse::<HeaderValue>().ok()),
        )
    };

    let methods: Vec<Method> = config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();

    let headers = if wildcard(&config.allowed_headers) {
        AllowHeaders::any()
    } else {
        AllowHeaders::list(
            config
                .allowed_headers
                .iter()
                .filter_map(|h| h.parse::<HeaderName>().ok()),
        )
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(methods)
        .allow_headers(headers)
        .expose_headers(Any)
        .max_age(Duration::from_secs(config.max_age_seconds))
}
