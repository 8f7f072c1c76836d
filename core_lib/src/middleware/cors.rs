//! CORS (Cross-Origin Resource Sharing) middleware configuration

use crate::config::CorsConfig;
use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

const MAX_AGE: std::time::Duration = std::time::Duration::from_secs(3600);

pub fn cors_layer_from_config(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(MAX_AGE);

    if config.allowed_origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    layer.allow_origin(origins)
}
