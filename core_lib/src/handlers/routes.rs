//! Route table

use super::{health::handle_health, submit::handle_submit};
use crate::{error::AppError, AppState};
use axum::{
    extract::OriginalUri,
    http::Method,
    routing::{get, post},
    Router,
};

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/submit",
            post(handle_submit).fallback(handle_method_not_allowed),
        )
        .route(
            "/health",
            get(handle_health).fallback(handle_method_not_allowed),
        )
        .fallback(handle_not_found)
}

async fn handle_not_found(OriginalUri(uri): OriginalUri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

async fn handle_method_not_allowed(method: Method, OriginalUri(uri): OriginalUri) -> AppError {
    AppError::MethodNotAllowed(format!("{} {}", method, uri.path()))
}
