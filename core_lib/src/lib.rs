//! Core library containing the submission pipeline and route handlers for the HTTP server.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod request_log;
pub mod submission;

pub use config::AppConfig;
pub use error::{AppError, Result};
pub use handlers::routes::create_routes;
pub use middleware::cors::cors_layer_from_config;
pub use middleware::logging::logging_layer;
pub use request_log::{MemoryRequestLog, RequestLog, TracingRequestLog};
pub use submission::{
    FaultInjection, IncomingRequest, RequestBody, SubmissionError, SubmissionHandler,
    SubmissionRequest, SubmissionResponse,
};

use axum::{extract::DefaultBodyLimit, Router};
use std::net::SocketAddr;
use tokio::signal;
use tracing::info;

#[derive(Clone, Debug)]
pub struct AppState {
    pub app_name: String,
    pub version: String,
    pub submissions: SubmissionHandler,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            app_name: "Submission Server".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            submissions: SubmissionHandler::default(),
        }
    }
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Self {
        Self::default().with_submission_handler(SubmissionHandler::from_config(&config.submission))
    }

    pub fn with_submission_handler(mut self, submissions: SubmissionHandler) -> Self {
        self.submissions = submissions;
        self
    }
}

pub fn create_app(state: AppState) -> Router {
    create_app_with_config(state, &AppConfig::default())
}

pub fn create_app_with_config(state: AppState, config: &AppConfig) -> Router {
    Router::new()
        .merge(create_routes())
        .layer(DefaultBodyLimit::max(config.server.max_body_bytes))
        .layer(cors_layer_from_config(&config.cors))
        .layer(logging_layer())
        .with_state(state)
}

pub async fn run_server(app: Router, addr: SocketAddr) -> Result<()> {
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
