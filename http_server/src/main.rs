//! Main entry point for the HTTP server binary

use anyhow::{Context, Result};
use core_lib::{
    config::{LogFormat, LoggingConfig},
    create_app_with_config, run_server, AppConfig, AppState,
};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;

    init_tracing(&config.logging);

    info!("Configuration loaded successfully");
    info!("Server will bind to: {}", config.bind_address());

    let addr = config.socket_addr()?;

    let state = AppState::from_config(&config);
    info!("App: {} v{}", state.app_name, state.version);
    info!(
        "Fault injection: {}",
        if state.submissions.fault_injection().is_enabled() {
            format!("enabled (sentinel \"{}\")", config.submission.fault_sentinel)
        } else {
            "disabled".to_string()
        }
    );

    let app = create_app_with_config(state, &config);

    run_server(app, addr).await?;

    info!("Server shutdown complete");
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "{crate_name}={level},core_lib={level},submission={level},tower_http=debug",
            crate_name = env!("CARGO_CRATE_NAME").replace('-', "_"),
            level = logging.level,
        )
        .into()
    });

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    let is_json = logging.format == LogFormat::Json
        || std::env::var("LOG_FORMAT")
            .map(|v| v.to_lowercase() == "json")
            .unwrap_or(false);

    if is_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.pretty())
            .init();
    }
}
