//! Static mock API server.
//!
//! # Architecture Overview
//!
//! ```text
//!   *.api files ──▶ definition ──▶ routing::table ──▶ http::server ──▶ client
//!                   (parse,        (path → method,     (axum, request
//!                    fallback)      template)           id, tracing)
//!                                        │
//!                                        ▼
//!                               routing::normalizer
//!                               (repair into JSON,
//!                                once per request)
//! ```

use std::process::ExitCode;

use clap::Parser;

use mock_api_server::cli::Cli;
use mock_api_server::lifecycle::{self, Shutdown};
use mock_api_server::observability::init_tracing;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match cli.resolve_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("mock-api-server: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        port = config.listener.port,
        "Starting mock API server"
    );

    let shutdown = Shutdown::new();
    match lifecycle::start(config, &shutdown).await {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Fatal error");
            ExitCode::FAILURE
        }
    }
}
