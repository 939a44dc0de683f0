//! Startup orchestration.
//!
//! # Responsibilities
//! - Load definitions (explicit directory or fallback list)
//! - Build the route table and log every registered route
//! - Bind the listener and hand everything to the HTTP server
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listeners start last (traffic only when ready)

use std::io;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{ListenerConfig, MockConfig, ServerConfig};
use crate::definition::{load_first_available, load_from, DefinitionError};
use crate::http::MockServer;
use crate::lifecycle::Shutdown;
use crate::routing::RouteTable;

/// Fatal errors before or while serving.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("error loading mock definitions: {0}")]
    Definitions(#[from] DefinitionError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] io::Error),
}

/// Load definitions as configured and freeze them into a route table.
pub fn load_routes(config: &MockConfig) -> Result<RouteTable, DefinitionError> {
    let loaded = match &config.directory {
        Some(dir) => load_from(dir, &config.extension)?,
        None => {
            tracing::info!("No mock directory specified, trying fallback locations");
            load_first_available(&config.directories, &config.extension)?
        }
    };

    tracing::info!(
        count = loaded.definitions.len(),
        directory = %loaded.directory.display(),
        "Successfully loaded mock APIs"
    );

    let table = RouteTable::build(loaded.definitions, &config.root_prefix);
    for (path, route) in table.iter() {
        tracing::info!(
            method = %route.method,
            path = %path,
            response = %route.response_template,
            source = %route.source,
            "Registered API"
        );
    }
    Ok(table)
}

/// Bind the TCP listener for the configured host and port.
pub async fn bind(config: &ListenerConfig) -> Result<TcpListener, StartupError> {
    let address = config.bind_address();
    TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind { address, source })
}

/// Load routes, bind and serve until `shutdown` fires or the process is signalled.
pub async fn start(config: ServerConfig, shutdown: &Shutdown) -> Result<(), StartupError> {
    let routes = load_routes(&config.mock)?;
    let listener = bind(&config.listener).await?;
    let local_addr = listener.local_addr().map_err(StartupError::Serve)?;

    tracing::info!(
        address = %local_addr,
        "APIs can be accessed via http://localhost:{}/",
        local_addr.port()
    );

    MockServer::new(routes, &config.timeouts)
        .run(listener, shutdown.subscribe())
        .await
        .map_err(StartupError::Serve)
}
