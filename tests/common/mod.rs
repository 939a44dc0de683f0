//! Shared utilities for integration tests.

use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use mock_api_server::config::ServerConfig;
use mock_api_server::lifecycle::{self, Shutdown};
use mock_api_server::MockServer;

/// Write a definition file below `dir`, creating parent directories.
pub fn write_definitions(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// A server running in the background on an ephemeral local port.
pub struct RunningServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
}

impl RunningServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Load routes as `config` describes and serve them on 127.0.0.1:0.
pub async fn start_server(mut config: ServerConfig) -> RunningServer {
    config.listener.host = "127.0.0.1".to_string();
    config.listener.port = 0;

    let routes = lifecycle::load_routes(&config.mock).unwrap();
    let listener = lifecycle::bind(&config.listener).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = MockServer::new(routes, &config.timeouts);
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    RunningServer { addr, shutdown }
}

/// Client without connection pooling or system proxies.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
