//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router around the immutable route table
//! - Wire up middleware (request ID, tracing, timeout)
//! - Dispatch every request to the route table
//! - Serve until a shutdown signal arrives

use axum::{
    extract::State,
    http::{HeaderMap, Method, Uri},
    response::{IntoResponse, Response},
    Router,
};
use percent_encoding::percent_decode_str;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::TimeoutConfig;
use crate::http::request::{request_id, MakeRequestUuidV4};
use crate::http::response::json_body;
use crate::lifecycle::signals::shutdown_signal;
use crate::routing::{DispatchError, RouteTable};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
}

/// HTTP server for the mock API.
pub struct MockServer {
    router: Router,
    routes: Arc<RouteTable>,
}

impl MockServer {
    /// Create a new server serving `routes`.
    pub fn new(routes: RouteTable, timeouts: &TimeoutConfig) -> Self {
        let routes = Arc::new(routes);
        let state = AppState {
            routes: routes.clone(),
        };
        let router = Self::build_router(timeouts, state);
        Self { router, routes }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(timeouts: &TimeoutConfig, state: AppState) -> Router {
        Router::new()
            .fallback(dispatch_handler)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(TimeoutLayer::new(Duration::from_secs(timeouts.request_secs))),
            )
    }

    /// The router, for driving requests without a listener.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server on `listener` until `shutdown` fires or the process
    /// receives Ctrl+C / SIGTERM.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.routes.len(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = shutdown.recv() => tracing::info!("Shutdown requested"),
                    _ = shutdown_signal() => {}
                }
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Single handler for every request: exact path lookup in the route table.
///
/// The path is percent-decoded first, so `/caf%C3%A9` finds a route declared
/// as `café`. A path that does not decode to UTF-8 is a 404.
async fn dispatch_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let request_id = request_id(&headers);
    let path = match percent_decode_str(uri.path()).decode_utf8() {
        Ok(path) => path,
        Err(_) => {
            tracing::debug!(
                request_id = %request_id,
                path = %uri.path(),
                "Request path is not valid UTF-8"
            );
            return DispatchError::RouteNotFound.into_response();
        }
    };
    let path: &str = &path;

    match state.routes.resolve(method.as_str(), path) {
        Ok(body) => {
            tracing::info!(
                request_id = %request_id,
                method = %method,
                path = %path,
                "Request successful"
            );
            json_body(body)
        }
        Err(err) => {
            match &err {
                DispatchError::RouteNotFound => {
                    tracing::debug!(request_id = %request_id, path = %path, "No route matched");
                }
                DispatchError::MethodNotAllowed { expected } => {
                    tracing::warn!(
                        request_id = %request_id,
                        method = %method,
                        expected = %expected,
                        path = %path,
                        "Method not allowed"
                    );
                }
                DispatchError::ResponseInvalid { repaired } => {
                    tracing::error!(
                        request_id = %request_id,
                        path = %path,
                        body = %repaired,
                        "Cannot fix invalid JSON"
                    );
                }
            }
            err.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::{RouteDefinition, SourceLocation};
    use crate::http::X_REQUEST_ID;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use rstest::rstest;
    use std::path::PathBuf;
    use tower::ServiceExt;

    fn server(lines: &[(&str, &str, &str)]) -> MockServer {
        let definitions = lines.iter().enumerate().map(|(i, (method, path, response))| {
            RouteDefinition {
                method: method.to_string(),
                path: path.to_string(),
                response_template: response.to_string(),
                source: SourceLocation {
                    file: PathBuf::from("test.api"),
                    line: i + 1,
                },
            }
        });
        MockServer::new(RouteTable::build(definitions, "/"), &TimeoutConfig::default())
    }

    async fn send(server: &MockServer, method: Method, uri: &str) -> Response {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        server.router().oneshot(request).await.unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_get_returns_normalized_json() {
        let server = server(&[("GET", "users", "{name: Bob}")]);
        let response = send(&server, Method::GET, "/users").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        assert!(response.headers().contains_key(X_REQUEST_ID));
        assert_eq!(body_text(response).await, r#"{"name": "Bob"}"#);
    }

    #[tokio::test]
    async fn test_wrong_method_is_405() {
        let server = server(&[("GET", "users", "{name: Bob}")]);
        let response = send(&server, Method::POST, "/users").await;

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            body_text(response).await,
            "Method not allowed, expected: GET"
        );
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let server = server(&[("GET", "users", "{name: Bob}")]);
        let response = send(&server, Method::GET, "/orders").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_query_string_is_ignored() {
        let server = server(&[("GET", "users", "{name: Bob}")]);
        let response = send(&server, Method::GET, "/users?page=2").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_invalid_template_is_500() {
        let server = server(&[("GET", "tags", "{tags: [a, b]}")]);
        let response = send(&server, Method::GET, "/tags").await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_text(response).await,
            "Server error: Invalid JSON response"
        );
    }

    #[tokio::test]
    async fn test_one_bad_route_does_not_affect_others() {
        let server = server(&[
            ("GET", "tags", "{tags: [a, b]}"),
            ("GET", "users", "{name: Bob}"),
        ]);
        assert_eq!(
            send(&server, Method::GET, "/tags").await.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            send(&server, Method::GET, "/users").await.status(),
            StatusCode::OK
        );
    }

    #[rstest]
    #[case("/caf%C3%A9")]
    #[case("/caf%c3%a9")]
    #[tokio::test]
    async fn test_percent_encoded_path_is_decoded(#[case] uri: &str) {
        let server = server(&[("GET", "café", "{name: Bob}")]);
        let response = send(&server, Method::GET, uri).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, r#"{"name": "Bob"}"#);
    }

    #[tokio::test]
    async fn test_declared_path_is_not_decoded() {
        let server = server(&[("GET", "a%20b", "{x: 1}")]);
        assert_eq!(
            send(&server, Method::GET, "/a%20b").await.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn test_path_not_utf8_is_404() {
        let server = server(&[("GET", "users", "{name: Bob}")]);
        let response = send(&server, Method::GET, "/%FF").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_client_request_id_is_propagated() {
        let server = server(&[("GET", "users", "{name: Bob}")]);
        let request = Request::builder()
            .uri("/users")
            .header(X_REQUEST_ID, "client-id-1")
            .body(Body::empty())
            .unwrap();
        let response = server.router().oneshot(request).await.unwrap();
        assert_eq!(response.headers()[X_REQUEST_ID], "client-id-1");
    }
}
