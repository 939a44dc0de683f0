//! Static mock API server library.
//!
//! Reads `.api` definition files (`<METHOD> <PATH> <RESPONSE>` per line)
//! and serves their loosely written JSON responses, repaired into valid
//! JSON, over HTTP.

pub mod cli;
pub mod config;
pub mod definition;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::ServerConfig;
pub use http::MockServer;
pub use lifecycle::Shutdown;
pub use routing::RouteTable;
