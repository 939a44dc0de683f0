//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup):
//!     Vec<RouteDefinition>
//!     → table.rs (key by root prefix + path, last definition wins)
//!     → Freeze as immutable RouteTable
//!
//! Incoming Request (method, path)
//!     → table.rs (exact path lookup, method check)
//!     → normalizer.rs (repair template into JSON, validate)
//!     → Return: JSON body or DispatchError
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Exact path match only, no parameters
//! - Templates are normalized per request, never cached

pub mod error;
pub mod normalizer;
pub mod table;

pub use error::DispatchError;
pub use normalizer::{fix_json_response, normalize_response};
pub use table::{MockRoute, RouteTable};
