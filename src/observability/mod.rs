//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (startup, parsing, dispatch)
//!     → HTTP spans from tower-http TraceLayer
//!
//! Consumers:
//!     → logging.rs subscriber (stdout, pretty or JSON)
//! ```
//!
//! # Design Decisions
//! - Structured fields instead of interpolated messages
//! - Request ID is a field on every dispatch event

pub mod logging;

pub use logging::{default_filter, init_tracing};
