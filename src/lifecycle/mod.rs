//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load definitions → Build route table → Bind listener → Serve
//!
//! Shutdown (shutdown.rs):
//!     Trigger or OS signal → Stop accepting → Drain in-flight requests → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Fail fast: a startup error is fatal
//! - The listener binds last, traffic only arrives once routes are loaded

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{bind, load_routes, start, StartupError};
