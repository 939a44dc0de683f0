//! Mock definition subsystem.
//!
//! # Data Flow
//! ```text
//! mock directory (or ordered fallback list)
//!     → loader.rs (pick the first directory that yields definitions)
//!     → parser.rs (recursive walk, line scan, quote stripping)
//!     → Vec<RouteDefinition> (consumed once by the route table)
//! ```
//!
//! # Design Decisions
//! - Parsing is synchronous and sequential, it only runs at startup
//! - Malformed lines are warnings, unreadable files are errors
//! - Directory entries are visited in file-name order

pub mod error;
pub mod loader;
pub mod parser;

pub use error::DefinitionError;
pub use loader::{load_first_available, load_from, LoadedDefinitions};
pub use parser::{RouteDefinition, SourceLocation, DEFAULT_EXTENSION, MAX_LINE_BYTES};
