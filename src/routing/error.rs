//! Per-request dispatch failures.

use thiserror::Error;

/// Why a request could not be answered with its mock response.
///
/// Every variant is request-scoped and maps to one HTTP status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// No definition is registered for the path.
    #[error("no mock route registered for this path")]
    RouteNotFound,

    /// The path exists but was declared with another method.
    #[error("method not allowed, expected {expected}")]
    MethodNotAllowed { expected: String },

    /// The repaired template is still not valid JSON.
    #[error("response is not valid JSON after repair: {repaired}")]
    ResponseInvalid { repaired: String },
}
