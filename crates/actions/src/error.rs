//! Action resolution error type.

use thiserror::Error;

/// Errors returned by an [`ActionLoader`](crate::ActionLoader).
///
/// "Reference resolved to nothing" is not an error at this layer; loaders
/// return `Ok(None)` and the caller decides.
#[derive(Debug, Error)]
pub enum ActionError {
    /// The backing registry could not be reached.
    #[error("action registry unavailable: {0}")]
    Unavailable(String),

    /// The stored definition could not be decoded.
    #[error("malformed action definition for '{dsn}': {message}")]
    Malformed { dsn: String, message: String },
}
