//! Driver-level error type.

use thiserror::Error;

/// Infrastructure faults raised by a driver invocation.
///
/// A `DriverError` means the execution pipeline itself broke. An action
/// that ran and failed on its own terms reports that through
/// [`Response::err`](crate::Response::err) instead; the executor persists
/// nothing when the invocation errors.
#[derive(Debug, Error)]
pub enum DriverError {
    /// The backend could not be reached or dropped the connection.
    #[error("driver transport failure: {0}")]
    Transport(String),

    /// The driver rejected the definition before running it.
    #[error("unsupported action definition: {0}")]
    UnsupportedDefinition(String),
}
