//! Typed error type for the state crate.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StateError {
    /// No state exists for the requested run.
    #[error("unknown run: {0}")]
    UnknownRun(Uuid),

    /// The backing store could not be reached.
    #[error("state store unavailable: {0}")]
    Unavailable(String),

    /// The stored workflow definition could not be decoded.
    #[error("corrupt workflow definition for run {run_id}: {message}")]
    CorruptDefinition { run_id: Uuid, message: String },
}
