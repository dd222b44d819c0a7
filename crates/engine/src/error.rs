//! Engine-level error types.

use actions::ActionError;
use driver::{DriverError, Response};
use state::StateError;
use thiserror::Error;
use workflow::WorkflowError;

// ---------------------------------------------------------------------------
// ErrorKind
// ---------------------------------------------------------------------------

/// Broad classification of an [`EngineError`].
///
/// Retry layers branch on the kind rather than on message text:
/// infrastructure faults are usually retried, business failures follow the
/// workflow's own policy, and the remaining kinds point at configuration or
/// definition bugs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The executor was assembled incorrectly.
    Configuration,
    /// The request or the workflow definition is malformed.
    Structural,
    /// The step's action reference could not be resolved to something
    /// runnable.
    Resolution,
    /// A collaborator (driver, state store) failed.
    Infrastructure,
    /// The action ran and reported a domain-level failure.
    Business,
}

// ---------------------------------------------------------------------------
// EngineError
// ---------------------------------------------------------------------------

/// Errors produced by the executor (construction + execution).
#[derive(Debug, Error)]
pub enum EngineError {
    // ------ Configuration errors ------

    /// No state manager was supplied at construction.
    #[error("no state manager provided")]
    NoStateManager,

    /// No action loader was supplied at construction.
    #[error("no action loader provided")]
    NoActionLoader,

    /// Two supplied drivers report the same runtime-type tag.
    #[error("runtime '{0}' is already registered")]
    RuntimeRegistered(String),

    // ------ Structural errors ------

    /// The requested step id does not exist in the loaded workflow.
    #[error("unknown vertex: '{0}'")]
    UnknownVertex(String),

    /// The workflow definition failed graph validation.
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// The edge declares a condition; condition evaluation is not
    /// implemented and never silently passes.
    #[error("edge '{outgoing}' -> '{incoming}' declares a condition; conditional edges are not supported")]
    UnsupportedCondition { outgoing: String, incoming: String },

    /// The caller's cancellation signal fired before dispatch began.
    #[error("execution cancelled before step '{0}' was dispatched")]
    Cancelled(String),

    // ------ Resolution errors ------

    /// The action reference could not be resolved.
    #[error("error loading action '{dsn}': {source}")]
    ActionLoad {
        dsn: String,
        #[source]
        source: ActionError,
    },

    /// Resolution succeeded but yielded nothing.
    #[error("no action returned: '{0}'")]
    NoActionReturned(String),

    /// No driver is registered for the definition's runtime type.
    #[error("runtime driver for action not found: '{0}'")]
    NoRuntimeDriver(String),

    // ------ Infrastructure errors ------

    /// The driver invocation itself failed; nothing was persisted.
    #[error("error executing action '{step_id}': {source}")]
    Driver {
        step_id: String,
        #[source]
        source: DriverError,
    },

    /// A state-store read or write failed.
    #[error("error loading state: {0}")]
    State(#[from] StateError),

    /// The driver produced an outcome but the store refused one or both
    /// writes. Carries the original response so the outcome is not lost
    /// with the failed write.
    #[error("failed to persist outcome of step '{step_id}': {message}")]
    PersistOutcome {
        step_id: String,
        message: String,
        response: Response,
    },

    // ------ Business errors ------

    /// The action completed and reported a failure of its own. The error
    /// has already been recorded in the state store; the caller applies
    /// retry policy.
    #[error("step '{step_id}' failed: {message}")]
    ActionFailed {
        step_id: String,
        message: String,
        output: serde_json::Value,
    },
}

impl EngineError {
    /// The taxonomy bucket this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoStateManager | Self::NoActionLoader | Self::RuntimeRegistered(_) => {
                ErrorKind::Configuration
            }
            Self::UnknownVertex(_)
            | Self::Workflow(_)
            | Self::UnsupportedCondition { .. }
            | Self::Cancelled(_) => ErrorKind::Structural,
            Self::ActionLoad { .. } | Self::NoActionReturned(_) | Self::NoRuntimeDriver(_) => {
                ErrorKind::Resolution
            }
            Self::Driver { .. } | Self::State(_) | Self::PersistOutcome { .. } => {
                ErrorKind::Infrastructure
            }
            Self::ActionFailed { .. } => ErrorKind::Business,
        }
    }
}
