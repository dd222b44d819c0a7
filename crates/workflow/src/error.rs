//! Definition-level error type.

use thiserror::Error;

/// Errors raised while validating a workflow definition into a [`Graph`].
///
/// [`Graph`]: crate::Graph
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Two or more steps share the same client id.
    #[error("duplicate step id: '{0}'")]
    DuplicateStepId(String),

    /// A step claims the id reserved for the trigger.
    #[error("step id '{0}' is reserved for the trigger")]
    ReservedStepId(String),

    /// An edge references a node id that is neither the trigger nor a step.
    #[error("edge references unknown node '{node_id}' ({side} side)")]
    UnknownNodeReference {
        node_id: String,
        side: &'static str,
    },

    /// An edge points into the trigger.
    #[error("edge from '{0}' enters the trigger, which has no incoming edges")]
    EdgeIntoTrigger(String),

    /// The graph is not acyclic.
    #[error("workflow graph contains a cycle")]
    CycleDetected,
}
