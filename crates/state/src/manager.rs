//! The `State` and `StateManager` contracts.

use async_trait::async_trait;
use serde_json::Value;
use workflow::Workflow;

use crate::{Identifier, StateError};

/// Read view over one run's accumulated state.
///
/// A `State` is a snapshot taken at load time. The executor re-loads
/// instead of caching a snapshot across its own persistence calls.
pub trait State: Send + Sync {
    /// The workflow definition this run executes.
    fn workflow(&self) -> Result<Workflow, StateError>;

    /// Whether the given step's action completed successfully.
    ///
    /// Only completed steps (and the trigger) unlock outgoing-edge
    /// traversal; a step that failed or is pending asynchronously does not.
    fn action_complete(&self, step_id: &str) -> bool;

    /// Stored output for the given step, if recorded.
    fn action_output(&self, step_id: &str) -> Option<&Value>;

    /// Stored business error for the given step, if recorded.
    fn action_error(&self, step_id: &str) -> Option<&str>;
}

/// Durable store for run state.
///
/// Implementations must allow concurrent, non-conflicting writes to
/// different steps of the same run; the executor performs no locking or
/// compare-and-swap of its own.
#[async_trait]
pub trait StateManager: Send + Sync {
    /// Load the current state of a run.
    async fn load(&self, id: &Identifier) -> Result<Box<dyn State>, StateError>;

    /// Record the output of a step's action, marking the step complete and
    /// clearing any previously recorded error.
    async fn save_action_output(
        &self,
        id: &Identifier,
        step_id: &str,
        output: Value,
    ) -> Result<(), StateError>;

    /// Record a business error reported by a step's action.
    async fn save_action_error(
        &self,
        id: &Identifier,
        step_id: &str,
        error: &str,
    ) -> Result<(), StateError>;
}
