//! The `RuntimeDriver` trait — the contract every execution backend must
//! fulfil.

use actions::ActionDefinition;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use state::State;
use workflow::Step;

use crate::DriverError;

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

/// Outcome of one driver invocation.
///
/// Ephemeral: produced and consumed within a single execute call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    /// Output payload produced by the action.
    pub output: Value,
    /// Business error reported by the action. The action ran and failed on
    /// its own terms; pipeline faults are [`DriverError`]s instead.
    pub err: Option<String>,
    /// The driver accepted the work but the final result will arrive
    /// out-of-band later. Nothing is persisted for a scheduled response.
    pub scheduled: bool,
}

impl Response {
    /// A synchronously completed action.
    pub fn complete(output: Value) -> Self {
        Self {
            output,
            err: None,
            scheduled: false,
        }
    }

    /// A synchronously failed action.
    pub fn failed(output: Value, err: impl Into<String>) -> Self {
        Self {
            output,
            err: Some(err.into()),
            scheduled: false,
        }
    }

    /// Work accepted asynchronously; the result is pending.
    pub fn pending() -> Self {
        Self {
            output: Value::Null,
            err: None,
            scheduled: true,
        }
    }
}

// ---------------------------------------------------------------------------
// RuntimeDriver
// ---------------------------------------------------------------------------

/// The core driver trait.
///
/// The executor selects a driver by matching a definition's runtime-type
/// tag against the registry built at construction.
///
/// Drivers must not block the calling task indefinitely: either complete
/// synchronously, or return promptly with a scheduled [`Response`] and
/// coordinate the asynchronous result out-of-band.
#[async_trait]
pub trait RuntimeDriver: Send + Sync {
    /// Registry key this driver serves.
    fn runtime_type(&self) -> &str;

    /// Run the action for `step` as resolved by `definition`, against the
    /// run state loaded for this dispatch.
    async fn execute(
        &self,
        state: &dyn State,
        definition: &ActionDefinition,
        step: &Step,
    ) -> Result<Response, DriverError>;
}
