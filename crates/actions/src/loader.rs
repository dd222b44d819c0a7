//! The `ActionLoader` trait — resolution of step references to definitions.

use async_trait::async_trait;

use crate::{ActionDefinition, ActionError};

/// Resolves a step's action reference (dsn + version) to a runnable
/// definition.
///
/// `Ok(None)` means the reference resolved to nothing; whether that is
/// fatal is the caller's decision.
#[async_trait]
pub trait ActionLoader: Send + Sync {
    /// Load the definition for `dsn` at `version`, or the latest available
    /// version when `version` is `None`.
    async fn load(
        &self,
        dsn: &str,
        version: Option<u32>,
    ) -> Result<Option<ActionDefinition>, ActionError>;
}
