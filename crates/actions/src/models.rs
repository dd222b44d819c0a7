//! Action definition models.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Runtime
// ---------------------------------------------------------------------------

/// The runtime a resolved action executes on.
///
/// The tag doubles as the key the executor uses to select a registered
/// driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Runtime {
    /// A container image run by a container driver.
    Docker { image: String },
    /// A remote endpoint invoked over HTTP.
    Http { url: String },
}

impl Runtime {
    /// Registry key for driver lookup.
    pub fn runtime_type(&self) -> &'static str {
        match self {
            Self::Docker { .. } => "docker",
            Self::Http { .. } => "http",
        }
    }
}

// ---------------------------------------------------------------------------
// ActionDefinition
// ---------------------------------------------------------------------------

/// A resolved, runnable action definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionDefinition {
    /// Source descriptor this definition was resolved from.
    pub dsn: String,
    /// Human-readable label.
    pub name: String,
    /// Version of this definition.
    pub version: u32,
    /// Runtime the action executes on.
    pub runtime: Runtime,
}

impl ActionDefinition {
    /// The runtime-type tag the executor dispatches on.
    pub fn runtime_type(&self) -> &'static str {
        self.runtime.runtime_type()
    }
}
