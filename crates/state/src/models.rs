//! Run-scoped persistence models.
//!
//! These are *persistence* shapes — they carry no traversal behaviour.
//! Domain types live in the `workflow` crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Identifier
// ---------------------------------------------------------------------------

/// Unique key of one running workflow instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier {
    pub run_id: Uuid,
    pub workflow_id: Uuid,
}

impl Identifier {
    pub fn new(run_id: Uuid, workflow_id: Uuid) -> Self {
        Self {
            run_id,
            workflow_id,
        }
    }
}

// ---------------------------------------------------------------------------
// ActionRecord
// ---------------------------------------------------------------------------

/// The stored outcome of one dispatched step.
///
/// Output and error accrue through separate store writes; a step is
/// complete when an output is present and no error is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Output payload returned by the driver, once recorded.
    pub output: Option<serde_json::Value>,
    /// Business error reported by the action, if any.
    pub error: Option<String>,
    /// When this record was last written.
    pub saved_at: DateTime<Utc>,
}
