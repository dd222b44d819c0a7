//! Core domain models for workflow definitions.
//!
//! These types are the source of truth for what a workflow looks like in
//! memory. They serialise to/from the JSON `definition` payload owned by
//! whatever store persists workflows.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reserved node id of the synthetic root of every workflow DAG.
///
/// The trigger is not a [`Step`]; it stands for the initiating event and has
/// no incoming edges. Edges whose outgoing end is [`TRIGGER`] form the
/// initial frontier of a run.
pub const TRIGGER: &str = "$trigger";

// ---------------------------------------------------------------------------
// Trigger
// ---------------------------------------------------------------------------

/// How a workflow run is started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Trigger {
    /// Started when a named event is received.
    Event { name: String },
    /// Started on a cron schedule.
    Cron {
        /// Standard cron expression (5 fields).
        expression: String,
    },
    /// Started manually via an API call.
    Manual,
}

// ---------------------------------------------------------------------------
// Step
// ---------------------------------------------------------------------------

/// A single executable node in the workflow graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Unique identifier within this workflow (referenced by edges).
    pub client_id: String,
    /// Human-readable label.
    pub name: String,
    /// Source descriptor of the action this step runs.
    pub dsn: String,
    /// Pinned action version; `None` resolves to the latest.
    pub version: Option<u32>,
}

// ---------------------------------------------------------------------------
// Edge
// ---------------------------------------------------------------------------

/// Optional guard declared on an [`Edge`].
///
/// Declared for compatibility with the definition format; evaluation is not
/// implemented. Traversal reports a conditional edge as unsupported rather
/// than treating it as always-true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EdgeCondition {
    /// Traverse only if the expression holds against run state.
    Expression { expression: String },
    /// Traverse when a matching event arrives within the TTL.
    AsyncWait { event: String, ttl_secs: u64 },
}

/// Directed edge from one node to another.
///
/// The outgoing end must be fully resolved (the trigger, or a step whose
/// action completed) before the edge becomes traversable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub outgoing: String,
    pub incoming: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<EdgeCondition>,
}

impl Edge {
    /// Plain unconditional edge.
    pub fn new(outgoing: impl Into<String>, incoming: impl Into<String>) -> Self {
        Self {
            outgoing: outgoing.into(),
            incoming: incoming.into(),
            condition: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Workflow
// ---------------------------------------------------------------------------

/// A complete workflow definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workflow {
    pub id: Uuid,
    pub name: String,
    pub trigger: Trigger,
    pub steps: Vec<Step>,
    pub edges: Vec<Edge>,
}

impl Workflow {
    /// Convenience constructor with a fresh id.
    pub fn new(
        name: impl Into<String>,
        trigger: Trigger,
        steps: Vec<Step>,
        edges: Vec<Edge>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            trigger,
            steps,
            edges,
        }
    }

    /// Look up a step by its client id.
    pub fn step(&self, client_id: &str) -> Option<&Step> {
        self.steps.iter().find(|s| s.client_id == client_id)
    }
}
