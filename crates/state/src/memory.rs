//! In-memory state manager.
//!
//! Backs tests and single-process embeddings; production deployments swap
//! in a store backed by a real database behind the same [`StateManager`]
//! contract. Workflow definitions are held as JSON, the same shape a
//! database column would hold.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;
use workflow::Workflow;

use crate::{ActionRecord, Identifier, State, StateError, StateManager};

// ---------------------------------------------------------------------------
// MemoryStateManager
// ---------------------------------------------------------------------------

struct RunData {
    definition: Value,
    actions: HashMap<String, ActionRecord>,
}

/// A [`StateManager`] backed by a process-local map.
#[derive(Default)]
pub struct MemoryStateManager {
    runs: RwLock<HashMap<Uuid, RunData>>,
}

impl MemoryStateManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed state for a new run.
    ///
    /// Run creation happens outside the executor; tests and embedding
    /// callers use this directly.
    pub fn insert_run(&self, id: &Identifier, workflow: &Workflow) -> Result<(), StateError> {
        let definition =
            serde_json::to_value(workflow).map_err(|e| StateError::CorruptDefinition {
                run_id: id.run_id,
                message: e.to_string(),
            })?;

        self.runs.write().unwrap().insert(
            id.run_id,
            RunData {
                definition,
                actions: HashMap::new(),
            },
        );
        Ok(())
    }
}

#[async_trait]
impl StateManager for MemoryStateManager {
    async fn load(&self, id: &Identifier) -> Result<Box<dyn State>, StateError> {
        let runs = self.runs.read().unwrap();
        let run = runs
            .get(&id.run_id)
            .ok_or(StateError::UnknownRun(id.run_id))?;

        Ok(Box::new(MemoryState {
            run_id: id.run_id,
            definition: run.definition.clone(),
            actions: run.actions.clone(),
        }))
    }

    async fn save_action_output(
        &self,
        id: &Identifier,
        step_id: &str,
        output: Value,
    ) -> Result<(), StateError> {
        let mut runs = self.runs.write().unwrap();
        let run = runs
            .get_mut(&id.run_id)
            .ok_or(StateError::UnknownRun(id.run_id))?;

        debug!(run_id = %id.run_id, %step_id, "saving action output");
        let record = run.actions.entry(step_id.to_owned()).or_insert(ActionRecord {
            output: None,
            error: None,
            saved_at: Utc::now(),
        });
        record.output = Some(output);
        // A successful save completes the step; an error from an earlier
        // attempt no longer applies.
        record.error = None;
        record.saved_at = Utc::now();
        Ok(())
    }

    async fn save_action_error(
        &self,
        id: &Identifier,
        step_id: &str,
        error: &str,
    ) -> Result<(), StateError> {
        let mut runs = self.runs.write().unwrap();
        let run = runs
            .get_mut(&id.run_id)
            .ok_or(StateError::UnknownRun(id.run_id))?;

        debug!(run_id = %id.run_id, %step_id, "saving action error");
        let record = run.actions.entry(step_id.to_owned()).or_insert(ActionRecord {
            output: None,
            error: None,
            saved_at: Utc::now(),
        });
        record.error = Some(error.to_owned());
        record.saved_at = Utc::now();
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// MemoryState
// ---------------------------------------------------------------------------

/// Snapshot returned by [`MemoryStateManager::load`].
struct MemoryState {
    run_id: Uuid,
    definition: Value,
    actions: HashMap<String, ActionRecord>,
}

impl State for MemoryState {
    fn workflow(&self) -> Result<Workflow, StateError> {
        serde_json::from_value(self.definition.clone()).map_err(|e| {
            StateError::CorruptDefinition {
                run_id: self.run_id,
                message: e.to_string(),
            }
        })
    }

    fn action_complete(&self, step_id: &str) -> bool {
        self.actions
            .get(step_id)
            .map(|r| r.output.is_some() && r.error.is_none())
            .unwrap_or(false)
    }

    fn action_output(&self, step_id: &str) -> Option<&Value> {
        self.actions.get(step_id).and_then(|r| r.output.as_ref())
    }

    fn action_error(&self, step_id: &str) -> Option<&str> {
        self.actions.get(step_id).and_then(|r| r.error.as_deref())
    }
}
