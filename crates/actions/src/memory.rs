//! In-memory action loader.
//!
//! Backs tests and single-process embeddings. Definitions are registered up
//! front, before the loader is shared with an executor; there is no
//! registration after that point.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;

use crate::{ActionDefinition, ActionError, ActionLoader};

/// An [`ActionLoader`] backed by a process-local map.
#[derive(Debug, Default)]
pub struct MemoryLoader {
    // dsn → version → definition; BTreeMap so `None` resolves to the
    // highest registered version.
    actions: HashMap<String, BTreeMap<u32, ActionDefinition>>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition under its dsn and version, replacing any
    /// earlier definition with the same pair.
    pub fn add(&mut self, definition: ActionDefinition) {
        self.actions
            .entry(definition.dsn.clone())
            .or_default()
            .insert(definition.version, definition);
    }
}

#[async_trait]
impl ActionLoader for MemoryLoader {
    async fn load(
        &self,
        dsn: &str,
        version: Option<u32>,
    ) -> Result<Option<ActionDefinition>, ActionError> {
        let Some(versions) = self.actions.get(dsn) else {
            return Ok(None);
        };

        let found = match version {
            Some(v) => versions.get(&v),
            None => versions.values().next_back(),
        };

        Ok(found.cloned())
    }
}
