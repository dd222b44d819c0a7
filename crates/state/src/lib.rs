//! `state` crate — the durable run-state contract and an in-memory store.
//!
//! All cross-call execution state lives behind [`StateManager`]; the
//! executor holds none of its own. Implementations must serialize
//! conflicting writes to the same step. Per-step records are independent,
//! so fan-out branches of one run update without coordination.

pub mod error;
pub mod manager;
pub mod memory;
pub mod models;

pub use error::StateError;
pub use manager::{State, StateManager};
pub use memory::MemoryStateManager;
pub use models::{ActionRecord, Identifier};
