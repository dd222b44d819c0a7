//! `workflow` crate — immutable workflow definitions and the adjacency view
//! used for traversal.
//!
//! A [`Workflow`] is defined once and read-only thereafter. The [`Graph`]
//! built from it answers "outgoing edges of node X" during execution.

pub mod error;
pub mod graph;
pub mod models;

pub use error::WorkflowError;
pub use graph::Graph;
pub use models::{Edge, EdgeCondition, Step, Trigger, Workflow, TRIGGER};
