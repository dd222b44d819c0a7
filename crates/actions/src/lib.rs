//! `actions` crate — runnable action definitions and their resolution.
//!
//! A workflow step carries only a reference (dsn + version); an
//! [`ActionLoader`] resolves that reference to an [`ActionDefinition`],
//! whose runtime tag selects the driver that will run it.

pub mod error;
pub mod loader;
pub mod memory;
pub mod models;

pub use error::ActionError;
pub use loader::ActionLoader;
pub use memory::MemoryLoader;
pub use models::{ActionDefinition, Runtime};
