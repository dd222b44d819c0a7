//! `driver` crate — the `RuntimeDriver` contract and test doubles.
//!
//! A driver is a runtime-specific backend that runs actions, eg. a docker
//! driver for container images or an http driver for remote endpoints.
//! The engine crate dispatches every action through this trait object.

pub mod error;
pub mod mock;
pub mod traits;

pub use error::DriverError;
pub use mock::{MockBehaviour, MockDriver};
pub use traits::{Response, RuntimeDriver};
