//! `MockDriver` — a test double for `RuntimeDriver`.
//!
//! Useful in unit and integration tests where a real execution backend is
//! either unavailable or irrelevant.

use std::sync::{Arc, Mutex};

use actions::ActionDefinition;
use async_trait::async_trait;
use serde_json::Value;
use state::State;
use workflow::Step;

use crate::{DriverError, Response, RuntimeDriver};

/// Behaviour injected into `MockDriver` at construction time.
pub enum MockBehaviour {
    /// Complete synchronously with the given output.
    Complete(Value),
    /// Complete with a business error; the output is still produced.
    FailBusiness(Value, String),
    /// Accept the work asynchronously; the result stays pending.
    Schedule,
    /// Fail the invocation itself with a transport error.
    FailTransport(String),
}

/// A mock driver that records every step it is asked to run and returns a
/// programmer-specified outcome.
pub struct MockDriver {
    runtime_type: String,
    behaviour: MockBehaviour,
    /// Client ids of all steps executed, in call order.
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockDriver {
    pub fn new(runtime_type: impl Into<String>, behaviour: MockBehaviour) -> Self {
        Self {
            runtime_type: runtime_type.into(),
            behaviour,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A mock that always completes with the given output.
    pub fn completing(runtime_type: impl Into<String>, output: Value) -> Self {
        Self::new(runtime_type, MockBehaviour::Complete(output))
    }

    /// A mock that always completes with a business error.
    pub fn failing(
        runtime_type: impl Into<String>,
        output: Value,
        err: impl Into<String>,
    ) -> Self {
        Self::new(runtime_type, MockBehaviour::FailBusiness(output, err.into()))
    }

    /// A mock that always accepts the work asynchronously.
    pub fn scheduling(runtime_type: impl Into<String>) -> Self {
        Self::new(runtime_type, MockBehaviour::Schedule)
    }

    /// A mock whose invocation always fails with a transport error.
    pub fn erroring(runtime_type: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::new(runtime_type, MockBehaviour::FailTransport(msg.into()))
    }

    /// Number of times this driver has been invoked.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Client ids of all executed steps, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RuntimeDriver for MockDriver {
    fn runtime_type(&self) -> &str {
        &self.runtime_type
    }

    async fn execute(
        &self,
        _state: &dyn State,
        _definition: &ActionDefinition,
        step: &Step,
    ) -> Result<Response, DriverError> {
        self.calls.lock().unwrap().push(step.client_id.clone());

        match &self.behaviour {
            MockBehaviour::Complete(output) => Ok(Response::complete(output.clone())),
            MockBehaviour::FailBusiness(output, err) => {
                Ok(Response::failed(output.clone(), err.clone()))
            }
            MockBehaviour::Schedule => Ok(Response::pending()),
            MockBehaviour::FailTransport(msg) => Err(DriverError::Transport(msg.clone())),
        }
    }
}
