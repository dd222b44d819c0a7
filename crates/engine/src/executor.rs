//! Step execution and frontier computation.
//!
//! `Executor` is the composition root of the engine:
//! 1. Loads the run's state from the state store.
//! 2. Dispatches the step's action via the registered runtime driver
//!    (skipped when resuming from the trigger).
//! 3. Reconciles the outcome back into the state store.
//! 4. Computes which outgoing edges are now traversable and returns them.
//!
//! The caller owns what happens next: for every returned edge it decides
//! when and where to call [`Executor::execute`] again, possibly via a
//! queue, from another process after a restart.

use std::collections::HashMap;
use std::sync::Arc;

use actions::ActionLoader;
use driver::{Response, RuntimeDriver};
use state::{Identifier, State, StateManager};
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};
use workflow::{Edge, Graph, Step, Workflow, TRIGGER};

use crate::EngineError;

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

/// Assembles an [`Executor`], validating the configuration once.
///
/// Build refuses to produce an executor without a state manager or action
/// loader, or with two drivers claiming the same runtime tag. Driver
/// registration only happens here; the registry is immutable afterwards,
/// so execution-time lookups need no locking.
#[derive(Default)]
pub struct ExecutorBuilder {
    state: Option<Arc<dyn StateManager>>,
    loader: Option<Arc<dyn ActionLoader>>,
    drivers: Vec<Arc<dyn RuntimeDriver>>,
}

impl ExecutorBuilder {
    /// Set the state store the executor reads and writes run state through.
    pub fn state_manager(mut self, sm: Arc<dyn StateManager>) -> Self {
        self.state = Some(sm);
        self
    }

    /// Set the loader used to resolve step references to definitions.
    pub fn action_loader(mut self, al: Arc<dyn ActionLoader>) -> Self {
        self.loader = Some(al);
        self
    }

    /// Register a runtime driver.
    pub fn driver(mut self, d: Arc<dyn RuntimeDriver>) -> Self {
        self.drivers.push(d);
        self
    }

    /// Validate the configuration and build the executor.
    ///
    /// # Errors
    /// - [`EngineError::NoStateManager`] without a state manager.
    /// - [`EngineError::NoActionLoader`] without an action loader.
    /// - [`EngineError::RuntimeRegistered`] when two drivers share a tag.
    pub fn build(self) -> Result<Executor, EngineError> {
        let state = self.state.ok_or(EngineError::NoStateManager)?;
        let loader = self.loader.ok_or(EngineError::NoActionLoader)?;

        let mut drivers: HashMap<String, Arc<dyn RuntimeDriver>> = HashMap::new();
        for d in self.drivers {
            let tag = d.runtime_type().to_owned();
            if drivers.contains_key(&tag) {
                return Err(EngineError::RuntimeRegistered(tag));
            }
            drivers.insert(tag, d);
        }

        Ok(Executor {
            state,
            loader,
            drivers,
        })
    }
}

// ---------------------------------------------------------------------------
// Executor
// ---------------------------------------------------------------------------

/// Executes single workflow steps and computes the frontier of steps that
/// become runnable afterwards.
///
/// The executor holds no run-scoped state between calls; everything lives
/// in the state store. Concurrent calls for different runs, or for
/// independent branches of the same run, are therefore safe at this layer.
/// Serializing conflicting writes to the same step is the store's duty.
///
/// # Atomicity
///
/// Once a driver invocation has begun, its outcome is persisted before the
/// call returns. The cancellation token is consulted only before dispatch;
/// callers racing shutdown against `execute` must still await the call
/// (spawn it on a task rather than dropping the future), otherwise a
/// branch's outcome can be lost and the workflow ends prematurely.
pub struct Executor {
    state: Arc<dyn StateManager>,
    loader: Arc<dyn ActionLoader>,
    drivers: HashMap<String, Arc<dyn RuntimeDriver>>,
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor")
            .field("drivers", &self.drivers.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl Executor {
    pub fn builder() -> ExecutorBuilder {
        ExecutorBuilder::default()
    }

    /// Execute the step identified by `from` and return the edges now
    /// eligible for scheduling.
    ///
    /// `from` set to [`TRIGGER`] means the run just started: nothing is
    /// dispatched and the initial frontier is returned.
    ///
    /// Exactly one of three outcomes:
    /// - `Ok(edges)`: the complete set of now-traversable edges;
    /// - `Ok(vec![])` with no dispatch error: either the branch terminated
    ///   normally, or the driver scheduled the work asynchronously and the
    ///   frontier is deferred until its result is reconciled out-of-band;
    /// - `Err(_)`: the step failed or a fault occurred; no edges.
    #[instrument(skip(self, cancel), fields(run_id = %id.run_id))]
    pub async fn execute(
        &self,
        cancel: &CancellationToken,
        id: &Identifier,
        from: &str,
    ) -> Result<Vec<Edge>, EngineError> {
        if cancel.is_cancelled() {
            return Err(EngineError::Cancelled(from.to_owned()));
        }

        let state = self.state.load(id).await?;
        let workflow = state.workflow()?;

        if from != TRIGGER {
            let step = workflow
                .step(from)
                .ok_or_else(|| EngineError::UnknownVertex(from.to_owned()))?;

            let response = self.dispatch(id, step).await?;

            if let Some(message) = response.err {
                // The action errored. Its outcome is already recorded in
                // the state store; traversal stops on this branch and the
                // caller applies retry policy.
                warn!(step_id = %from, %message, "action reported failure");
                return Err(EngineError::ActionFailed {
                    step_id: from.to_owned(),
                    message,
                    output: response.output,
                });
            }

            if response.scheduled {
                // Result pending; the children stay locked until the async
                // outcome is reconciled out-of-band.
                info!(step_id = %from, "action scheduled, frontier deferred");
                return Ok(Vec::new());
            }

            info!(step_id = %from, "action completed");
        }

        self.frontier(id, &workflow, from).await
    }

    /// Resolve the step's action, select a driver, run it, and persist the
    /// outcome.
    async fn dispatch(&self, id: &Identifier, step: &Step) -> Result<Response, EngineError> {
        let definition = self
            .loader
            .load(&step.dsn, step.version)
            .await
            .map_err(|source| EngineError::ActionLoad {
                dsn: step.dsn.clone(),
                source,
            })?
            .ok_or_else(|| EngineError::NoActionReturned(step.dsn.clone()))?;

        let driver = self
            .drivers
            .get(definition.runtime_type())
            .ok_or_else(|| EngineError::NoRuntimeDriver(definition.runtime_type().to_owned()))?;

        // Fresh load: other branches may have written since the caller's
        // view was taken.
        let state = self.state.load(id).await?;

        let response = driver
            .execute(state.as_ref(), &definition, step)
            .await
            .map_err(|source| EngineError::Driver {
                step_id: step.client_id.clone(),
                source,
            })?;

        // A scheduled response carries no final result to record; the
        // driver owns async coordination from here and reconciliation
        // happens out-of-band.
        if response.scheduled {
            return Ok(response);
        }

        // Persist the output, then the business error if one was reported.
        // A store failure must not displace the outcome we already hold, so
        // both travel in the returned error.
        let mut save_failures = Vec::new();
        if let Err(e) = self
            .state
            .save_action_output(id, &step.client_id, response.output.clone())
            .await
        {
            save_failures.push(e);
        }
        if let Some(err) = &response.err {
            if let Err(e) = self.state.save_action_error(id, &step.client_id, err).await {
                save_failures.push(e);
            }
        }
        if !save_failures.is_empty() {
            let message = save_failures
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(EngineError::PersistOutcome {
                step_id: step.client_id.clone(),
                message,
                response,
            });
        }

        Ok(response)
    }

    /// Collect the outgoing edges of `from` that are traversable under the
    /// freshly reloaded run state, preserving declaration order.
    async fn frontier(
        &self,
        id: &Identifier,
        workflow: &Workflow,
        from: &str,
    ) -> Result<Vec<Edge>, EngineError> {
        let graph = Graph::build(workflow)?;

        let edges = graph.outgoing(from);
        if edges.is_empty() {
            // No children; the branch terminates normally.
            return Ok(Vec::new());
        }

        // The dispatch above may have changed state; reload before judging
        // traversability.
        let state = self.state.load(id).await?;

        let mut future = Vec::new();
        for edge in edges {
            if can_traverse(state.as_ref(), edge)? {
                future.push(edge.clone());
            }
        }
        Ok(future)
    }
}

/// Whether an edge may be traversed immediately: its outgoing node is the
/// trigger, or the store reports that node's action complete.
///
/// Edges declaring a condition (expression or async wait) are not
/// evaluated; they fail loudly instead of silently passing.
pub(crate) fn can_traverse(state: &dyn State, edge: &Edge) -> Result<bool, EngineError> {
    if edge.condition.is_some() {
        return Err(EngineError::UnsupportedCondition {
            outgoing: edge.outgoing.clone(),
            incoming: edge.incoming.clone(),
        });
    }

    if edge.outgoing != TRIGGER && !state.action_complete(&edge.outgoing) {
        return Ok(false);
    }

    Ok(true)
}
