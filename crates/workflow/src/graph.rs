//! Adjacency view over a workflow definition.
//!
//! Rules enforced at build time:
//! 1. Step ids must be unique and must not use the reserved trigger id.
//! 2. Every edge endpoint must reference the trigger or a declared step,
//!    and no edge may enter the trigger.
//! 3. The directed graph must be acyclic.
//!
//! Outgoing edges keep the declaration order of the definition.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::models::{Edge, Workflow, TRIGGER};
use crate::WorkflowError;

/// An immutable adjacency view: node id → outgoing edges.
///
/// Building a [`Graph`] is a pure function of the definition. Callers may
/// rebuild it per traversal or cache it by workflow id; there is no shared
/// mutable state either way.
#[derive(Debug, Clone)]
pub struct Graph {
    edges: Vec<Edge>,
    outgoing: HashMap<String, Vec<usize>>,
}

impl Graph {
    /// Validate the workflow and build its adjacency view.
    ///
    /// # Errors
    /// - [`WorkflowError::DuplicateStepId`] if two steps share an id.
    /// - [`WorkflowError::ReservedStepId`] if a step uses the trigger id.
    /// - [`WorkflowError::UnknownNodeReference`] if an edge references a
    ///   missing node.
    /// - [`WorkflowError::EdgeIntoTrigger`] if an edge targets the trigger.
    /// - [`WorkflowError::CycleDetected`] if the graph is not acyclic.
    pub fn build(workflow: &Workflow) -> Result<Self, WorkflowError> {
        // -------------------------------------------------------------------
        // 1. Ensure step ids are unique and none shadows the trigger
        // -------------------------------------------------------------------
        let mut step_ids: HashSet<&str> = HashSet::new();
        for step in &workflow.steps {
            if step.client_id == TRIGGER {
                return Err(WorkflowError::ReservedStepId(step.client_id.clone()));
            }
            if !step_ids.insert(step.client_id.as_str()) {
                return Err(WorkflowError::DuplicateStepId(step.client_id.clone()));
            }
        }

        // -------------------------------------------------------------------
        // 2. Validate edge endpoints
        // -------------------------------------------------------------------
        for edge in &workflow.edges {
            if edge.outgoing != TRIGGER && !step_ids.contains(edge.outgoing.as_str()) {
                return Err(WorkflowError::UnknownNodeReference {
                    node_id: edge.outgoing.clone(),
                    side: "outgoing",
                });
            }
            if edge.incoming == TRIGGER {
                return Err(WorkflowError::EdgeIntoTrigger(edge.outgoing.clone()));
            }
            if !step_ids.contains(edge.incoming.as_str()) {
                return Err(WorkflowError::UnknownNodeReference {
                    node_id: edge.incoming.clone(),
                    side: "incoming",
                });
            }
        }

        // -------------------------------------------------------------------
        // 3. Acyclicity check (Kahn's algorithm over trigger + steps)
        // -------------------------------------------------------------------
        let mut adjacency: HashMap<&str, Vec<&str>> = HashMap::new();
        let mut in_degree: HashMap<&str, usize> = HashMap::new();

        adjacency.entry(TRIGGER).or_default();
        in_degree.entry(TRIGGER).or_insert(0);
        for step in &workflow.steps {
            adjacency.entry(step.client_id.as_str()).or_default();
            in_degree.entry(step.client_id.as_str()).or_insert(0);
        }

        for edge in &workflow.edges {
            adjacency
                .entry(edge.outgoing.as_str())
                .or_default()
                .push(edge.incoming.as_str());
            *in_degree.entry(edge.incoming.as_str()).or_insert(0) += 1;
        }

        let mut queue: VecDeque<&str> = in_degree
            .iter()
            .filter(|(_, &d)| d == 0)
            .map(|(&id, _)| id)
            .collect();

        let mut visited = 0usize;
        while let Some(node_id) = queue.pop_front() {
            visited += 1;

            if let Some(neighbours) = adjacency.get(node_id) {
                for &neighbour in neighbours {
                    let deg = in_degree.entry(neighbour).or_insert(0);
                    *deg -= 1;
                    if *deg == 0 {
                        queue.push_back(neighbour);
                    }
                }
            }
        }

        // If we didn't visit every node the graph contains a cycle.
        if visited != workflow.steps.len() + 1 {
            return Err(WorkflowError::CycleDetected);
        }

        // -------------------------------------------------------------------
        // Index outgoing edges per node, preserving declaration order
        // -------------------------------------------------------------------
        let mut outgoing: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, edge) in workflow.edges.iter().enumerate() {
            outgoing.entry(edge.outgoing.clone()).or_default().push(idx);
        }

        Ok(Self {
            edges: workflow.edges.clone(),
            outgoing,
        })
    }

    /// Outgoing edges of the given node, in declaration order.
    ///
    /// A node with no outgoing edges yields an empty slice; the branch
    /// terminates there.
    pub fn outgoing(&self, node_id: &str) -> Vec<&Edge> {
        self.outgoing
            .get(node_id)
            .map(|idxs| idxs.iter().map(|&i| &self.edges[i]).collect())
            .unwrap_or_default()
    }
}

// ============================================================
// Unit tests
// ============================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Step, Trigger};

    fn make_step(id: &str) -> Step {
        Step {
            client_id: id.to_string(),
            name: id.to_string(),
            dsn: format!("test/{id}"),
            version: None,
        }
    }

    fn make_workflow(steps: Vec<Step>, edges: Vec<Edge>) -> Workflow {
        Workflow::new("test", Trigger::Manual, steps, edges)
    }

    #[test]
    fn outgoing_edges_preserve_declaration_order() {
        let wf = make_workflow(
            vec![make_step("a"), make_step("b"), make_step("c")],
            vec![
                Edge::new(TRIGGER, "a"),
                Edge::new("a", "c"),
                Edge::new("a", "b"),
            ],
        );

        let graph = Graph::build(&wf).expect("should be valid");
        let from_a: Vec<&str> = graph
            .outgoing("a")
            .iter()
            .map(|e| e.incoming.as_str())
            .collect();

        // 'c' was declared before 'b'; the graph must not reorder.
        assert_eq!(from_a, vec!["c", "b"]);
    }

    #[test]
    fn trigger_edges_are_addressable() {
        let wf = make_workflow(
            vec![make_step("a"), make_step("b")],
            vec![Edge::new(TRIGGER, "a"), Edge::new(TRIGGER, "b")],
        );

        let graph = Graph::build(&wf).expect("should be valid");
        assert_eq!(graph.outgoing(TRIGGER).len(), 2);
        assert!(graph.outgoing("a").is_empty());
    }

    #[test]
    fn diamond_graph_is_valid() {
        //   T
        //   |
        //   a
        //  / \
        // b   c
        //  \ /
        //   d
        let wf = make_workflow(
            vec![make_step("a"), make_step("b"), make_step("c"), make_step("d")],
            vec![
                Edge::new(TRIGGER, "a"),
                Edge::new("a", "b"),
                Edge::new("a", "c"),
                Edge::new("b", "d"),
                Edge::new("c", "d"),
            ],
        );

        let graph = Graph::build(&wf).expect("should be valid");
        assert_eq!(graph.outgoing("a").len(), 2);
        assert!(graph.outgoing("d").is_empty());
    }

    #[test]
    fn duplicate_step_id_is_rejected() {
        let wf = make_workflow(vec![make_step("a"), make_step("a")], vec![]);
        assert!(matches!(
            Graph::build(&wf),
            Err(WorkflowError::DuplicateStepId(id)) if id == "a"
        ));
    }

    #[test]
    fn step_cannot_claim_trigger_id() {
        let wf = make_workflow(vec![make_step(TRIGGER)], vec![]);
        assert!(matches!(
            Graph::build(&wf),
            Err(WorkflowError::ReservedStepId(_))
        ));
    }

    #[test]
    fn edge_referencing_missing_node_is_rejected() {
        let wf = make_workflow(
            vec![make_step("a")],
            vec![Edge::new("a", "ghost")], // ghost doesn't exist
        );
        assert!(matches!(
            Graph::build(&wf),
            Err(WorkflowError::UnknownNodeReference { node_id, .. }) if node_id == "ghost"
        ));
    }

    #[test]
    fn edge_into_trigger_is_rejected() {
        let wf = make_workflow(
            vec![make_step("a")],
            vec![Edge::new("a", TRIGGER)],
        );
        assert!(matches!(
            Graph::build(&wf),
            Err(WorkflowError::EdgeIntoTrigger(from)) if from == "a"
        ));
    }

    #[test]
    fn cycle_is_detected() {
        // a → b → c → a  (cycle!)
        let wf = make_workflow(
            vec![make_step("a"), make_step("b"), make_step("c")],
            vec![
                Edge::new("a", "b"),
                Edge::new("b", "c"),
                Edge::new("c", "a"), // back-edge
            ],
        );
        assert!(matches!(Graph::build(&wf), Err(WorkflowError::CycleDetected)));
    }

    #[test]
    fn single_step_no_edges_is_valid() {
        let wf = make_workflow(vec![make_step("solo")], vec![]);
        let graph = Graph::build(&wf).expect("single step should be valid");
        assert!(graph.outgoing("solo").is_empty());
    }
}
