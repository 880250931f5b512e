//! Input validation for assignment scenarios.
//!
//! Checks structural integrity of a scenario once, at construction.
//! Detects:
//! - Empty agent or target sets
//! - Action-set entries outside the target range
//! - Negative or non-finite target values
//! - Graph edges outside the agent range, self-loops, edges against the
//!   decision order, and cycles (DAG validation)
//!
//! The decision procedures assume these checks have passed and do not
//! re-check them per decision.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{InfoGraph, TargetId};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// Scenario has no agents.
    NoAgents,
    /// Scenario has no targets.
    NoTargets,
    /// An action set references a target that doesn't exist.
    TargetOutOfRange,
    /// A target value is negative, NaN, or infinite.
    InvalidTargetValue,
    /// Graph was built for a different number of agents.
    AgentCountMismatch,
    /// An edge references an agent that doesn't exist.
    AgentOutOfRange,
    /// An agent sends to itself.
    SelfLoop,
    /// An edge points from a later decision to an earlier one.
    OrderViolation,
    /// The graph contains a cycle.
    CyclicGraph,
}

impl ValidationErrorKind {
    /// Whether this kind concerns the information graph.
    pub fn is_graph_error(self) -> bool {
        matches!(
            self,
            Self::AgentOutOfRange | Self::SelfLoop | Self::OrderViolation | Self::CyclicGraph
        )
    }
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates action sets and target values.
///
/// Checks:
/// 1. At least one agent
/// 2. At least one target
/// 3. Every target value is finite and non-negative
/// 4. Every action-set entry is a valid target index
///
/// Empty action sets are allowed; such an agent always abstains.
pub fn validate_structure(
    action_sets: &[BTreeSet<TargetId>],
    target_values: &[f64],
) -> ValidationResult {
    let mut errors = Vec::new();

    if action_sets.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoAgents,
            "Scenario has no agents",
        ));
    }
    if target_values.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoTargets,
            "Scenario has no targets",
        ));
    }

    for (target, &value) in target_values.iter().enumerate() {
        if !value.is_finite() || value < 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidTargetValue,
                format!("Target {target} has invalid value {value}"),
            ));
        }
    }

    for (agent, action_set) in action_sets.iter().enumerate() {
        for &target in action_set {
            if target >= target_values.len() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::TargetOutOfRange,
                    format!(
                        "Agent {agent} may select unknown target {target} (targets: {})",
                        target_values.len()
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates the information graph against the decision order.
///
/// Checks:
/// 1. The graph covers exactly `num_agents` agents
/// 2. Every edge endpoint is a valid agent index
/// 3. No self-loops
/// 4. Every edge `a → b` has `a < b`
/// 5. No cycles
pub fn validate_graph(graph: &InfoGraph, num_agents: usize) -> ValidationResult {
    let mut errors = Vec::new();

    if graph.num_agents() != num_agents {
        errors.push(ValidationError::new(
            ValidationErrorKind::AgentCountMismatch,
            format!(
                "Graph built for {} agents, scenario has {num_agents}",
                graph.num_agents()
            ),
        ));
    }

    let mut in_range = true;
    for (from, to) in graph.edges() {
        if from >= num_agents || to >= num_agents {
            in_range = false;
            errors.push(ValidationError::new(
                ValidationErrorKind::AgentOutOfRange,
                format!("Edge {from} -> {to} references an unknown agent"),
            ));
        } else if from == to {
            errors.push(ValidationError::new(
                ValidationErrorKind::SelfLoop,
                format!("Agent {from} sends to itself"),
            ));
        } else if from > to {
            errors.push(ValidationError::new(
                ValidationErrorKind::OrderViolation,
                format!("Edge {from} -> {to} delivers information from a later decision"),
            ));
        }
    }

    if in_range {
        if let Some(cycle_err) = detect_cycles(graph, num_agents) {
            errors.push(cycle_err);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Detects cycles using DFS.
///
/// # Algorithm
/// Topological sort via DFS with an explicit stack. If a back-edge is found
/// (reaching a node currently on the stack), a cycle exists. The stack holds
/// one frame per node on the current path, so long chains do not recurse.
///
/// Requires every edge endpoint to be below `num_agents`.
fn detect_cycles(graph: &InfoGraph, num_agents: usize) -> Option<ValidationError> {
    let mut visited = vec![false; num_agents];
    let mut in_stack = vec![false; num_agents];

    for node in 0..num_agents {
        if !visited[node] && has_cycle_from(node, graph, &mut visited, &mut in_stack) {
            return Some(ValidationError::new(
                ValidationErrorKind::CyclicGraph,
                format!("Cycle detected involving agent {node}"),
            ));
        }
    }

    None
}

fn has_cycle_from(
    root: usize,
    graph: &InfoGraph,
    visited: &mut [bool],
    in_stack: &mut [bool],
) -> bool {
    // Each frame: (node, successors not yet explored).
    let mut stack: Vec<(usize, Vec<usize>)> = Vec::new();
    visited[root] = true;
    in_stack[root] = true;
    stack.push((root, graph.successors(root).collect()));

    while let Some((node, pending)) = stack.last_mut() {
        let Some(next) = pending.pop() else {
            in_stack[*node] = false;
            stack.pop();
            continue;
        };
        if in_stack[next] {
            return true; // Back edge → cycle
        }
        if !visited[next] {
            visited[next] = true;
            in_stack[next] = true;
            stack.push((next, graph.successors(next).collect()));
        }
    }

    false
}
