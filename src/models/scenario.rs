//! Scenario model.
//!
//! A scenario fixes everything the algorithms read: each agent's action
//! set, the target values, and the information graph. It is validated
//! once at construction and immutable afterwards, so every run over the
//! same scenario sees the same input.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::ops::Range;

use super::{AgentId, InfoGraph, TargetId};
use crate::error::{Result, SubmodError};
use crate::validation::{validate_graph, validate_structure, ValidationError};

/// An immutable, validated target-assignment scenario.
///
/// # Example
/// ```
/// use u_submod::models::{InfoGraph, Scenario};
///
/// let scenario = Scenario::new(
///     vec![vec![0, 1], vec![0, 1]],
///     vec![5.0, 3.0],
///     InfoGraph::chain(2),
/// )
/// .unwrap();
/// assert_eq!(scenario.num_agents(), 2);
/// assert_eq!(scenario.agents(), 0..2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ScenarioData", into = "ScenarioData")]
pub struct Scenario {
    number: u64,
    action_sets: Vec<BTreeSet<TargetId>>,
    target_values: Vec<f64>,
    graph: InfoGraph,
}

impl Scenario {
    /// Validates and builds a scenario.
    ///
    /// `action_sets[i]` is agent `i`'s permitted targets; duplicates collapse.
    ///
    /// # Errors
    /// - [`SubmodError::InvalidGraph`] if any graph edge is out of range,
    ///   a self-loop, against the decision order, or part of a cycle.
    /// - [`SubmodError::InvalidScenario`] for every other structural problem.
    pub fn new(
        action_sets: Vec<Vec<TargetId>>,
        target_values: Vec<f64>,
        graph: InfoGraph,
    ) -> Result<Self> {
        let action_sets: Vec<BTreeSet<TargetId>> = action_sets
            .into_iter()
            .map(|set| set.into_iter().collect())
            .collect();

        let mut errors: Vec<ValidationError> = Vec::new();
        if let Err(mut e) = validate_structure(&action_sets, &target_values) {
            errors.append(&mut e);
        }
        if let Err(mut e) = validate_graph(&graph, action_sets.len()) {
            errors.append(&mut e);
        }

        if !errors.is_empty() {
            return Err(if errors.iter().any(|e| e.kind.is_graph_error()) {
                SubmodError::InvalidGraph(errors)
            } else {
                SubmodError::InvalidScenario(errors)
            });
        }

        Ok(Self {
            number: 0,
            action_sets,
            target_values,
            graph,
        })
    }

    /// Sets the scenario number (its position within a sweep).
    pub fn with_number(mut self, number: u64) -> Self {
        self.number = number;
        self
    }

    /// Scenario number.
    pub fn number(&self) -> u64 {
        self.number
    }

    /// Number of agents.
    pub fn num_agents(&self) -> usize {
        self.action_sets.len()
    }

    /// Number of targets.
    pub fn num_targets(&self) -> usize {
        self.target_values.len()
    }

    /// The fixed decision order: agents in ascending index order.
    pub fn agents(&self) -> Range<AgentId> {
        0..self.action_sets.len()
    }

    /// Targets `agent` may select, ascending. `None` for an unknown agent.
    pub fn action_set(&self, agent: AgentId) -> Option<&BTreeSet<TargetId>> {
        self.action_sets.get(agent)
    }

    /// All target values, indexed by target.
    pub fn target_values(&self) -> &[f64] {
        &self.target_values
    }

    /// Value of one target. `None` for an unknown target.
    pub fn target_value(&self, target: TargetId) -> Option<f64> {
        self.target_values.get(target).copied()
    }

    /// The information graph.
    pub fn graph(&self) -> &InfoGraph {
        &self.graph
    }

    /// Same action sets and values, different information graph.
    ///
    /// # Errors
    /// [`SubmodError::InvalidGraph`] if the new graph fails validation.
    pub fn with_graph(&self, graph: InfoGraph) -> Result<Self> {
        validate_graph(&graph, self.num_agents()).map_err(|errors| {
            if errors.iter().any(|e| e.kind.is_graph_error()) {
                SubmodError::InvalidGraph(errors)
            } else {
                SubmodError::InvalidScenario(errors)
            }
        })?;
        Ok(Self {
            number: self.number,
            action_sets: self.action_sets.clone(),
            target_values: self.target_values.clone(),
            graph,
        })
    }
}

/// Serialized form of a [`Scenario`]. Deserialization re-runs validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ScenarioData {
    #[serde(default)]
    number: u64,
    action_sets: Vec<Vec<TargetId>>,
    target_values: Vec<f64>,
    #[serde(default)]
    edges: Vec<(AgentId, AgentId)>,
}

impl TryFrom<ScenarioData> for Scenario {
    type Error = SubmodError;

    fn try_from(data: ScenarioData) -> Result<Self> {
        let graph = InfoGraph::from_edges(data.action_sets.len(), data.edges);
        Ok(Scenario::new(data.action_sets, data.target_values, graph)?.with_number(data.number))
    }
}

impl From<Scenario> for ScenarioData {
    fn from(scenario: Scenario) -> Self {
        Self {
            number: scenario.number,
            edges: scenario.graph.edges().collect(),
            action_sets: scenario
                .action_sets
                .into_iter()
                .map(|set| set.into_iter().collect())
                .collect(),
            target_values: scenario.target_values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    fn two_agent(graph: InfoGraph) -> Result<Scenario> {
        Scenario::new(vec![vec![0, 1], vec![0, 1]], vec![5.0, 3.0], graph)
    }

    #[test]
    fn test_scenario_accessors() {
        let s = two_agent(InfoGraph::chain(2)).unwrap().with_number(7);
        assert_eq!(s.number(), 7);
        assert_eq!(s.num_agents(), 2);
        assert_eq!(s.num_targets(), 2);
        assert_eq!(s.target_value(0), Some(5.0));
        assert_eq!(s.target_value(2), None);
        assert_eq!(s.action_set(1).map(|a| a.len()), Some(2));
        assert!(s.action_set(2).is_none());
        assert!(s.graph().has_edge(0, 1));
    }

    #[test]
    fn test_duplicate_action_entries_collapse() {
        let s = Scenario::new(vec![vec![1, 0, 1]], vec![1.0, 2.0], InfoGraph::empty(1)).unwrap();
        assert_eq!(
            s.action_set(0).unwrap().iter().copied().collect::<Vec<_>>(),
            vec![0, 1]
        );
    }

    #[test]
    fn test_backward_edge_rejected() {
        let err = two_agent(InfoGraph::new(2).with_edge(1, 0)).unwrap_err();
        match err {
            SubmodError::InvalidGraph(errors) => {
                assert!(errors
                    .iter()
                    .any(|e| e.kind == ValidationErrorKind::OrderViolation));
            }
            other => panic!("expected InvalidGraph, got {other:?}"),
        }
    }

    #[test]
    fn test_structure_error_is_invalid_scenario() {
        let err = Scenario::new(vec![vec![3]], vec![1.0], InfoGraph::empty(1)).unwrap_err();
        assert!(matches!(err, SubmodError::InvalidScenario(_)));
    }

    #[test]
    fn test_with_graph_revalidates() {
        let s = two_agent(InfoGraph::empty(2)).unwrap();
        let linked = s.with_graph(InfoGraph::complete(2)).unwrap();
        assert_eq!(linked.graph().edge_count(), 1);
        assert_eq!(linked.target_values(), s.target_values());
        assert!(matches!(
            s.with_graph(InfoGraph::new(2).with_edge(1, 0)),
            Err(SubmodError::InvalidGraph(_))
        ));
    }

    #[test]
    fn test_serde_roundtrip_keeps_edges() {
        let s = two_agent(InfoGraph::chain(2)).unwrap().with_number(3);
        let json = serde_json::to_string(&s).unwrap();
        let back: Scenario = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn test_deserialize_rejects_cycle() {
        let json = r#"{
            "action_sets": [[0], [0]],
            "target_values": [1.0],
            "edges": [[0, 1], [1, 0]]
        }"#;
        let err = serde_json::from_str::<Scenario>(json).unwrap_err();
        assert!(err.to_string().contains("invalid information graph"));
    }
}
