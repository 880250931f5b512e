//! Directed information graph.
//!
//! An edge `a → b` means agent `a` delivers its single outgoing message to
//! agent `b`. Construction is unchecked; range, self-loop, ordering, and
//! cycle checks run once in [`crate::validation::validate_graph`] when the
//! graph is placed into a [`super::Scenario`].

use std::collections::{BTreeMap, BTreeSet};

use super::AgentId;

/// Adjacency structure keyed by agent index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfoGraph {
    num_agents: usize,
    /// Outgoing edges (sender → receivers).
    successors: BTreeMap<AgentId, BTreeSet<AgentId>>,
    /// Incoming edges (receiver → senders).
    predecessors: BTreeMap<AgentId, BTreeSet<AgentId>>,
}

impl InfoGraph {
    /// Creates a graph over `num_agents` agents with no edges.
    pub fn new(num_agents: usize) -> Self {
        Self {
            num_agents,
            successors: BTreeMap::new(),
            predecessors: BTreeMap::new(),
        }
    }

    /// Graph with no edges: no agent learns anything.
    pub fn empty(num_agents: usize) -> Self {
        Self::new(num_agents)
    }

    /// Each agent sends to its immediate successor in decision order.
    pub fn chain(num_agents: usize) -> Self {
        (1..num_agents).fold(Self::new(num_agents), |g, b| g.with_edge(b - 1, b))
    }

    /// Every agent sends to every later agent.
    pub fn complete(num_agents: usize) -> Self {
        let mut graph = Self::new(num_agents);
        for a in 0..num_agents {
            for b in (a + 1)..num_agents {
                graph.add_edge(a, b);
            }
        }
        graph
    }

    /// Builds a graph from an edge list.
    pub fn from_edges(
        num_agents: usize,
        edges: impl IntoIterator<Item = (AgentId, AgentId)>,
    ) -> Self {
        let mut graph = Self::new(num_agents);
        for (from, to) in edges {
            graph.add_edge(from, to);
        }
        graph
    }

    /// Number of agents the graph was built for.
    pub fn num_agents(&self) -> usize {
        self.num_agents
    }

    /// Adds an edge `from → to`.
    pub fn with_edge(mut self, from: AgentId, to: AgentId) -> Self {
        self.add_edge(from, to);
        self
    }

    /// Adds an edge `from → to` in place. Duplicate edges collapse.
    pub fn add_edge(&mut self, from: AgentId, to: AgentId) {
        self.successors.entry(from).or_default().insert(to);
        self.predecessors.entry(to).or_default().insert(from);
    }

    /// Whether the edge `from → to` exists.
    pub fn has_edge(&self, from: AgentId, to: AgentId) -> bool {
        self.successors
            .get(&from)
            .is_some_and(|succ| succ.contains(&to))
    }

    /// Receivers of `agent`'s broadcast, ascending.
    pub fn successors(&self, agent: AgentId) -> impl Iterator<Item = AgentId> + '_ {
        self.successors.get(&agent).into_iter().flatten().copied()
    }

    /// Agents whose broadcast reaches `agent`, ascending.
    pub fn predecessors(&self, agent: AgentId) -> impl Iterator<Item = AgentId> + '_ {
        self.predecessors.get(&agent).into_iter().flatten().copied()
    }

    /// All edges in `(from, to)` order.
    pub fn edges(&self) -> impl Iterator<Item = (AgentId, AgentId)> + '_ {
        self.successors
            .iter()
            .flat_map(|(&from, succ)| succ.iter().map(move |&to| (from, to)))
    }

    /// Number of distinct edges.
    pub fn edge_count(&self) -> usize {
        self.successors.values().map(BTreeSet::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain() {
        let g = InfoGraph::chain(4);
        assert_eq!(g.edge_count(), 3);
        assert!(g.has_edge(0, 1));
        assert!(g.has_edge(2, 3));
        assert!(!g.has_edge(0, 2));
    }

    #[test]
    fn test_complete() {
        let g = InfoGraph::complete(4);
        assert_eq!(g.edge_count(), 6);
        assert_eq!(g.predecessors(3).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(g.successors(0).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(g.successors(3).count(), 0);
    }

    #[test]
    fn test_duplicate_edges_collapse() {
        let g = InfoGraph::new(3).with_edge(0, 2).with_edge(0, 2);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.edges().collect::<Vec<_>>(), vec![(0, 2)]);
    }

    #[test]
    fn test_empty_has_no_neighbors() {
        let g = InfoGraph::empty(3);
        assert_eq!(g.num_agents(), 3);
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.predecessors(2).count(), 0);
    }
}
