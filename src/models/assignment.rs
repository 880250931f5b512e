//! Assignment (solution) model.
//!
//! An assignment maps each agent to the target it selected, or to `None`
//! when it abstained. Runs build it one agent at a time in decision order;
//! an entry, once written, is never revised.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{AgentId, Scenario, TargetId};
use crate::error::{Result, SubmodError};

/// Agent → selected target (or abstention).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    choices: Vec<Option<TargetId>>,
}

impl Assignment {
    /// Creates an empty assignment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty assignment with room for `num_agents` entries.
    pub fn with_capacity(num_agents: usize) -> Self {
        Self {
            choices: Vec::with_capacity(num_agents),
        }
    }

    /// Builds an assignment from raw choices (entry `i` belongs to agent `i`).
    ///
    /// No range checks are made here; [`crate::evaluation::value`] rejects
    /// out-of-range references.
    pub fn from_choices(choices: Vec<Option<TargetId>>) -> Self {
        Self { choices }
    }

    /// Records `agent`'s decision.
    ///
    /// # Errors
    /// [`SubmodError::InvalidAssignment`] unless `agent` is exactly the next
    /// agent in decision order.
    pub fn record(&mut self, agent: AgentId, choice: Option<TargetId>) -> Result<()> {
        if agent != self.choices.len() {
            return Err(SubmodError::InvalidAssignment(format!(
                "agent {agent} decided out of order (next agent is {})",
                self.choices.len()
            )));
        }
        self.choices.push(choice);
        Ok(())
    }

    /// Appends the next agent's decision. Callers iterate in decision order.
    pub(crate) fn push(&mut self, choice: Option<TargetId>) {
        self.choices.push(choice);
    }

    /// Choice of one agent. `None` if the agent has no entry or abstained.
    pub fn choice(&self, agent: AgentId) -> Option<TargetId> {
        self.choices.get(agent).copied().flatten()
    }

    /// All entries in decision order.
    pub fn choices(&self) -> &[Option<TargetId>] {
        &self.choices
    }

    /// `(agent, choice)` pairs in decision order.
    pub fn pairs(&self) -> impl Iterator<Item = (AgentId, Option<TargetId>)> + '_ {
        self.choices.iter().copied().enumerate()
    }

    /// Distinct selected targets, ascending.
    pub fn selected_targets(&self) -> BTreeSet<TargetId> {
        self.choices.iter().flatten().copied().collect()
    }

    /// Number of agents with an entry.
    pub fn len(&self) -> usize {
        self.choices.len()
    }

    /// Whether no agent has an entry.
    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    /// Number of agents that abstained.
    pub fn abstentions(&self) -> usize {
        self.choices.iter().filter(|c| c.is_none()).count()
    }

    /// Number of agents whose target was also selected by an earlier agent.
    pub fn collisions(&self) -> usize {
        let mut seen = BTreeSet::new();
        self.choices
            .iter()
            .flatten()
            .filter(|&&t| !seen.insert(t))
            .count()
    }

    /// Whether every agent of `scenario` has an entry.
    pub fn is_complete_for(&self, scenario: &Scenario) -> bool {
        self.choices.len() == scenario.num_agents()
    }
}
