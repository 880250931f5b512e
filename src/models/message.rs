//! Messages and per-agent knowledge.
//!
//! A [`Message`] is a claim "target `t` was selected by agent `origin`".
//! Each agent broadcasts at most one message, identical for every receiver.
//! A [`KnowledgeState`] holds what one agent received before deciding and
//! is dropped once the decision is recorded.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{AgentId, TargetId};

/// A broadcast claim on a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Message {
    /// Claimed target.
    pub target: TargetId,
    /// Agent that selected the target.
    pub origin: AgentId,
}

impl Message {
    /// Creates a message.
    pub fn new(target: TargetId, origin: AgentId) -> Self {
        Self { target, origin }
    }
}

/// Messages received by one agent from its in-neighbors.
///
/// Only explicit deliveries enter the state. Nothing is inferred from
/// graph reachability.
#[derive(Debug, Clone)]
pub struct KnowledgeState {
    agent: AgentId,
    received: BTreeSet<Message>,
    claimed: BTreeSet<TargetId>,
}

impl KnowledgeState {
    /// Empty knowledge for `agent`.
    pub fn new(agent: AgentId) -> Self {
        Self {
            agent,
            received: BTreeSet::new(),
            claimed: BTreeSet::new(),
        }
    }

    /// The agent this state belongs to.
    pub fn agent(&self) -> AgentId {
        self.agent
    }

    /// Records a delivered message. Returns `false` for a duplicate.
    pub fn receive(&mut self, message: Message) -> bool {
        self.claimed.insert(message.target);
        self.received.insert(message)
    }

    /// Whether any received message claims `target`.
    pub fn is_claimed(&self, target: TargetId) -> bool {
        self.claimed.contains(&target)
    }

    /// Distinct received messages, ordered by (target, origin).
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.received.iter()
    }

    /// Targets referenced by received messages.
    pub fn claimed_targets(&self) -> &BTreeSet<TargetId> {
        &self.claimed
    }

    /// Number of distinct received messages.
    pub fn len(&self) -> usize {
        self.received.len()
    }

    /// Whether nothing was received.
    pub fn is_empty(&self) -> bool {
        self.received.is_empty()
    }
}
