//! Sequential greedy assignment.
//!
//! Agents decide one at a time in ascending index order. Each agent picks
//! the highest-value target in its own action set that it does not know to
//! be claimed, or abstains when none is left.
//!
//! # Variants
//!
//! - [`DistributedGreedy`]: every agent sees all earlier selections.
//! - [`GeneralizedGreedy`]: every agent sees only the messages delivered
//!   along the information graph, and broadcasts one message chosen by a
//!   [`BroadcastPolicy`].
//!
//! # Tie-breaking
//! Equal values are broken by the lowest target index.
//!
//! # References
//! - Fisher, Nemhauser & Wolsey (1978), "An analysis of approximations for
//!   maximizing submodular set functions II"
//! - Gharesifard & Smith (2018), "Distributed submodular maximization with
//!   limited information"

mod full;
mod generalized;

pub use full::{distributed_greedy, DistributedGreedy};
pub use generalized::{generalized_distributed_greedy, GeneralizedGreedy, GreedyOutcome};

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::models::{AgentId, KnowledgeState, Message, TargetId};

/// What an agent broadcasts to its successors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BroadcastPolicy {
    /// Announce the agent's own selection; send nothing after abstaining.
    #[default]
    AnnounceOwn,
    /// Relay the highest-value claim the agent knows of, which may come
    /// from another agent and may lie outside the relaying agent's own
    /// action set.
    HighestMarginalContribution,
}

impl BroadcastPolicy {
    /// Short label for reports.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AnnounceOwn => "announce-own",
            Self::HighestMarginalContribution => "highest-marginal-contribution",
        }
    }

    /// Chooses the single message `agent` sends to every successor.
    ///
    /// Under [`Self::HighestMarginalContribution`] the candidates are every
    /// received message plus the agent's own claim. The highest target
    /// value wins; ties go to the lower target index, then the lower origin.
    pub fn outgoing(
        &self,
        agent: AgentId,
        choice: Option<TargetId>,
        knowledge: &KnowledgeState,
        target_values: &[f64],
    ) -> Option<Message> {
        let own = choice.map(|target| Message::new(target, agent));
        match self {
            Self::AnnounceOwn => own,
            Self::HighestMarginalContribution => {
                let mut candidates: Vec<Message> = knowledge.messages().copied().collect();
                candidates.extend(own);
                candidates.sort();

                let mut best: Option<(Message, f64)> = None;
                for message in candidates {
                    let Some(&value) = target_values.get(message.target) else {
                        continue;
                    };
                    match best {
                        Some((_, best_value)) if value <= best_value => {}
                        _ => best = Some((message, value)),
                    }
                }
                best.map(|(message, _)| message)
            }
        }
    }
}

impl fmt::Display for BroadcastPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Picks the best unclaimed target from an action set.
///
/// Returns the highest-value target for which `is_claimed` is false, the
/// lowest index among equal values, or `None` if every target is claimed.
pub fn select_best(
    action_set: &BTreeSet<TargetId>,
    target_values: &[f64],
    is_claimed: impl Fn(TargetId) -> bool,
) -> Option<TargetId> {
    let mut best: Option<(TargetId, f64)> = None;
    for &target in action_set {
        if is_claimed(target) {
            continue;
        }
        let Some(&value) = target_values.get(target) else {
            continue;
        };
        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => best = Some((target, value)),
        }
    }
    best.map(|(target, _)| target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(raw: &[TargetId]) -> BTreeSet<TargetId> {
        raw.iter().copied().collect()
    }

    #[test]
    fn test_select_highest_value() {
        let values = [1.0, 7.0, 3.0];
        assert_eq!(select_best(&set(&[0, 1, 2]), &values, |_| false), Some(1));
    }

    #[test]
    fn test_select_skips_claimed() {
        let values = [1.0, 7.0, 3.0];
        assert_eq!(select_best(&set(&[0, 1, 2]), &values, |t| t == 1), Some(2));
    }

    #[test]
    fn test_select_tie_lowest_index() {
        let values = [2.0, 4.0, 4.0, 4.0];
        assert_eq!(select_best(&set(&[3, 2, 1]), &values, |_| false), Some(1));
        assert_eq!(select_best(&set(&[3, 2]), &values, |_| false), Some(2));
    }

    #[test]
    fn test_select_zero_value_still_selected() {
        let values = [0.0, 0.0];
        assert_eq!(select_best(&set(&[1, 0]), &values, |_| false), Some(0));
    }

    #[test]
    fn test_select_all_claimed_abstains() {
        let values = [2.0, 4.0];
        assert_eq!(select_best(&set(&[0, 1]), &values, |_| true), None);
        assert_eq!(select_best(&set(&[]), &values, |_| false), None);
    }

    #[test]
    fn test_announce_own() {
        let mut k = KnowledgeState::new(2);
        k.receive(Message::new(0, 0));
        let values = [10.0, 1.0];
        let policy = BroadcastPolicy::AnnounceOwn;
        assert_eq!(policy.outgoing(2, Some(1), &k, &values), Some(Message::new(1, 2)));
        assert_eq!(policy.outgoing(2, None, &k, &values), None);
    }

    #[test]
    fn test_highest_marginal_relays_received() {
        let mut k = KnowledgeState::new(2);
        k.receive(Message::new(0, 0));
        let values = [10.0, 1.0];
        let policy = BroadcastPolicy::HighestMarginalContribution;
        assert_eq!(policy.outgoing(2, Some(1), &k, &values), Some(Message::new(0, 0)));
        // Abstaining agents still relay what they know.
        assert_eq!(policy.outgoing(2, None, &k, &values), Some(Message::new(0, 0)));
    }

    #[test]
    fn test_highest_marginal_prefers_own_when_best() {
        let mut k = KnowledgeState::new(1);
        k.receive(Message::new(1, 0));
        let values = [10.0, 1.0];
        let policy = BroadcastPolicy::HighestMarginalContribution;
        assert_eq!(policy.outgoing(1, Some(0), &k, &values), Some(Message::new(0, 1)));
    }

    #[test]
    fn test_highest_marginal_ties() {
        let mut k = KnowledgeState::new(4);
        k.receive(Message::new(2, 1));
        k.receive(Message::new(2, 0));
        k.receive(Message::new(3, 2));
        let values = [0.0, 0.0, 5.0, 5.0];
        let policy = BroadcastPolicy::HighestMarginalContribution;
        // Equal values: lower target, then lower origin.
        assert_eq!(policy.outgoing(4, None, &k, &values), Some(Message::new(2, 0)));
    }

    #[test]
    fn test_highest_marginal_nothing_known() {
        let k = KnowledgeState::new(0);
        let policy = BroadcastPolicy::HighestMarginalContribution;
        assert_eq!(policy.outgoing(0, None, &k, &[1.0]), None);
    }

    #[test]
    fn test_policy_names() {
        assert_eq!(BroadcastPolicy::default(), BroadcastPolicy::AnnounceOwn);
        assert_eq!(
            BroadcastPolicy::HighestMarginalContribution.to_string(),
            "highest-marginal-contribution"
        );
    }
}
