//! Generalized distributed greedy under a directed information graph.
//!
//! # Algorithm
//!
//! For each agent, in ascending index order:
//!
//! 1. **Receive**: collect the broadcasts of its in-neighbors into a fresh
//!    [`KnowledgeState`]. Validation guarantees every in-neighbor has
//!    already decided.
//! 2. **Decide**: pick the highest-value target in its own action set that
//!    no received message claims, or abstain.
//! 3. **Broadcast**: choose one message with the configured
//!    [`BroadcastPolicy`]; every out-neighbor receives the same message.
//! 4. Drop the knowledge state. The decision is final.
//!
//! # Complexity
//! O(n * (d * log d + m * log d)) where n=agents, d=in-degree,
//! m=action-set size.

use tracing::debug;

use super::{select_best, BroadcastPolicy};
use crate::models::{Assignment, KnowledgeState, Message, Scenario};

/// Result of a generalized run, including what each agent broadcast.
#[derive(Debug, Clone, PartialEq)]
pub struct GreedyOutcome {
    /// Final assignment.
    pub assignment: Assignment,
    /// Message broadcast by each agent (`None` = nothing sent).
    pub broadcasts: Vec<Option<Message>>,
}

/// Sequential greedy restricted to messages along the information graph.
///
/// # Example
///
/// ```
/// use u_submod::greedy::{BroadcastPolicy, GeneralizedGreedy};
/// use u_submod::models::{InfoGraph, Scenario};
///
/// let scenario = Scenario::new(
///     vec![vec![0, 1], vec![0, 1]],
///     vec![5.0, 3.0],
///     InfoGraph::empty(2),
/// )
/// .unwrap();
///
/// // Without edges agent 1 never hears about agent 0's pick.
/// let runner = GeneralizedGreedy::new(BroadcastPolicy::AnnounceOwn);
/// assert_eq!(runner.run(&scenario).choices(), &[Some(0), Some(0)]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct GeneralizedGreedy {
    policy: BroadcastPolicy,
}

impl GeneralizedGreedy {
    /// Creates a runner with the given broadcast policy.
    pub fn new(policy: BroadcastPolicy) -> Self {
        Self { policy }
    }

    /// The broadcast policy of this runner.
    pub fn policy(&self) -> BroadcastPolicy {
        self.policy
    }

    /// Runs over `scenario` and returns the assignment.
    pub fn run(&self, scenario: &Scenario) -> Assignment {
        self.run_traced(scenario).assignment
    }

    /// Runs over `scenario` and also returns every agent's broadcast.
    pub fn run_traced(&self, scenario: &Scenario) -> GreedyOutcome {
        let values = scenario.target_values();
        let graph = scenario.graph();
        let mut assignment = Assignment::with_capacity(scenario.num_agents());
        let mut broadcasts: Vec<Option<Message>> = Vec::with_capacity(scenario.num_agents());

        for agent in scenario.agents() {
            let mut knowledge = KnowledgeState::new(agent);
            for sender in graph.predecessors(agent) {
                if let Some(message) = broadcasts.get(sender).copied().flatten() {
                    knowledge.receive(message);
                }
            }

            let choice = scenario
                .action_set(agent)
                .and_then(|set| select_best(set, values, |t| knowledge.is_claimed(t)));
            assignment.push(choice);

            let outgoing = self.policy.outgoing(agent, choice, &knowledge, values);
            debug!(
                agent,
                policy = %self.policy,
                known = knowledge.len(),
                choice = ?choice,
                outgoing = ?outgoing,
                "agent decided"
            );
            broadcasts.push(outgoing);
        }

        GreedyOutcome {
            assignment,
            broadcasts,
        }
    }
}

/// Runs [`GeneralizedGreedy`] with `policy` over `scenario`.
pub fn generalized_distributed_greedy(scenario: &Scenario, policy: BroadcastPolicy) -> Assignment {
    GeneralizedGreedy::new(policy).run(scenario)
}
