//! Full-information distributed greedy.
//!
//! # Algorithm
//!
//! 1. Visit agents in ascending index order.
//! 2. Each agent sees every target selected so far.
//! 3. It picks the highest-value unselected target in its action set
//!    (lowest index on ties), or abstains.
//!
//! # Complexity
//! O(n * m * log m) where n=agents, m=action-set size.
//!
//! # Reference
//! Fisher, Nemhauser & Wolsey (1978): at least half the optimal value for
//! a monotone submodular objective under a partition matroid.

use std::collections::BTreeSet;

use tracing::debug;

use super::select_best;
use crate::models::{Assignment, Scenario, TargetId};

/// Baseline greedy with unrestricted visibility of earlier decisions.
///
/// # Example
///
/// ```
/// use u_submod::greedy::DistributedGreedy;
/// use u_submod::models::{InfoGraph, Scenario};
///
/// let scenario = Scenario::new(
///     vec![vec![0, 1], vec![0, 1]],
///     vec![5.0, 3.0],
///     InfoGraph::empty(2),
/// )
/// .unwrap();
///
/// // The graph is ignored: agent 1 still sees agent 0's pick.
/// let assignment = DistributedGreedy::new().run(&scenario);
/// assert_eq!(assignment.choices(), &[Some(0), Some(1)]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DistributedGreedy;

impl DistributedGreedy {
    /// Creates the baseline runner.
    pub fn new() -> Self {
        Self
    }

    /// Runs the greedy over `scenario`. Pure and deterministic.
    pub fn run(&self, scenario: &Scenario) -> Assignment {
        let values = scenario.target_values();
        let mut selected: BTreeSet<TargetId> = BTreeSet::new();
        let mut assignment = Assignment::with_capacity(scenario.num_agents());

        for agent in scenario.agents() {
            let choice = scenario
                .action_set(agent)
                .and_then(|set| select_best(set, values, |t| selected.contains(&t)));
            if let Some(target) = choice {
                selected.insert(target);
            }
            debug!(agent, choice = ?choice, "full-information agent decided");
            assignment.push(choice);
        }

        assignment
    }
}

/// Runs [`DistributedGreedy`] over `scenario`.
pub fn distributed_greedy(scenario: &Scenario) -> Assignment {
    DistributedGreedy::new().run(scenario)
}
