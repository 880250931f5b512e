//! Exhaustive optimal-assignment oracle.
//!
//! Enumerates every assignment in which each agent picks one target from
//! its own action set or abstains, and keeps the one with the largest f(x).
//! The search is exponential in the number of agents and exists only to
//! provide the denominator of γ(x), so it is guarded by an explicit
//! enumeration budget instead of being made fast.
//!
//! # Algorithm
//! Depth-first enumeration over a single partial assignment with per-target
//! usage counts. Depth d fixes agent d's choice; each leaf is one complete
//! assignment. Memory is O(n + m) regardless of the search-space size.
//!
//! # Reference
//! Nemhauser, Wolsey & Fisher (1978), "An analysis of approximations for
//! maximizing submodular set functions I"

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SubmodError};
use crate::evaluation::sum_targets;
use crate::models::{Assignment, Scenario, TargetId};

/// Oracle resource limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    /// Maximum number of complete assignments (leaves) to enumerate.
    pub enumeration_budget: u64,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            enumeration_budget: 10_000_000,
        }
    }
}

impl OracleConfig {
    /// Sets the enumeration budget.
    pub fn with_budget(mut self, enumeration_budget: u64) -> Self {
        self.enumeration_budget = enumeration_budget;
        self
    }
}

/// An optimal assignment and its value.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimalSolution {
    /// f(x_opt).
    pub value: f64,
    /// One maximizing assignment (the first found in enumeration order).
    pub assignment: Assignment,
    /// Number of complete assignments evaluated.
    pub leaves_visited: u64,
}

/// Brute-force search for x_opt.
///
/// # Example
/// ```
/// use u_submod::models::{InfoGraph, Scenario};
/// use u_submod::oracle::{ExhaustiveOracle, OracleConfig};
///
/// let scenario = Scenario::new(
///     vec![vec![0, 1], vec![0, 1]],
///     vec![5.0, 3.0],
///     InfoGraph::empty(2),
/// )
/// .unwrap();
/// let oracle = ExhaustiveOracle::new(OracleConfig::default());
/// let best = oracle.solve(&scenario).unwrap();
/// assert_eq!(best.value, 8.0);
/// assert_eq!(best.leaves_visited, 9);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ExhaustiveOracle {
    config: OracleConfig,
}

impl ExhaustiveOracle {
    /// Creates an oracle with the given limits.
    pub fn new(config: OracleConfig) -> Self {
        Self { config }
    }

    /// The oracle's limits.
    pub fn config(&self) -> &OracleConfig {
        &self.config
    }

    /// Number of leaves the search would visit: Π (|A_i| + 1).
    ///
    /// `None` if the product overflows `u64`.
    pub fn search_space_size(scenario: &Scenario) -> Option<u64> {
        scenario.agents().try_fold(1u64, |acc, agent| {
            let options = scenario.action_set(agent).map_or(0, |set| set.len()) as u64 + 1;
            acc.checked_mul(options)
        })
    }

    /// Finds an optimal assignment.
    ///
    /// # Errors
    /// [`SubmodError::IntractableScenario`] if the search space exceeds the
    /// enumeration budget. Nothing is enumerated in that case.
    pub fn solve(&self, scenario: &Scenario) -> Result<OptimalSolution> {
        let size = Self::search_space_size(scenario);
        let budget = self.config.enumeration_budget;
        if size.map_or(true, |n| n > budget) {
            return Err(SubmodError::IntractableScenario { size, budget });
        }

        let mut search = Search::new(scenario);
        search.run();

        debug!(
            scenario = scenario.number(),
            leaves = search.leaves,
            value = search.best_value,
            "oracle search finished"
        );

        Ok(OptimalSolution {
            value: search.best_value,
            assignment: Assignment::from_choices(search.best),
            leaves_visited: search.leaves,
        })
    }

    /// Finds f(x_opt) only.
    pub fn optimal_value(&self, scenario: &Scenario) -> Result<f64> {
        self.solve(scenario).map(|solution| solution.value)
    }
}

/// f(x_opt) with the default enumeration budget.
pub fn optimal_value(scenario: &Scenario) -> Result<f64> {
    ExhaustiveOracle::default().optimal_value(scenario)
}

/// x_opt and f(x_opt) with the default enumeration budget.
pub fn optimal_assignment(scenario: &Scenario) -> Result<OptimalSolution> {
    ExhaustiveOracle::default().solve(scenario)
}

/// Depth-first enumeration state.
struct Search<'a> {
    /// Per agent: action-set targets ascending, then abstention.
    options: Vec<Vec<Option<TargetId>>>,
    target_values: &'a [f64],
    /// How many agents in `partial` selected each target.
    usage: Vec<u32>,
    partial: Vec<Option<TargetId>>,
    best: Vec<Option<TargetId>>,
    best_value: f64,
    leaves: u64,
}

impl<'a> Search<'a> {
    fn new(scenario: &'a Scenario) -> Self {
        let options: Vec<Vec<Option<TargetId>>> = scenario
            .agents()
            .map(|agent| {
                scenario
                    .action_set(agent)
                    .into_iter()
                    .flatten()
                    .map(|&t| Some(t))
                    .chain(std::iter::once(None))
                    .collect::<Vec<_>>()
            })
            .collect();

        Self {
            options,
            target_values: scenario.target_values(),
            usage: vec![0; scenario.num_targets()],
            partial: Vec::with_capacity(scenario.num_agents()),
            best: Vec::new(),
            best_value: f64::NEG_INFINITY,
            leaves: 0,
        }
    }

    /// Visits every leaf in lexicographic option order.
    ///
    /// Iterative odometer over `cursor`; `partial` and `usage` always reflect
    /// the choices of agents `0..depth`.
    fn run(&mut self) {
        let n = self.options.len();
        let mut cursor = vec![0usize; n];
        let mut depth = 0;

        loop {
            if depth == n {
                self.evaluate_leaf();
            } else if let Some(&choice) = self.options[depth].get(cursor[depth]) {
                if let Some(t) = choice {
                    self.usage[t] += 1;
                }
                self.partial.push(choice);
                depth += 1;
                continue;
            } else {
                cursor[depth] = 0;
            }

            // Backtrack to the deepest agent with an untried option.
            if depth == 0 {
                break;
            }
            depth -= 1;
            if let Some(Some(t)) = self.partial.pop() {
                self.usage[t] -= 1;
            }
            cursor[depth] += 1;
        }
    }

    fn evaluate_leaf(&mut self) {
        self.leaves += 1;
        let covered = self
            .usage
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .map(|(t, _)| t);
        let value = sum_targets(self.target_values, covered);
        if value > self.best_value {
            self.best_value = value;
            self.best.clone_from(&self.partial);
        }
    }
}
