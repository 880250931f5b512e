//! Efficiency γ(x) and its aggregate statistics.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::evaluation::value;
use crate::models::{Assignment, Scenario};
use crate::oracle::ExhaustiveOracle;

/// Tolerance for counting a run as optimal.
const OPTIMAL_EPSILON: f64 = 1e-9;

/// γ(x) with the default oracle budget.
///
/// Returns `Ok(None)` when f(x_opt) is 0: efficiency is undefined and the
/// caller decides how to treat the scenario.
///
/// # Example
/// ```
/// use u_submod::greedy::{generalized_distributed_greedy, BroadcastPolicy};
/// use u_submod::metrics::efficiency;
/// use u_submod::models::{InfoGraph, Scenario};
///
/// let scenario = Scenario::new(
///     vec![vec![0, 1], vec![0, 1]],
///     vec![5.0, 3.0],
///     InfoGraph::empty(2),
/// )
/// .unwrap();
/// let x = generalized_distributed_greedy(&scenario, BroadcastPolicy::AnnounceOwn);
/// assert_eq!(efficiency(&scenario, &x).unwrap(), Some(0.625));
/// ```
pub fn efficiency(scenario: &Scenario, assignment: &Assignment) -> Result<Option<f64>> {
    efficiency_with(&ExhaustiveOracle::default(), scenario, assignment)
}

/// γ(x) using a specific oracle.
///
/// # Errors
/// Evaluator errors for malformed assignments, oracle errors for scenarios
/// over the enumeration budget.
pub fn efficiency_with(
    oracle: &ExhaustiveOracle,
    scenario: &Scenario,
    assignment: &Assignment,
) -> Result<Option<f64>> {
    let achieved = value(scenario, assignment)?;
    let optimal = oracle.optimal_value(scenario)?;
    Ok(efficiency_ratio(achieved, optimal))
}

/// `value / optimal`, or `None` when `optimal` is not positive.
pub fn efficiency_ratio(value: f64, optimal: f64) -> Option<f64> {
    if optimal > 0.0 {
        Some(value / optimal)
    } else {
        None
    }
}

/// Aggregate of γ(x) over many runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EfficiencySummary {
    /// Total runs, including undefined ones.
    pub runs: usize,
    /// Runs whose efficiency was undefined.
    pub undefined: usize,
    /// Mean over defined runs.
    pub mean: Option<f64>,
    /// Minimum over defined runs.
    pub min: Option<f64>,
    /// Maximum over defined runs.
    pub max: Option<f64>,
    /// Defined runs that reached the optimum.
    pub optimal_hits: usize,
}

impl EfficiencySummary {
    /// Summarizes a sequence of efficiencies.
    pub fn from_efficiencies(efficiencies: impl IntoIterator<Item = Option<f64>>) -> Self {
        let mut summary = Self::default();
        let mut sum = 0.0;
        let mut defined = 0usize;

        for efficiency in efficiencies {
            summary.runs += 1;
            let Some(e) = efficiency else {
                summary.undefined += 1;
                continue;
            };
            defined += 1;
            sum += e;
            summary.min = Some(summary.min.map_or(e, |m| m.min(e)));
            summary.max = Some(summary.max.map_or(e, |m| m.max(e)));
            if e >= 1.0 - OPTIMAL_EPSILON {
                summary.optimal_hits += 1;
            }
        }

        if defined > 0 {
            summary.mean = Some(sum / defined as f64);
        }
        summary
    }

    /// Fraction of defined runs that reached the optimum (0.0..1.0).
    pub fn optimal_rate(&self) -> f64 {
        let defined = self.runs - self.undefined;
        if defined == 0 {
            0.0
        } else {
            self.optimal_hits as f64 / defined as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SubmodError;
    use crate::generator::{GeneratorConfig, ScenarioGenerator};
    use crate::greedy::{distributed_greedy, generalized_distributed_greedy, BroadcastPolicy};
    use crate::models::InfoGraph;
    use crate::oracle::OracleConfig;

    fn example(graph: InfoGraph) -> Scenario {
        Scenario::new(vec![vec![0, 1], vec![0, 1]], vec![5.0, 3.0], graph).unwrap()
    }

    #[test]
    fn test_example_no_edges() {
        let s = example(InfoGraph::empty(2));
        let x = generalized_distributed_greedy(&s, BroadcastPolicy::AnnounceOwn);
        assert_eq!(x.choices(), &[Some(0), Some(0)]);
        assert!((value(&s, &x).unwrap() - 5.0).abs() < 1e-10);
        let gamma = efficiency(&s, &x).unwrap().unwrap();
        assert!((gamma - 0.625).abs() < 1e-10);
    }

    #[test]
    fn test_example_with_edge() {
        let s = example(InfoGraph::chain(2));
        let x = generalized_distributed_greedy(&s, BroadcastPolicy::AnnounceOwn);
        assert_eq!(x.choices(), &[Some(0), Some(1)]);
        assert!((value(&s, &x).unwrap() - 8.0).abs() < 1e-10);
        let gamma = efficiency(&s, &x).unwrap().unwrap();
        assert!((gamma - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_undefined_when_optimum_zero() {
        let s = Scenario::new(vec![vec![0], vec![1]], vec![0.0, 0.0], InfoGraph::empty(2)).unwrap();
        let x = distributed_greedy(&s);
        assert_eq!(efficiency(&s, &x).unwrap(), None);
    }

    #[test]
    fn test_efficiency_propagates_errors() {
        let s = example(InfoGraph::empty(2));
        let bad = Assignment::from_choices(vec![Some(4)]);
        assert!(matches!(efficiency(&s, &bad), Err(SubmodError::InvalidAssignment(_))));

        let tiny = ExhaustiveOracle::new(OracleConfig::default().with_budget(1));
        let x = distributed_greedy(&s);
        assert!(matches!(
            efficiency_with(&tiny, &s, &x),
            Err(SubmodError::IntractableScenario { .. })
        ));
    }

    #[test]
    fn test_half_approximation_bound() {
        let config = GeneratorConfig::default()
            .with_agents(6)
            .with_targets(6)
            .with_action_set_size(1, 4)
            .with_value_range(0, 20);
        let mut generator = ScenarioGenerator::new(config, 2024);
        for _ in 0..300 {
            let s = generator.next_scenario().unwrap();
            let x = distributed_greedy(&s);
            if let Some(gamma) = efficiency(&s, &x).unwrap() {
                assert!(gamma >= 0.5 - 1e-9, "scenario {} gamma {gamma}", s.number());
                assert!(gamma <= 1.0 + 1e-9);
            }
        }
    }

    #[test]
    fn test_ratio() {
        assert_eq!(efficiency_ratio(3.0, 4.0), Some(0.75));
        assert_eq!(efficiency_ratio(0.0, 0.0), None);
    }

    #[test]
    fn test_summary() {
        let summary =
            EfficiencySummary::from_efficiencies([Some(0.5), None, Some(1.0), Some(0.75)]);
        assert_eq!(summary.runs, 4);
        assert_eq!(summary.undefined, 1);
        assert_eq!(summary.optimal_hits, 1);
        assert!((summary.mean.unwrap() - 0.75).abs() < 1e-10);
        assert_eq!(summary.min, Some(0.5));
        assert_eq!(summary.max, Some(1.0));
        assert!((summary.optimal_rate() - 1.0 / 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_summary_empty() {
        let summary = EfficiencySummary::from_efficiencies([None, None]);
        assert_eq!(summary.runs, 2);
        assert_eq!(summary.mean, None);
        assert!((summary.optimal_rate() - 0.0).abs() < 1e-10);
    }
}
