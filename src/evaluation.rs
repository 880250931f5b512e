//! Assignment evaluation.
//!
//! f(x) is the sum of the values of the distinct targets selected in x.
//! A target chosen by several agents counts once, which makes f a
//! monotone submodular (weighted coverage) function of the selections.

use std::collections::BTreeSet;

use crate::error::{Result, SubmodError};
use crate::models::{Assignment, Scenario, TargetId};

/// Computes f(x) for `assignment` within `scenario`.
///
/// Targets are summed in ascending index order, so equal target sets
/// always produce bit-identical values.
///
/// # Errors
/// [`SubmodError::InvalidAssignment`] if the assignment has entries for
/// more agents than the scenario, or selects an unknown target.
///
/// # Example
/// ```
/// use u_submod::evaluation::value;
/// use u_submod::models::{Assignment, InfoGraph, Scenario};
///
/// let scenario = Scenario::new(
///     vec![vec![0, 1], vec![0, 1]],
///     vec![5.0, 3.0],
///     InfoGraph::empty(2),
/// )
/// .unwrap();
/// let collided = Assignment::from_choices(vec![Some(0), Some(0)]);
/// assert_eq!(value(&scenario, &collided).unwrap(), 5.0);
/// ```
pub fn value(scenario: &Scenario, assignment: &Assignment) -> Result<f64> {
    if assignment.len() > scenario.num_agents() {
        return Err(SubmodError::InvalidAssignment(format!(
            "assignment has {} entries but scenario has {} agents",
            assignment.len(),
            scenario.num_agents()
        )));
    }

    let mut selected: BTreeSet<TargetId> = BTreeSet::new();
    for (agent, choice) in assignment.pairs() {
        let Some(target) = choice else {
            continue;
        };
        if target >= scenario.num_targets() {
            return Err(SubmodError::InvalidAssignment(format!(
                "agent {agent} selected unknown target {target} (targets: {})",
                scenario.num_targets()
            )));
        }
        selected.insert(target);
    }

    Ok(sum_targets(scenario.target_values(), selected))
}

/// Sums the values of `targets`, which must be ascending and in range.
pub(crate) fn sum_targets(
    target_values: &[f64],
    targets: impl IntoIterator<Item = TargetId>,
) -> f64 {
    targets
        .into_iter()
        .filter_map(|t| target_values.get(t))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InfoGraph;

    fn scenario() -> Scenario {
        Scenario::new(
            vec![vec![0, 1], vec![0, 1], vec![2]],
            vec![5.0, 3.0, 0.5],
            InfoGraph::empty(3),
        )
        .unwrap()
    }

    #[test]
    fn test_value_distinct_targets() {
        let s = scenario();
        let a = Assignment::from_choices(vec![Some(0), Some(1), Some(2)]);
        assert!((value(&s, &a).unwrap() - 8.5).abs() < 1e-10);
    }

    #[test]
    fn test_value_counts_collisions_once() {
        let s = scenario();
        let a = Assignment::from_choices(vec![Some(0), Some(0), None]);
        assert!((value(&s, &a).unwrap() - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_value_empty_and_abstaining() {
        let s = scenario();
        assert_eq!(value(&s, &Assignment::new()).unwrap(), 0.0);
        let a = Assignment::from_choices(vec![None, None, None]);
        assert_eq!(value(&s, &a).unwrap(), 0.0);
    }

    #[test]
    fn test_value_partial_assignment() {
        let s = scenario();
        let a = Assignment::from_choices(vec![Some(1)]);
        assert!((value(&s, &a).unwrap() - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_value_unknown_target() {
        let s = scenario();
        let a = Assignment::from_choices(vec![Some(0), Some(3)]);
        let err = value(&s, &a).unwrap_err();
        assert!(matches!(err, SubmodError::InvalidAssignment(_)));
        assert!(err.to_string().contains("unknown target 3"));
    }

    #[test]
    fn test_value_too_many_agents() {
        let s = scenario();
        let a = Assignment::from_choices(vec![None, None, None, Some(0)]);
        assert!(matches!(value(&s, &a), Err(SubmodError::InvalidAssignment(_))));
    }

    #[test]
    fn test_value_idempotent() {
        let s = scenario();
        let a = Assignment::from_choices(vec![Some(1), Some(0), Some(2)]);
        let first = value(&s, &a).unwrap();
        let second = value(&s, &a).unwrap();
        assert_eq!(first.to_bits(), second.to_bits());
    }
}
