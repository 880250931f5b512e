//! Error types.
//!
//! All errors are input or programming errors raised at the point of
//! violation. None of them is transient, so nothing in this crate retries.

use thiserror::Error;

use crate::validation::ValidationError;

/// Crate result alias.
pub type Result<T> = std::result::Result<T, SubmodError>;

/// Errors raised by scenario construction, evaluation, and the oracle.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmodError {
    /// An assignment references an agent or target outside the scenario,
    /// or an agent's entry was written out of decision order.
    #[error("invalid assignment: {0}")]
    InvalidAssignment(String),

    /// The information graph has a cycle, a self-loop, an edge against the
    /// decision order, or an endpoint outside the agent range.
    #[error("invalid information graph: {}", join_messages(.0))]
    InvalidGraph(Vec<ValidationError>),

    /// Non-graph structural problems in a scenario.
    #[error("invalid scenario: {}", join_messages(.0))]
    InvalidScenario(Vec<ValidationError>),

    /// The oracle search space exceeds the enumeration budget.
    ///
    /// `size` is `None` when the number of leaves does not fit in a `u64`.
    #[error("search space of {} leaves exceeds enumeration budget {budget}", display_size(.size))]
    IntractableScenario { size: Option<u64>, budget: u64 },
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

fn display_size(size: &Option<u64>) -> String {
    match size {
        Some(n) => n.to_string(),
        None => "more than u64::MAX".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_graph_error_joins_messages() {
        let err = SubmodError::InvalidGraph(vec![
            ValidationError::new(ValidationErrorKind::SelfLoop, "agent 1 sends to itself"),
            ValidationError::new(ValidationErrorKind::CyclicGraph, "cycle through agent 2"),
        ]);
        assert_eq!(
            err.to_string(),
            "invalid information graph: agent 1 sends to itself; cycle through agent 2"
        );
    }

    #[test]
    fn test_intractable_overflow_message() {
        let err = SubmodError::IntractableScenario {
            size: None,
            budget: 10,
        };
        assert!(err.to_string().contains("more than u64::MAX"));

        let err = SubmodError::IntractableScenario {
            size: Some(64),
            budget: 10,
        };
        assert_eq!(
            err.to_string(),
            "search space of 64 leaves exceeds enumeration budget 10"
        );
    }
}
