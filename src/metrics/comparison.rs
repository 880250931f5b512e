//! Side-by-side comparison of assignments on one scenario.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::efficiency_ratio;
use crate::error::Result;
use crate::evaluation::value;
use crate::models::{Assignment, Scenario, TargetId};
use crate::oracle::ExhaustiveOracle;

/// One labelled assignment with its f(x) and γ(x).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    /// Row label (algorithm or rule name).
    pub label: String,
    /// Per-agent choices in decision order.
    pub choices: Vec<Option<TargetId>>,
    /// f(x).
    pub value: f64,
    /// γ(x), `None` when undefined.
    pub efficiency: Option<f64>,
}

/// Comparison table: the optimal assignment first, then each input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentComparison {
    /// Number of the compared scenario.
    pub scenario: u64,
    /// Table rows.
    pub rows: Vec<ComparisonRow>,
}

impl AssignmentComparison {
    /// Evaluates `assignments` against the optimum of `scenario`.
    ///
    /// # Errors
    /// Oracle errors, or evaluator errors for any malformed assignment.
    pub fn build(
        oracle: &ExhaustiveOracle,
        scenario: &Scenario,
        assignments: &[(&str, &Assignment)],
    ) -> Result<Self> {
        let optimal = oracle.solve(scenario)?;
        let mut rows = Vec::with_capacity(assignments.len() + 1);
        rows.push(ComparisonRow {
            label: "Optimal".to_string(),
            choices: optimal.assignment.choices().to_vec(),
            value: optimal.value,
            efficiency: efficiency_ratio(optimal.value, optimal.value),
        });

        for (label, assignment) in assignments {
            let achieved = value(scenario, assignment)?;
            rows.push(ComparisonRow {
                label: (*label).to_string(),
                choices: assignment.choices().to_vec(),
                value: achieved,
                efficiency: efficiency_ratio(achieved, optimal.value),
            });
        }

        Ok(Self {
            scenario: scenario.number(),
            rows,
        })
    }

    /// Row for `label`, if present.
    pub fn row(&self, label: &str) -> Option<&ComparisonRow> {
        self.rows.iter().find(|r| r.label == label)
    }
}

impl fmt::Display for AssignmentComparison {
    /// Renders a plain-text table: `Rule | x0 .. xn | f(x) | γ(x)`.
    ///
    /// Choices print as `t<k>`, abstentions as `-`, γ(x) with three decimals.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let agents = self.rows.iter().map(|r| r.choices.len()).max().unwrap_or(0);

        let mut table: Vec<Vec<String>> = Vec::with_capacity(self.rows.len() + 1);
        let mut header = vec!["Rule".to_string()];
        header.extend((0..agents).map(|i| format!("x{i}")));
        header.push("f(x)".to_string());
        header.push("γ(x)".to_string());
        table.push(header);

        for row in &self.rows {
            let mut cells = vec![row.label.clone()];
            cells.extend((0..agents).map(|i| match row.choices.get(i).copied().flatten() {
                Some(t) => format!("t{t}"),
                None => "-".to_string(),
            }));
            cells.push(format!("{}", row.value));
            cells.push(match row.efficiency {
                Some(e) => format!("{e:.3}"),
                None => "n/a".to_string(),
            });
            table.push(cells);
        }

        let columns = agents + 3;
        let widths: Vec<usize> = (0..columns)
            .map(|c| {
                table
                    .iter()
                    .map(|cells| cells[c].chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        for (i, cells) in table.iter().enumerate() {
            let line: Vec<String> = cells
                .iter()
                .zip(&widths)
                .map(|(cell, &w)| format!("{cell:<w$}"))
                .collect();
            writeln!(f, "{}", line.join("  ").trim_end())?;
            if i == 0 {
                let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
                writeln!(f, "{}", rule.join("  "))?;
            }
        }
        Ok(())
    }
}
