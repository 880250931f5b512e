//! Efficiency metrics and assignment comparison.
//!
//! Provides γ(x) = f(x) / f(x_opt), aggregate efficiency statistics over
//! many runs, and a plain-text side-by-side comparison of assignments.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | f(x) | Sum of values of distinct selected targets |
//! | γ(x) | f(x) / f(x_opt), undefined when f(x_opt) = 0 |
//! | Optimal hits | Runs with γ(x) = 1 |
//!
//! # Reference
//! Gharesifard & Smith (2018), "Distributed submodular maximization with
//! limited information"

mod comparison;
mod efficiency;

pub use comparison::{AssignmentComparison, ComparisonRow};
pub use efficiency::{efficiency, efficiency_ratio, efficiency_with, EfficiencySummary};
