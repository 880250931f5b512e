//! Efficiency sweeps over generated scenario families.
//!
//! Runs each configured algorithm variant over the same scenarios, solves
//! each scenario's optimum once, and reports per-variant efficiency
//! statistics together with the best and worst runs.
//!
//! Single-threaded: scenarios and agents are processed strictly in order.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::evaluation::value;
use crate::generator::{GeneratorConfig, ScenarioGenerator};
use crate::greedy::{BroadcastPolicy, DistributedGreedy, GeneralizedGreedy};
use crate::metrics::{efficiency_ratio, EfficiencySummary};
use crate::models::{Assignment, Scenario};
use crate::oracle::{ExhaustiveOracle, OracleConfig};

/// An algorithm under comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    /// Full-information distributed greedy.
    DistributedGreedy,
    /// Generalized distributed greedy with a broadcast policy.
    Generalized(BroadcastPolicy),
}

impl Variant {
    /// The three variants of the study.
    pub const ALL: [Variant; 3] = [
        Variant::DistributedGreedy,
        Variant::Generalized(BroadcastPolicy::AnnounceOwn),
        Variant::Generalized(BroadcastPolicy::HighestMarginalContribution),
    ];

    /// Runs this variant over `scenario`.
    pub fn run(&self, scenario: &Scenario) -> Assignment {
        match self {
            Self::DistributedGreedy => DistributedGreedy::new().run(scenario),
            Self::Generalized(policy) => GeneralizedGreedy::new(*policy).run(scenario),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DistributedGreedy => f.write_str("DG"),
            Self::Generalized(policy) => write!(f, "GDG ({policy})"),
        }
    }
}

/// Sweep parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of scenarios to generate.
    pub scenario_count: usize,
    /// Generator seed.
    pub seed: u64,
    /// Scenario family.
    pub generator: GeneratorConfig,
    /// Oracle limits.
    pub oracle: OracleConfig,
    /// Variants to compare.
    pub variants: Vec<Variant>,
    /// How many best and worst runs to keep per variant.
    pub keep_extremes: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            scenario_count: 100,
            seed: 0,
            generator: GeneratorConfig::default(),
            oracle: OracleConfig::default(),
            variants: Variant::ALL.to_vec(),
            keep_extremes: 5,
        }
    }
}

impl SimulationConfig {
    /// Sets the number of scenarios.
    pub fn with_scenarios(mut self, scenario_count: usize) -> Self {
        self.scenario_count = scenario_count;
        self
    }

    /// Sets the generator seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the scenario family.
    pub fn with_generator(mut self, generator: GeneratorConfig) -> Self {
        self.generator = generator;
        self
    }

    /// Sets the oracle limits.
    pub fn with_oracle(mut self, oracle: OracleConfig) -> Self {
        self.oracle = oracle;
        self
    }

    /// Sets the compared variants.
    pub fn with_variants(mut self, variants: Vec<Variant>) -> Self {
        self.variants = variants;
        self
    }

    /// Sets how many extreme runs to keep.
    pub fn with_keep_extremes(mut self, keep_extremes: usize) -> Self {
        self.keep_extremes = keep_extremes;
        self
    }
}

/// One variant run on one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    /// Scenario number.
    pub scenario: u64,
    /// Variant that produced the assignment.
    pub variant: Variant,
    /// Produced assignment.
    pub assignment: Assignment,
    /// f(x).
    pub value: f64,
    /// f(x_opt).
    pub optimal_value: f64,
    /// γ(x), `None` when undefined.
    pub efficiency: Option<f64>,
}

/// Results of one variant across the sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantReport {
    /// The variant.
    pub variant: Variant,
    /// Efficiency statistics.
    pub summary: EfficiencySummary,
    /// Highest-efficiency runs, best first.
    pub best_runs: Vec<RunRecord>,
    /// Lowest-efficiency runs, worst first.
    pub worst_runs: Vec<RunRecord>,
}

/// Results of a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Every evaluated scenario, in order.
    pub scenarios: Vec<Scenario>,
    /// One report per configured variant, in configuration order.
    pub variants: Vec<VariantReport>,
}

impl SimulationReport {
    /// Report for `variant`, if it was part of the sweep.
    pub fn variant(&self, variant: Variant) -> Option<&VariantReport> {
        self.variants.iter().find(|r| r.variant == variant)
    }

    /// Scenario with the given number.
    pub fn scenario(&self, number: u64) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.number() == number)
    }
}

/// Efficiency sweep runner.
///
/// # Example
/// ```
/// use u_submod::simulation::{Simulation, SimulationConfig, Variant};
///
/// let config = SimulationConfig::default().with_scenarios(20).with_seed(7);
/// let report = Simulation::new(config).run().unwrap();
///
/// let dg = report.variant(Variant::DistributedGreedy).unwrap();
/// assert_eq!(dg.summary.runs, 20);
/// assert!(dg.summary.min.unwrap() >= 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimulationConfig,
}

impl Simulation {
    /// Creates a runner.
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// The sweep parameters.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Generates the configured scenarios and evaluates every variant.
    ///
    /// # Errors
    /// Generator errors for an invalid family, oracle errors for scenarios
    /// over the enumeration budget. A failing scenario aborts the sweep.
    pub fn run(&self) -> Result<SimulationReport> {
        let mut generator = ScenarioGenerator::new(self.config.generator.clone(), self.config.seed);
        let scenarios = generator.generate(self.config.scenario_count)?;
        self.run_on(scenarios)
    }

    /// Evaluates every variant on the given scenarios.
    pub fn run_on(&self, scenarios: Vec<Scenario>) -> Result<SimulationReport> {
        let oracle = ExhaustiveOracle::new(self.config.oracle);
        info!(
            scenarios = scenarios.len(),
            variants = self.config.variants.len(),
            seed = self.config.seed,
            "simulation started"
        );

        let mut records: Vec<Vec<RunRecord>> = vec![Vec::new(); self.config.variants.len()];
        for scenario in &scenarios {
            let optimal_value = oracle.optimal_value(scenario)?;
            if optimal_value <= 0.0 {
                warn!(
                    scenario = scenario.number(),
                    "optimal value is zero; efficiency undefined"
                );
            }

            for (variant, runs) in self.config.variants.iter().zip(records.iter_mut()) {
                let assignment = variant.run(scenario);
                let achieved = value(scenario, &assignment)?;
                let efficiency = efficiency_ratio(achieved, optimal_value);
                debug!(
                    scenario = scenario.number(),
                    variant = %variant,
                    value = achieved,
                    optimal = optimal_value,
                    efficiency = ?efficiency,
                    "run evaluated"
                );
                runs.push(RunRecord {
                    scenario: scenario.number(),
                    variant: *variant,
                    assignment,
                    value: achieved,
                    optimal_value,
                    efficiency,
                });
            }
        }

        let variants: Vec<VariantReport> = self
            .config
            .variants
            .iter()
            .zip(records)
            .map(|(&variant, runs)| self.summarize(variant, runs))
            .collect();

        for report in &variants {
            info!(
                variant = %report.variant,
                mean = ?report.summary.mean,
                min = ?report.summary.min,
                optimal_hits = report.summary.optimal_hits,
                undefined = report.summary.undefined,
                "variant summary"
            );
        }

        Ok(SimulationReport {
            scenarios,
            variants,
        })
    }

    fn summarize(&self, variant: Variant, runs: Vec<RunRecord>) -> VariantReport {
        let summary = EfficiencySummary::from_efficiencies(runs.iter().map(|r| r.efficiency));

        let mut ranked: Vec<&RunRecord> = runs.iter().filter(|r| r.efficiency.is_some()).collect();
        ranked.sort_by(|a, b| compare_efficiency(b, a).then(a.scenario.cmp(&b.scenario)));
        let best_runs = ranked
            .iter()
            .take(self.config.keep_extremes)
            .map(|r| (*r).clone())
            .collect();

        ranked.sort_by(|a, b| compare_efficiency(a, b).then(a.scenario.cmp(&b.scenario)));
        let worst_runs = ranked
            .iter()
            .take(self.config.keep_extremes)
            .map(|r| (*r).clone())
            .collect();

        VariantReport {
            variant,
            summary,
            best_runs,
            worst_runs,
        }
    }
}

fn compare_efficiency(a: &RunRecord, b: &RunRecord) -> Ordering {
    let a = a.efficiency.unwrap_or(f64::NEG_INFINITY);
    let b = b.efficiency.unwrap_or(f64::NEG_INFINITY);
    a.total_cmp(&b)
}
