//! Submodular target assignment under restricted information sharing.
//!
//! Agents decide one after another, each selecting at most one target from
//! its own action set. The value of an assignment counts each selected
//! target once. This crate measures how much a sequential greedy loses when
//! agents only learn about earlier decisions through messages sent along a
//! directed information graph.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Scenario`, `InfoGraph`, `Assignment`,
//!   `Message`, `KnowledgeState`
//! - **`validation`**: Scenario integrity checks (ranges, target values,
//!   decision-order consistency, DAG cycles)
//! - **`evaluation`**: f(x), the value of an assignment
//! - **`oracle`**: Exhaustive search for x_opt under an enumeration budget
//! - **`greedy`**: Full-information and generalized distributed greedy
//! - **`metrics`**: γ(x) = f(x)/f(x_opt), summaries, comparison tables
//! - **`generator`**: Seeded random scenario families
//! - **`simulation`**: Efficiency sweeps with best/worst run reporting
//!
//! # Entry points
//!
//! ```
//! use u_submod::{
//!     distributed_greedy, efficiency, generalized_distributed_greedy, optimal_value, value,
//!     BroadcastPolicy,
//! };
//! use u_submod::models::{InfoGraph, Scenario};
//!
//! let scenario = Scenario::new(
//!     vec![vec![0, 1], vec![0, 1]],
//!     vec![5.0, 3.0],
//!     InfoGraph::chain(2),
//! )
//! .unwrap();
//!
//! let x = generalized_distributed_greedy(&scenario, BroadcastPolicy::AnnounceOwn);
//! assert_eq!(value(&scenario, &x).unwrap(), 8.0);
//! assert_eq!(optimal_value(&scenario).unwrap(), 8.0);
//! assert_eq!(efficiency(&scenario, &x).unwrap(), Some(1.0));
//! assert_eq!(distributed_greedy(&scenario), x);
//! ```
//!
//! # References
//!
//! - Fisher, Nemhauser & Wolsey (1978), "An analysis of approximations for
//!   maximizing submodular set functions II"
//! - Gharesifard & Smith (2018), "Distributed submodular maximization with
//!   limited information"

pub mod error;
pub mod evaluation;
pub mod generator;
pub mod greedy;
pub mod metrics;
pub mod models;
pub mod oracle;
pub mod simulation;
pub mod validation;

pub use error::{Result, SubmodError};
pub use evaluation::value;
pub use greedy::{distributed_greedy, generalized_distributed_greedy, BroadcastPolicy};
pub use metrics::efficiency;
pub use oracle::optimal_value;
