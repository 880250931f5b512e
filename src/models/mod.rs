//! Target-assignment domain models.
//!
//! Provides the data types shared by every algorithm in the crate: the
//! immutable [`Scenario`], the order-consistent [`InfoGraph`], the
//! incrementally built [`Assignment`], and the per-agent message types.
//!
//! # Domain Mappings
//!
//! | u-submod | Sensor networks | Robotics | Logistics |
//! |----------|-----------------|----------|-----------|
//! | Agent | Sensor | Robot | Courier |
//! | Target | Area of interest | Task site | Delivery |
//! | Action set | Field of view | Reachable sites | Service zone |
//! | InfoGraph | Radio links | Comms topology | Dispatch channels |

mod assignment;
mod graph;
mod message;
mod scenario;

pub use assignment::Assignment;
pub use graph::InfoGraph;
pub use message::{KnowledgeState, Message};
pub use scenario::Scenario;

/// Agent index. Agents decide in ascending index order.
pub type AgentId = usize;

/// Target index into [`Scenario::target_values`].
pub type TargetId = usize;
