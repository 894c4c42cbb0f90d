//! The scheduling strategies.
//!
//! Every strategy keeps its processes in a process table so that
//! state reset, dispatch bookkeeping and completion are written once.

mod table;

mod priority_preemptive;
pub use priority_preemptive::PriorityPreemptive;

mod priority_non_preemptive;
pub use priority_non_preemptive::PriorityNonPreemptive;

mod dynamic_priority_boost;
pub use dynamic_priority_boost::{dynamic_priority, DynamicPriorityBoost, BURST_WEIGHT, WAIT_WEIGHT};
