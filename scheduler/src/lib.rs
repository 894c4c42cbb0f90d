//! A priority scheduling library.
//!
//! This library provides the process model, the [`Scheduler`] trait and
//! three priority-based strategies that the [`processor`] crate drives over
//! a discrete clock.
//!
//! [`processor`]: ../processor/index.html

mod algorithm;
mod input;
mod scheduler;
mod schedulers;

pub use crate::algorithm::{Algorithm, UnknownAlgorithm};
pub use crate::input::{
    check_unique, from_rows, parse_table, Field, InputValidationError, ValidationErrorKind,
};
pub use crate::scheduler::{
    Pid, ProcessSpec, ProcessState, ProcessStatus, Scheduler, SchedulingDecision, StopResult,
    Ticks,
};
pub use crate::schedulers::{
    dynamic_priority, DynamicPriorityBoost, PriorityNonPreemptive, PriorityPreemptive,
    BURST_WEIGHT, WAIT_WEIGHT,
};

/// Returns a structure that implements the `Scheduler` trait with a preemptive priority policy
///
/// * `specs` - the processes to simulate. The scheduler works on fresh copies.
pub fn priority_preemptive(specs: &[ProcessSpec]) -> impl Scheduler {
    PriorityPreemptive::new(specs)
}

/// Returns a structure that implements the `Scheduler` trait with a non-preemptive priority policy
///
/// * `specs` - the processes to simulate. The scheduler works on fresh copies.
pub fn priority_non_preemptive(specs: &[ProcessSpec]) -> impl Scheduler {
    PriorityNonPreemptive::new(specs)
}

/// Returns a structure that implements the `Scheduler` trait with the dynamic priority boost policy
///
/// * `specs` - the processes to simulate. The scheduler works on fresh copies.
pub fn dynamic_priority_boost(specs: &[ProcessSpec]) -> impl Scheduler {
    DynamicPriorityBoost::new(specs)
}
