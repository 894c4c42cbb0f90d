use std::fmt::{self, Display};
use std::num::NonZeroUsize;

use serde::Serialize;

use crate::Algorithm;

/// A number of simulated time units.
pub type Ticks = usize;

/// The PID of a process
///
/// The PID cannot be 0, PIDs start from 1.
#[derive(PartialEq, Eq, Copy, Clone, Hash, Ord, PartialOrd, Serialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Pid(NonZeroUsize);

impl Pid {
    /// Returns `None` for the invalid PID 0.
    pub fn new(pid: usize) -> Option<Pid> {
        NonZeroUsize::new(pid).map(Pid)
    }

    /// The PID given to the process found at `index` (0-based) in the input list.
    pub fn from_position(index: usize) -> Pid {
        Pid(NonZeroUsize::MIN.saturating_add(index))
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl PartialEq<usize> for Pid {
    fn eq(&self, other: &usize) -> bool {
        self.0.get() == *other
    }
}

impl Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The immutable description of a process, as supplied by the caller.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessSpec {
    /// Unique and stable ordering key.
    pub pid: Pid,

    /// The clock value at which the process becomes eligible to run.
    pub arrival_time: Ticks,

    /// The total amount of CPU time the process needs.
    pub burst_time: NonZeroUsize,

    /// The static priority. Lower values are scheduled first.
    pub priority: u32,
}

impl ProcessSpec {
    pub fn new(pid: Pid, arrival_time: Ticks, burst_time: NonZeroUsize, priority: u32) -> Self {
        ProcessSpec {
            pid,
            arrival_time,
            burst_time,
            priority,
        }
    }
}

/// The lifecycle of a process inside one simulation run.
///
/// `Unarrived -> Ready -> Running -> (Ready <-> Running)* -> Completed`
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProcessStatus {
    /// The clock has not reached the arrival time yet.
    Unarrived,

    /// The process has arrived and waits for the processor.
    Ready,

    /// The process was dispatched by the last scheduling decision.
    Running,

    /// The process has consumed its whole burst. This state is terminal.
    Completed,
}

impl Display for ProcessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessStatus::Unarrived => write!(f, "UNARRIVED"),
            ProcessStatus::Ready => write!(f, "READY"),
            ProcessStatus::Running => write!(f, "RUNNING"),
            ProcessStatus::Completed => write!(f, "COMPLETED"),
        }
    }
}

/// The simulation state of one process during one run.
///
/// A fresh state is built from a [`ProcessSpec`] at the beginning of every
/// run, so runs never share mutable state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessState {
    spec: ProcessSpec,
    status: ProcessStatus,
    remaining_time: Ticks,
    completion_time: Option<Ticks>,
    first_start_time: Option<Ticks>,
    last_ready_entry: Ticks,
    dynamic_priority: f64,
    preemptions: Vec<Ticks>,
    resumes: Vec<Ticks>,
    waiting_time: Option<Ticks>,
    turnaround_time: Option<Ticks>,
}

impl ProcessState {
    pub fn new(spec: ProcessSpec) -> Self {
        ProcessState {
            spec,
            status: ProcessStatus::Unarrived,
            remaining_time: spec.burst_time.get(),
            completion_time: None,
            first_start_time: None,
            last_ready_entry: spec.arrival_time,
            dynamic_priority: f64::from(spec.priority),
            preemptions: Vec::new(),
            resumes: Vec::new(),
            waiting_time: None,
            turnaround_time: None,
        }
    }

    pub fn pid(&self) -> Pid {
        self.spec.pid
    }

    pub fn arrival_time(&self) -> Ticks {
        self.spec.arrival_time
    }

    pub fn burst_time(&self) -> Ticks {
        self.spec.burst_time.get()
    }

    pub fn priority(&self) -> u32 {
        self.spec.priority
    }

    pub fn status(&self) -> ProcessStatus {
        self.status
    }

    pub fn remaining_time(&self) -> Ticks {
        self.remaining_time
    }

    pub fn completion_time(&self) -> Option<Ticks> {
        self.completion_time
    }

    pub fn first_start_time(&self) -> Option<Ticks> {
        self.first_start_time
    }

    /// The clock value of the last (re-)entry into the ready set.
    pub fn last_ready_entry(&self) -> Ticks {
        self.last_ready_entry
    }

    /// The last computed dynamic priority. Only the dynamic priority boost
    /// strategy recomputes it; otherwise it stays equal to the static priority.
    pub fn dynamic_priority(&self) -> f64 {
        self.dynamic_priority
    }

    /// Clock values at which the process lost the processor without finishing.
    pub fn preemptions(&self) -> &[Ticks] {
        &self.preemptions
    }

    /// Clock values at which the process got the processor back.
    pub fn resumes(&self) -> &[Ticks] {
        &self.resumes
    }

    pub fn waiting_time(&self) -> Option<Ticks> {
        self.waiting_time
    }

    pub fn turnaround_time(&self) -> Option<Ticks> {
        self.turnaround_time
    }

    pub fn is_completed(&self) -> bool {
        self.status == ProcessStatus::Completed
    }

    /// Whether the process can be selected at `now`.
    pub fn is_eligible(&self, now: Ticks) -> bool {
        self.spec.arrival_time <= now && self.remaining_time > 0
    }

    /// Rebuilds the waiting time from the dispatch history.
    ///
    /// The initial wait is `first_start_time - arrival_time`; every
    /// preemption is paired by index with the resume that follows it. A
    /// trailing preemption without a resume adds nothing. Returns `None` if
    /// the process never started.
    pub fn reconstructed_waiting_time(&self) -> Option<Ticks> {
        let first_start = self.first_start_time?;
        let initial = first_start.saturating_sub(self.spec.arrival_time);
        let gaps: Ticks = self
            .preemptions
            .iter()
            .zip(self.resumes.iter())
            .map(|(preempted, resumed)| resumed.saturating_sub(*preempted))
            .sum();
        Some(initial + gaps)
    }

    pub(crate) fn admit(&mut self, now: Ticks) {
        self.status = ProcessStatus::Ready;
        self.last_ready_entry = now;
    }

    pub(crate) fn start(&mut self, now: Ticks, resumed: bool) {
        match self.first_start_time {
            None => self.first_start_time = Some(now),
            Some(_) if resumed => self.resumes.push(now),
            Some(_) => {}
        }
        self.status = ProcessStatus::Running;
    }

    pub(crate) fn preempt(&mut self, now: Ticks) {
        self.preemptions.push(now);
        self.last_ready_entry = now;
        self.status = ProcessStatus::Ready;
    }

    /// Consumes `units` of CPU time. Returns `true` if the process finished.
    pub(crate) fn execute(&mut self, units: Ticks) -> bool {
        self.remaining_time = self.remaining_time.saturating_sub(units);
        self.remaining_time == 0
    }

    /// Marks the process as completed at `now` and derives the turnaround
    /// and waiting times arithmetically.
    pub(crate) fn complete(&mut self, now: Ticks) {
        debug_assert_eq!(self.remaining_time, 0, "completing unfinished process");
        debug_assert!(self.completion_time.is_none(), "process completed twice");

        let turnaround = now.saturating_sub(self.spec.arrival_time);
        self.status = ProcessStatus::Completed;
        self.completion_time = Some(now);
        self.turnaround_time = Some(turnaround);
        self.waiting_time = Some(turnaround.saturating_sub(self.spec.burst_time.get()));
    }

    pub(crate) fn set_waiting_time(&mut self, waiting_time: Ticks) {
        self.waiting_time = Some(waiting_time);
    }

    pub(crate) fn set_dynamic_priority(&mut self, dynamic_priority: f64) {
        self.dynamic_priority = dynamic_priority;
    }
}

/// The action that the scheduler asks the processor to take.
///
/// This is returned by the [`Scheduler::next`] function.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SchedulingDecision {
    /// Run the process with PID `pid` for exactly `timeslice` time units.
    Run { pid: Pid, timeslice: NonZeroUsize },

    /// No process is eligible; the processor stays idle for one time unit.
    Idle,

    /// Every process has completed.
    Done,
}

impl Display for SchedulingDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulingDecision::Run { pid, timeslice } => {
                write!(f, "Run {} for {} units", pid, timeslice)
            }
            SchedulingDecision::Idle => write!(f, "Idle for 1 unit"),
            SchedulingDecision::Done => write!(f, "Done, no more processes"),
        }
    }
}

/// The outcome reported by [`Scheduler::stop`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StopResult {
    /// The process consumed its whole burst.
    Completed(Pid),

    /// The process still has remaining time.
    Runnable(Pid),

    /// `stop` was called while no process was dispatched.
    NoRunningProcess,
}

/// The trait that any scheduling strategy has to implement.
pub trait Scheduler: Send {
    /// The identifier of the strategy.
    fn algorithm(&self) -> Algorithm;

    /// Admits the processes that arrived by `now` and returns the action
    /// that the processor has to perform next.
    fn next(&mut self, now: Ticks) -> SchedulingDecision;

    /// The processor informs the scheduler that the dispatched process has
    /// executed its whole timeslice and that the clock now reads `now`.
    fn stop(&mut self, now: Ticks) -> StopResult;

    /// Returns the process states, in input order.
    fn list(&self) -> &[ProcessState];

    /// Consumes the scheduler and returns the final process states, in input order.
    fn into_processes(self: Box<Self>) -> Vec<ProcessState>;
}
