//! A processor simulation library
//!
//! This is used for simulating schedulers from the [`scheduler`] crate over
//! a discrete clock, one scheduling decision at a time.

use std::panic;
use std::thread;

use log::{debug, info, trace, warn};
use scheduler::{Algorithm, ProcessSpec, ProcessState, Scheduler, SchedulingDecision, StopResult, Ticks};
use serde::Serialize;

mod metrics;
mod timeline;

pub use metrics::{round2, summarize, Comparison, ComparisonEntry, ProcessRow, Report, Summary};
pub use timeline::{compress, Gantt, Occupant, Segment, Timeline};

/// The outcome of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunResult {
    /// The strategy that produced this result.
    pub algorithm: Algorithm,

    /// The final process states, sorted by PID.
    pub processes: Vec<ProcessState>,

    /// The occupant of every simulated time unit.
    pub timeline: Timeline,
}

impl RunResult {
    /// The average waiting and turnaround times.
    pub fn summary(&self) -> Summary {
        summarize(&self.processes)
    }

    /// The per-process rows and averages, ready for display.
    pub fn report(&self) -> Report {
        Report::new(self)
    }

    /// The run-length compressed timeline.
    pub fn segments(&self) -> Vec<Segment> {
        self.timeline.segments()
    }

    /// The latest completion time, 0 for an empty run.
    pub fn makespan(&self) -> Ticks {
        self.processes
            .iter()
            .filter_map(ProcessState::completion_time)
            .max()
            .unwrap_or(0)
    }
}

/// The processor simulator.
pub struct Processor<S: Scheduler + ?Sized> {
    scheduler: Box<S>,
    timeline: Timeline,
    now: Ticks,
}

impl<S: Scheduler + ?Sized> Processor<S> {
    /// Runs `scheduler` until every process has completed.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use processor::Processor;
    ///
    /// let specs = scheduler::from_rows(&[(0, 4, 2), (1, 2, 1)]).unwrap();
    /// let result = Processor::run(Box::new(scheduler::priority_preemptive(&specs)));
    /// assert_eq!(result.timeline.len(), 6);
    /// ```
    pub fn run(scheduler: Box<S>) -> RunResult {
        let mut processor = Processor {
            scheduler,
            timeline: Timeline::new(),
            now: 0,
        };
        while processor.step() {}
        processor.finish()
    }

    // Returns false once the scheduler is done
    fn step(&mut self) -> bool {
        let decision = self.scheduler.next(self.now);
        match decision {
            SchedulingDecision::Run { pid, timeslice } => {
                debug!("{}: {}", self.now, decision);
                self.timeline.record(Occupant::Process(pid), timeslice.get());
                self.now += timeslice.get();
                if let StopResult::NoRunningProcess = self.scheduler.stop(self.now) {
                    warn!("{}: {} was dispatched but is not running", self.now, pid);
                }
                true
            }
            SchedulingDecision::Idle => {
                trace!("{}: IDLE", self.now);
                self.timeline.record(Occupant::Idle, 1);
                self.now += 1;
                true
            }
            SchedulingDecision::Done => false,
        }
    }

    fn finish(self) -> RunResult {
        let algorithm = self.scheduler.algorithm();
        let mut processes = self.scheduler.into_processes();
        processes.sort_by_key(ProcessState::pid);

        info!(
            "{}: {} processes completed in {} units",
            algorithm,
            processes.len(),
            self.timeline.len()
        );

        RunResult {
            algorithm,
            processes,
            timeline: self.timeline,
        }
    }
}

/// Runs `algorithm` over fresh copies of `specs`.
pub fn simulate(algorithm: Algorithm, specs: &[ProcessSpec]) -> RunResult {
    Processor::run(algorithm.scheduler(specs))
}

/// Runs every strategy over its own fresh copy of `specs`, in parallel.
///
/// Results are returned in [`Algorithm::ALL`] order.
pub fn simulate_all(specs: &[ProcessSpec]) -> Vec<RunResult> {
    thread::scope(|s| {
        let handles: Vec<_> = Algorithm::ALL
            .into_iter()
            .map(|algorithm| s.spawn(move || simulate(algorithm, specs)))
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|err| panic::resume_unwind(err)))
            .collect()
    })
}

/// Runs every strategy over `specs` and keeps only their averages.
pub fn compare(specs: &[ProcessSpec]) -> Vec<ComparisonEntry> {
    let entries: Vec<ComparisonEntry> = simulate_all(specs)
        .iter()
        .map(|result| ComparisonEntry {
            algorithm: result.algorithm,
            summary: result.summary(),
        })
        .collect();
    info!("compared {} strategies over {} processes", entries.len(), specs.len());
    entries
}

/// Format a [`RunResult`] to a [`String`]: the report table followed by the
/// compressed timeline.
///
/// ## Example
///
/// ```rust
/// use processor::{format_result, simulate};
/// use scheduler::Algorithm;
///
/// let specs = scheduler::from_rows(&[(0, 5, 1)]).unwrap();
/// let result = simulate(Algorithm::PriorityNonPreemptive, &specs);
///
/// println!("{}", format_result(&result));
/// ```
pub fn format_result(result: &RunResult) -> String {
    format!("{}{}", result.report(), Gantt(&result.segments()))
}

/// Format comparison entries to a [`String`].
pub fn format_comparison(entries: &[ComparisonEntry]) -> String {
    Comparison(entries).to_string()
}
