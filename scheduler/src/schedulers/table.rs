use std::num::NonZeroUsize;

use log::debug;

use crate::{ProcessSpec, ProcessState, ProcessStatus, SchedulingDecision, StopResult, Ticks};

/// Bookkeeping shared by every strategy: fresh process states, the process
/// holding the processor, and the dispatch/completion transitions.
#[derive(Debug)]
pub(crate) struct ProcessTable {
    processes: Vec<ProcessState>,
    running: Option<usize>,
    timeslice: Ticks,
    completed: usize,
}

impl ProcessTable {
    pub fn new(specs: &[ProcessSpec]) -> Self {
        ProcessTable {
            processes: specs.iter().copied().map(ProcessState::new).collect(),
            running: None,
            timeslice: 0,
            completed: 0,
        }
    }

    pub fn processes(&self) -> &[ProcessState] {
        &self.processes
    }

    pub fn into_processes(self) -> Vec<ProcessState> {
        self.processes
    }

    pub fn get(&self, index: usize) -> &ProcessState {
        &self.processes[index]
    }

    pub fn get_mut(&mut self, index: usize) -> &mut ProcessState {
        &mut self.processes[index]
    }

    /// The index of the process dispatched by the last decision, if it is
    /// still unfinished.
    pub fn running(&self) -> Option<usize> {
        self.running
    }

    pub fn all_completed(&self) -> bool {
        self.completed == self.processes.len()
    }

    /// Moves every process that arrived by `now` from `Unarrived` to `Ready`
    /// and returns their indices, in input order.
    pub fn admit(&mut self, now: Ticks) -> Vec<usize> {
        let mut admitted = Vec::new();
        for (index, process) in self.processes.iter_mut().enumerate() {
            if process.status() == ProcessStatus::Unarrived && process.arrival_time() <= now {
                process.admit(now);
                admitted.push(index);
            }
        }
        admitted
    }

    /// Gives the processor to the process at `index` for `timeslice` units.
    ///
    /// A different, unfinished process holding the processor is preempted at
    /// `now`, and if the process at `index` already ran before, the switch
    /// records a resume at `now`. A dispatch onto an empty processor, after a
    /// completion or an idle unit, records no resume.
    pub fn dispatch(&mut self, index: usize, timeslice: NonZeroUsize, now: Ticks) -> SchedulingDecision {
        let resumed = self.running.is_some_and(|running| running != index);
        if let Some(previous) = self.running.filter(|&previous| previous != index) {
            let pid = self.processes[index].pid();
            let previous = &mut self.processes[previous];
            previous.preempt(now);
            debug!("{}: {} preempted by {}, {}", now, previous.pid(), pid, previous.status());
        }

        let process = &mut self.processes[index];
        process.start(now, resumed);
        self.running = Some(index);
        self.timeslice = timeslice.get();

        SchedulingDecision::Run {
            pid: process.pid(),
            timeslice,
        }
    }

    /// Charges the last timeslice to the running process; completes it if
    /// nothing remains.
    pub fn execute(&mut self, now: Ticks) -> StopResult {
        let Some(index) = self.running else {
            return StopResult::NoRunningProcess;
        };

        let process = &mut self.processes[index];
        if process.execute(self.timeslice) {
            process.complete(now);
            debug!("{}: {} {}", now, process.pid(), process.status());
            self.running = None;
            self.completed += 1;
            StopResult::Completed(process.pid())
        } else {
            StopResult::Runnable(process.pid())
        }
    }
}
