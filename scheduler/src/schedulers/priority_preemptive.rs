use std::num::NonZeroUsize;

use log::trace;

use super::table::ProcessTable;
use crate::{Algorithm, ProcessSpec, ProcessState, Scheduler, SchedulingDecision, StopResult, Ticks};

/// Re-evaluates the selection every time unit and always runs the eligible
/// process with the lowest static priority value.
///
/// Among equal priorities the first process in input order wins.
#[derive(Debug)]
pub struct PriorityPreemptive {
    table: ProcessTable,
}

impl PriorityPreemptive {
    pub fn new(specs: &[ProcessSpec]) -> Self {
        PriorityPreemptive {
            table: ProcessTable::new(specs),
        }
    }

    fn select(&self, now: Ticks) -> Option<usize> {
        let mut selected: Option<(usize, u32)> = None;
        for (index, process) in self.table.processes().iter().enumerate() {
            if !process.is_eligible(now) {
                continue;
            }
            match selected {
                Some((_, priority)) if process.priority() >= priority => {}
                _ => selected = Some((index, process.priority())),
            }
        }
        selected.map(|(index, _)| index)
    }
}

impl Scheduler for PriorityPreemptive {
    fn algorithm(&self) -> Algorithm {
        Algorithm::PriorityPreemptive
    }

    fn next(&mut self, now: Ticks) -> SchedulingDecision {
        if self.table.all_completed() {
            return SchedulingDecision::Done;
        }

        self.table.admit(now);
        match self.select(now) {
            Some(index) => self.table.dispatch(index, NonZeroUsize::MIN, now),
            None => {
                trace!("{}: no process has arrived", now);
                SchedulingDecision::Idle
            }
        }
    }

    fn stop(&mut self, now: Ticks) -> StopResult {
        self.table.execute(now)
    }

    fn list(&self) -> &[ProcessState] {
        self.table.processes()
    }

    fn into_processes(self: Box<Self>) -> Vec<ProcessState> {
        self.table.into_processes()
    }
}
