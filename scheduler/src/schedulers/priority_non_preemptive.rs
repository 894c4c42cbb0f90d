use std::num::NonZeroUsize;

use log::trace;

use super::table::ProcessTable;
use crate::{Algorithm, ProcessSpec, ProcessState, Scheduler, SchedulingDecision, StopResult, Ticks};

/// Keeps an explicit ready queue and runs the selected process for its
/// whole burst in one uninterrupted block.
///
/// The queue is ordered by static priority, then by arrival time; the sort
/// is stable, so queue order decides the remaining ties.
#[derive(Debug)]
pub struct PriorityNonPreemptive {
    table: ProcessTable,
    ready_queue: Vec<usize>,
}

impl PriorityNonPreemptive {
    pub fn new(specs: &[ProcessSpec]) -> Self {
        PriorityNonPreemptive {
            table: ProcessTable::new(specs),
            ready_queue: Vec::new(),
        }
    }
}

impl Scheduler for PriorityNonPreemptive {
    fn algorithm(&self) -> Algorithm {
        Algorithm::PriorityNonPreemptive
    }

    fn next(&mut self, now: Ticks) -> SchedulingDecision {
        if self.table.all_completed() {
            return SchedulingDecision::Done;
        }

        let admitted = self.table.admit(now);
        self.ready_queue.extend(admitted);

        if self.ready_queue.is_empty() {
            trace!("{}: ready queue is empty", now);
            return SchedulingDecision::Idle;
        }

        let table = &self.table;
        self.ready_queue.sort_by(|&a, &b| {
            let (a, b) = (table.get(a), table.get(b));
            a.priority()
                .cmp(&b.priority())
                .then_with(|| a.arrival_time().cmp(&b.arrival_time()))
        });

        let index = self.ready_queue.remove(0);
        let timeslice =
            NonZeroUsize::new(self.table.get(index).remaining_time()).unwrap_or(NonZeroUsize::MIN);
        self.table.dispatch(index, timeslice, now)
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
