use std::cmp::Ordering;
use std::num::NonZeroUsize;

use log::{debug, trace};

use super::table::ProcessTable;
use crate::{Algorithm, ProcessSpec, ProcessState, Scheduler, SchedulingDecision, StopResult, Ticks};

/// Weight of the remaining burst time in the dynamic priority.
pub const BURST_WEIGHT: f64 = 0.5;

/// Weight of the time spent in the ready set since the last (re-)entry.
pub const WAIT_WEIGHT: f64 = 2.0;

/// Computes `priority + remaining * BURST_WEIGHT - waited * WAIT_WEIGHT`.
///
/// Lower values are better: a short remaining burst and a long wait both
/// boost the process.
pub fn dynamic_priority(priority: u32, remaining: Ticks, waited: Ticks) -> f64 {
    f64::from(priority) + remaining as f64 * BURST_WEIGHT - waited as f64 * WAIT_WEIGHT
}

/// An aging-aware strategy that recomputes a dynamic priority for every
/// ready process at every time unit and runs the lowest one for one unit.
///
/// Ties go to the earliest arrival, then to the process found first in the
/// ready set.
#[derive(Debug)]
pub struct DynamicPriorityBoost {
    table: ProcessTable,
    ready: Vec<usize>,
}

impl DynamicPriorityBoost {
    pub fn new(specs: &[ProcessSpec]) -> Self {
        DynamicPriorityBoost {
            table: ProcessTable::new(specs),
            ready: Vec::new(),
        }
    }

    fn select(&mut self, now: Ticks) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for &index in &self.ready {
            let process = self.table.get_mut(index);
            let waited = now.saturating_sub(process.last_ready_entry());
            let score = dynamic_priority(process.priority(), process.remaining_time(), waited);
            process.set_dynamic_priority(score);

            let better = match best {
                None => true,
                Some((current, current_score)) => match score.total_cmp(&current_score) {
                    Ordering::Less => true,
                    Ordering::Equal => {
                        self.table.get(index).arrival_time() < self.table.get(current).arrival_time()
                    }
                    Ordering::Greater => false,
                },
            };
            if better {
                best = Some((index, score));
            }
        }
        best.map(|(index, _)| index)
    }
}

impl Scheduler for DynamicPriorityBoost {
    fn algorithm(&self) -> Algorithm {
        Algorithm::DynamicPriorityBoost
    }

    fn next(&mut self, now: Ticks) -> SchedulingDecision {
        if self.table.all_completed() {
            return SchedulingDecision::Done;
        }

        let admitted = self.table.admit(now);
        self.ready.extend(admitted);

        match self.select(now) {
            Some(index) => self.table.dispatch(index, NonZeroUsize::MIN, now),
            None => {
                trace!("{}: ready set is empty", now);
                SchedulingDecision::Idle
            }
        }
    }

    fn stop(&mut self, now: Ticks) -> StopResult {
        let running = self.table.running();
        let result = self.table.execute(now);

        if let (StopResult::Completed(pid), Some(index)) = (result, running) {
            self.ready.retain(|&ready| ready != index);
            let process = self.table.get_mut(index);
            if let Some(waiting_time) = process.reconstructed_waiting_time() {
                process.set_waiting_time(waiting_time);
            }
            debug!(
                "{}: {} waited {:?} over {} preemptions",
                now,
                pid,
                process.waiting_time(),
                process.preemptions().len()
            );
        }

        result
    }

    fn list(&self) -> &[ProcessState] {
        self.table.processes()
    }

    fn into_processes(self: Box<Self>) -> Vec<ProcessState> {
        self.table.into_processes()
    }
}
