use std::fmt::{self, Display};

use scheduler::{Algorithm, Pid, ProcessState, Ticks};
use serde::Serialize;

use crate::RunResult;

/// The averages of one run.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub average_waiting_time: f64,
    pub average_turnaround_time: f64,
}

/// Averages the waiting and turnaround times of `processes`.
///
/// Both averages are 0 when there are no processes.
pub fn summarize(processes: &[ProcessState]) -> Summary {
    if processes.is_empty() {
        return Summary::default();
    }

    let count = processes.len() as f64;
    let total_waiting: Ticks = processes.iter().filter_map(ProcessState::waiting_time).sum();
    let total_turnaround: Ticks = processes
        .iter()
        .filter_map(ProcessState::turnaround_time)
        .sum();

    Summary {
        average_waiting_time: total_waiting as f64 / count,
        average_turnaround_time: total_turnaround as f64 / count,
    }
}

/// Rounds to two decimal places, for display.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// One line of the result table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessRow {
    pub pid: Pid,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub priority: u32,
    pub waiting_time: Ticks,
    pub turnaround_time: Ticks,

    /// The final dynamic priority, rounded; only set for the dynamic
    /// priority boost strategy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dynamic_priority: Option<f64>,
}

impl ProcessRow {
    fn new(process: &ProcessState, algorithm: Algorithm) -> Self {
        ProcessRow {
            pid: process.pid(),
            arrival_time: process.arrival_time(),
            burst_time: process.burst_time(),
            priority: process.priority(),
            waiting_time: process.waiting_time().unwrap_or_default(),
            turnaround_time: process.turnaround_time().unwrap_or_default(),
            dynamic_priority: (algorithm == Algorithm::DynamicPriorityBoost)
                .then(|| round2(process.dynamic_priority())),
        }
    }
}

impl Display for ProcessRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "P{}\t{}\t{}\t{}\t{}\t{}",
            self.pid,
            self.arrival_time,
            self.burst_time,
            self.priority,
            self.waiting_time,
            self.turnaround_time
        )?;
        if let Some(dynamic_priority) = self.dynamic_priority {
            write!(f, "\t{:.2}", dynamic_priority)?;
        }
        Ok(())
    }
}

/// The per-process rows plus the summary of one run, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub algorithm: Algorithm,
    pub rows: Vec<ProcessRow>,
    pub summary: Summary,
}

impl Report {
    pub fn new(result: &RunResult) -> Self {
        Report {
            algorithm: result.algorithm,
            rows: result
                .processes
                .iter()
                .map(|process| ProcessRow::new(process, result.algorithm))
                .collect(),
            summary: result.summary(),
        }
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "===== {} =====", self.algorithm)?;
        write!(f, "PID\tARRIVAL\tBURST\tPRI\tWAIT\tTAT")?;
        if self.algorithm == Algorithm::DynamicPriorityBoost {
            write!(f, "\tDYN")?;
        }
        writeln!(f)?;
        for row in &self.rows {
            writeln!(f, "{}", row)?;
        }
        writeln!(
            f,
            "AVG\t\t\t\t{:.2}\t{:.2}",
            self.summary.average_waiting_time, self.summary.average_turnaround_time
        )
    }
}

/// The averages of one strategy, for side-by-side comparison.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct ComparisonEntry {
    pub algorithm: Algorithm,
    pub summary: Summary,
}

/// Displays comparison entries as an `ALGORITHM AVG WAIT AVG TAT` table.
pub struct Comparison<'a>(pub &'a [ComparisonEntry]);

impl Display for Comparison<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "===== Comparison =====")?;
        writeln!(f, "ALGORITHM\tAVG WAIT\tAVG TAT")?;
        for entry in self.0 {
            writeln!(
                f,
                "{}\t{:.2}\t{:.2}",
                entry.algorithm.id(),
                entry.summary.average_waiting_time,
                entry.summary.average_turnaround_time
            )?;
        }
        Ok(())
    }
}
