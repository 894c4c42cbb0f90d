use std::fmt::{self, Display};

use scheduler::{Pid, Ticks};
use serde::Serialize;

/// What occupied the processor during one time unit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Occupant {
    /// No process was eligible.
    Idle,

    /// The process with this PID was running.
    Process(Pid),
}

impl Display for Occupant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Occupant::Idle => write!(f, "IDLE"),
            Occupant::Process(pid) => write!(f, "P{}", pid),
        }
    }
}

/// The per-unit occupant sequence of one run (the Gantt sequence).
///
/// Entry `t` describes the unit between clock values `t` and `t + 1`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Timeline(Vec<Occupant>);

impl Timeline {
    pub fn new() -> Self {
        Timeline(Vec::new())
    }

    /// Appends `units` consecutive units of `occupant`.
    pub fn record(&mut self, occupant: Occupant, units: Ticks) {
        self.0.extend(std::iter::repeat(occupant).take(units));
    }

    pub fn len(&self) -> Ticks {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn units(&self) -> &[Occupant] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = Occupant> + '_ {
        self.0.iter().copied()
    }

    /// The number of units during which `pid` held the processor.
    pub fn busy_time(&self, pid: Pid) -> Ticks {
        self.iter()
            .filter(|occupant| *occupant == Occupant::Process(pid))
            .count()
    }

    /// The run-length compressed view of the timeline.
    pub fn segments(&self) -> Vec<Segment> {
        compress(&self.0)
    }
}

impl FromIterator<Occupant> for Timeline {
    fn from_iter<I: IntoIterator<Item = Occupant>>(iter: I) -> Self {
        Timeline(iter.into_iter().collect())
    }
}

/// A maximal run of identical occupants.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub occupant: Occupant,
    pub start: Ticks,
    pub duration: Ticks,
}

impl Segment {
    pub fn end(&self) -> Ticks {
        self.start + self.duration
    }
}

/// Merges consecutive equal occupants into `(occupant, duration)` segments.
pub fn compress(units: &[Occupant]) -> Vec<Segment> {
    let mut segments: Vec<Segment> = Vec::new();
    for (time, &occupant) in units.iter().enumerate() {
        match segments.last_mut() {
            Some(segment) if segment.occupant == occupant => segment.duration += 1,
            _ => segments.push(Segment {
                occupant,
                start: time,
                duration: 1,
            }),
        }
    }
    segments
}

/// Displays segments as a `START END PROCESS` table.
pub struct Gantt<'a>(pub &'a [Segment]);

impl Display for Gantt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "===== Gantt =====")?;
        writeln!(f, "START\tEND\tPROCESS")?;
        for segment in self.0 {
            writeln!(f, "{}\t{}\t{}", segment.start, segment.end(), segment.occupant)?;
        }
        Ok(())
    }
}
