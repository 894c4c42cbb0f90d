use std::error::Error;
use std::fmt::{self, Display};
use std::str::FromStr;

use serde::Serialize;

use crate::{
    dynamic_priority_boost, priority_non_preemptive, priority_preemptive, ProcessSpec, Scheduler,
};

/// The scheduling strategies offered by this crate.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    PriorityPreemptive,
    PriorityNonPreemptive,
    DynamicPriorityBoost,
}

impl Algorithm {
    /// Every strategy, in the order used by comparisons.
    pub const ALL: [Algorithm; 3] = [
        Algorithm::PriorityPreemptive,
        Algorithm::PriorityNonPreemptive,
        Algorithm::DynamicPriorityBoost,
    ];

    /// The selector string accepted by [`Algorithm::from_str`].
    pub fn id(self) -> &'static str {
        match self {
            Algorithm::PriorityPreemptive => "priority-preemptive",
            Algorithm::PriorityNonPreemptive => "priority-non-preemptive",
            Algorithm::DynamicPriorityBoost => "dynamic-priority-boost",
        }
    }

    /// Builds a scheduler for this strategy over fresh copies of `specs`.
    pub fn scheduler(self, specs: &[ProcessSpec]) -> Box<dyn Scheduler> {
        match self {
            Algorithm::PriorityPreemptive => Box::new(priority_preemptive(specs)),
            Algorithm::PriorityNonPreemptive => Box::new(priority_non_preemptive(specs)),
            Algorithm::DynamicPriorityBoost => Box::new(dynamic_priority_boost(specs)),
        }
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::PriorityPreemptive => write!(f, "Priority Preemptive"),
            Algorithm::PriorityNonPreemptive => write!(f, "Priority Non-Preemptive"),
            Algorithm::DynamicPriorityBoost => write!(f, "Dynamic Priority Boost"),
        }
    }
}

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.id() == s)
            .ok_or_else(|| UnknownAlgorithm(s.to_owned()))
    }
}

/// The selector string does not name a known strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAlgorithm(pub String);

impl Display for UnknownAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown algorithm \"{}\", expected one of: {}",
            self.0,
            Algorithm::ALL.map(Algorithm::id).join(", ")
        )
    }
}

impl Error for UnknownAlgorithm {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_round_trips_through_id() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.id().parse::<Algorithm>(), Ok(algorithm));
        }
    }

    #[test]
    fn unknown_selector_is_rejected() {
        let err = "round-robin".parse::<Algorithm>().unwrap_err();
        assert_eq!(err, UnknownAlgorithm("round-robin".to_string()));
        assert!(err.to_string().contains("priority-preemptive"));
    }

    #[test]
    fn scheduler_reports_its_algorithm() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.scheduler(&[]).algorithm(), algorithm);
        }
    }
}
