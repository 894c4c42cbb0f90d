use std::collections::HashSet;

use processor::{simulate, Occupant, RunResult};
use rand::prelude::*;
use scheduler::{Algorithm, ProcessSpec};

use super::specs;

const SEED: u64 = 0x5eed;
const WORKLOADS: usize = 200;

fn random_workload(rng: &mut StdRng) -> Vec<ProcessSpec> {
    let count = rng.random_range(0..8usize);
    let rows: Vec<(i64, i64, i64)> = (0..count)
        .map(|_| {
            (
                rng.random_range(0..12i64),
                rng.random_range(1..7i64),
                rng.random_range(0..4i64),
            )
        })
        .collect();
    specs(&rows)
}

fn workloads() -> Vec<Vec<ProcessSpec>> {
    let mut rng = StdRng::seed_from_u64(SEED);
    (0..WORKLOADS).map(|_| random_workload(&mut rng)).collect()
}

fn each_run(algorithms: &[Algorithm], mut check: impl FnMut(&[ProcessSpec], &RunResult)) {
    for specs in workloads() {
        for &algorithm in algorithms {
            let result = simulate(algorithm, &specs);
            check(&specs, &result);
        }
    }
}

#[test]
fn turnaround_is_completion_minus_arrival() {
    each_run(&Algorithm::ALL, |_, result| {
        for process in &result.processes {
            let completion = process.completion_time().unwrap();
            assert_eq!(
                process.turnaround_time(),
                Some(completion - process.arrival_time())
            );
        }
    });
}

#[test]
fn waiting_is_turnaround_minus_burst() {
    let algorithms = [Algorithm::PriorityPreemptive, Algorithm::PriorityNonPreemptive];
    each_run(&algorithms, |_, result| {
        for process in &result.processes {
            let turnaround = process.turnaround_time().unwrap();
            assert_eq!(
                process.waiting_time(),
                Some(turnaround - process.burst_time()),
                "{} P{}",
                result.algorithm,
                process.pid()
            );
        }
    });
}

#[test]
fn dynamic_waiting_is_rebuilt_from_events() {
    each_run(&[Algorithm::DynamicPriorityBoost], |_, result| {
        for process in &result.processes {
            let turnaround = process.turnaround_time().unwrap();
            let waiting = process.waiting_time().unwrap();

            assert_eq!(Some(waiting), process.reconstructed_waiting_time());
            assert!(waiting <= turnaround - process.burst_time());
            assert!(process.resumes().len() <= process.preemptions().len());
        }
    });
}

#[test]
fn resumes_follow_a_switch_between_processes() {
    // A resume needs a preempted process to take the processor back from an
    // unfinished one. The process that displaced it always scores better
    // until it completes, and a dispatch after a completion is no resume.
    each_run(&Algorithm::ALL, |_, result| {
        for process in &result.processes {
            assert!(process.resumes().is_empty(), "{} P{}", result.algorithm, process.pid());
        }
    });
}

#[test]
fn timeline_covers_every_burst_exactly() {
    each_run(&Algorithm::ALL, |specs, result| {
        assert_eq!(result.timeline.len(), result.makespan());
        for spec in specs {
            assert_eq!(result.timeline.busy_time(spec.pid), spec.burst_time.get());
        }
        let covered: usize = result.segments().iter().map(|segment| segment.duration).sum();
        assert_eq!(covered, result.timeline.len());
    });
}

#[test]
fn processes_never_run_before_arrival() {
    each_run(&Algorithm::ALL, |specs, result| {
        for (time, occupant) in result.timeline.iter().enumerate() {
            if let Occupant::Process(pid) = occupant {
                let spec = specs.iter().find(|spec| spec.pid == pid).unwrap();
                assert!(spec.arrival_time <= time);
            }
        }
    });
}

#[test]
fn runs_are_idempotent() {
    each_run(&Algorithm::ALL, |specs, result| {
        let again = simulate(result.algorithm, specs);
        assert_eq!(&again, result);
    });
}

#[test]
fn non_preemptive_blocks_are_contiguous() {
    each_run(&[Algorithm::PriorityNonPreemptive], |_, result| {
        let mut seen = HashSet::new();
        for segment in result.segments() {
            if let Occupant::Process(pid) = segment.occupant {
                assert!(seen.insert(pid), "P{} was interrupted", pid);
            }
        }
    });
}

#[test]
fn preemptive_runs_best_priority_on_arrival() {
    each_run(&[Algorithm::PriorityPreemptive], |specs, result| {
        let units = result.timeline.units();
        for spec in specs {
            let Occupant::Process(pid) = units[spec.arrival_time] else {
                panic!("idle while P{} had arrived", spec.pid);
            };
            let running = specs.iter().find(|other| other.pid == pid).unwrap();
            assert!(running.priority <= spec.priority);
        }
    });
}
