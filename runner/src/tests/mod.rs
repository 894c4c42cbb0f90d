use scheduler::{from_rows, Algorithm, ProcessSpec};

use std::env;
use std::fs;

use processor::{format_result, RunResult};

mod properties;
mod simple;

fn write_output(folder: &str, name: &str, output: &str) {
    let scheduler = algorithm().id();
    fs::create_dir_all(format!("../outputs/{scheduler}/{folder}")).unwrap();
    fs::write(format!("../outputs/{scheduler}/{folder}/{name}.log"), output).unwrap();
}

fn read_output(folder: &str, name: &str) -> String {
    let scheduler = algorithm().id();
    fs::read_to_string(format!("../outputs/{scheduler}/{folder}/{name}.log")).unwrap()
}

fn run(folder: &str, name: &str, result: &RunResult) {
    let output = format_result(result);

    if env::var("WRITE_OUTPUT").is_ok() {
        write_output(folder, name, &output);
    } else {
        let reference = read_output(folder, name);

        println!("\nleft = Correct Output\nright = Your Output\n");
        use pretty_assertions::assert_eq;
        assert_eq!(reference, output);
    }
}

fn specs(rows: &[(i64, i64, i64)]) -> Vec<ProcessSpec> {
    from_rows(rows).unwrap()
}

#[cfg(any(
    all(feature = "priority-preemptive", feature = "priority-non-preemptive"),
    all(feature = "priority-preemptive", feature = "dynamic-priority-boost"),
    all(feature = "priority-non-preemptive", feature = "dynamic-priority-boost"),
))]
compile_error!("enable at most one of the priority-preemptive, priority-non-preemptive and dynamic-priority-boost features");

#[cfg(feature = "priority-non-preemptive")]
fn algorithm() -> Algorithm {
    Algorithm::PriorityNonPreemptive
}

#[cfg(feature = "dynamic-priority-boost")]
fn algorithm() -> Algorithm {
    Algorithm::DynamicPriorityBoost
}

#[cfg(not(any(feature = "priority-non-preemptive", feature = "dynamic-priority-boost")))]
fn algorithm() -> Algorithm {
    Algorithm::PriorityPreemptive
}

#[test]
fn algorithm_follows_the_enabled_feature() {
    let enabled = [
        cfg!(feature = "priority-preemptive"),
        cfg!(feature = "priority-non-preemptive"),
        cfg!(feature = "dynamic-priority-boost"),
    ];
    assert!(enabled.iter().filter(|&&on| on).count() <= 1);

    let expected = enabled
        .iter()
        .position(|&on| on)
        .map_or(Algorithm::PriorityPreemptive, |position| Algorithm::ALL[position]);
    assert_eq!(algorithm(), expected);
}
