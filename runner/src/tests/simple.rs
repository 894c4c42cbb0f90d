use core::module_path;
use function_name::named;
use processor::simulate;

use super::{algorithm, run, specs};

#[test]
#[named]
pub fn single_process() {
    let result = simulate(algorithm(), &specs(&[(0, 5, 1)]));

    run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &result,
    );
}

#[test]
#[named]
pub fn equal_priorities() {
    let result = simulate(algorithm(), &specs(&[(0, 3, 1), (0, 2, 1)]));

    run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &result,
    );
}

#[test]
#[named]
pub fn no_processes() {
    let result = simulate(algorithm(), &[]);

    run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &result,
    );
}
