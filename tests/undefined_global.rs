use std::{error::Error, path::Path};

use test_utils::{check_run, Expected};

const SRC_PATH: &str = "./demos/undefined_global.script";
const EXPECTED: Expected = Expected {
    stdout: "",
    stderr: "Runtime Error: Undefined variable 'a'.\n",
    code: 70,
};

#[test]
fn reading_a_never_declared_global_is_a_fatal_runtime_error() -> Result<(), Box<dyn Error>> {
    check_run(Path::new(SRC_PATH), EXPECTED)
}
