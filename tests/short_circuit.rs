use std::{error::Error, path::Path};

use test_utils::{check_run, Expected};

const SRC_PATH: &str = "./demos/short_circuit.script";
const EXPECTED: Expected = Expected {
    stdout: "y\n",
    stderr: "",
    code: 0,
};

#[test]
fn and_short_circuits_into_the_if_branch() -> Result<(), Box<dyn Error>> {
    check_run(Path::new(SRC_PATH), EXPECTED)
}
