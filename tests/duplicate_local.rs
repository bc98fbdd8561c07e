use std::{error::Error, path::Path};

use test_utils::{check_run, Expected};

const SRC_PATH: &str = "./demos/duplicate_local.script";
const EXPECTED: Expected = Expected {
    stdout: "",
    stderr: "Error 'a': Multiple definitions of the same variable exists.\n",
    code: 1,
};

#[test]
fn redeclaring_a_local_in_the_same_block_is_a_compile_error() -> Result<(), Box<dyn Error>> {
    check_run(Path::new(SRC_PATH), EXPECTED)
}
