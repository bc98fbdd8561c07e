use std::{error::Error, path::Path};

use test_utils::{check_run, Expected};

const SRC_PATH: &str = "./demos/for_loop.script";
const EXPECTED: Expected = Expected {
    stdout: "3\n",
    stderr: "",
    code: 0,
};

#[test]
fn c_style_for_loop_accumulates() -> Result<(), Box<dyn Error>> {
    check_run(Path::new(SRC_PATH), EXPECTED)
}
