use std::{error::Error, path::Path};

use test_utils::{check_run, Expected};

const SRC_PATH: &str = "./demos/list_subscript.script";
const EXPECTED: Expected = Expected {
    stdout: "20\n",
    stderr: "",
    code: 0,
};

#[test]
fn list_literal_subscript_reads_the_element() -> Result<(), Box<dyn Error>> {
    check_run(Path::new(SRC_PATH), EXPECTED)
}
