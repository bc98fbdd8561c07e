use std::{error::Error, path::Path};

use test_utils::{check_run, Expected};

const SRC_PATH: &str = "./demos/self_referential_initializer.script";
const EXPECTED: Expected = Expected {
    stdout: "",
    stderr: "Error 'a': Cannot read variable from its own initializer.\n",
    code: 1,
};

#[test]
fn local_initializer_cannot_read_its_own_not_yet_defined_name() -> Result<(), Box<dyn Error>> {
    check_run(Path::new(SRC_PATH), EXPECTED)
}
