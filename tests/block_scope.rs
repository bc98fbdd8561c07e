use std::{error::Error, path::Path};

use test_utils::{check_run, Expected};

const SRC_PATH: &str = "./demos/block_scope.script";
const EXPECTED: Expected = Expected {
    stdout: "2\n1\n",
    stderr: "",
    code: 0,
};

#[test]
fn inner_local_shadows_outer_until_the_block_closes() -> Result<(), Box<dyn Error>> {
    check_run(Path::new(SRC_PATH), EXPECTED)
}
