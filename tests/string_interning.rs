use std::{error::Error, path::Path};

use test_utils::{check_run, Expected};

const SRC_PATH: &str = "./demos/string_interning.script";
const EXPECTED: Expected = Expected {
    stdout: "true\n",
    stderr: "",
    code: 0,
};

#[test]
fn equal_content_strings_share_a_handle() -> Result<(), Box<dyn Error>> {
    check_run(Path::new(SRC_PATH), EXPECTED)
}
