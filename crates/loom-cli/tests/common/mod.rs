#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;
use tempfile::TempDir;

#[allow(dead_code)]
pub const CMD_TIMEOUT: Duration = Duration::from_secs(15);

fn config_dir() -> &'static Path {
    static CONFIG_DIR: OnceLock<TempDir> = OnceLock::new();
    CONFIG_DIR
        .get_or_init(|| tempfile::tempdir().expect("failed to create config dir for tests"))
        .path()
}

/// Create a configured `loom` command suitable for integration tests.
///
/// Config discovery points at an empty directory so the user's own config never leaks
/// into a test run.
#[allow(dead_code)]
pub fn loom_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("loom"));
    cmd.timeout(CMD_TIMEOUT);
    cmd.env_remove("LOOM_CONFIG");
    cmd.env("LOOM_CONFIG_DIR", config_dir());
    cmd.env_remove("LOOM_API_KEY");
    cmd.env("NO_COLOR", "1");
    cmd
}
