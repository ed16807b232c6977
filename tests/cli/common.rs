//! Common test utilities for CLI tests.

use std::process::Command;

/// Run pshelp with the given arguments and an isolated config path.
pub fn run_pshelp(args: &[&str]) -> (i32, String, String) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = dir.path().join("config.toml");

    let output = Command::new(env!("CARGO_BIN_EXE_pshelp"))
        .args(args)
        .arg("--config")
        .arg(&config)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command");

    let exit_code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    (exit_code, stdout, stderr)
}
