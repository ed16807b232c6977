//! Dry-run and token listing through the binary.

use super::common::run_pshelp;

#[test]
fn test_dry_run_command() {
    let (code, stdout, _) = run_pshelp(&["Get-Item -Force", "--cursor", "3", "--dry-run"]);

    assert_eq!(code, 0);
    assert!(
        stdout.starts_with("full help for Get-Item"),
        "Unexpected output: {}",
        stdout
    );
    assert!(stdout.contains("Get-Help $args[1] -Full > $args[0]"));
}

#[test]
fn test_dry_run_parameter_json() {
    let (code, stdout, _) = run_pshelp(&[
        "Get-Item -Force",
        "--cursor",
        "11",
        "--dry-run",
        "--json",
    ]);

    assert_eq!(code, 0);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["kind"], "parameter");
    assert_eq!(
        value["arguments"],
        serde_json::json!([null, "Get-Item", "FORCE"])
    );
}

#[test]
fn test_dry_run_defaults_cursor_to_end_of_line() {
    let (code, stdout, _) = run_pshelp(&["Get-ChildItem -Recurse", "--dry-run"]);

    assert_eq!(code, 0);
    assert!(stdout.contains("parameter RECURSE of Get-ChildItem"));
}

#[test]
fn test_no_help_available() {
    let (code, stdout, _) = run_pshelp(&["'text'", "--cursor", "2", "--dry-run"]);

    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "No help available");
}

#[test]
fn test_no_help_skips_backend() {
    // Without --dry-run nothing is executed when no token has help.
    let (code, stdout, _) = run_pshelp(&[
        "Get-Item",
        "--cursor",
        "40",
        "--shell",
        "pshelp-no-such-shell",
    ]);

    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "No help available");
}

#[test]
fn test_missing_shell_fails_with_backend_error() {
    let (code, _, stderr) = run_pshelp(&[
        "Get-Item",
        "--cursor",
        "2",
        "--shell",
        "pshelp-no-such-shell",
    ]);

    assert_eq!(code, 1);
    assert!(stderr.contains("Backend Error"), "stderr: {}", stderr);
}

#[test]
fn test_tokens_listing() {
    let (code, stdout, _) = run_pshelp(&["Get-Item -Force", "--tokens"]);

    assert_eq!(code, 0);
    assert!(stdout.contains("Command             Get-Item"));
    assert!(stdout.contains("CommandParameter    -Force"));
}

#[test]
fn test_invalid_config_reports_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("bad.toml");
    std::fs::write(&config, "[viewer\n").unwrap();

    let output = std::process::Command::new(env!("CARGO_BIN_EXE_pshelp"))
        .args(["Get-Item", "--dry-run", "--config"])
        .arg(&config)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Configuration Error"), "stderr: {}", stderr);
}
