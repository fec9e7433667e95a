#![allow(clippy::unwrap_used, clippy::expect_used)]

//! CLI smoke tests for the polarjoin-server binary.

use std::process::{Command, Stdio};
use std::time::Duration;
use tempfile::TempDir;
use tokio::time::timeout;

fn run_polarjoin_server(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_polarjoin-server"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute polarjoin-server")
}

async fn run_polarjoin_server_with_timeout(
    args: &[&str],
    timeout_duration: Duration,
) -> Result<std::process::Output, Box<dyn std::error::Error>> {
    let mut cmd = tokio::process::Command::new(env!("CARGO_BIN_EXE_polarjoin-server"));
    cmd.args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let child = cmd.spawn()?;

    match timeout(timeout_duration, child.wait_with_output()).await {
        Ok(result) => result.map_err(Into::into),
        Err(_elapsed) => Err("elapsed".into()),
    }
}

fn write_config(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write config file");
    path.to_str().unwrap().to_owned()
}

#[test]
fn test_cli_help_command() {
    let output = run_polarjoin_server(&["--help"]);
    assert!(output.status.success(), "Help command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("polarjoin-server"), "Should contain binary name");
    assert!(stdout.contains("Usage:"), "Should contain usage information");
    assert!(stdout.contains("run"), "Should contain 'run' subcommand");
    assert!(stdout.contains("check"), "Should contain 'check' subcommand");
    assert!(stdout.contains("--config"), "Should mention config option");
    assert!(stdout.contains("--port"), "Should mention port option");
}

#[test]
fn test_cli_version_command() {
    let output = run_polarjoin_server(&["--version"]);
    assert!(output.status.success(), "Version command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("polarjoin-server"));
    assert!(stdout.chars().any(|c| c.is_ascii_digit()));
}

#[test]
fn test_cli_invalid_command() {
    let output = run_polarjoin_server(&["invalid-command"]);
    assert!(!output.status.success(), "Invalid command should fail");
}

#[test]
fn test_cli_config_validation_missing_file() {
    let output = run_polarjoin_server(&["--config", "/nonexistent/config.yaml", "check"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("does not exist"),
        "Should indicate config file not found: {stderr}"
    );
}

#[test]
fn test_cli_config_validation_invalid_yaml() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(&temp_dir, "invalid.yaml", "invalid: yaml: content: [unclosed");

    let output = run_polarjoin_server(&["--config", &path, "check"]);
    assert!(!output.status.success(), "Should fail with invalid YAML");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("parse"),
        "Should mention parsing issue: {stderr}"
    );
}

#[test]
fn test_cli_check_valid_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(
        &temp_dir,
        "valid.yaml",
        r#"
server:
  bind_addr: "127.0.0.1:8123"
  request_timeout: 10s
logging:
  level: warn
survey_calc:
  rounding:
    distance_precision: 3
"#,
    );

    let output = run_polarjoin_server(&["--config", &path, "check"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "STDERR: {stderr}\nSTDOUT: {stdout}");
    assert!(stdout.contains("Configuration is valid"));
    assert!(stdout.contains("127.0.0.1:8123"));
    assert!(stdout.contains("distance_precision: 3"));
}

#[test]
fn test_cli_rejects_excess_precision() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(
        &temp_dir,
        "precision.yaml",
        "survey_calc:\n  rounding:\n    angle_precision: 30\n",
    );

    let output = run_polarjoin_server(&["--config", &path, "check"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("angle_precision"), "{stderr}");
}

#[test]
fn test_cli_run_with_invalid_bind_address() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(
        &temp_dir,
        "bad_addr.yaml",
        "server:\n  bind_addr: \"not-an-address\"\n",
    );

    let output = run_polarjoin_server(&["--config", &path, "run"]);
    assert!(!output.status.success(), "Should fail with invalid bind address");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid bind address"), "{stderr}");
}

#[test]
fn test_cli_print_config_applies_overrides() {
    let output = run_polarjoin_server(&["--port", "9191", "-vv", "--print-config"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Effective configuration"));
    assert!(stdout.contains("127.0.0.1:9191"));
    assert!(stdout.contains("level: debug"));
}

#[test]
fn test_cli_env_overrides_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(&temp_dir, "env.yaml", "server:\n  bind_addr: \"127.0.0.1:8001\"\n");

    let output = Command::new(env!("CARGO_BIN_EXE_polarjoin-server"))
        .args(["--config", &path, "--print-config"])
        .env("POLARJOIN__SERVER__BIND_ADDR", "127.0.0.1:8002")
        .output()
        .expect("Failed to execute polarjoin-server");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("127.0.0.1:8002"), "{stdout}");
}

#[tokio::test]
async fn test_cli_run_keeps_serving() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(
        &temp_dir,
        "run.yaml",
        "server:\n  bind_addr: \"127.0.0.1:0\"\nlogging:\n  level: error\n",
    );

    match run_polarjoin_server_with_timeout(&["--config", &path, "run"], Duration::from_secs(2))
        .await
    {
        Err(e) if e.to_string().contains("elapsed") => {}
        Ok(output) => panic!(
            "server exited early: {}",
            String::from_utf8_lossy(&output.stderr)
        ),
        Err(other) => panic!("Unexpected failure: {other}"),
    }
}
