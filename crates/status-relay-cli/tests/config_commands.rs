// crates/status-relay-cli/tests/config_commands.rs
// ============================================================================
// Module: CLI Config Command Tests
// Description: Runs the built binary against config files.
// Purpose: Validate exit codes and output of `config validate`.
// Dependencies: tempfile
// ============================================================================

//! ## Overview
//! Spawns the `status-relay` binary with a scrubbed relay environment.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::path::Path;
use std::process::Command;
use std::process::Output;

const RELAY_ENV_VARS: [&str; 6] = [
    "STATUS_RELAY_CONFIG",
    "ACG_CONFIG",
    "STATUS_RELAY_FORCED_STATUS",
    "STATUS_RELAY_CATALOG_URL",
    "STATUS_RELAY_KAFKA_BROKERS",
    "STATUS_RELAY_KAFKA_TOPIC",
];

fn run_validate(config: &Path, extra_env: &[(&str, &str)]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_status-relay"));
    command.args(["config", "validate", "--config"]).arg(config);
    for var in RELAY_ENV_VARS {
        command.env_remove(var);
    }
    for (key, value) in extra_env {
        command.env(key, value);
    }
    command.output().expect("run status-relay")
}

fn write_config(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write config");
    path
}

#[test]
fn validate_accepts_log_config() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_config(&dir, "relay.toml", "[publisher]\nkind = \"log\"\n");
    let output = run_validate(&path, &[]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("config ok"));
    assert!(stdout.contains("publisher=log"));
}

#[test]
fn validate_rejects_kafka_without_brokers() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_config(&dir, "relay.toml", "[publisher]\nkind = \"kafka\"\n");
    let output = run_validate(&path, &[]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("publisher.brokers"), "stderr: {stderr}");
}

#[test]
fn env_brokers_complete_kafka_config() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_config(&dir, "relay.toml", "[publisher]\nkind = \"kafka\"\n");
    let output = run_validate(&path, &[("STATUS_RELAY_KAFKA_BROKERS", "k1:9092")]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(String::from_utf8_lossy(&output.stdout).contains("brokers=k1:9092"));
}

#[test]
fn clowder_document_is_applied() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_config(&dir, "relay.toml", "");
    let clowder = write_config(
        &dir,
        "cdappconfig.json",
        r#"{"webPort": 8080,
            "kafka": {"brokers": [{"hostname": "kafka", "port": 9092}],
                      "topics": [{"requestedName": "platform.sources.status", "name": "status-x"}]},
            "endpoints": [{"app": "sources-api", "hostname": "sources", "port": 8000}]}"#,
    );
    let clowder_path = clowder.to_string_lossy().to_string();
    let output = run_validate(&path, &[("ACG_CONFIG", clowder_path.as_str())]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("bind=0.0.0.0:8080"));
    assert!(stdout.contains("catalog=http://sources:8000/api/sources/v3.1"));
    assert!(stdout.contains("topic=status-x"));
    assert!(stdout.contains("brokers=kafka:9092"));
}

#[test]
fn missing_config_file_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = run_validate(&dir.path().join("absent.toml"), &[]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to load config"));
}
