// crates/status-relay-config/tests/common/mod.rs
// =============================================================================
// Module: Config Test Helpers
// Description: Shared helpers for config validation tests.
// Purpose: Reduce duplication across integration tests for status-relay-config.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use std::collections::HashMap;

use status_relay_config::ConfigError;
use status_relay_config::StatusRelayConfig;

/// Result type used by config tests.
pub type TestResult = Result<(), String>;

/// Parses a TOML string into a `StatusRelayConfig` for tests.
pub fn config_from_toml(toml_str: &str) -> Result<StatusRelayConfig, String> {
    StatusRelayConfig::from_toml_str(toml_str).map_err(|err| err.to_string())
}

/// Returns a config with defaults and a single local broker.
pub fn kafka_config() -> Result<StatusRelayConfig, String> {
    config_from_toml(
        r#"
[publisher]
brokers = ["localhost:9092"]
"#,
    )
}

/// Builds an environment lookup over fixed pairs.
pub fn env_lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> =
        pairs.iter().map(|(key, value)| ((*key).to_string(), (*value).to_string())).collect();
    move |key| vars.get(key).cloned()
}

/// Asserts that `result` failed with a message containing `needle`.
pub fn assert_invalid(result: Result<(), ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(()) => Err("expected invalid config".to_string()),
    }
}
