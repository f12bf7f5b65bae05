// crates/status-relay-config/src/config.rs
// ============================================================================
// Module: Status Relay Configuration
// Description: Configuration loading and validation for Status Relay.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: status-relay-core, serde, toml, url
// ============================================================================

//! ## Overview
//! Configuration is layered: defaults, then an optional TOML file, then the
//! Clowder document named by `ACG_CONFIG`, then environment overrides.
//! The merged result is validated once; any failure is fatal at startup.
//! Security posture: config inputs are untrusted and size limited.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use status_relay_core::AvailabilityStatus;
use status_relay_core::Identity;
use status_relay_core::SynthesisMode;
use thiserror::Error;
use url::Url;

use crate::clowder::ClowderConfig;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable naming the TOML config file.
pub const CONFIG_ENV_VAR: &str = "STATUS_RELAY_CONFIG";
/// Environment variable naming the Clowder JSON document.
pub const CLOWDER_ENV_VAR: &str = "ACG_CONFIG";
/// Environment variable forcing a fixed verdict outcome.
pub const FORCED_STATUS_ENV_VAR: &str = "STATUS_RELAY_FORCED_STATUS";
/// Environment variable overriding the catalog base URL.
pub const CATALOG_URL_ENV_VAR: &str = "STATUS_RELAY_CATALOG_URL";
/// Environment variable overriding the Kafka brokers (comma separated).
pub const KAFKA_BROKERS_ENV_VAR: &str = "STATUS_RELAY_KAFKA_BROKERS";
/// Environment variable overriding the Kafka topic.
pub const KAFKA_TOPIC_ENV_VAR: &str = "STATUS_RELAY_KAFKA_TOPIC";

/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;

/// Default HTTP listen port.
const DEFAULT_PORT: u16 = 8000;
/// Default catalog base URL.
const DEFAULT_CATALOG_URL: &str = "http://localhost:8000/api/sources/v3.1";
/// Default catalog request timeout in milliseconds.
const DEFAULT_CATALOG_TIMEOUT_MS: u64 = 10_000;
/// Default cap on catalog response bodies.
const DEFAULT_MAX_RESPONSE_BYTES: usize = 4 * 1024 * 1024;
/// Identity sent on startup catalog queries (an org admin with no account).
pub const DEFAULT_SYSTEM_IDENTITY: &str = "eyJpZGVudGl0eSI6IHsiYWNjb3VudF9udW1iZXIiOiAibmlsIiwgInVzZXIiOiB7ImlzX29yZ19hZG1pbiI6IHRydWV9fX0=";
/// Logical name of the status topic.
pub const SOURCES_STATUS_TOPIC: &str = "platform.sources.status";
/// Default pipeline queue capacity.
const DEFAULT_QUEUE_CAPACITY: usize = 1024;
/// Default number of concurrently running pipelines.
const DEFAULT_MAX_IN_FLIGHT: usize = 64;
/// Default log filter directive.
const DEFAULT_LOG_FILTER: &str = "info";

// ============================================================================
// SECTION: Root Config
// ============================================================================

/// Status Relay configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatusRelayConfig {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Sources catalog client configuration.
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Outbound publisher configuration.
    #[serde(default)]
    pub publisher: PublisherConfig,
    /// Verdict synthesis configuration.
    #[serde(default)]
    pub synthesis: SynthesisConfig,
    /// Background pipeline pool configuration.
    #[serde(default)]
    pub pipeline: PipelineConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StatusRelayConfig {
    /// Loads configuration using every layer and validates the result.
    ///
    /// The file is taken from `path`, else from `STATUS_RELAY_CONFIG`; with
    /// neither, defaults are used.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when any layer fails to load or validation
    /// fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match resolve_path(path)? {
            Some(resolved) => Self::from_file(&resolved)?,
            None => Self::default(),
        };
        if let Some(clowder_path) = env::var_os(CLOWDER_ENV_VAR) {
            let clowder = ClowderConfig::load(Path::new(&clowder_path))?;
            clowder.apply_to(&mut config)?;
        }
        config.apply_env_overrides(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML config file without validating it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = read_limited_utf8(path)?;
        Self::from_toml_str(&content)
    }

    /// Parses TOML text without validating it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the text is not a valid config.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Applies environment overrides read through `lookup`.
    ///
    /// Empty values are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a forced status is not
    /// recognized.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        if let Some(value) = read(FORCED_STATUS_ENV_VAR) {
            let status = value.parse::<AvailabilityStatus>().map_err(|err| {
                ConfigError::Invalid(format!("{FORCED_STATUS_ENV_VAR}: {err}"))
            })?;
            self.synthesis.forced_status = Some(status);
        }
        if let Some(value) = read(CATALOG_URL_ENV_VAR) {
            self.catalog.base_url = value.trim().to_string();
        }
        if let Some(value) = read(KAFKA_BROKERS_ENV_VAR) {
            self.publisher.brokers = value
                .split(',')
                .map(str::trim)
                .filter(|broker| !broker.is_empty())
                .map(ToString::to_string)
                .collect();
        }
        if let Some(value) = read(KAFKA_TOPIC_ENV_VAR) {
            self.publisher.topic = value.trim().to_string();
        }
        Ok(())
    }

    /// Validates the merged configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.catalog.validate()?;
        self.publisher.validate()?;
        self.pipeline.validate()?;
        self.logging.validate()
    }
}

// ============================================================================
// SECTION: Server Config
// ============================================================================

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Listen address.
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

// ============================================================================
// SECTION: Catalog Config
// ============================================================================

/// Sources catalog client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    /// Base URL of the Sources API, including the version prefix.
    #[serde(default = "default_catalog_url")]
    pub base_url: String,
    /// Per-request timeout in milliseconds.
    #[serde(default = "default_catalog_timeout_ms")]
    pub timeout_ms: u64,
    /// Maximum accepted response body size.
    #[serde(default = "default_max_response_bytes")]
    pub max_response_bytes: usize,
    /// Identity header sent on startup queries; empty sends none.
    #[serde(default = "default_system_identity")]
    pub system_identity: String,
}

impl CatalogConfig {
    /// Parses the configured base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the URL is malformed or not
    /// http(s).
    pub fn parsed_base_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(self.base_url.trim())
            .map_err(|err| ConfigError::Invalid(format!("catalog.base_url: {err}")))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ConfigError::Invalid(format!(
                "catalog.base_url scheme must be http or https, got {other}"
            ))),
        }
    }

    /// Returns the request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Returns the identity used for startup queries.
    #[must_use]
    pub fn identity(&self) -> Identity {
        Identity::from(self.system_identity.trim())
    }

    /// Validates catalog settings.
    fn validate(&self) -> Result<(), ConfigError> {
        self.parsed_base_url()?;
        if self.timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "catalog.timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.max_response_bytes == 0 {
            return Err(ConfigError::Invalid(
                "catalog.max_response_bytes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_catalog_url(),
            timeout_ms: default_catalog_timeout_ms(),
            max_response_bytes: default_max_response_bytes(),
            system_identity: default_system_identity(),
        }
    }
}

// ============================================================================
// SECTION: Publisher Config
// ============================================================================

/// Outbound transport selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublisherKind {
    /// Produce to Kafka.
    #[default]
    Kafka,
    /// Write JSON lines to stdout.
    Log,
}

/// Outbound publisher configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PublisherConfig {
    /// Transport used for verdicts.
    #[serde(default)]
    pub kind: PublisherKind,
    /// Kafka bootstrap brokers (`host:port`).
    #[serde(default)]
    pub brokers: Vec<String>,
    /// Kafka topic name.
    #[serde(default = "default_topic")]
    pub topic: String,
    /// Kafka partition receiving every record (default 0).
    #[serde(default)]
    pub partition: i32,
}

impl PublisherConfig {
    /// Validates publisher settings.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.kind != PublisherKind::Kafka {
            return Ok(());
        }
        if self.brokers.is_empty() {
            return Err(ConfigError::Invalid(
                "publisher.brokers must list at least one broker".to_string(),
            ));
        }
        if self.brokers.iter().any(|broker| broker.trim().is_empty()) {
            return Err(ConfigError::Invalid("publisher.brokers entries must be non-empty".to_string()));
        }
        if self.topic.trim().is_empty() {
            return Err(ConfigError::Invalid("publisher.topic must be non-empty".to_string()));
        }
        if self.partition < 0 {
            return Err(ConfigError::Invalid("publisher.partition must be non-negative".to_string()));
        }
        Ok(())
    }
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            kind: PublisherKind::default(),
            brokers: Vec::new(),
            topic: default_topic(),
            partition: 0,
        }
    }
}

// ============================================================================
// SECTION: Synthesis Config
// ============================================================================

/// Verdict synthesis configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SynthesisConfig {
    /// Fixed outcome; random when unset.
    #[serde(default)]
    pub forced_status: Option<AvailabilityStatus>,
}

impl SynthesisConfig {
    /// Returns the synthesis mode.
    #[must_use]
    pub const fn mode(&self) -> SynthesisMode {
        SynthesisMode::from_forced(self.forced_status)
    }
}

// ============================================================================
// SECTION: Pipeline Config
// ============================================================================

/// Background pipeline pool configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Jobs buffered before new submissions are dropped.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
    /// Pipelines allowed to run concurrently.
    #[serde(default = "default_max_in_flight")]
    pub max_in_flight: usize,
}

impl PipelineConfig {
    /// Validates pool sizes.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.queue_capacity == 0 {
            return Err(ConfigError::Invalid(
                "pipeline.queue_capacity must be greater than zero".to_string(),
            ));
        }
        if self.max_in_flight == 0 {
            return Err(ConfigError::Invalid(
                "pipeline.max_in_flight must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
        }
    }
}

// ============================================================================
// SECTION: Logging Config
// ============================================================================

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl LoggingConfig {
    /// Validates logging settings.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.filter.trim().is_empty() {
            return Err(ConfigError::Invalid("logging.filter must be non-empty".to_string()));
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML or JSON parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment.
fn resolve_path(path: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
    if let Some(path) = path {
        return Ok(Some(path.to_path_buf()));
    }
    match env::var(CONFIG_ENV_VAR) {
        Ok(env_path) if !env_path.trim().is_empty() => {
            if env_path.len() > MAX_TOTAL_PATH_LENGTH {
                return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
            }
            Ok(Some(PathBuf::from(env_path)))
        }
        _ => Ok(None),
    }
}

/// Validates a path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Reads a size-limited UTF-8 file.
pub(crate) fn read_limited_utf8(path: &Path) -> Result<String, ConfigError> {
    validate_path(path)?;
    let bytes = fs::read(path)
        .map_err(|err| ConfigError::Io(format!("{}: {err}", path.display())))?;
    if bytes.len() > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
    }
    String::from_utf8(bytes)
        .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))
}

/// Default bind address.
fn default_bind() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT))
}

/// Default catalog URL.
fn default_catalog_url() -> String {
    DEFAULT_CATALOG_URL.to_string()
}

/// Default catalog timeout.
const fn default_catalog_timeout_ms() -> u64 {
    DEFAULT_CATALOG_TIMEOUT_MS
}

/// Default response cap.
const fn default_max_response_bytes() -> usize {
    DEFAULT_MAX_RESPONSE_BYTES
}

/// Default startup identity.
fn default_system_identity() -> String {
    DEFAULT_SYSTEM_IDENTITY.to_string()
}

/// Default topic.
fn default_topic() -> String {
    SOURCES_STATUS_TOPIC.to_string()
}

/// Default queue capacity.
const fn default_queue_capacity() -> usize {
    DEFAULT_QUEUE_CAPACITY
}

/// Default in-flight limit.
const fn default_max_in_flight() -> usize {
    DEFAULT_MAX_IN_FLIGHT
}

/// Default log filter.
fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}
