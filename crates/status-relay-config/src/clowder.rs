// crates/status-relay-config/src/clowder.rs
// ============================================================================
// Module: Clowder Overlay
// Description: Platform-injected configuration document.
// Purpose: Map Clowder's web port, Kafka and endpoint data onto the config.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Clowder writes a JSON document at the path named by `ACG_CONFIG`. Only the
//! fields the relay consumes are modeled; everything else is ignored.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;

use serde::Deserialize;

use crate::config::ConfigError;
use crate::config::SOURCES_STATUS_TOPIC;
use crate::config::StatusRelayConfig;
use crate::config::read_limited_utf8;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Clowder application name of the Sources API.
pub const SOURCES_API_APP: &str = "sources-api";
/// Path prefix appended to the Sources API endpoint.
const SOURCES_API_PATH: &str = "/api/sources/v3.1";

// ============================================================================
// SECTION: Document Model
// ============================================================================

/// Subset of the Clowder app config document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClowderConfig {
    /// Public web port.
    #[serde(default)]
    pub web_port: Option<u16>,
    /// Kafka section.
    #[serde(default)]
    pub kafka: Option<ClowderKafka>,
    /// Dependency endpoints.
    #[serde(default)]
    pub endpoints: Vec<ClowderEndpoint>,
}

/// Kafka section of the Clowder document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ClowderKafka {
    /// Broker addresses.
    #[serde(default)]
    pub brokers: Vec<ClowderBroker>,
    /// Topic name mappings.
    #[serde(default)]
    pub topics: Vec<ClowderTopic>,
}

/// Kafka broker entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClowderBroker {
    /// Broker host.
    pub hostname: String,
    /// Broker port.
    #[serde(default)]
    pub port: Option<u16>,
}

/// Kafka topic mapping.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClowderTopic {
    /// Name the application asked for.
    pub requested_name: String,
    /// Name actually provisioned.
    pub name: String,
}

/// Dependency endpoint entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClowderEndpoint {
    /// Application name.
    pub app: String,
    /// Service host.
    pub hostname: String,
    /// Service port.
    pub port: u16,
}

// ============================================================================
// SECTION: Overlay
// ============================================================================

impl ClowderConfig {
    /// Reads a Clowder document from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = read_limited_utf8(path)?;
        Self::from_json_str(&content)
    }

    /// Parses a Clowder document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed JSON.
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content)
            .map_err(|err| ConfigError::Parse(format!("clowder config: {err}")))
    }

    /// Overlays the document onto `config`.
    ///
    /// Brokers are replaced only when the document lists some. When several
    /// topics map the status topic, the last one wins.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a broker has no port.
    pub fn apply_to(&self, config: &mut StatusRelayConfig) -> Result<(), ConfigError> {
        if let Some(port) = self.web_port {
            config.server.bind.set_port(port);
        }
        if let Some(kafka) = &self.kafka {
            if !kafka.brokers.is_empty() {
                config.publisher.brokers = kafka
                    .brokers
                    .iter()
                    .map(|broker| {
                        broker.port.map(|port| format!("{}:{port}", broker.hostname)).ok_or_else(
                            || {
                                ConfigError::Invalid(format!(
                                    "clowder kafka broker {} has no port",
                                    broker.hostname
                                ))
                            },
                        )
                    })
                    .collect::<Result<_, _>>()?;
            }
            if let Some(topic) =
                kafka.topics.iter().rev().find(|topic| topic.requested_name == SOURCES_STATUS_TOPIC)
            {
                config.publisher.topic.clone_from(&topic.name);
            }
        }
        if let Some(endpoint) = self.endpoints.iter().find(|endpoint| endpoint.app == SOURCES_API_APP)
        {
            config.catalog.base_url =
                format!("http://{}:{}{SOURCES_API_PATH}", endpoint.hostname, endpoint.port);
        }
        Ok(())
    }
}
