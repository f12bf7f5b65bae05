// crates/status-relay-broker/src/sink/kafka.rs
// ============================================================================
// Module: Kafka Sink
// Description: Sink producing outbound messages to a Kafka partition.
// Purpose: Deliver availability status messages to the platform topic.
// Dependencies: rskafka, chrono, status-relay-core
// ============================================================================

//! ## Overview
//! [`KafkaSink`] connects once at startup and produces each message as a
//! single uncompressed record with no key. Message headers become record
//! headers and the payload becomes the record value.
//! Security posture: broker addresses come from trusted configuration only.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use rskafka::client::ClientBuilder;
use rskafka::client::partition::Compression;
use rskafka::client::partition::PartitionClient;
use rskafka::client::partition::UnknownTopicHandling;
use rskafka::record::Record;
use status_relay_core::OutboundMessage;
use status_relay_core::SinkError;
use status_relay_core::StatusSink;
use tracing::debug;
use tracing::info;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Connection settings for [`KafkaSink`].
///
/// # Invariants
/// - Every record goes to the single configured `partition`; keyless
///   records are not spread across the topic's other partitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KafkaSinkConfig {
    /// Bootstrap broker addresses (`host:port`).
    pub brokers: Vec<String>,
    /// Destination topic.
    pub topic: String,
    /// Destination partition.
    pub partition: i32,
}

// ============================================================================
// SECTION: Kafka Sink
// ============================================================================

/// Sink producing records to one Kafka topic partition.
pub struct KafkaSink {
    /// Partition producer handle.
    partition_client: PartitionClient,
    /// Topic name, kept for diagnostics.
    topic: String,
}

impl KafkaSink {
    /// Connects to the brokers and opens the configured partition.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::Connect`] when the brokers are unreachable or the
    /// topic does not exist.
    pub async fn connect(config: &KafkaSinkConfig) -> Result<Self, SinkError> {
        if config.brokers.is_empty() {
            return Err(SinkError::Connect("no kafka brokers configured".to_string()));
        }
        let client = ClientBuilder::new(config.brokers.clone())
            .build()
            .await
            .map_err(|err| SinkError::Connect(format!("kafka bootstrap failed: {err}")))?;
        let partition_client = client
            .partition_client(config.topic.clone(), config.partition, UnknownTopicHandling::Error)
            .await
            .map_err(|err| {
                SinkError::Connect(format!("kafka topic {} unavailable: {err}", config.topic))
            })?;
        info!(topic = %config.topic, partition = config.partition, "connected to kafka");
        Ok(Self {
            partition_client,
            topic: config.topic.clone(),
        })
    }

    /// Returns the destination topic.
    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }
}

#[async_trait]
impl StatusSink for KafkaSink {
    async fn append(&self, message: OutboundMessage) -> Result<(), SinkError> {
        let record = to_record(message, Utc::now());
        let offsets = self
            .partition_client
            .produce(vec![record], Compression::NoCompression)
            .await
            .map_err(|err| SinkError::DeliveryFailed(format!("kafka produce failed: {err}")))?;
        debug!(topic = %self.topic, ?offsets, "status record produced");
        Ok(())
    }
}

/// Converts an outbound message into a keyless Kafka record.
pub(crate) fn to_record(message: OutboundMessage, timestamp: DateTime<Utc>) -> Record {
    let headers: BTreeMap<String, Vec<u8>> =
        message.headers.into_iter().map(|header| (header.key, header.value)).collect();
    Record {
        key: None,
        value: Some(message.payload),
        headers,
        timestamp,
    }
}
