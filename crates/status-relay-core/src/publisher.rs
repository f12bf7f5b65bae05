// crates/status-relay-core/src/publisher.rs
// ============================================================================
// Module: Status Publisher
// Description: Correlated outbound messages and the sink interface.
// Purpose: Encode verdicts and append them to the outbound queue.
// Dependencies: async-trait, serde_json, thiserror
// ============================================================================

//! ## Overview
//! [`StatusPublisher`] turns a [`StatusVerdict`] into an [`OutboundMessage`]
//! and appends it to a shared [`StatusSink`]. Every message carries exactly two
//! headers, in order: the forwarded identity and the event type. No
//! partitioning key is set.
//! Invariants:
//! - The identity header value is the inbound identity, byte for byte.
//! - Sinks are shared by all background tasks and must be safe for concurrent use.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::identifiers::Identity;
use crate::verdict::StatusVerdict;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Header carrying the forwarded correlation identity.
pub const IDENTITY_HEADER: &str = "x-rh-identity";

/// Header carrying the event type.
pub const EVENT_TYPE_HEADER: &str = "event_type";

/// Event type value for availability status messages.
pub const AVAILABILITY_STATUS_EVENT: &str = "availability_status";

// ============================================================================
// SECTION: Outbound Message
// ============================================================================

/// Key/value header attached to an outbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageHeader {
    /// Header name.
    pub key: String,
    /// Raw header value.
    pub value: Vec<u8>,
}

/// Message appended to the outbound queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    /// Ordered headers.
    pub headers: Vec<MessageHeader>,
    /// Message body.
    pub payload: Vec<u8>,
}

impl OutboundMessage {
    /// Returns the value of the first header named `key`.
    #[must_use]
    pub fn header(&self, key: &str) -> Option<&[u8]> {
        self.headers.iter().find(|header| header.key == key).map(|header| header.value.as_slice())
    }
}

// ============================================================================
// SECTION: Sink Interface
// ============================================================================

/// Errors emitted by status sinks.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The transport rejected or failed to store the message.
    #[error("sink delivery failed: {0}")]
    DeliveryFailed(String),
    /// Log sink failed to write.
    #[error("log write failed: {0}")]
    LogWriteFailed(String),
    /// The sink could not be connected.
    #[error("sink connection failed: {0}")]
    Connect(String),
}

/// Durable append-only destination for outbound messages.
#[async_trait]
pub trait StatusSink: Send + Sync {
    /// Appends one message.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`] when the message was not stored.
    async fn append(&self, message: OutboundMessage) -> Result<(), SinkError>;
}

// ============================================================================
// SECTION: Publisher
// ============================================================================

/// Errors returned by [`StatusPublisher::publish`].
#[derive(Debug, Error)]
pub enum PublishError {
    /// The verdict could not be encoded.
    #[error("verdict encoding failed: {0}")]
    Encode(String),
    /// The sink failed to append the message.
    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Publishes verdicts to a shared sink.
#[derive(Clone)]
pub struct StatusPublisher {
    /// Destination for encoded messages.
    sink: Arc<dyn StatusSink>,
}

impl StatusPublisher {
    /// Creates a publisher writing to `sink`.
    #[must_use]
    pub fn new(sink: Arc<dyn StatusSink>) -> Self {
        Self {
            sink,
        }
    }

    /// Builds the outbound message for a verdict.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::Encode`] when the verdict cannot be serialized.
    pub fn encode(
        verdict: &StatusVerdict,
        identity: &Identity,
    ) -> Result<OutboundMessage, PublishError> {
        let payload =
            verdict.to_json_bytes().map_err(|err| PublishError::Encode(err.to_string()))?;
        Ok(OutboundMessage {
            headers: vec![
                MessageHeader {
                    key: IDENTITY_HEADER.to_string(),
                    value: identity.as_bytes().to_vec(),
                },
                MessageHeader {
                    key: EVENT_TYPE_HEADER.to_string(),
                    value: AVAILABILITY_STATUS_EVENT.as_bytes().to_vec(),
                },
            ],
            payload,
        })
    }

    /// Encodes and appends a verdict.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError`] when encoding or the sink append fails.
    pub async fn publish(
        &self,
        verdict: &StatusVerdict,
        identity: &Identity,
    ) -> Result<(), PublishError> {
        let message = Self::encode(verdict, identity)?;
        self.sink.append(message).await?;
        Ok(())
    }
}
