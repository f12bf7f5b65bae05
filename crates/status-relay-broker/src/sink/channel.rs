// crates/status-relay-broker/src/sink/channel.rs
// ============================================================================
// Module: Channel Sink
// Description: Sink forwarding outbound messages to a tokio channel.
// Purpose: Hand messages to in-process consumers.
// Dependencies: status-relay-core, tokio
// ============================================================================

//! ## Overview
//! [`ChannelSink`] forwards each message on a bounded tokio channel. Appends
//! wait for capacity and fail once the receiver is dropped.

// ============================================================================
// SECTION: Imports
// ============================================================================

use async_trait::async_trait;
use status_relay_core::OutboundMessage;
use status_relay_core::SinkError;
use status_relay_core::StatusSink;
use tokio::sync::mpsc::Sender;

// ============================================================================
// SECTION: Channel Sink
// ============================================================================

/// Sink delivering messages over a tokio channel.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    /// Channel sender.
    sender: Sender<OutboundMessage>,
}

impl ChannelSink {
    /// Creates a sink sending on `sender`.
    #[must_use]
    pub const fn new(sender: Sender<OutboundMessage>) -> Self {
        Self {
            sender,
        }
    }
}

#[async_trait]
impl StatusSink for ChannelSink {
    async fn append(&self, message: OutboundMessage) -> Result<(), SinkError> {
        self.sender
            .send(message)
            .await
            .map_err(|_| SinkError::DeliveryFailed("channel receiver closed".to_string()))
    }
}
