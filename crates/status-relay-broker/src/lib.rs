// crates/status-relay-broker/src/lib.rs
// ============================================================================
// Module: Status Relay Broker Library
// Description: Outbound queue sinks for availability status messages.
// Purpose: Append encoded verdicts to Kafka, a channel or a log stream.
// Dependencies: status-relay-core, rskafka, tokio
// ============================================================================

//! ## Overview
//! Status Relay Broker provides ready-made [`StatusSink`] implementations:
//! [`KafkaSink`] for the production topic, [`ChannelSink`] for in-process
//! consumers and tests, and [`LogSink`] for broker-less local runs.
//! Invariants:
//! - Sinks return `Ok` only after the message was handed to the transport.
//! - Sinks are safe to share across concurrent pipeline tasks.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod sink;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use sink::ChannelSink;
pub use sink::KafkaSink;
pub use sink::KafkaSinkConfig;
pub use sink::LogSink;
pub use status_relay_core::OutboundMessage;
pub use status_relay_core::SinkError;
pub use status_relay_core::StatusSink;
