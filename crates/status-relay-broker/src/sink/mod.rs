// crates/status-relay-broker/src/sink/mod.rs
// ============================================================================
// Module: Status Relay Sinks
// Description: Reference implementations of the status sink interface.
// Purpose: Deliver outbound messages to concrete transports.
// Dependencies: status-relay-core
// ============================================================================

//! ## Overview
//! Each submodule implements [`status_relay_core::StatusSink`] for one
//! transport. Delivery failures are reported as
//! [`status_relay_core::SinkError`] and never retried here.

// ============================================================================
// SECTION: Implementations
// ============================================================================

pub mod channel;
pub mod kafka;
pub mod log;

pub use channel::ChannelSink;
pub use kafka::KafkaSink;
pub use kafka::KafkaSinkConfig;
pub use log::LogSink;
