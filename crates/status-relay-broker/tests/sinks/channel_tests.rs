// crates/status-relay-broker/tests/sinks/channel_tests.rs
// ============================================================================
// Module: ChannelSink Tests
// Description: Tests for the channel-based status sink.
// Purpose: Validate in-order delivery and closed-receiver failures.
// Dependencies: status-relay-broker, tokio
// ============================================================================

//! ## Overview
//! Exercises [`status_relay_broker::ChannelSink`] message delivery behavior.

use status_relay_broker::ChannelSink;
use status_relay_broker::OutboundMessage;
use status_relay_broker::SinkError;
use status_relay_broker::StatusSink;
use status_relay_core::EVENT_TYPE_HEADER;

use super::common::sample_message;

// ============================================================================
// SECTION: Delivery Tests
// ============================================================================

/// Tests channel sink forwards the message unchanged.
#[tokio::test]
async fn channel_sink_forwards_message() {
    let (tx, mut rx) = tokio::sync::mpsc::channel::<OutboundMessage>(4);
    let sink = ChannelSink::new(tx);
    let message = sample_message("7");

    sink.append(message.clone()).await.expect("append");

    let received = rx.recv().await.expect("message");
    assert_eq!(received, message);
    assert_eq!(received.header(EVENT_TYPE_HEADER), Some(b"availability_status".as_slice()));
}

/// Tests channel sink preserves append order.
#[tokio::test]
async fn channel_sink_preserves_order() {
    let (tx, mut rx) = tokio::sync::mpsc::channel::<OutboundMessage>(4);
    let sink = ChannelSink::new(tx);
    for id in ["1", "2", "3"] {
        sink.append(sample_message(id)).await.expect("append");
    }
    for id in ["1", "2", "3"] {
        assert_eq!(rx.recv().await.expect("message"), sample_message(id));
    }
}

// ============================================================================
// SECTION: Failure Tests
// ============================================================================

/// Tests channel sink fails once the receiver is dropped.
#[tokio::test]
async fn channel_sink_fails_when_receiver_closed() {
    let (tx, rx) = tokio::sync::mpsc::channel::<OutboundMessage>(1);
    drop(rx);
    let sink = ChannelSink::new(tx);

    let err = sink.append(sample_message("7")).await.unwrap_err();
    assert!(matches!(err, SinkError::DeliveryFailed(_)));
}
