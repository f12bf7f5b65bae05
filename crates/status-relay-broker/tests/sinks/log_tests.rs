// crates/status-relay-broker/tests/sinks/log_tests.rs
// ============================================================================
// Module: LogSink Tests
// Description: Tests for the JSON-lines status sink.
// Purpose: Validate record layout, sequencing and write failures.
// Dependencies: status-relay-broker, serde_json
// ============================================================================

//! ## Overview
//! Exercises [`status_relay_broker::LogSink`] output formatting.

use serde_json::Value;
use status_relay_broker::LogSink;
use status_relay_broker::OutboundMessage;
use status_relay_broker::SinkError;
use status_relay_broker::StatusSink;

use super::common::FailingWriter;
use super::common::SharedBuffer;
use super::common::sample_message;

// ============================================================================
// SECTION: Output Tests
// ============================================================================

/// Tests log sink writes headers and the embedded JSON payload.
#[tokio::test]
async fn log_sink_writes_json_record() {
    let buffer = SharedBuffer::default();
    let sink = LogSink::new(buffer.clone());

    sink.append(sample_message("42")).await.expect("append");

    let output = buffer.to_string_lossy();
    assert!(output.ends_with('\n'));
    let record: Value = serde_json::from_str(output.trim_end()).expect("json line");
    assert_eq!(record["sequence"], 1);
    assert_eq!(record["headers"]["x-rh-identity"], "eyJpZGVudGl0eSI6e319");
    assert_eq!(record["headers"]["event_type"], "availability_status");
    assert_eq!(record["payload"]["resource_type"], "application");
    assert_eq!(record["payload"]["resource_id"], "42");
    assert_eq!(record["payload"]["status"], "available");
}

/// Tests log sink numbers records in append order.
#[tokio::test]
async fn log_sink_sequences_records() {
    let buffer = SharedBuffer::default();
    let sink = LogSink::new(buffer.clone());
    sink.append(sample_message("1")).await.expect("append");
    sink.append(sample_message("2")).await.expect("append");

    let output = buffer.to_string_lossy();
    let sequences: Vec<u64> = output
        .lines()
        .map(|line| {
            let record: Value = serde_json::from_str(line).expect("json line");
            record["sequence"].as_u64().expect("sequence")
        })
        .collect();
    assert_eq!(sequences, vec![1, 2]);
}

/// Tests non-JSON payloads are written as strings.
#[tokio::test]
async fn log_sink_writes_opaque_payload_as_string() {
    let buffer = SharedBuffer::default();
    let sink = LogSink::new(buffer.clone());
    let message = OutboundMessage {
        headers: Vec::new(),
        payload: b"not json".to_vec(),
    };

    sink.append(message).await.expect("append");

    let record: Value = serde_json::from_str(buffer.to_string_lossy().trim_end()).expect("json");
    assert_eq!(record["payload"], "not json");
    assert_eq!(record["headers"], serde_json::json!({}));
}

// ============================================================================
// SECTION: Failure Tests
// ============================================================================

/// Tests write failures surface as log write errors.
#[tokio::test]
async fn log_sink_reports_write_failure() {
    let sink = LogSink::new(FailingWriter);
    let err = sink.append(sample_message("1")).await.unwrap_err();
    match err {
        SinkError::LogWriteFailed(message) => assert!(message.contains("simulated write failure")),
        other => panic!("unexpected error: {other}"),
    }
}
