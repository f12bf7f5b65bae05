// crates/status-relay-broker/src/sink/log.rs
// ============================================================================
// Module: Log Sink
// Description: Sink writing outbound messages as JSON lines.
// Purpose: Run the relay without a broker and inspect what would be sent.
// Dependencies: serde_json, status-relay-core
// ============================================================================

//! ## Overview
//! [`LogSink`] writes one JSON object per message: a sequence number, the
//! headers (values rendered lossily as UTF-8) and the payload, embedded as
//! JSON when it parses and as a string otherwise.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::sync::Mutex;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use async_trait::async_trait;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;
use status_relay_core::OutboundMessage;
use status_relay_core::SinkError;
use status_relay_core::StatusSink;

// ============================================================================
// SECTION: Log Sink
// ============================================================================

/// Sink writing JSON lines to a writer.
pub struct LogSink<W: Write + Send> {
    /// Output writer.
    writer: Mutex<W>,
    /// Sequence counter for written records.
    counter: AtomicU64,
}

impl<W: Write + Send> LogSink<W> {
    /// Creates a sink writing to `writer`.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            counter: AtomicU64::new(0),
        }
    }

    /// Writes one record for `message`.
    fn write_record(&self, message: &OutboundMessage) -> Result<(), SinkError> {
        let sequence = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        let mut headers = Map::new();
        for header in &message.headers {
            headers.insert(
                header.key.clone(),
                Value::String(String::from_utf8_lossy(&header.value).into_owned()),
            );
        }
        let payload = serde_json::from_slice::<Value>(&message.payload).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&message.payload).into_owned())
        });
        let record = json!({
            "sequence": sequence,
            "headers": headers,
            "payload": payload,
        });
        let mut line =
            serde_json::to_vec(&record).map_err(|err| SinkError::LogWriteFailed(err.to_string()))?;
        line.push(b'\n');
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| SinkError::LogWriteFailed("log writer lock poisoned".to_string()))?;
        writer.write_all(&line).map_err(|err| SinkError::LogWriteFailed(err.to_string()))?;
        writer.flush().map_err(|err| SinkError::LogWriteFailed(err.to_string()))
    }
}

#[async_trait]
impl<W: Write + Send + 'static> StatusSink for LogSink<W> {
    async fn append(&self, message: OutboundMessage) -> Result<(), SinkError> {
        self.write_record(&message)
    }
}
