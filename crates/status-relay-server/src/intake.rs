// crates/status-relay-server/src/intake.rs
// ============================================================================
// Module: Intake Routes
// Description: HTTP endpoints accepting source status notifications.
// Purpose: Validate the body, queue background work and answer immediately.
// Dependencies: axum, serde_json, thiserror, tower-http
// ============================================================================

//! ## Overview
//! Each status route maps to one [`ResourceKind`]. A valid body yields a
//! [`PipelineJob`] and an immediate `200 OK`; the pipeline outcome never
//! affects the response. The body must be a JSON object with a string
//! `source_id`; anything else gets `400` with the parse error.
//! Security posture: request bodies and headers are untrusted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::routing::get;
use axum::routing::post;
use serde_json::Map;
use serde_json::Value;
use status_relay_core::IDENTITY_HEADER;
use status_relay_core::Identity;
use status_relay_core::PipelineJob;
use status_relay_core::ResourceKind;
use status_relay_core::SourceId;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::debug;
use tracing::warn;

use crate::pool::PipelinePool;

// ============================================================================
// SECTION: Routes
// ============================================================================

/// Liveness probe path.
pub const HEALTH_PATH: &str = "/healthz";
/// Cost management status path.
pub const COST_STATUS_PATH: &str = "/api/cost-management/v1/source-status/";
/// Metering status path.
pub const METERING_STATUS_PATH: &str = "/internal/api/cloudigrade/v1/availability_status";

/// Response body for accepted requests and health checks.
const OK_BODY: &str = "OK";

/// Body field naming the source.
const SOURCE_ID_FIELD: &str = "source_id";

/// Status notification body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceStatusRequest {
    /// Source whose status changed.
    pub source_id: String,
}

impl SourceStatusRequest {
    /// Decodes a notification body.
    ///
    /// Only a JSON object is accepted; extra keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] when the body is not a JSON object or
    /// `source_id` is missing or not a string.
    pub fn from_json(body: &[u8]) -> Result<Self, RequestError> {
        let mut fields: Map<String, Value> = serde_json::from_slice(body)?;
        match fields.remove(SOURCE_ID_FIELD) {
            Some(Value::String(source_id)) => Ok(Self {
                source_id,
            }),
            Some(_) => Err(RequestError::SourceIdNotString),
            None => Err(RequestError::MissingSourceId),
        }
    }
}

/// Reasons a notification body is rejected.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The body is not a JSON object.
    #[error("invalid request body: {0}")]
    Json(#[from] serde_json::Error),
    /// The body has no `source_id`.
    #[error("missing field `source_id`")]
    MissingSourceId,
    /// `source_id` is present but not a string.
    #[error("field `source_id` must be a string")]
    SourceIdNotString,
}

/// Shared handler state.
#[derive(Clone)]
struct IntakeState {
    /// Background pool receiving jobs.
    pool: PipelinePool,
}

/// Builds the intake router.
pub fn router(pool: PipelinePool) -> Router {
    Router::new()
        .route(HEALTH_PATH, get(health))
        .route(COST_STATUS_PATH, post(cost_status))
        .route(METERING_STATUS_PATH, post(metering_status))
        .with_state(IntakeState {
            pool,
        })
        .layer(TraceLayer::new_for_http())
}

// ============================================================================
// SECTION: Handlers
// ============================================================================

/// Liveness probe.
async fn health() -> (StatusCode, &'static str) {
    (StatusCode::OK, OK_BODY)
}

/// Cost management notifications.
async fn cost_status(
    State(state): State<IntakeState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, String) {
    accept(&state, ResourceKind::Cost, &headers, &body)
}

/// Metering notifications.
async fn metering_status(
    State(state): State<IntakeState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, String) {
    accept(&state, ResourceKind::Metering, &headers, &body)
}

/// Parses the body and queues a job for `kind`.
fn accept(
    state: &IntakeState,
    kind: ResourceKind,
    headers: &HeaderMap,
    body: &[u8],
) -> (StatusCode, String) {
    let request = match SourceStatusRequest::from_json(body) {
        Ok(request) => request,
        Err(err) => {
            debug!(%kind, error = %err, "rejected status notification");
            return (StatusCode::BAD_REQUEST, err.to_string());
        }
    };
    let identity = headers
        .get(IDENTITY_HEADER)
        .map_or_else(Identity::empty, |value| Identity::from_bytes(value.as_bytes().to_vec()));
    debug!(%kind, source_id = %request.source_id, "accepted status notification");
    let job = PipelineJob {
        kind,
        source_id: SourceId::new(request.source_id),
        identity,
    };
    if let Err(err) = state.pool.submit(job) {
        warn!(%kind, error = %err, "dropped status notification");
    }
    (StatusCode::OK, OK_BODY.to_string())
}
