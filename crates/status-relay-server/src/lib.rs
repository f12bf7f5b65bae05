// crates/status-relay-server/src/lib.rs
// ============================================================================
// Module: Status Relay Server Library
// Description: HTTP intake, pipeline pool and startup wiring.
// Purpose: Accept status notifications and publish verdicts in the background.
// Dependencies: axum, tokio, status-relay-core
// ============================================================================

//! ## Overview
//! The server answers every valid notification immediately and runs the
//! resolve, synthesize and publish steps on a bounded background pool.
//! Startup is fail-closed: the listener is bound only after the catalog
//! bootstrap and the sink connection succeed.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod intake;
pub mod pool;
pub mod server;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use intake::COST_STATUS_PATH;
pub use intake::HEALTH_PATH;
pub use intake::METERING_STATUS_PATH;
pub use intake::RequestError;
pub use intake::SourceStatusRequest;
pub use intake::router;
pub use pool::PipelineOutcome;
pub use pool::PipelinePool;
pub use pool::PoolConfig;
pub use pool::SubmitError;
pub use server::RelayServer;
pub use server::ServerError;
pub use server::build_context;
pub use server::build_sink;
