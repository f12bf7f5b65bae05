// crates/status-relay-cli/src/lib.rs
// ============================================================================
// Module: Status Relay CLI Library
// Description: Shared helpers for the Status Relay command-line interface.
// Purpose: Provide logging setup for the CLI binary and tests.
// Dependencies: tracing-subscriber
// ============================================================================

//! ## Overview
//! Houses the tracing subscriber setup used by the `status-relay` binary.

// ============================================================================
// SECTION: Modules
// ============================================================================

/// Tracing subscriber initialization.
pub mod logging;
