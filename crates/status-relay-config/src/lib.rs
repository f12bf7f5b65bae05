// crates/status-relay-config/src/lib.rs
// ============================================================================
// Module: Status Relay Config Library
// Description: Canonical config model, Clowder overlay and validation.
// Purpose: Single source of truth for relay configuration semantics.
// Dependencies: status-relay-core, serde, toml
// ============================================================================

//! ## Overview
//! `status-relay-config` defines the configuration model for Status Relay.
//! It merges a TOML file, the Clowder document and environment overrides,
//! then validates the result fail-closed.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod clowder;
pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use clowder::ClowderConfig;
pub use config::*;
