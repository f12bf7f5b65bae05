// crates/status-relay-catalog/src/lib.rs
// ============================================================================
// Module: Status Relay Catalog Library
// Description: HTTP client for the external sources catalog.
// Purpose: Implement the core catalog interface over the sources REST API.
// Dependencies: status-relay-core, reqwest, serde, url
// ============================================================================

//! ## Overview
//! [`SourcesApiClient`] implements [`status_relay_core::Catalog`] against the
//! sources REST API: the application type listing and the per-source
//! application listing. Non-success status codes fail closed and response
//! bodies are capped at [`SourcesApiConfig::max_response_bytes`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod client;
mod wire;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use client::DEFAULT_MAX_RESPONSE_BYTES;
pub use client::DEFAULT_PAGE_LIMIT;
pub use client::DEFAULT_TIMEOUT;
pub use client::MAX_COLLECTION_PAGES;
pub use client::SourcesApiClient;
pub use client::SourcesApiConfig;
