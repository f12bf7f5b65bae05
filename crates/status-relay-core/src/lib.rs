// crates/status-relay-core/src/lib.rs
// ============================================================================
// Module: Status Relay Core Library
// Description: Domain model and pipeline for the synthetic status relay.
// Purpose: Resolve source notifications into published availability verdicts.
// Dependencies: async-trait, rand, serde, serde_json, thiserror, tracing
// ============================================================================

//! ## Overview
//! Status Relay Core owns the backend-agnostic half of the relay: identifiers,
//! the [`StatusVerdict`] model, the [`StatusSynthesizer`], the
//! [`ResourceTypeCache`] bootstrap, the catalog resolver and the
//! [`StatusPublisher`]. External systems plug in through the [`Catalog`] and
//! [`StatusSink`] traits; [`RelayContext`] wires everything for one process.
//! Invariants:
//! - A verdict carries error text if and only if it is unavailable.
//! - The resource type cache holds at most one identifier per kind.
//! - Published messages carry exactly the identity and event type headers.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod catalog;
pub mod identifiers;
pub mod pipeline;
pub mod publisher;
pub mod resolver;
pub mod resource_types;
pub mod synthesizer;
pub mod verdict;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use catalog::Catalog;
pub use catalog::CatalogError;
pub use catalog::DependentResource;
pub use catalog::ResourceType;
pub use identifiers::DependentResourceId;
pub use identifiers::Identity;
pub use identifiers::ResourceKind;
pub use identifiers::ResourceTypeId;
pub use identifiers::SourceId;
pub use pipeline::PipelineError;
pub use pipeline::PipelineJob;
pub use pipeline::RelayContext;
pub use publisher::AVAILABILITY_STATUS_EVENT;
pub use publisher::EVENT_TYPE_HEADER;
pub use publisher::IDENTITY_HEADER;
pub use publisher::MessageHeader;
pub use publisher::OutboundMessage;
pub use publisher::PublishError;
pub use publisher::SinkError;
pub use publisher::StatusPublisher;
pub use publisher::StatusSink;
pub use resolver::ResolveError;
pub use resolver::resolve_dependent_resource;
pub use resolver::select_dependent_resource;
pub use resource_types::BootstrapError;
pub use resource_types::ResourceTypeCache;
pub use synthesizer::StatusSynthesizer;
pub use synthesizer::SynthesisMode;
pub use verdict::APPLICATION_RESOURCE_TYPE;
pub use verdict::AvailabilityStatus;
pub use verdict::ParseStatusError;
pub use verdict::StatusVerdict;
pub use verdict::UNAVAILABLE_ERROR;
