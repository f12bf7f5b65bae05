// crates/status-relay-core/tests/common/mod.rs
// ============================================================================
// Module: Common Test Fixtures
// Description: In-memory catalog and sink fakes for core tests.
// Purpose: Exercise the pipeline without network collaborators.
// Dependencies: status-relay-core, async-trait, tokio
// ============================================================================

//! ## Overview
//! Provides a scripted [`Catalog`] and a recording [`StatusSink`].

#![allow(dead_code, reason = "Shared test helpers may be unused in some cases.")]
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::unwrap_in_result,
    reason = "Test fixtures favor direct unwraps for setup clarity."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Mutex;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use async_trait::async_trait;
use status_relay_core::Catalog;
use status_relay_core::CatalogError;
use status_relay_core::DependentResource;
use status_relay_core::Identity;
use status_relay_core::OutboundMessage;
use status_relay_core::ResourceType;
use status_relay_core::SinkError;
use status_relay_core::SourceId;
use status_relay_core::StatusSink;

// ============================================================================
// SECTION: Catalog Fake
// ============================================================================

/// Scripted catalog returning fixed listings.
#[derive(Default)]
pub struct StaticCatalog {
    /// Resource types returned by `list_resource_types`.
    pub resource_types: Vec<ResourceType>,
    /// Dependent resources returned by `list_dependent_resources`.
    pub resources: Vec<DependentResource>,
    /// When set, every query fails with this status.
    pub fail_status: Option<u16>,
    /// Number of queries served.
    pub calls: AtomicUsize,
    /// Identities observed on queries.
    pub identities: Mutex<Vec<Identity>>,
}

impl StaticCatalog {
    /// Records the call and returns the scripted failure, if any.
    fn observe(&self, identity: &Identity, endpoint: &str) -> Result<(), CatalogError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.identities.lock().unwrap().push(identity.clone());
        match self.fail_status {
            Some(status) => Err(CatalogError::Status {
                status,
                endpoint: endpoint.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Returns the number of queries served.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Catalog for StaticCatalog {
    async fn list_resource_types(
        &self,
        identity: &Identity,
    ) -> Result<Vec<ResourceType>, CatalogError> {
        self.observe(identity, "application_types")?;
        Ok(self.resource_types.clone())
    }

    async fn list_dependent_resources(
        &self,
        identity: &Identity,
        _source_id: &SourceId,
    ) -> Result<Vec<DependentResource>, CatalogError> {
        self.observe(identity, "applications")?;
        Ok(self.resources.clone())
    }
}

// ============================================================================
// SECTION: Sink Fake
// ============================================================================

/// Sink recording every appended message.
#[derive(Default)]
pub struct RecordingSink {
    /// Appended messages.
    pub messages: Mutex<Vec<OutboundMessage>>,
    /// When true, appends fail.
    pub fail: bool,
}

impl RecordingSink {
    /// Returns a copy of the recorded messages.
    pub fn recorded(&self) -> Vec<OutboundMessage> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl StatusSink for RecordingSink {
    async fn append(&self, message: OutboundMessage) -> Result<(), SinkError> {
        if self.fail {
            return Err(SinkError::DeliveryFailed("broker offline".to_string()));
        }
        self.messages.lock().unwrap().push(message);
        Ok(())
    }
}

// ============================================================================
// SECTION: Builders
// ============================================================================

/// Builds a dependent resource.
pub fn resource(id: &str, source_id: &str, resource_type_id: &str) -> DependentResource {
    DependentResource {
        id: id.into(),
        source_id: source_id.into(),
        resource_type_id: resource_type_id.into(),
    }
}

/// Builds a resource type.
pub fn resource_type(id: &str, name: &str) -> ResourceType {
    ResourceType {
        id: id.into(),
        name: name.to_string(),
    }
}
