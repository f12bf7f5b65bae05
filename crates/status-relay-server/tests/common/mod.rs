// crates/status-relay-server/tests/common/mod.rs
// ============================================================================
// Module: Common Test Fixtures
// Description: Catalog fake and relay launcher for server tests.
// Purpose: Drive the HTTP surface against in-process collaborators.
// Dependencies: status-relay-server, status-relay-broker, tokio
// ============================================================================

//! ## Overview
//! Provides a catalog whose resolution can be held open, and a helper that
//! serves a relay on an ephemeral port with a completion channel attached.

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

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use async_trait::async_trait;
use status_relay_broker::ChannelSink;
use status_relay_core::Catalog;
use status_relay_core::CatalogError;
use status_relay_core::DependentResource;
use status_relay_core::Identity;
use status_relay_core::OutboundMessage;
use status_relay_core::RelayContext;
use status_relay_core::ResourceKind;
use status_relay_core::ResourceType;
use status_relay_core::ResourceTypeCache;
use status_relay_core::SourceId;
use status_relay_core::StatusPublisher;
use status_relay_core::StatusSynthesizer;
use status_relay_core::SynthesisMode;
use status_relay_server::PipelineOutcome;
use status_relay_server::PoolConfig;
use status_relay_server::RelayServer;
use tokio::net::TcpListener;
use tokio::sync::Semaphore;
use tokio::sync::mpsc;

// ============================================================================
// SECTION: Catalog Fake
// ============================================================================

/// Catalog serving fixed resources, optionally held until released.
pub struct GatedCatalog {
    /// Dependent resources returned for every source.
    resources: Vec<DependentResource>,
    /// Gate held closed until [`GatedCatalog::release`].
    gate: Semaphore,
    /// Number of resolution queries received.
    calls: AtomicUsize,
}

impl GatedCatalog {
    /// Creates a catalog that answers immediately.
    pub fn open(resources: Vec<DependentResource>) -> Self {
        Self {
            resources,
            gate: Semaphore::new(Semaphore::MAX_PERMITS),
            calls: AtomicUsize::new(0),
        }
    }

    /// Creates a catalog that blocks resolution until released.
    pub fn closed(resources: Vec<DependentResource>) -> Self {
        Self {
            resources,
            gate: Semaphore::new(0),
            calls: AtomicUsize::new(0),
        }
    }

    /// Lets every pending and future resolution proceed.
    pub fn release(&self) {
        self.gate.add_permits(1_000);
    }

    /// Returns the number of resolution queries received.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Catalog for GatedCatalog {
    async fn list_resource_types(
        &self,
        _identity: &Identity,
    ) -> Result<Vec<ResourceType>, CatalogError> {
        Ok(Vec::new())
    }

    async fn list_dependent_resources(
        &self,
        _identity: &Identity,
        _source_id: &SourceId,
    ) -> Result<Vec<DependentResource>, CatalogError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let _permit = self
            .gate
            .acquire()
            .await
            .map_err(|_| CatalogError::Transport("gate closed".to_string()))?;
        Ok(self.resources.clone())
    }
}

/// Builds a dependent resource.
pub fn resource(id: &str, source_id: &str, resource_type_id: &str) -> DependentResource {
    DependentResource {
        id: id.into(),
        source_id: source_id.into(),
        resource_type_id: resource_type_id.into(),
    }
}

// ============================================================================
// SECTION: Relay Launcher
// ============================================================================

/// Running relay under test.
pub struct TestRelay {
    /// Base URL of the HTTP server.
    pub base_url: String,
    /// Finished pipeline outcomes.
    pub outcomes: mpsc::UnboundedReceiver<PipelineOutcome>,
    /// Messages appended to the sink.
    pub messages: mpsc::Receiver<OutboundMessage>,
}

/// Builds a context with cost type `1`, metering type `2` and a channel sink.
pub fn context(
    catalog: Arc<GatedCatalog>,
    mode: SynthesisMode,
) -> (RelayContext, mpsc::Receiver<OutboundMessage>) {
    let (sender, receiver) = mpsc::channel(64);
    let resource_types = ResourceTypeCache::default()
        .with_type(ResourceKind::Cost, "1")
        .with_type(ResourceKind::Metering, "2");
    let context = RelayContext::new(
        catalog,
        resource_types,
        StatusSynthesizer::new(mode),
        StatusPublisher::new(Arc::new(ChannelSink::new(sender))),
    );
    (context, receiver)
}

/// Serves a relay on an ephemeral port.
pub async fn start_relay(catalog: Arc<GatedCatalog>, mode: SynthesisMode) -> TestRelay {
    let (context, messages) = context(catalog, mode);
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr: SocketAddr = listener.local_addr().expect("local addr");
    let (outcome_tx, outcomes) = mpsc::unbounded_channel();
    let pool = PoolConfig {
        queue_capacity: 16,
        max_in_flight: 4,
    };
    let server = RelayServer::new(addr, pool, context);
    tokio::spawn(server.serve_on(listener, Some(outcome_tx)));
    TestRelay {
        base_url: format!("http://{addr}"),
        outcomes,
        messages,
    }
}
