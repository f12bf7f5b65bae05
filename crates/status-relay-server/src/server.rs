// crates/status-relay-server/src/server.rs
// ============================================================================
// Module: Relay Server
// Description: Startup wiring and the HTTP serve loop.
// Purpose: Build the relay context from configuration and serve intake.
// Dependencies: status-relay-config, status-relay-catalog, status-relay-broker
// ============================================================================

//! ## Overview
//! [`RelayServer::from_config`] performs every fatal startup step in order:
//! catalog client, resource type bootstrap, sink connection. Only then does
//! [`RelayServer::serve`] bind the listener, so a relay that cannot publish
//! never accepts requests.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::SocketAddr;
use std::sync::Arc;

use status_relay_broker::KafkaSink;
use status_relay_broker::KafkaSinkConfig;
use status_relay_broker::LogSink;
use status_relay_catalog::SourcesApiClient;
use status_relay_catalog::SourcesApiConfig;
use status_relay_config::ConfigError;
use status_relay_config::PublisherConfig;
use status_relay_config::PublisherKind;
use status_relay_config::StatusRelayConfig;
use status_relay_core::BootstrapError;
use status_relay_core::CatalogError;
use status_relay_core::RelayContext;
use status_relay_core::ResourceTypeCache;
use status_relay_core::SinkError;
use status_relay_core::StatusPublisher;
use status_relay_core::StatusSink;
use status_relay_core::StatusSynthesizer;
use status_relay_core::SynthesisMode;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::mpsc::UnboundedSender;
use tracing::info;

use crate::intake::router;
use crate::pool::PipelineOutcome;
use crate::pool::PipelinePool;
use crate::pool::PoolConfig;

// ============================================================================
// SECTION: Relay Server
// ============================================================================

/// Fully initialised relay ready to serve.
pub struct RelayServer {
    /// Listen address.
    bind: SocketAddr,
    /// Pool sizing.
    pool: PoolConfig,
    /// Shared pipeline context.
    context: RelayContext,
}

impl RelayServer {
    /// Creates a server from prebuilt parts.
    #[must_use]
    pub const fn new(bind: SocketAddr, pool: PoolConfig, context: RelayContext) -> Self {
        Self {
            bind,
            pool,
            context,
        }
    }

    /// Runs every startup step described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when the config is invalid, the bootstrap
    /// query fails or the sink cannot connect.
    pub async fn from_config(config: &StatusRelayConfig) -> Result<Self, ServerError> {
        config.validate()?;
        let context = build_context(config).await?;
        let pool = PoolConfig {
            queue_capacity: config.pipeline.queue_capacity,
            max_in_flight: config.pipeline.max_in_flight,
        };
        Ok(Self::new(config.server.bind, pool, context))
    }

    /// Returns the shared pipeline context.
    #[must_use]
    pub const fn context(&self) -> &RelayContext {
        &self.context
    }

    /// Binds the configured address and serves until the server stops.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when binding or serving fails.
    pub async fn serve(self) -> Result<(), ServerError> {
        let listener = TcpListener::bind(self.bind)
            .await
            .map_err(|err| ServerError::Bind(format!("{}: {err}", self.bind)))?;
        self.serve_on(listener, None).await
    }

    /// Serves on an already bound listener.
    ///
    /// When `outcomes` is set, every finished pipeline is reported on it.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Transport`] when the HTTP server fails.
    pub async fn serve_on(
        self,
        listener: TcpListener,
        outcomes: Option<UnboundedSender<PipelineOutcome>>,
    ) -> Result<(), ServerError> {
        let pool = PipelinePool::start(self.context, self.pool, outcomes);
        let app = router(pool);
        if let Ok(addr) = listener.local_addr() {
            info!(%addr, "status relay listening");
        }
        axum::serve(listener, app)
            .await
            .map_err(|err| ServerError::Transport(err.to_string()))
    }
}

// ============================================================================
// SECTION: Startup Wiring
// ============================================================================

/// Builds the pipeline context: catalog, bootstrap, synthesizer and sink.
///
/// # Errors
///
/// Returns [`ServerError`] on the first failed startup step.
pub async fn build_context(config: &StatusRelayConfig) -> Result<RelayContext, ServerError> {
    let mut catalog_config = SourcesApiConfig::new(config.catalog.parsed_base_url()?);
    catalog_config.timeout = config.catalog.timeout();
    catalog_config.max_response_bytes = config.catalog.max_response_bytes;
    let catalog = SourcesApiClient::new(catalog_config)?;

    let resource_types = ResourceTypeCache::populate(&catalog, &config.catalog.identity()).await?;

    let sink = build_sink(&config.publisher).await?;
    let synthesizer = StatusSynthesizer::new(config.synthesis.mode());
    match synthesizer.mode() {
        SynthesisMode::Random => info!("status synthesis is random"),
        SynthesisMode::Fixed(status) => info!(%status, "status synthesis is forced"),
    }
    Ok(RelayContext::new(
        Arc::new(catalog),
        resource_types,
        synthesizer,
        StatusPublisher::new(sink),
    ))
}

/// Opens the configured outbound sink.
///
/// # Errors
///
/// Returns [`ServerError::Sink`] when the Kafka connection fails.
pub async fn build_sink(config: &PublisherConfig) -> Result<Arc<dyn StatusSink>, ServerError> {
    match config.kind {
        PublisherKind::Kafka => {
            let sink = KafkaSink::connect(&KafkaSinkConfig {
                brokers: config.brokers.clone(),
                topic: config.topic.clone(),
                partition: config.partition,
            })
            .await?;
            Ok(Arc::new(sink))
        }
        PublisherKind::Log => {
            info!("publishing status messages to stdout");
            Ok(Arc::new(LogSink::new(std::io::stdout())))
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Relay startup and serve errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The catalog client could not be built.
    #[error("catalog client error: {0}")]
    Catalog(#[from] CatalogError),
    /// Resource type bootstrap failed.
    #[error(transparent)]
    Bootstrap(#[from] BootstrapError),
    /// The outbound sink could not be opened.
    #[error("publisher unavailable: {0}")]
    Sink(#[from] SinkError),
    /// The listen address could not be bound.
    #[error("bind failed: {0}")]
    Bind(String),
    /// The HTTP server failed while running.
    #[error("http server failed: {0}")]
    Transport(String),
}
