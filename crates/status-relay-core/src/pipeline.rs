// crates/status-relay-core/src/pipeline.rs
// ============================================================================
// Module: Relay Pipeline
// Description: Process-scoped context and the resolve/synthesize/publish run.
// Purpose: Execute one notification's background work end to end.
// Dependencies: thiserror, tracing
// ============================================================================

//! ## Overview
//! [`RelayContext`] is constructed once at startup and shared by reference
//! with every background task. [`RelayContext::run`] performs the three
//! post-response steps for a [`PipelineJob`] and returns the published
//! verdict. Failures are returned to the caller, which owns logging them at
//! the task boundary.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::catalog::Catalog;
use crate::identifiers::Identity;
use crate::identifiers::ResourceKind;
use crate::identifiers::SourceId;
use crate::publisher::PublishError;
use crate::publisher::StatusPublisher;
use crate::resolver::ResolveError;
use crate::resolver::resolve_dependent_resource;
use crate::resource_types::ResourceTypeCache;
use crate::synthesizer::StatusSynthesizer;
use crate::verdict::APPLICATION_RESOURCE_TYPE;
use crate::verdict::StatusVerdict;

// ============================================================================
// SECTION: Jobs and Errors
// ============================================================================

/// Background work accepted from one notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineJob {
    /// Resource kind selected by the intake route.
    pub kind: ResourceKind,
    /// Source named in the request body.
    pub source_id: SourceId,
    /// Identity forwarded from the request.
    pub identity: Identity,
}

/// Errors terminating one pipeline run.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The catalog defined no resource type for the kind at bootstrap.
    #[error("resource type for {0} was not resolved at startup")]
    UnresolvedResourceType(ResourceKind),
    /// Dependent resource resolution failed.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    /// Publishing the verdict failed.
    #[error(transparent)]
    Publish(#[from] PublishError),
}

// ============================================================================
// SECTION: Relay Context
// ============================================================================

/// Shared collaborators for every pipeline run.
#[derive(Clone)]
pub struct RelayContext {
    /// Catalog used for resolution.
    catalog: Arc<dyn Catalog>,
    /// Resource type identifiers resolved at startup.
    resource_types: Arc<ResourceTypeCache>,
    /// Verdict synthesizer.
    synthesizer: StatusSynthesizer,
    /// Outbound publisher.
    publisher: StatusPublisher,
}

impl RelayContext {
    /// Creates a context from its collaborators.
    #[must_use]
    pub fn new(
        catalog: Arc<dyn Catalog>,
        resource_types: ResourceTypeCache,
        synthesizer: StatusSynthesizer,
        publisher: StatusPublisher,
    ) -> Self {
        Self {
            catalog,
            resource_types: Arc::new(resource_types),
            synthesizer,
            publisher,
        }
    }

    /// Returns the resource type cache.
    #[must_use]
    pub fn resource_types(&self) -> &ResourceTypeCache {
        &self.resource_types
    }

    /// Returns the synthesizer.
    #[must_use]
    pub const fn synthesizer(&self) -> &StatusSynthesizer {
        &self.synthesizer
    }

    /// Resolves, synthesizes and publishes the verdict for `job`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError`] when the kind is unresolved, resolution fails
    /// or the publish fails.
    pub async fn run(&self, job: &PipelineJob) -> Result<StatusVerdict, PipelineError> {
        let resource_type_id = self
            .resource_types
            .get(job.kind)
            .ok_or(PipelineError::UnresolvedResourceType(job.kind))?;
        let resource_id = resolve_dependent_resource(
            self.catalog.as_ref(),
            &job.identity,
            &job.source_id,
            resource_type_id,
        )
        .await?;
        let verdict = self.synthesizer.synthesize(APPLICATION_RESOURCE_TYPE, resource_id);
        debug!(
            kind = %job.kind,
            resource_id = %verdict.resource_id(),
            status = %verdict.status(),
            "synthesized verdict"
        );
        self.publisher.publish(&verdict, &job.identity).await?;
        Ok(verdict)
    }
}
