// crates/status-relay-core/src/resolver.rs
// ============================================================================
// Module: Catalog Resolver
// Description: Resolves a (source, resource type) pair to a dependent resource.
// Purpose: Find the application whose availability is being reported.
// Dependencies: thiserror, tracing
// ============================================================================

//! ## Overview
//! Resolution lists the source's dependent resources and keeps the first one
//! whose source and resource type both match, in catalog order. The pair is
//! expected to be unique, so no tie-break is applied. Results are never cached.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;
use tracing::debug;

use crate::catalog::Catalog;
use crate::catalog::CatalogError;
use crate::catalog::DependentResource;
use crate::identifiers::DependentResourceId;
use crate::identifiers::Identity;
use crate::identifiers::ResourceTypeId;
use crate::identifiers::SourceId;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors returned by dependent resource resolution.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No dependent resource matches the pair.
    #[error("no dependent resource for source {source_id} with resource type {resource_type_id}")]
    NotFound {
        /// Requested source.
        source_id: SourceId,
        /// Requested resource type.
        resource_type_id: ResourceTypeId,
    },
    /// The catalog query failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

// ============================================================================
// SECTION: Resolution
// ============================================================================

/// Returns the first resource matching both `source_id` and `resource_type_id`.
#[must_use]
pub fn select_dependent_resource<'a>(
    resources: &'a [DependentResource],
    source_id: &SourceId,
    resource_type_id: &ResourceTypeId,
) -> Option<&'a DependentResource> {
    resources.iter().find(|resource| {
        &resource.source_id == source_id && &resource.resource_type_id == resource_type_id
    })
}

/// Resolves the dependent resource for a source and resource type.
///
/// # Errors
///
/// Returns [`ResolveError::NotFound`] when nothing matches and
/// [`ResolveError::Catalog`] when the catalog query fails.
pub async fn resolve_dependent_resource(
    catalog: &dyn Catalog,
    identity: &Identity,
    source_id: &SourceId,
    resource_type_id: &ResourceTypeId,
) -> Result<DependentResourceId, ResolveError> {
    let resources = catalog.list_dependent_resources(identity, source_id).await?;
    debug!(
        source_id = %source_id,
        candidates = resources.len(),
        "listed dependent resources"
    );
    select_dependent_resource(&resources, source_id, resource_type_id)
        .map(|resource| resource.id.clone())
        .ok_or_else(|| ResolveError::NotFound {
            source_id: source_id.clone(),
            resource_type_id: resource_type_id.clone(),
        })
}
