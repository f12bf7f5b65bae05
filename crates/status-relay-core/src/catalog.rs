// crates/status-relay-core/src/catalog.rs
// ============================================================================
// Module: Catalog Interface
// Description: Backend-agnostic view of the external sources catalog.
// Purpose: Define the two catalog queries the relay depends on.
// Dependencies: async-trait, thiserror
// ============================================================================

//! ## Overview
//! The relay needs exactly two catalog queries: the full resource type listing
//! (once, at bootstrap) and the dependent resources owned by a source (per
//! notification). Implementations forward the caller's [`Identity`] as the
//! scoping credential and return entries in catalog order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use async_trait::async_trait;
use thiserror::Error;

use crate::identifiers::DependentResourceId;
use crate::identifiers::Identity;
use crate::identifiers::ResourceTypeId;
use crate::identifiers::SourceId;

// ============================================================================
// SECTION: Catalog Entities
// ============================================================================

/// Resource type defined by the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceType {
    /// Catalog identifier.
    pub id: ResourceTypeId,
    /// Catalog name, matched by suffix.
    pub name: String,
}

/// Dependent resource linking a source to a resource type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependentResource {
    /// Catalog identifier.
    pub id: DependentResourceId,
    /// Owning source.
    pub source_id: SourceId,
    /// Resource type of the dependent resource.
    pub resource_type_id: ResourceTypeId,
}

// ============================================================================
// SECTION: Catalog Errors
// ============================================================================

/// Errors returned by catalog implementations.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The request could not be sent or the response could not be read.
    #[error("catalog request failed: {0}")]
    Transport(String),
    /// The catalog answered with a non-success status.
    #[error("catalog returned status {status} for {endpoint}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Endpoint that was queried.
        endpoint: String,
    },
    /// The response body exceeded the configured limit.
    #[error("catalog response exceeds {limit} bytes")]
    ResponseTooLarge {
        /// Configured byte limit.
        limit: usize,
    },
    /// The response body did not match the expected shape.
    #[error("catalog response invalid: {0}")]
    InvalidResponse(String),
}

// ============================================================================
// SECTION: Catalog Trait
// ============================================================================

/// External catalog of resource types and dependent resources.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Lists every resource type known to the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the catalog cannot be queried.
    async fn list_resource_types(
        &self,
        identity: &Identity,
    ) -> Result<Vec<ResourceType>, CatalogError>;

    /// Lists the dependent resources owned by `source_id`.
    ///
    /// Implementations may return resources of other sources; callers filter.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the catalog cannot be queried.
    async fn list_dependent_resources(
        &self,
        identity: &Identity,
        source_id: &SourceId,
    ) -> Result<Vec<DependentResource>, CatalogError>;
}
