// crates/status-relay-core/src/resource_types.rs
// ============================================================================
// Module: Resource Type Cache
// Description: Startup cache of the catalog identifiers for known kinds.
// Purpose: Map cost and metering kinds to catalog resource type identifiers.
// Dependencies: thiserror, tracing
// ============================================================================

//! ## Overview
//! The cache is populated once at startup from the catalog's full resource
//! type listing and is read-only afterwards. Kinds are matched by name suffix.
//! Invariants:
//! - At most one identifier per kind; the last matching entry wins.
//! - A kind with no matching entry stays unresolved; the scan still succeeds.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;
use tracing::info;
use tracing::warn;

use crate::catalog::Catalog;
use crate::catalog::CatalogError;
use crate::catalog::ResourceType;
use crate::identifiers::Identity;
use crate::identifiers::ResourceKind;
use crate::identifiers::ResourceTypeId;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while bootstrapping the cache. Always fatal for the process.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The catalog listing failed.
    #[error("failed to list resource types: {0}")]
    Catalog(#[from] CatalogError),
}

// ============================================================================
// SECTION: Cache
// ============================================================================

/// Resource type identifiers for the kinds the relay reports on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceTypeCache {
    /// Identifier for [`ResourceKind::Cost`].
    cost: Option<ResourceTypeId>,
    /// Identifier for [`ResourceKind::Metering`].
    metering: Option<ResourceTypeId>,
}

impl ResourceTypeCache {
    /// Builds a cache by scanning a catalog listing in order.
    #[must_use]
    pub fn from_listing<'a, I>(types: I) -> Self
    where
        I: IntoIterator<Item = &'a ResourceType>,
    {
        let mut cache = Self::default();
        for resource_type in types {
            for kind in ResourceKind::ALL {
                if kind.matches_type_name(&resource_type.name) {
                    *cache.slot_mut(kind) = Some(resource_type.id.clone());
                }
            }
        }
        cache
    }

    /// Queries the catalog and builds the cache.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError`] when the catalog is unreachable or rejects the query.
    pub async fn populate(
        catalog: &dyn Catalog,
        identity: &Identity,
    ) -> Result<Self, BootstrapError> {
        let types = catalog.list_resource_types(identity).await?;
        let cache = Self::from_listing(&types);
        for kind in ResourceKind::ALL {
            match cache.get(kind) {
                Some(id) => info!(kind = %kind, resource_type_id = %id, "resolved resource type"),
                None => warn!(
                    kind = %kind,
                    suffix = kind.catalog_suffix(),
                    "no catalog resource type matches kind"
                ),
            }
        }
        Ok(cache)
    }

    /// Returns a copy of the cache with `kind` set to `id`.
    #[must_use]
    pub fn with_type(mut self, kind: ResourceKind, id: impl Into<ResourceTypeId>) -> Self {
        *self.slot_mut(kind) = Some(id.into());
        self
    }

    /// Returns the identifier for `kind`, if the catalog defined one.
    #[must_use]
    pub const fn get(&self, kind: ResourceKind) -> Option<&ResourceTypeId> {
        match kind {
            ResourceKind::Cost => self.cost.as_ref(),
            ResourceKind::Metering => self.metering.as_ref(),
        }
    }

    /// Returns the mutable slot backing `kind`.
    const fn slot_mut(&mut self, kind: ResourceKind) -> &mut Option<ResourceTypeId> {
        match kind {
            ResourceKind::Cost => &mut self.cost,
            ResourceKind::Metering => &mut self.metering,
        }
    }
}
