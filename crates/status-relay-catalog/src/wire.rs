// crates/status-relay-catalog/src/wire.rs
// ============================================================================
// Module: Sources API Wire Types
// Description: JSON shapes returned by the sources REST API.
// Purpose: Decode catalog collections into core catalog entities.
// Dependencies: serde, status-relay-core
// ============================================================================

//! ## Overview
//! Collections are wrapped in a `data` array with an optional `links.next`
//! cursor. Identifiers are strings on the
//! current API revision but older revisions emitted numbers, so both decode.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use status_relay_core::DependentResource;
use status_relay_core::ResourceType;

// ============================================================================
// SECTION: Wire Types
// ============================================================================

/// Paged collection envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct Collection<T> {
    /// Collection entries in catalog order.
    pub(crate) data: Vec<T>,
    /// Pagination cursors.
    #[serde(default)]
    pub(crate) links: Option<Links>,
}

/// Pagination links of a collection page.
#[derive(Debug, Deserialize)]
pub(crate) struct Links {
    /// Reference to the following page, absent on the last one.
    #[serde(default)]
    pub(crate) next: Option<String>,
}

/// Identifier encoded as a string or a number.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum WireId {
    /// String identifier.
    Text(String),
    /// Numeric identifier.
    Number(u64),
}

impl WireId {
    /// Returns the identifier in its string form.
    fn into_string(self) -> String {
        match self {
            Self::Text(value) => value,
            Self::Number(value) => value.to_string(),
        }
    }
}

/// Application type record.
#[derive(Debug, Deserialize)]
pub(crate) struct ApplicationTypeRecord {
    /// Catalog identifier.
    id: WireId,
    /// Fully qualified type name.
    name: String,
}

impl From<ApplicationTypeRecord> for ResourceType {
    fn from(record: ApplicationTypeRecord) -> Self {
        Self {
            id: record.id.into_string().into(),
            name: record.name,
        }
    }
}

/// Application record.
#[derive(Debug, Deserialize)]
pub(crate) struct ApplicationRecord {
    /// Catalog identifier.
    id: WireId,
    /// Owning source identifier.
    source_id: WireId,
    /// Application type identifier.
    application_type_id: WireId,
}

impl From<ApplicationRecord> for DependentResource {
    fn from(record: ApplicationRecord) -> Self {
        Self {
            id: record.id.into_string().into(),
            source_id: record.source_id.into_string().into(),
            resource_type_id: record.application_type_id.into_string().into(),
        }
    }
}
