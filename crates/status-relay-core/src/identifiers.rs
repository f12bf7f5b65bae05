// crates/status-relay-core/src/identifiers.rs
// ============================================================================
// Module: Status Relay Identifiers
// Description: Opaque identifiers for sources, resource types and identities.
// Purpose: Provide strongly typed identifiers with stable wire forms.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Catalog identifiers are opaque strings and serialize transparently. The
//! correlation [`Identity`] is raw bytes copied from the inbound request and
//! forwarded unchanged; it is never parsed or validated here.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Catalog Identifiers
// ============================================================================

/// Source identifier taken from an inbound notification.
///
/// # Invariants
/// - Opaque UTF-8 string; no normalization or validation is applied by this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceId(String);

impl SourceId {
    /// Creates a new source identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for SourceId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SourceId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Catalog-assigned resource type identifier.
///
/// # Invariants
/// - Opaque UTF-8 string; compared by exact equality only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceTypeId(String);

impl ResourceTypeId {
    /// Creates a new resource type identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for ResourceTypeId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ResourceTypeId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Catalog identifier of a dependent resource (an application).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependentResourceId(String);

impl DependentResourceId {
    /// Creates a new dependent resource identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DependentResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for DependentResourceId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for DependentResourceId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

// ============================================================================
// SECTION: Correlation Identity
// ============================================================================

/// Opaque correlation identity forwarded from request to outbound message.
///
/// # Invariants
/// - Bytes are copied verbatim; no decoding or trimming is applied.
/// - `Debug` output reports the length only.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Identity(Vec<u8>);

impl Identity {
    /// Creates an identity from raw header bytes.
    #[must_use]
    pub const fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Returns the empty identity.
    #[must_use]
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    /// Returns the raw identity bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns true when no identity was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity({} bytes)", self.0.len())
    }
}

impl From<&str> for Identity {
    fn from(value: &str) -> Self {
        Self(value.as_bytes().to_vec())
    }
}

impl From<&[u8]> for Identity {
    fn from(value: &[u8]) -> Self {
        Self(value.to_vec())
    }
}

// ============================================================================
// SECTION: Resource Kinds
// ============================================================================

/// Dependent resource kinds the relay reports availability for.
///
/// # Invariants
/// - Variants are stable for routing and logging labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Cost management application type.
    Cost,
    /// Cloud meter (subscription watch) application type.
    Metering,
}

impl ResourceKind {
    /// Every kind, in bootstrap scan order.
    pub const ALL: [Self; 2] = [Self::Cost, Self::Metering];

    /// Returns a stable label for the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cost => "cost",
            Self::Metering => "metering",
        }
    }

    /// Returns the catalog type-name suffix identifying this kind.
    #[must_use]
    pub const fn catalog_suffix(self) -> &'static str {
        match self {
            Self::Cost => "cost-management",
            Self::Metering => "cloud-meter",
        }
    }

    /// Returns true when a catalog type name belongs to this kind.
    #[must_use]
    pub fn matches_type_name(self, name: &str) -> bool {
        name.ends_with(self.catalog_suffix())
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
