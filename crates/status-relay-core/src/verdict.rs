// crates/status-relay-core/src/verdict.rs
// ============================================================================
// Module: Status Verdict
// Description: Availability verdict model and its canonical JSON encoding.
// Purpose: Carry a synthesized availability judgment to the publisher.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! A [`StatusVerdict`] is built fresh for every notification and encoded as a
//! JSON object with fields in the order `resource_type`, `resource_id`,
//! `status`, `error`. The `error` field is omitted entirely when absent.
//! Invariants:
//! - Available verdicts never carry error text.
//! - Unavailable verdicts always carry error text.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::identifiers::DependentResourceId;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Resource type label reported for every verdict.
pub const APPLICATION_RESOURCE_TYPE: &str = "application";

/// Error text attached to unavailable verdicts.
pub const UNAVAILABLE_ERROR: &str = "I have spoken.";

// ============================================================================
// SECTION: Availability Status
// ============================================================================

/// Availability outcome of a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityStatus {
    /// Resource reported as available.
    Available,
    /// Resource reported as unavailable.
    Unavailable,
}

impl AvailabilityStatus {
    /// Returns the wire label for the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Unavailable => "unavailable",
        }
    }
}

impl fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a status label is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown availability status: {0} (expected available or unavailable)")]
pub struct ParseStatusError(String);

impl FromStr for AvailabilityStatus {
    type Err = ParseStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "available" => Ok(Self::Available),
            "unavailable" => Ok(Self::Unavailable),
            _ => Err(ParseStatusError(value.to_string())),
        }
    }
}

// ============================================================================
// SECTION: Verdict
// ============================================================================

/// Synthesized availability verdict for one dependent resource.
///
/// # Invariants
/// - `error` is `Some` if and only if `status` is [`AvailabilityStatus::Unavailable`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusVerdict {
    /// Resource type label.
    resource_type: String,
    /// Identifier of the dependent resource.
    resource_id: DependentResourceId,
    /// Availability outcome.
    status: AvailabilityStatus,
    /// Error text, present only for unavailable verdicts.
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl StatusVerdict {
    /// Builds an available verdict.
    #[must_use]
    pub fn available(resource_type: impl Into<String>, resource_id: DependentResourceId) -> Self {
        Self {
            resource_type: resource_type.into(),
            resource_id,
            status: AvailabilityStatus::Available,
            error: None,
        }
    }

    /// Builds an unavailable verdict carrying [`UNAVAILABLE_ERROR`].
    #[must_use]
    pub fn unavailable(resource_type: impl Into<String>, resource_id: DependentResourceId) -> Self {
        Self {
            resource_type: resource_type.into(),
            resource_id,
            status: AvailabilityStatus::Unavailable,
            error: Some(UNAVAILABLE_ERROR.to_string()),
        }
    }

    /// Builds a verdict for `status`, using the canned error text when unavailable.
    #[must_use]
    pub fn for_status(
        status: AvailabilityStatus,
        resource_type: impl Into<String>,
        resource_id: DependentResourceId,
    ) -> Self {
        match status {
            AvailabilityStatus::Available => Self::available(resource_type, resource_id),
            AvailabilityStatus::Unavailable => Self::unavailable(resource_type, resource_id),
        }
    }

    /// Returns the resource type label.
    #[must_use]
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    /// Returns the dependent resource identifier.
    #[must_use]
    pub const fn resource_id(&self) -> &DependentResourceId {
        &self.resource_id
    }

    /// Returns the availability outcome.
    #[must_use]
    pub const fn status(&self) -> AvailabilityStatus {
        self.status
    }

    /// Returns the error text for unavailable verdicts.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Encodes the verdict as canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] when serialization fails.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}
