// crates/status-relay-core/src/synthesizer.rs
// ============================================================================
// Module: Status Synthesizer
// Description: Fabricates availability verdicts for resolved resources.
// Purpose: Simulate flaky downstream availability or pin a fixed outcome.
// Dependencies: rand
// ============================================================================

//! ## Overview
//! The synthesizer either flips a fair coin per verdict or always returns a
//! configured outcome. Randomness is not security relevant; any uniform
//! boolean source is acceptable, so tests can inject a seeded generator via
//! [`StatusSynthesizer::synthesize_with`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use rand::Rng;

use crate::identifiers::DependentResourceId;
use crate::verdict::AvailabilityStatus;
use crate::verdict::StatusVerdict;

// ============================================================================
// SECTION: Synthesis Mode
// ============================================================================

/// Strategy used to pick a verdict outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SynthesisMode {
    /// Uniformly random between available and unavailable.
    #[default]
    Random,
    /// Always the given outcome.
    Fixed(AvailabilityStatus),
}

impl SynthesisMode {
    /// Builds a mode from an optional forced outcome.
    #[must_use]
    pub const fn from_forced(forced: Option<AvailabilityStatus>) -> Self {
        match forced {
            Some(status) => Self::Fixed(status),
            None => Self::Random,
        }
    }
}

// ============================================================================
// SECTION: Synthesizer
// ============================================================================

/// Produces status verdicts according to a [`SynthesisMode`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusSynthesizer {
    /// Outcome selection strategy.
    mode: SynthesisMode,
}

impl StatusSynthesizer {
    /// Creates a synthesizer with the given mode.
    #[must_use]
    pub const fn new(mode: SynthesisMode) -> Self {
        Self {
            mode,
        }
    }

    /// Returns the configured mode.
    #[must_use]
    pub const fn mode(&self) -> SynthesisMode {
        self.mode
    }

    /// Synthesizes a verdict using the thread-local generator.
    #[must_use]
    pub fn synthesize(&self, resource_type: &str, resource_id: DependentResourceId) -> StatusVerdict {
        self.synthesize_with(&mut rand::thread_rng(), resource_type, resource_id)
    }

    /// Synthesizes a verdict drawing randomness from `rng`.
    #[must_use]
    pub fn synthesize_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        resource_type: &str,
        resource_id: DependentResourceId,
    ) -> StatusVerdict {
        let status = match self.mode {
            SynthesisMode::Fixed(status) => status,
            SynthesisMode::Random => {
                if rng.gen_bool(0.5) {
                    AvailabilityStatus::Available
                } else {
                    AvailabilityStatus::Unavailable
                }
            }
        };
        StatusVerdict::for_status(status, resource_type, resource_id)
    }
}
