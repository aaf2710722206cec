// issuance/src/phase.rs

use ledger_core::Timestamp;
use serde::{Deserialize, Serialize};

/// Mint phases
///
/// The phase is never stored; it is derived on every call from the
/// activation flag, the activation timestamp, and the caller's clock, so
/// the whitelist-to-public transition needs no administrator action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MintPhase {
    /// Minting switched off
    Inactive,
    /// Allowlist window following activation
    Whitelist,
    /// Open sale once the window has elapsed
    Public,
}

/// Activation flag plus the timestamp of the last off-to-on toggle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationState {
    active: bool,
    activated_at: Option<Timestamp>,
}

impl ActivationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn activated_at(&self) -> Option<Timestamp> {
        self.activated_at
    }

    /// Flip the flag; records the timestamp on the off-to-on transition.
    /// Returns the new state.
    pub fn toggle(&mut self, now: Timestamp) -> bool {
        self.active = !self.active;
        if self.active {
            self.activated_at = Some(now);
            let instant = chrono::DateTime::from_timestamp(now as i64, 0)
                .map(|dt| dt.to_rfc3339())
                .unwrap_or_else(|| now.to_string());
            tracing::info!(activated_at = %instant, "minting activated");
        }
        self.active
    }

    /// Force the flag off (supply exhaustion)
    pub fn halt(&mut self) {
        self.active = false;
    }

    /// Derive the phase at `now` given the whitelist window length
    pub fn phase_at(&self, now: Timestamp, phase_duration_secs: u64) -> MintPhase {
        if !self.active {
            return MintPhase::Inactive;
        }
        // toggle() always records a timestamp when activating
        match self.activated_at {
            Some(at) if now.saturating_sub(at) < phase_duration_secs => MintPhase::Whitelist,
            Some(_) => MintPhase::Public,
            None => MintPhase::Whitelist,
        }
    }
}
