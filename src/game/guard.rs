//! Anti-cheat Guard
//!
//! Heuristic acceptance test applied to a scoring increment. This is a
//! best-effort anti-automation gate, not a cryptographic guarantee: the
//! thresholds are tunable policy, chosen to reject obviously scripted
//! play, and rejections are expected, frequent and player-triggerable.

use thiserror::Error;

use crate::game::score::MAX_SCORE;

/// Tunable guard thresholds.
///
/// The defaults mirror the production policy: no sub-500ms completions,
/// no more than 20 clicks per second, no single-step delta beyond the
/// scorer's theoretical ceiling.
#[derive(Debug, Clone)]
pub struct GuardPolicy {
    /// Minimum claimed game duration in milliseconds.
    pub min_duration_ms: u64,
    /// Maximum accepted input rate.
    pub max_clicks_per_sec: f64,
    /// Maximum accepted single-step score delta.
    pub max_score_delta: u32,
}

impl Default for GuardPolicy {
    fn default() -> Self {
        Self {
            min_duration_ms: 500,
            max_clicks_per_sec: 20.0,
            max_score_delta: MAX_SCORE,
        }
    }
}

/// A failed guard rule.
#[derive(Debug, Clone, Error)]
pub enum GuardViolation {
    /// Claimed duration below the minimum.
    #[error("duration {duration_ms}ms below minimum")]
    TooFast {
        /// Claimed duration in milliseconds.
        duration_ms: u64,
    },

    /// Input rate above the bot threshold.
    #[error("input rate {cps:.1} clicks/sec above limit")]
    InputRate {
        /// Observed clicks per second.
        cps: f64,
    },

    /// Score delta beyond the single-step ceiling.
    #[error("score delta {delta} out of range")]
    DeltaOutOfRange {
        /// Rejected delta.
        delta: u32,
    },
}

impl GuardPolicy {
    /// Check a scoring increment against every rule; all must hold.
    ///
    /// Clicks-per-second is `move_count / max(1, duration_ms / 1000)`, so
    /// sub-second games are rated as if they lasted one second.
    pub fn check(
        &self,
        duration_ms: u64,
        move_count: usize,
        score_delta: u32,
    ) -> Result<(), GuardViolation> {
        if duration_ms < self.min_duration_ms {
            return Err(GuardViolation::TooFast { duration_ms });
        }

        let cps = move_count as f64 / (duration_ms as f64 / 1000.0).max(1.0);
        if cps > self.max_clicks_per_sec {
            return Err(GuardViolation::InputRate { cps });
        }

        if score_delta > self.max_score_delta {
            return Err(GuardViolation::DeltaOutOfRange { delta: score_delta });
        }

        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
