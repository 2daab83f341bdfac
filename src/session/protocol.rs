//! Validation Responses
//!
//! Serializable result types the transport layer forwards to clients, and
//! the rejection reason codes it maps onto HTTP statuses. The blockchain
//! submission collaborator consumes only `score_delta` and `is_win` from a
//! successful outcome.

use serde::{Deserialize, Serialize};

use crate::game::sim::SimState;

/// Response to a new-game request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSessionResponse {
    /// Opaque session id.
    pub session_id: String,
    /// Board seed, revealed so the client derives the same layout.
    pub seed: String,
    /// Board width.
    pub width: u32,
    /// Board height.
    pub height: u32,
    /// Mine count.
    pub mine_count: u32,
    /// Fairness commitment over (params, seed, layout).
    pub commitment_hash: String,
}

/// Accepted progress validation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProgressOutcome {
    /// Score increment earned by this call (zero when queued).
    pub delta: u32,
    /// Baseline after the call.
    pub new_baseline: u32,
    /// True when the increment was below the payout threshold and only
    /// the progress counters were recorded.
    pub queued: bool,
}

/// Accepted finish validation. The session record is gone afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinishOutcome {
    /// Whether the replay ended in a win.
    pub is_win: bool,
    /// Final score increment over the session baseline.
    pub score_delta: u32,
    /// Replay diagnostics for the caller's audit log.
    pub diagnostics: FinishDiagnostics,
}

/// Diagnostic detail attached to a finish outcome.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FinishDiagnostics {
    /// Terminal replay state.
    pub sim_state: SimState,
    /// Safe cells revealed by the replay.
    pub safe_opens: u32,
    /// Moves in the submitted history.
    pub total_clicks: u32,
    /// Claimed game duration.
    pub duration_ms: u64,
    /// Absolute final score before the baseline subtraction.
    pub final_score: u32,
    /// Baseline the delta was computed against.
    pub previous_baseline: u32,
}

/// Wire-level rejection reason codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonCode {
    /// Missing or malformed request fields.
    BadRequest,
    /// Unknown or expired session id.
    NotFound,
    /// Caller is not the session owner.
    PlayerMismatch,
    /// Illegal move sequence.
    InvalidMoves,
    /// Heuristic anti-cheat rejection.
    GuardTripped,
    /// Unexpected server-side failure.
    Internal,
}

/// A rejected validation call, ready for serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rejection {
    /// Machine-readable reason.
    pub reason: ReasonCode,
    /// Human-readable detail.
    pub message: String,
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_code_wire_format() {
        assert_eq!(
            serde_json::to_string(&ReasonCode::GuardTripped).unwrap(),
            r#""guard_tripped""#
        );
        assert_eq!(
            serde_json::to_string(&ReasonCode::PlayerMismatch).unwrap(),
            r#""player_mismatch""#
        );
    }

    #[test]
    fn test_finish_outcome_serializes_state() {
        let outcome = FinishOutcome {
            is_win: true,
            score_delta: 120,
            diagnostics: FinishDiagnostics {
                sim_state: SimState::Win,
                safe_opens: 71,
                total_clicks: 80,
                duration_ms: 60_000,
                final_score: 471,
                previous_baseline: 351,
            },
        };
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains(r#""sim_state":"WIN""#));
        assert!(json.contains(r#""score_delta":120"#));
    }
}
