//! Validation Service
//!
//! The operations the transport layer calls: session creation, periodic
//! progress validation and terminal finish validation. Each call is
//! independent, CPU-bound and synchronous; per-session serialization comes
//! from holding the store's per-entry lock across the whole
//! replay-score-guard-update sequence.
//!
//! The store is mutated only after field validation, simulation, scoring
//! and the guard have all passed; rejections leave the record untouched.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::game::board::{commitment_hash, generate_layout, Difficulty, ParamsError};
use crate::game::guard::{GuardPolicy, GuardViolation};
use crate::game::score::compute_score;
use crate::game::sim::{simulate, Move, SimState};
use crate::session::protocol::{
    CreateSessionResponse, FinishDiagnostics, FinishOutcome, ProgressOutcome, ReasonCode,
    Rejection,
};
use crate::session::store::{lock_session, BoardSession, SessionStore, SharedSession};
use crate::MAX_MOVES_PER_REQUEST;

/// Service configuration.
#[derive(Debug, Clone)]
pub struct ValidatorConfig {
    /// Anti-automation policy applied to score increments.
    pub guard: GuardPolicy,
    /// Progress increments below this are recorded but not paid out.
    pub min_progress_delta: u32,
    /// Hard cap on moves per validation request.
    pub max_moves_per_request: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            guard: GuardPolicy::default(),
            min_progress_delta: 5,
            max_moves_per_request: MAX_MOVES_PER_REQUEST,
        }
    }
}

/// Rejected validation call.
#[derive(Debug, Clone, Error)]
pub enum ValidateError {
    /// Player is not a `0x`-prefixed 40-hex-digit address.
    #[error("invalid player address")]
    InvalidAddress,

    /// Board parameters violate the mine-count invariant.
    #[error(transparent)]
    InvalidParams(#[from] ParamsError),

    /// Move list exceeds the per-request cap.
    #[error("move list has {count} moves, over the cap")]
    TooManyMoves {
        /// Submitted move count.
        count: usize,
    },

    /// Unknown or expired session id.
    #[error("board not found or expired")]
    NotFound,

    /// Caller does not own the session.
    #[error("player mismatch")]
    PlayerMismatch,

    /// The replay rejected the move sequence.
    #[error("invalid moves")]
    InvalidMoves {
        /// State the replay stopped in (always `Invalid` today).
        state: SimState,
    },

    /// The anti-cheat guard rejected the increment.
    #[error("guard tripped: {0}")]
    GuardTripped(#[from] GuardViolation),
}

impl ValidateError {
    /// Wire-level reason code for this rejection.
    pub fn reason(&self) -> ReasonCode {
        match self {
            Self::InvalidAddress | Self::InvalidParams(_) | Self::TooManyMoves { .. } => {
                ReasonCode::BadRequest
            }
            Self::NotFound => ReasonCode::NotFound,
            Self::PlayerMismatch => ReasonCode::PlayerMismatch,
            Self::InvalidMoves { .. } => ReasonCode::InvalidMoves,
            Self::GuardTripped(_) => ReasonCode::GuardTripped,
        }
    }

    /// Serializable rejection for the transport layer.
    pub fn to_rejection(&self) -> Rejection {
        Rejection { reason: self.reason(), message: self.to_string() }
    }
}

/// Whether `addr` is a `0x`-prefixed 40-hex-digit address.
fn is_hex_address(addr: &str) -> bool {
    addr.len() == 42
        && addr.starts_with("0x")
        && addr[2..].bytes().all(|b| b.is_ascii_hexdigit())
}

/// The authoritative validator. Pure game logic plus an injected session
/// store; the transport layer owns one of these per process.
pub struct BoardValidator<S> {
    store: S,
    config: ValidatorConfig,
}

impl<S: SessionStore> BoardValidator<S> {
    /// Create a validator with the default policy.
    pub fn new(store: S) -> Self {
        Self::with_config(store, ValidatorConfig::default())
    }

    /// Create a validator with an explicit policy.
    pub fn with_config(store: S, config: ValidatorConfig) -> Self {
        Self { store, config }
    }

    /// The injected session store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Start a new game for `player` on a difficulty preset.
    ///
    /// Generates a fresh seed and session id, derives the layout once to
    /// commit to it, and establishes the session record with a zero score
    /// baseline. The commitment is disclosed up front so the seed reveal
    /// can be audited after the fact.
    pub fn create_session(
        &self,
        player: &str,
        difficulty: Difficulty,
    ) -> Result<CreateSessionResponse, ValidateError> {
        if !is_hex_address(player) {
            return Err(ValidateError::InvalidAddress);
        }

        let params = difficulty.params();
        params.validate()?;

        let seed = Uuid::new_v4().to_string();
        let layout = generate_layout(&params, &seed);
        let commitment = commitment_hash(&params, &seed, &layout);
        let session_id = Uuid::new_v4().to_string();

        self.store.create(BoardSession {
            id: session_id.clone(),
            player: player.to_string(),
            params,
            seed: seed.clone(),
            commitment_hash: commitment.clone(),
            created_at: Utc::now(),
            score_prev: 0,
            last_safe_opens: 0,
            last_total_clicks: 0,
            last_duration_ms: 0,
        });

        info!(session_id = %session_id, player = %player, ?difficulty, "session created");

        Ok(CreateSessionResponse {
            session_id,
            seed,
            width: params.width,
            height: params.height,
            mine_count: params.mine_count,
            commitment_hash: commitment,
        })
    }

    /// Validate a mid-game progress snapshot and pay out the increment.
    ///
    /// The full move history is replayed from scratch and scored as an
    /// unfinished game. Increments below the payout threshold only record
    /// the progress counters and report `queued`. Never deletes the
    /// session.
    pub fn validate_progress(
        &self,
        session_id: &str,
        player: &str,
        moves: &[Move],
        duration_ms: u64,
    ) -> Result<ProgressOutcome, ValidateError> {
        self.check_move_cap(moves)?;

        let entry = self.store.get(session_id).ok_or(ValidateError::NotFound)?;
        let mut rec = lock_session(&entry);
        self.check_live(session_id, &entry)?;
        check_owner(&rec, player)?;

        let sim = simulate(&rec.params, &rec.seed, moves);
        if !sim.valid {
            debug!(session_id = %session_id, ?sim.state, "progress rejected: invalid moves");
            return Err(ValidateError::InvalidMoves { state: sim.state });
        }

        let safe_opens = sim.revealed_count;
        let total_clicks = moves.len() as u32;
        // Progress always scores as an unfinished game; the win bonus is
        // only ever paid by finish.
        let score_now = compute_score(&rec.params, duration_ms, total_clicks, safe_opens, false);
        let delta = score_now.saturating_sub(rec.score_prev);

        if delta < self.config.min_progress_delta {
            rec.last_safe_opens = safe_opens;
            rec.last_total_clicks = total_clicks;
            rec.last_duration_ms = duration_ms;
            return Ok(ProgressOutcome { delta: 0, new_baseline: rec.score_prev, queued: true });
        }

        self.config.guard.check(duration_ms, moves.len(), delta)?;

        rec.score_prev += delta;
        rec.last_safe_opens = safe_opens;
        rec.last_total_clicks = total_clicks;
        rec.last_duration_ms = duration_ms;

        debug!(
            session_id = %session_id,
            delta,
            baseline = rec.score_prev,
            safe_opens,
            "progress accepted"
        );

        Ok(ProgressOutcome { delta, new_baseline: rec.score_prev, queued: false })
    }

    /// Validate a finished game, pay out the final increment and delete
    /// the session.
    ///
    /// Terminal regardless of win or lose: once the submission is
    /// accepted the record is gone and further calls see `NotFound`.
    /// Rejections do not delete, so a client may correct and resubmit.
    pub fn validate_finish(
        &self,
        session_id: &str,
        player: &str,
        moves: &[Move],
        duration_ms: u64,
    ) -> Result<FinishOutcome, ValidateError> {
        if !is_hex_address(player) {
            return Err(ValidateError::InvalidAddress);
        }
        self.check_move_cap(moves)?;

        let entry = self.store.get(session_id).ok_or(ValidateError::NotFound)?;
        let mut rec = lock_session(&entry);
        self.check_live(session_id, &entry)?;
        check_owner(&rec, player)?;

        let sim = simulate(&rec.params, &rec.seed, moves);
        if !sim.valid {
            debug!(session_id = %session_id, ?sim.state, "finish rejected: invalid moves");
            return Err(ValidateError::InvalidMoves { state: sim.state });
        }

        let is_win = sim.state == SimState::Win;
        let safe_opens = sim.revealed_count;
        let total_clicks = moves.len() as u32;

        let final_score =
            compute_score(&rec.params, duration_ms, total_clicks, safe_opens, is_win);
        let previous_baseline = rec.score_prev;
        let delta = final_score.saturating_sub(previous_baseline);

        if delta > 0 {
            self.config.guard.check(duration_ms, moves.len(), delta)?;
        }

        rec.score_prev = previous_baseline + delta;
        self.store.delete(session_id);

        info!(
            session_id = %session_id,
            player = %player,
            is_win,
            delta,
            final_score,
            "session finished"
        );

        Ok(FinishOutcome {
            is_win,
            score_delta: delta,
            diagnostics: FinishDiagnostics {
                sim_state: sim.state,
                safe_opens,
                total_clicks,
                duration_ms,
                final_score,
                previous_baseline,
            },
        })
    }

    fn check_move_cap(&self, moves: &[Move]) -> Result<(), ValidateError> {
        if moves.len() > self.config.max_moves_per_request {
            return Err(ValidateError::TooManyMoves { count: moves.len() });
        }
        Ok(())
    }

    /// Confirm the locked entry is still the live one for this id. A
    /// finish racing on the same id may have deleted the session while we
    /// waited on the entry lock.
    fn check_live(&self, session_id: &str, entry: &SharedSession) -> Result<(), ValidateError> {
        match self.store.get(session_id) {
            Some(current) if Arc::ptr_eq(&current, entry) => Ok(()),
            _ => Err(ValidateError::NotFound),
        }
    }
}

fn check_owner(rec: &BoardSession, player: &str) -> Result<(), ValidateError> {
    if !rec.player.eq_ignore_ascii_case(player) {
        return Err(ValidateError::PlayerMismatch);
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
