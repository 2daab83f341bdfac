//! Move Simulator / Validator
//!
//! Replays a full move history against the board derived from
//! (params, seed). Every call rebuilds the layout and number field fresh
//! and replays from move zero; nothing is carried over between calls.
//! Full-history replay is a deliberate statelessness and auditability
//! choice, not an optimization target.

use serde::{Deserialize, Serialize};

use crate::game::board::{compute_numbers, generate_layout, neighbors, Params};

/// Player action on a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveAction {
    /// Open a cell.
    Reveal,
    /// Place a flag.
    Flag,
    /// Remove a flag.
    Unflag,
}

/// A single timestamped move. Order within the history is semantically
/// significant.
///
/// The wire field names stay compact (`r`, `c`, `a`, `t`) for
/// compatibility with the browser client's move recorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    /// Cell row.
    #[serde(rename = "r")]
    pub row: u32,
    /// Cell column.
    #[serde(rename = "c")]
    pub col: u32,
    /// Action taken.
    #[serde(rename = "a")]
    pub action: MoveAction,
    /// Client timestamp in milliseconds.
    #[serde(rename = "t")]
    pub timestamp: u64,
}

impl Move {
    /// Convenience constructor with a zero timestamp.
    pub fn new(row: u32, col: u32, action: MoveAction) -> Self {
        Self { row, col, action, timestamp: 0 }
    }
}

/// Replay state machine outcome. `Ongoing` is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SimState {
    /// Move list exhausted without a terminal event.
    Ongoing,
    /// All safe cells revealed.
    Win,
    /// A mine was revealed.
    Lose,
    /// The move sequence is illegal.
    Invalid,
}

/// Result of replaying a move history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimOutcome {
    /// False only for [`SimState::Invalid`]; losing is a valid game.
    pub valid: bool,
    /// Terminal (or ongoing) state after the replay.
    pub state: SimState,
    /// Cells revealed when the replay stopped. For a loss this is the
    /// count *before* the fatal move.
    pub revealed_count: u32,
}

impl SimOutcome {
    fn invalid() -> Self {
        Self { valid: false, state: SimState::Invalid, revealed_count: 0 }
    }
}

/// Replay `moves` in order against the board derived from (params, seed).
///
/// Processing per move:
/// - out-of-bounds coordinates invalidate the whole sequence;
/// - `flag` on a revealed cell is illegal, otherwise idempotent;
/// - `unflag` of an absent flag is a no-op;
/// - `reveal` of a flagged cell is illegal; revealing a mine loses
///   immediately (remaining moves are not processed); otherwise the cell
///   flood-opens and the game is won once every safe cell is revealed.
///
/// An empty move list yields `Ongoing` with zero cells revealed.
pub fn simulate(params: &Params, seed: &str, moves: &[Move]) -> SimOutcome {
    let layout = generate_layout(params, seed);
    let numbers = compute_numbers(&layout, params);
    let total_safe = params.safe_cells();

    let mut revealed = vec![false; params.total_cells()];
    let mut flagged = vec![false; params.total_cells()];
    let mut revealed_count: u32 = 0;

    for mv in moves {
        if !params.in_bounds(mv.row, mv.col) {
            return SimOutcome::invalid();
        }
        let i = params.index(mv.row, mv.col);
        match mv.action {
            MoveAction::Flag => {
                if revealed[i] {
                    return SimOutcome::invalid();
                }
                flagged[i] = true;
            }
            MoveAction::Unflag => {
                flagged[i] = false;
            }
            MoveAction::Reveal => {
                if flagged[i] {
                    return SimOutcome::invalid();
                }
                if layout[i] {
                    // Mine hit: report the count accumulated so far.
                    return SimOutcome {
                        valid: true,
                        state: SimState::Lose,
                        revealed_count,
                    };
                }
                flood_open(params, &layout, &numbers, &mut revealed, &mut revealed_count, mv);
                if revealed_count >= total_safe {
                    return SimOutcome {
                        valid: true,
                        state: SimState::Win,
                        revealed_count,
                    };
                }
            }
        }
    }

    SimOutcome { valid: true, state: SimState::Ongoing, revealed_count }
}

/// Iterative flood-open from a safe origin cell.
///
/// Explicit worklist rather than recursion so stack depth stays bounded on
/// large open areas. Expansion continues through a cell's neighbors only
/// when that cell's adjacency count is zero, and never into a mine.
fn flood_open(
    params: &Params,
    layout: &[bool],
    numbers: &[i8],
    revealed: &mut [bool],
    revealed_count: &mut u32,
    origin: &Move,
) {
    let mut stack: Vec<(u32, u32)> = vec![(origin.row, origin.col)];
    while let Some((row, col)) = stack.pop() {
        let i = params.index(row, col);
        if revealed[i] {
            continue;
        }
        revealed[i] = true;
        *revealed_count += 1;

        if numbers[i] == 0 {
            for (nr, nc) in neighbors(params, row, col) {
                let ni = params.index(nr, nc);
                if !revealed[ni] && !layout[ni] {
                    stack.push((nr, nc));
                }
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
