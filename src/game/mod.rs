//! Game Logic Module
//!
//! All board and replay code. 100% deterministic, pure functions over
//! explicit inputs; the only mutable state in the crate lives in `session`.
//!
//! ## Module Structure
//!
//! - `board`: difficulty presets, mine layout generation, number field
//! - `sim`: full-history move replay and validation
//! - `score`: bounded scoring function
//! - `guard`: heuristic anti-automation acceptance policy

pub mod board;
pub mod guard;
pub mod score;
pub mod sim;

// Re-export key types
pub use board::{compute_numbers, generate_layout, Difficulty, Params};
pub use guard::{GuardPolicy, GuardViolation};
pub use score::{compute_score, MAX_SCORE};
pub use sim::{simulate, Move, MoveAction, SimOutcome, SimState};
