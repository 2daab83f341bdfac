//! # Minefield Validation Server
//!
//! Authoritative game-state validator for a deterministic minesweeper variant
//! whose scores feed an external rewards ledger. Given a seed and the claimed
//! move history, the server reproduces the board the client saw, replays every
//! move, decides the terminal state, computes a bounded score and gates score
//! increases behind anti-automation heuristics.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   MINEFIELD SERVER                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                 │
//! │  ├── rng.rs      - Seed mixing + Mulberry32 PRNG            │
//! │  └── hash.rs     - SHA-256 commitment hashing               │
//! │                                                             │
//! │  game/           - Pure game logic (deterministic)          │
//! │  ├── board.rs    - Params, mine layout, number field        │
//! │  ├── sim.rs      - Full-history move replay                 │
//! │  ├── score.rs    - Bounded scoring function                 │
//! │  └── guard.rs    - Anti-automation acceptance policy        │
//! │                                                             │
//! │  session/        - Mutable session layer                    │
//! │  ├── store.rs    - Per-board session records                │
//! │  ├── protocol.rs - Response DTOs and rejection codes        │
//! │  └── service.rs  - create / progress / finish operations    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! `core/` and `game/` are **100% deterministic**: all randomness flows from
//! the session seed through a bit-exact reimplementation of the client's
//! xmur3 + Mulberry32 pipeline, so the server re-derives the exact board the
//! browser rendered. Boards are never persisted, only re-derived; every
//! validation call replays the entire move history from scratch.
//!
//! The transport layer (HTTP routing, wallet auth, on-chain submission) is an
//! external collaborator. It calls [`BoardValidator`] and consumes the
//! returned score deltas; nothing in this crate performs I/O beyond the
//! in-memory session store.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;
pub mod session;

// Re-export commonly used types
pub use crate::core::rng::{mix_seed, SeededRng};
pub use crate::game::board::{compute_numbers, generate_layout, Difficulty, Params};
pub use crate::game::guard::{GuardPolicy, GuardViolation};
pub use crate::game::score::{compute_score, MAX_SCORE};
pub use crate::game::sim::{simulate, Move, MoveAction, SimOutcome, SimState};
pub use crate::session::service::{BoardValidator, ValidateError, ValidatorConfig};
pub use crate::session::store::{BoardSession, MemoryStore, SessionStore};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Hard cap on the number of moves accepted in a single validation request.
pub const MAX_MOVES_PER_REQUEST: usize = 10_000;
