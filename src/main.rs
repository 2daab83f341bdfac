//! Minefield Validation Server
//!
//! Demo driver for the authoritative validator: creates a session, replays
//! a scripted game through the progress and finish operations, and checks
//! the fairness commitment, exercising the same entry points the HTTP
//! layer calls.

use anyhow::Result;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use minefield::game::board::{generate_layout, verify_commitment};
use minefield::{
    BoardValidator, Difficulty, MemoryStore, Move, MoveAction, Params, SessionStore, VERSION,
};

const DEMO_PLAYER: &str = "0x00000000000000000000000000000000000000a1";

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Minefield Server v{}", VERSION);

    demo_game()?;
    Ok(())
}

/// Play one full game against the validator, the way a client would.
fn demo_game() -> Result<()> {
    info!("=== Starting Demo Game ===");

    let validator = BoardValidator::new(MemoryStore::new());
    let session = validator.create_session(DEMO_PLAYER, Difficulty::Easy)?;

    info!("Session: {}", session.session_id);
    info!("Seed: {}", session.seed);
    info!("Commitment: {}", session.commitment_hash);

    // Re-derive the board the way the browser client does and check the
    // disclosed commitment against it.
    let params = Params {
        width: session.width,
        height: session.height,
        mine_count: session.mine_count,
    };
    let layout = generate_layout(&params, &session.seed);
    if verify_commitment(&params, &session.seed, &layout, &session.commitment_hash) {
        info!("COMMITMENT VERIFIED: seed reproduces the committed board");
    } else {
        info!("COMMITMENT FAILURE: derived board does not match");
    }

    // Script a perfect game: reveal every safe cell in row-major order.
    let moves: Vec<Move> = (0..params.height)
        .flat_map(|r| (0..params.width).map(move |c| (r, c)))
        .filter(|&(r, c)| !layout[params.index(r, c)])
        .enumerate()
        .map(|(i, (r, c))| Move {
            row: r,
            col: c,
            action: MoveAction::Reveal,
            timestamp: (i as u64) * 800,
        })
        .collect();

    // Periodic auto-save halfway through the game.
    let halfway = moves.len() / 2;
    let progress =
        validator.validate_progress(&session.session_id, DEMO_PLAYER, &moves[..halfway], 30_000)?;
    info!("Progress: {}", serde_json::to_string(&progress)?);

    // Final submit with the full history.
    let finish =
        validator.validate_finish(&session.session_id, DEMO_PLAYER, &moves, 60_000)?;
    info!("Finish: {}", serde_json::to_string(&finish)?);

    info!(
        "Game over: win={} delta={} sessions_left={}",
        finish.is_win,
        finish.score_delta,
        validator.store().len()
    );

    Ok(())
}
