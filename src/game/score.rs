//! Scorer
//!
//! Pure mapping from replay results and claimed timing to a bounded
//! integer score. Callers derive a session delta against the stored
//! baseline with a saturating subtraction, which is what keeps payouts
//! monotonic and never negative.

use crate::game::board::Params;

/// Theoretical score ceiling for a single game.
pub const MAX_SCORE: u32 = 800;

/// Completing faster than this many milliseconds earns a speed bonus.
const SPEED_WINDOW_MS: u64 = 300_000;

/// Accuracy bonus ceiling.
const ACCURACY_CAP: i64 = 50;

/// Compute the score for a replayed game.
///
/// - `base = width * height - mine_count`; a loss keeps `floor(base * 0.2)`.
/// - Speed bonus: `floor(max(0, 300000 - duration_ms) / 1000)`.
/// - Accuracy bonus: `floor(safe_opens / total_clicks * 50)`, zero when
///   there were no clicks. `safe_opens <= total_clicks` holds in legal
///   play, but the ratio is clamped anyway rather than trusted.
/// - Win bonus: `100 + mine_count`.
///
/// The result is always within `[0, MAX_SCORE]`.
pub fn compute_score(
    params: &Params,
    duration_ms: u64,
    total_clicks: u32,
    safe_opens: u32,
    is_win: bool,
) -> u32 {
    let base = i64::from(params.safe_cells());

    let elapsed = duration_ms.min(SPEED_WINDOW_MS);
    let speed_bonus = (SPEED_WINDOW_MS - elapsed) as i64 / 1000;

    let accuracy_bonus = if total_clicks > 0 {
        let ratio = f64::from(safe_opens) / f64::from(total_clicks);
        ((ratio * 50.0).floor() as i64).clamp(0, ACCURACY_CAP)
    } else {
        0
    };

    let win_bonus = if is_win { 100 + i64::from(params.mine_count) } else { 0 };

    // Loss base uses the same f64 flooring as the reference implementation.
    let opened = if is_win { base } else { (base as f64 * 0.2).floor() as i64 };

    let raw = opened + speed_bonus + accuracy_bonus + win_bonus;
    raw.clamp(0, i64::from(MAX_SCORE)) as u32
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::board::Difficulty;
    use proptest::prelude::*;

    #[test]
    fn test_easy_win_value() {
        // base 71 + speed 240 + accuracy 50 + win (100 + 10) = 471
        let params = Difficulty::Easy.params();
        let score = compute_score(&params, 60_000, 71, 71, true);
        assert_eq!(score, 471);
    }

    #[test]
    fn test_easy_loss_value() {
        // floor(71 * 0.2) = 14, speed 240, accuracy floor(30/40 * 50) = 37
        let params = Difficulty::Easy.params();
        let score = compute_score(&params, 60_000, 40, 30, false);
        assert_eq!(score, 14 + 240 + 37);
    }

    #[test]
    fn test_speed_bonus_saturates() {
        let params = Difficulty::Easy.params();
        let slow = compute_score(&params, 300_000, 10, 10, false);
        let slower = compute_score(&params, u64::MAX, 10, 10, false);
        assert_eq!(slow, slower);
    }

    #[test]
    fn test_zero_clicks_no_accuracy_bonus() {
        let params = Difficulty::Easy.params();
        let score = compute_score(&params, 300_000, 0, 0, false);
        assert_eq!(score, 14);
    }

    #[test]
    fn test_accuracy_clamped_on_malformed_counts() {
        // safe_opens > total_clicks cannot happen in legal play; the bonus
        // must still cap at 50.
        let params = Difficulty::Easy.params();
        let honest = compute_score(&params, 300_000, 10, 10, false);
        let inflated = compute_score(&params, 300_000, 1, 10_000, false);
        assert_eq!(honest, inflated);
    }

    #[test]
    fn test_ceiling_clamp() {
        // Hard win at zero duration: 381 + 300 + 50 + 199 = 930 -> 800.
        let params = Difficulty::Hard.params();
        let score = compute_score(&params, 0, 381, 381, true);
        assert_eq!(score, MAX_SCORE);
    }

    proptest! {
        #[test]
        fn prop_score_in_bounds(
            duration_ms in any::<u64>(),
            total_clicks in 0u32..20_000,
            safe_opens in 0u32..20_000,
            is_win: bool,
            preset in 0usize..3,
        ) {
            let params = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard][preset].params();
            let score = compute_score(&params, duration_ms, total_clicks, safe_opens, is_win);
            prop_assert!(score <= MAX_SCORE);
        }

        #[test]
        fn prop_win_never_scores_below_loss(
            duration_ms in 0u64..400_000,
            total_clicks in 1u32..500,
            safe_opens in 0u32..500,
        ) {
            let params = Difficulty::Easy.params();
            let win = compute_score(&params, duration_ms, total_clicks, safe_opens, true);
            let loss = compute_score(&params, duration_ms, total_clicks, safe_opens, false);
            prop_assert!(win >= loss);
        }
    }
}
