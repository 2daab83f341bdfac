//! Board Parameters and Layout Generation
//!
//! Deterministic mine placement from (params, seed) plus the derived
//! adjacency number field. Layouts are never persisted; every validation
//! call re-derives them from the compact seed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::hash::{to_hex_prefixed, CommitmentHasher};
use crate::core::rng::SeededRng;

/// Domain separator for board commitments.
const BOARD_COMMIT_DOMAIN: &[u8] = b"MINEFIELD_BOARD_V1";

/// Number field sentinel for mine cells.
pub const MINE_SENTINEL: i8 = -1;

/// Fixed difficulty presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// 9x9 board, 10 mines.
    Easy,
    /// 16x16 board, 40 mines.
    Medium,
    /// 30x16 board, 99 mines.
    Hard,
}

impl Difficulty {
    /// Board parameters for this preset.
    pub fn params(self) -> Params {
        match self {
            Difficulty::Easy => Params { width: 9, height: 9, mine_count: 10 },
            Difficulty::Medium => Params { width: 16, height: 16, mine_count: 40 },
            Difficulty::Hard => Params { width: 30, height: 16, mine_count: 99 },
        }
    }
}

/// Board dimensions and mine count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    /// Columns.
    #[serde(rename = "w")]
    pub width: u32,
    /// Rows.
    #[serde(rename = "h")]
    pub height: u32,
    /// Number of mines. Must satisfy `0 < mine_count < width * height`.
    #[serde(rename = "mines")]
    pub mine_count: u32,
}

impl Params {
    /// Total cell count.
    pub fn total_cells(&self) -> usize {
        (self.width * self.height) as usize
    }

    /// Number of non-mine cells; revealing all of them wins the game.
    pub fn safe_cells(&self) -> u32 {
        self.width * self.height - self.mine_count
    }

    /// Row-major cell index.
    #[inline]
    pub fn index(&self, row: u32, col: u32) -> usize {
        (row * self.width + col) as usize
    }

    /// Whether (row, col) lies on the board.
    #[inline]
    pub fn in_bounds(&self, row: u32, col: u32) -> bool {
        row < self.height && col < self.width
    }

    /// Validate the mine-count invariant.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.width == 0 || self.height == 0 {
            return Err(ParamsError::EmptyBoard);
        }
        if self.mine_count == 0 || self.mine_count >= self.width * self.height {
            return Err(ParamsError::BadMineCount {
                mine_count: self.mine_count,
                cells: self.width * self.height,
            });
        }
        Ok(())
    }
}

/// Invalid board parameters.
#[derive(Debug, Clone, Error)]
pub enum ParamsError {
    /// Zero-area board.
    #[error("board has no cells")]
    EmptyBoard,

    /// Mine count outside (0, width * height).
    #[error("mine count {mine_count} not in (0, {cells})")]
    BadMineCount {
        /// Requested mine count.
        mine_count: u32,
        /// Total cells on the board.
        cells: u32,
    },
}

/// Generate the deterministic mine layout for (params, seed).
///
/// Partial Fisher-Yates shuffle over the index array for exactly
/// `mine_count` steps; the first `mine_count` shuffled indices become
/// mines. The `i + floor(unit * (total - i))` partner choice matches the
/// client's generator draw for draw, which is what makes server-side
/// replay possible without storing the grid.
pub fn generate_layout(params: &Params, seed: &str) -> Vec<bool> {
    let total = params.total_cells();
    let mut layout = vec![false; total];
    let mut rng = SeededRng::from_seed_str(seed);

    let mut indices: Vec<usize> = (0..total).collect();
    for i in 0..params.mine_count as usize {
        let j = i + rng.next_index(total - i);
        indices.swap(i, j);
        layout[indices[i]] = true;
    }
    layout
}

/// Derive the per-cell adjacency field from a layout.
///
/// Mine cells hold [`MINE_SENTINEL`]; safe cells hold the count of mines
/// among their up-to-8 Moore neighbors. Boundary cells simply have fewer
/// neighbors; there is no wraparound.
pub fn compute_numbers(layout: &[bool], params: &Params) -> Vec<i8> {
    let mut numbers = vec![0i8; params.total_cells()];
    for row in 0..params.height {
        for col in 0..params.width {
            let i = params.index(row, col);
            if layout[i] {
                numbers[i] = MINE_SENTINEL;
                continue;
            }
            let mut count = 0i8;
            for (nr, nc) in neighbors(params, row, col) {
                if layout[params.index(nr, nc)] {
                    count += 1;
                }
            }
            numbers[i] = count;
        }
    }
    numbers
}

/// Iterate the in-bounds Moore neighbors of (row, col).
pub(crate) fn neighbors(
    params: &Params,
    row: u32,
    col: u32,
) -> impl Iterator<Item = (u32, u32)> + '_ {
    (-1i64..=1).flat_map(move |dr| (-1i64..=1).map(move |dc| (dr, dc))).filter_map(
        move |(dr, dc)| {
            if dr == 0 && dc == 0 {
                return None;
            }
            let nr = i64::from(row) + dr;
            let nc = i64::from(col) + dc;
            if nr < 0 || nc < 0 {
                return None;
            }
            let (nr, nc) = (nr as u32, nc as u32);
            params.in_bounds(nr, nc).then_some((nr, nc))
        },
    )
}

/// Compute the fairness commitment over (params, seed, layout).
///
/// Disclosed at session creation so the revealed seed can later be checked
/// against the disclosed mine layout without revealing mine positions in
/// advance.
pub fn commitment_hash(params: &Params, seed: &str, layout: &[bool]) -> String {
    let mut hasher = CommitmentHasher::new(BOARD_COMMIT_DOMAIN);
    hasher.update_u32(params.width);
    hasher.update_u32(params.height);
    hasher.update_u32(params.mine_count);
    hasher.update_str(seed);
    for &cell in layout {
        hasher.update_bool(cell);
    }
    to_hex_prefixed(&hasher.finalize())
}

/// Check a disclosed (params, seed, layout) triple against a commitment.
pub fn verify_commitment(params: &Params, seed: &str, layout: &[bool], claimed: &str) -> bool {
    commitment_hash(params, seed, layout) == claimed
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_presets() {
        assert_eq!(
            Difficulty::Easy.params(),
            Params { width: 9, height: 9, mine_count: 10 }
        );
        assert_eq!(
            Difficulty::Medium.params(),
            Params { width: 16, height: 16, mine_count: 40 }
        );
        assert_eq!(
            Difficulty::Hard.params(),
            Params { width: 30, height: 16, mine_count: 99 }
        );
        for d in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            d.params().validate().unwrap();
        }
    }

    #[test]
    fn test_params_validation() {
        assert!(Params { width: 0, height: 9, mine_count: 1 }.validate().is_err());
        assert!(Params { width: 9, height: 9, mine_count: 0 }.validate().is_err());
        assert!(Params { width: 9, height: 9, mine_count: 81 }.validate().is_err());
        assert!(Params { width: 9, height: 9, mine_count: 80 }.validate().is_ok());
    }

    #[test]
    fn test_layout_known_vector() {
        // Mine positions for ("S1", easy) from the reference implementation.
        // These must never change: live replays depend on them.
        let params = Difficulty::Easy.params();
        let layout = generate_layout(&params, "S1");
        let mines: Vec<usize> =
            layout.iter().enumerate().filter(|(_, &m)| m).map(|(i, _)| i).collect();
        assert_eq!(mines, vec![20, 28, 34, 50, 52, 54, 57, 61, 68, 69]);
    }

    #[test]
    fn test_layout_determinism() {
        let params = Difficulty::Medium.params();
        assert_eq!(generate_layout(&params, "abc"), generate_layout(&params, "abc"));
    }

    #[test]
    fn test_layout_seed_independence() {
        let params = Difficulty::Easy.params();
        assert_ne!(generate_layout(&params, "S1"), generate_layout(&params, "S2"));
    }

    #[test]
    fn test_numbers_known_board() {
        let params = Difficulty::Easy.params();
        let layout = generate_layout(&params, "S1");
        let numbers = compute_numbers(&layout, &params);

        // Top-left corner of the S1 board is an open area.
        assert_eq!(numbers[params.index(0, 0)], 0);
        assert_eq!(numbers[params.index(1, 1)], 1);
        assert_eq!(numbers[params.index(2, 2)], MINE_SENTINEL);
        // (6,6) touches five mines.
        assert_eq!(numbers[params.index(6, 6)], 5);
    }

    #[test]
    fn test_commitment_roundtrip() {
        let params = Difficulty::Easy.params();
        let layout = generate_layout(&params, "S1");
        let hash = commitment_hash(&params, "S1", &layout);

        assert!(hash.starts_with("0x"));
        assert!(verify_commitment(&params, "S1", &layout, &hash));
        assert!(!verify_commitment(&params, "S2", &layout, &hash));

        let other = generate_layout(&params, "S2");
        assert_ne!(hash, commitment_hash(&params, "S2", &other));
    }

    proptest! {
        #[test]
        fn prop_layout_mine_count(seed in "[a-zA-Z0-9-]{1,36}", preset in 0usize..3) {
            let params = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard][preset].params();
            let layout = generate_layout(&params, &seed);
            prop_assert_eq!(layout.len(), params.total_cells());
            let mines = layout.iter().filter(|&&m| m).count();
            prop_assert_eq!(mines, params.mine_count as usize);
        }

        #[test]
        fn prop_number_field_bounds(seed in "[a-zA-Z0-9-]{1,36}") {
            let params = Difficulty::Easy.params();
            let layout = generate_layout(&params, &seed);
            let numbers = compute_numbers(&layout, &params);
            for (i, &n) in numbers.iter().enumerate() {
                if layout[i] {
                    prop_assert_eq!(n, MINE_SENTINEL);
                } else {
                    prop_assert!((0..=8).contains(&n));
                }
            }
        }
    }
}
