//! Slot machine engine.
//!
//! A spin fills a 3x3 grid with independently randomized symbols per cell.
//! Paylines (three rows, then the two diagonals) are evaluated
//! independently; a line pays iff all three symbols along it match.

use crate::{GameError, GameRng};
use chiphouse_types::casino::{Outcome, OutcomeDetail, OutcomeKind, SlotsBet};
use tracing::debug;

/// Number of distinct reel symbols.
pub const SYMBOL_COUNT: u8 = 7;

/// The seven symbol, top of the paytable.
pub const SYMBOL_SEVEN: u8 = 6;

/// Payline patterns as (row, col) triples: top, middle, bottom, down
/// diagonal, up diagonal. A bet on `n` lines activates the first `n`.
pub const PAYLINES: [[(usize, usize); 3]; 5] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(2, 0), (1, 1), (0, 2)],
];

/// Paytable: per-symbol base payouts and per-line multipliers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotsPaytable {
    /// Base payout per symbol, indexed by symbol id.
    pub base_payouts: [u64; SYMBOL_COUNT as usize],
    /// Multiplier per payline, indexed like [`PAYLINES`].
    pub line_multipliers: [u64; 5],
}

impl Default for SlotsPaytable {
    fn default() -> Self {
        Self {
            // Cherries up through sevens.
            base_payouts: [2, 3, 4, 5, 8, 10, 20],
            // Rows pay straight, diagonals double.
            line_multipliers: [1, 1, 1, 2, 2],
        }
    }
}

/// Fill a grid with random symbols, row-major.
pub fn spin_grid(rng: &mut GameRng) -> [[u8; 3]; 3] {
    let mut grid = [[0u8; 3]; 3];
    for row in &mut grid {
        for cell in row.iter_mut() {
            *cell = rng.reel_symbol(SYMBOL_COUNT);
        }
    }
    grid
}

/// Settle a spun grid against a bet.
///
/// Each active line that matches pays `base_payout[symbol] * line_multiplier
/// * bet_per_line`; the total is the sum over winning lines. A grid with no
/// matched active line pays exactly zero.
pub fn resolve_grid(
    bet: SlotsBet,
    grid: [[u8; 3]; 3],
    paytable: &SlotsPaytable,
) -> Result<Outcome, GameError> {
    bet.validate()?;

    let mut payout: u64 = 0;
    let mut winning_lines = Vec::new();
    for (line_idx, line) in PAYLINES.iter().enumerate().take(usize::from(bet.lines)) {
        let [a, b, c] = line.map(|(row, col)| grid[row][col]);
        if a == b && b == c {
            payout += paytable.base_payouts[usize::from(a)]
                * paytable.line_multipliers[line_idx]
                * bet.bet_per_line;
            winning_lines.push(line_idx as u8);
        }
    }

    debug!(lines = bet.lines, payout, ?winning_lines, "slots resolved");
    Ok(Outcome {
        kind: if payout > 0 {
            OutcomeKind::Win
        } else {
            OutcomeKind::Loss
        },
        payout,
        detail: OutcomeDetail::Slots {
            grid,
            winning_lines,
        },
    })
}

/// Spin and settle in one step.
pub fn play(
    bet: SlotsBet,
    paytable: &SlotsPaytable,
    rng: &mut GameRng,
) -> Result<Outcome, GameError> {
    let grid = spin_grid(rng);
    resolve_grid(bet, grid, paytable)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bet(lines: u8, per_line: u64) -> SlotsBet {
        SlotsBet::new(lines, per_line).unwrap()
    }

    #[test]
    fn test_center_row_of_sevens() {
        let grid = [[0, 1, 2], [SYMBOL_SEVEN; 3], [3, 4, 5]];
        let paytable = SlotsPaytable::default();
        let outcome = resolve_grid(bet(5, 10), grid, &paytable).unwrap();
        assert_eq!(outcome.kind, OutcomeKind::Win);
        // seven base 20 x middle-row multiplier 1 x 10 per line
        assert_eq!(outcome.payout, 200);
        match outcome.detail {
            OutcomeDetail::Slots { winning_lines, .. } => assert_eq!(winning_lines, vec![1]),
            other => panic!("unexpected detail {other:?}"),
        }
    }

    #[test]
    fn test_no_match_pays_zero() {
        let grid = [[0, 1, 2], [3, 4, 5], [6, 0, 1]];
        let paytable = SlotsPaytable::default();
        let outcome = resolve_grid(bet(5, 10), grid, &paytable).unwrap();
        assert_eq!(outcome.kind, OutcomeKind::Loss);
        assert_eq!(outcome.payout, 0);
    }

    #[test]
    fn test_diagonal_doubles() {
        let grid = [[2, 1, 0], [3, 2, 5], [6, 0, 2]];
        let paytable = SlotsPaytable::default();
        let outcome = resolve_grid(bet(5, 10), grid, &paytable).unwrap();
        // symbol 2 base 4 x diagonal multiplier 2 x 10
        assert_eq!(outcome.payout, 80);
    }

    #[test]
    fn test_inactive_lines_do_not_pay() {
        // Only the down diagonal matches, but just the three rows are active.
        let grid = [[2, 1, 0], [3, 2, 5], [6, 0, 2]];
        let paytable = SlotsPaytable::default();
        let outcome = resolve_grid(bet(3, 10), grid, &paytable).unwrap();
        assert_eq!(outcome.payout, 0);
    }

    #[test]
    fn test_multiple_lines_sum() {
        // Top row of zeros and bottom row of sixes (sevens symbol id 6).
        let grid = [[0, 0, 0], [1, 2, 3], [SYMBOL_SEVEN; 3]];
        let paytable = SlotsPaytable::default();
        let outcome = resolve_grid(bet(5, 10), grid, &paytable).unwrap();
        // 2*1*10 + 20*1*10
        assert_eq!(outcome.payout, 220);
        match outcome.detail {
            OutcomeDetail::Slots { winning_lines, .. } => {
                assert_eq!(winning_lines, vec![0, 2]);
            }
            other => panic!("unexpected detail {other:?}"),
        }
    }

    #[test]
    fn test_spin_grid_symbols_in_range() {
        let mut rng = GameRng::from_seed(21);
        let grid = spin_grid(&mut rng);
        for row in grid {
            for symbol in row {
                assert!(symbol < SYMBOL_COUNT);
            }
        }
    }
}
