//! European roulette engine.

use crate::{GameError, GameRng};
use chiphouse_types::casino::{Outcome, OutcomeDetail, OutcomeKind, RouletteBet, RouletteBetKind};
use tracing::debug;

/// Physical pocket order of a European single-zero wheel, clockwise from 0.
///
/// Used for wheel-position rendering; settlement only needs the winning
/// number.
pub const WHEEL_ORDER: [u8; 37] = [
    0, 32, 15, 19, 4, 21, 2, 25, 17, 34, 6, 27, 13, 36, 11, 30, 8, 23, 10, 5, 24, 16, 33, 1, 20,
    14, 31, 9, 22, 18, 29, 7, 28, 12, 35, 3, 26,
];

/// Red numbers on a roulette wheel.
const RED_NUMBERS: [u8; 18] = [1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36];

/// Check if a number is red.
pub fn is_red(number: u8) -> bool {
    RED_NUMBERS.contains(&number)
}

/// Position of a pocket on the physical wheel, for rendering.
pub fn wheel_position(pocket: u8) -> Option<usize> {
    WHEEL_ORDER.iter().position(|&p| p == pocket)
}

/// Check if a bet wins for a given result.
fn bet_wins(kind: RouletteBetKind, bet_number: u8, result: u8) -> bool {
    // Zero loses all except a straight bet on 0.
    if result == 0 {
        return kind == RouletteBetKind::Straight && bet_number == 0;
    }

    match kind {
        RouletteBetKind::Straight => bet_number == result,
        RouletteBetKind::Red => is_red(result),
        RouletteBetKind::Black => !is_red(result),
        RouletteBetKind::Even => result % 2 == 0,
        RouletteBetKind::Odd => result % 2 == 1,
        RouletteBetKind::Low => (1..=18).contains(&result),
        RouletteBetKind::High => (19..=36).contains(&result),
        RouletteBetKind::Dozen => (result - 1) / 12 == bet_number,
        RouletteBetKind::Column => (result - 1) % 3 == bet_number,
    }
}

/// Settle a set of bets riding on one spin.
///
/// Each bet resolves independently against the pocket; the payout is the sum
/// of each winning bet's stake times its total multiplier. Any winning bet
/// makes the outcome a win.
pub fn resolve_spin(bets: &[RouletteBet], pocket: u8) -> Result<Outcome, GameError> {
    let mut payout: u64 = 0;
    for bet in bets {
        bet.validate()?;
        if bet_wins(bet.kind, bet.number, pocket) {
            payout += bet.amount * bet.kind.payout_multiplier();
        }
    }
    debug!(pocket, bets = bets.len(), payout, "spin resolved");
    Ok(Outcome {
        kind: if payout > 0 {
            OutcomeKind::Win
        } else {
            OutcomeKind::Loss
        },
        payout,
        detail: OutcomeDetail::Roulette { pocket },
    })
}

/// Spin and settle in one step.
pub fn play(bets: &[RouletteBet], rng: &mut GameRng) -> Result<Outcome, GameError> {
    let pocket = rng.spin_wheel();
    resolve_spin(bets, pocket)
}
