//! Discrete 1-6 dice engine.
//!
//! Payout multipliers come from a fixed table keyed by (bet type, target),
//! in tenths. The table is hand-picked house values, not derived from
//! probability; reproduce it, do not recompute it.

use crate::{GameError, GameRng};
use chiphouse_types::casino::{DiceBet, Outcome, OutcomeDetail, OutcomeKind};
use tracing::debug;

/// Payout multiplier in tenths for a validated bet (e.g. 12 = 1.2x).
///
/// The payout is the total returned on a win, stake included.
pub fn multiplier_tenths(bet: DiceBet) -> u64 {
    match bet {
        DiceBet::Over(1) => 12,
        DiceBet::Over(2) => 15,
        DiceBet::Over(3) => 20,
        DiceBet::Over(4) => 30,
        DiceBet::Over(5) => 60,
        DiceBet::Under(2) => 60,
        DiceBet::Under(3) => 30,
        DiceBet::Under(4) => 20,
        DiceBet::Under(5) => 15,
        DiceBet::Under(6) => 12,
        DiceBet::Exact(_) => 60,
        // Unreachable for validated bets; pays nothing rather than panicking.
        _ => 0,
    }
}

fn bet_wins(bet: DiceBet, roll: u8) -> bool {
    match bet {
        DiceBet::Over(target) => roll > target,
        DiceBet::Under(target) => roll < target,
        DiceBet::Exact(target) => roll == target,
    }
}

/// Settle a dice bet against a revealed roll.
pub fn resolve(bet: DiceBet, amount: u64, roll: u8) -> Result<Outcome, GameError> {
    bet.validate()?;
    let won = bet_wins(bet, roll);
    let payout = if won {
        amount * multiplier_tenths(bet) / 10
    } else {
        0
    };
    debug!(?bet, amount, roll, payout, "dice resolved");
    Ok(Outcome {
        kind: if won { OutcomeKind::Win } else { OutcomeKind::Loss },
        payout,
        detail: OutcomeDetail::Dice { roll },
    })
}

/// Roll and settle in one step.
pub fn play(bet: DiceBet, amount: u64, rng: &mut GameRng) -> Result<Outcome, GameError> {
    let roll = rng.roll_die();
    resolve(bet, amount, roll)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiplier_table() {
        assert_eq!(multiplier_tenths(DiceBet::Over(1)), 12);
        assert_eq!(multiplier_tenths(DiceBet::Over(5)), 60);
        assert_eq!(multiplier_tenths(DiceBet::Under(2)), 60);
        assert_eq!(multiplier_tenths(DiceBet::Under(6)), 12);
        assert_eq!(multiplier_tenths(DiceBet::Exact(1)), 60);
        assert_eq!(multiplier_tenths(DiceBet::Exact(6)), 60);
    }

    #[test]
    fn test_exact_wins_only_on_match() {
        for roll in 1..=6 {
            let outcome = resolve(DiceBet::Exact(3), 100, roll).unwrap();
            if roll == 3 {
                assert_eq!(outcome.kind, OutcomeKind::Win);
                assert_eq!(outcome.payout, 600);
            } else {
                assert_eq!(outcome.kind, OutcomeKind::Loss);
                assert_eq!(outcome.payout, 0);
            }
        }
    }

    #[test]
    fn test_over_five_wins_only_on_six() {
        for roll in 1..=6 {
            let outcome = resolve(DiceBet::Over(5), 100, roll).unwrap();
            assert_eq!(outcome.kind == OutcomeKind::Win, roll == 6);
        }
    }

    #[test]
    fn test_over_one_pays_twelve_tenths() {
        let outcome = resolve(DiceBet::Over(1), 100, 2).unwrap();
        assert_eq!(outcome.payout, 120);
    }

    #[test]
    fn test_under_strictness() {
        let outcome = resolve(DiceBet::Under(4), 100, 4).unwrap();
        assert_eq!(outcome.kind, OutcomeKind::Loss);
        let outcome = resolve(DiceBet::Under(4), 100, 3).unwrap();
        assert_eq!(outcome.kind, OutcomeKind::Win);
        assert_eq!(outcome.payout, 200);
    }

    #[test]
    fn test_invalid_target_rejected() {
        assert!(resolve(DiceBet::Over(6), 100, 3).is_err());
        assert!(resolve(DiceBet::Under(1), 100, 3).is_err());
    }

    #[test]
    fn test_play_rolls_in_range() {
        let mut rng = GameRng::from_seed(11);
        let outcome = play(DiceBet::Exact(3), 10, &mut rng).unwrap();
        match outcome.detail {
            OutcomeDetail::Dice { roll } => assert!((1..=6).contains(&roll)),
            other => panic!("unexpected detail {other:?}"),
        }
    }
}
