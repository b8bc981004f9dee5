//! Continuous roll-over dice engine.
//!
//! Distinct from the discrete table in `dice`: the payout here is computed
//! from the win chance at a 99% return target, not looked up.
//!
//! Thresholds and rolls are hundredths over [0, 100), i.e. integers in
//! [0, 10000). A roll wins iff it is strictly greater than the threshold.

use crate::{GameError, GameRng};
use chiphouse_types::casino::{
    Outcome, OutcomeDetail, OutcomeKind, RollOverBet, ROLL_OVER_RTP_NUMERATOR, ROLL_OVER_SCALE,
};
use tracing::debug;

/// Payout multiplier in ten-thousandths (e.g. 20000 = 2.0x).
///
/// `win_chance` and the multiplier are both in hundredths, so the 0.99 RTP
/// constant scales to 99_000_000. Division truncates toward the house.
pub fn multiplier_x10000(bet: RollOverBet) -> u64 {
    let win_chance = u64::from(ROLL_OVER_SCALE as u16 - bet.threshold_hundredths());
    ROLL_OVER_RTP_NUMERATOR / win_chance
}

/// Settle a roll-over bet against a revealed roll (hundredths).
pub fn resolve(bet: RollOverBet, amount: u64, roll_hundredths: u16) -> Result<Outcome, GameError> {
    let won = roll_hundredths > bet.threshold_hundredths();
    let payout = if won {
        amount * multiplier_x10000(bet) / u64::from(ROLL_OVER_SCALE)
    } else {
        0
    };
    debug!(
        threshold = bet.threshold_hundredths(),
        amount, roll_hundredths, payout, "roll-over resolved"
    );
    Ok(Outcome {
        kind: if won { OutcomeKind::Win } else { OutcomeKind::Loss },
        payout,
        detail: OutcomeDetail::RollOver { roll_hundredths },
    })
}

/// Roll and settle in one step.
pub fn play(bet: RollOverBet, amount: u64, rng: &mut GameRng) -> Result<Outcome, GameError> {
    let roll = rng.roll_hundredths();
    resolve(bet, amount, roll)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bet(threshold: u16) -> RollOverBet {
        RollOverBet::new(threshold).unwrap()
    }

    #[test]
    fn test_even_money_threshold() {
        // 50.50 -> win chance 49.50% -> multiplier exactly 2.0x
        assert_eq!(multiplier_x10000(bet(5050)), 20_000);
    }

    #[test]
    fn test_boundary_rolls_at_5050() {
        // 50.49 loses, 50.51 wins; the threshold itself also loses.
        let outcome = resolve(bet(5050), 100, 5049).unwrap();
        assert_eq!(outcome.kind, OutcomeKind::Loss);
        let outcome = resolve(bet(5050), 100, 5050).unwrap();
        assert_eq!(outcome.kind, OutcomeKind::Loss);
        let outcome = resolve(bet(5050), 100, 5051).unwrap();
        assert_eq!(outcome.kind, OutcomeKind::Win);
        assert_eq!(outcome.payout, 200);
    }

    #[test]
    fn test_long_shot_multiplier() {
        // Threshold 99.00 -> win chance 1% -> 99x
        assert_eq!(multiplier_x10000(bet(9900)), 990_000);
        let outcome = resolve(bet(9900), 10, 9950).unwrap();
        assert_eq!(outcome.payout, 990);
    }

    #[test]
    fn test_near_sure_thing_multiplier_truncates() {
        // Threshold 1.00 -> win chance 99% -> 99_000_000 / 9900 = 10000 = 1.0x
        assert_eq!(multiplier_x10000(bet(100)), 10_000);
        // Threshold 0.01 -> win chance 99.99% -> truncates below 1x
        assert_eq!(multiplier_x10000(bet(1)), 9_900);
    }

    #[test]
    fn test_play_roll_in_range() {
        let mut rng = GameRng::from_seed(5);
        let outcome = play(bet(5050), 100, &mut rng).unwrap();
        match outcome.detail {
            OutcomeDetail::RollOver { roll_hundredths } => assert!(roll_hundredths < 10_000),
            other => panic!("unexpected detail {other:?}"),
        }
    }
}
