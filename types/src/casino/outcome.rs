//! Resolved-round outcomes.

use serde::{Deserialize, Serialize};

/// Win/push/loss classification of a resolved round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeKind {
    Win,
    Push,
    Loss,
}

/// Game-specific detail captured alongside an outcome, for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeDetail {
    Blackjack {
        /// Final player total, snapshotted before hands are cleared.
        player_score: u8,
        /// Final dealer total, snapshotted before hands are cleared.
        dealer_score: u8,
    },
    Dice {
        roll: u8,
    },
    RollOver {
        /// Rolled value in hundredths over [0, 10000).
        roll_hundredths: u16,
    },
    Roulette {
        /// Winning pocket, 0-36.
        pocket: u8,
    },
    Slots {
        /// Row-major 3x3 symbol grid.
        grid: [[u8; 3]; 3],
        /// Indices of paylines that paid.
        winning_lines: Vec<u8>,
    },
}

/// The record produced exactly once per resolved round.
///
/// The payout is the total credited back, stake included on a win or push.
/// Read once by the ledger to credit the balance, retained for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub kind: OutcomeKind,
    pub payout: u64,
    pub detail: OutcomeDetail,
}

impl Outcome {
    pub fn is_win(&self) -> bool {
        self.kind == OutcomeKind::Win
    }
}
