//! Bet parameter types.
//!
//! Bets are immutable once placed and consumed exactly once by a resolver.
//! Validation happens in the constructors; an engine never sees an
//! out-of-range target.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A bet's game-specific parameters were out of range.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BetError {
    #[error("dice target {target} invalid for {bet}")]
    InvalidDiceTarget { bet: &'static str, target: u8 },
    #[error("roll-over threshold {0} out of range (1..=9999 hundredths)")]
    InvalidThreshold(u16),
    #[error("roulette selection {number} invalid for {bet}")]
    InvalidSelection { bet: &'static str, number: u8 },
    #[error("slots line count {0} out of range (1..=5)")]
    InvalidLineCount(u8),
}

/// Discrete 1-6 dice bet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiceBet {
    /// Wins if the roll is strictly greater than the target.
    Over(u8),
    /// Wins if the roll is strictly less than the target.
    Under(u8),
    /// Wins if the roll equals the target.
    Exact(u8),
}

impl DiceBet {
    /// Validate the target against the bet type's domain.
    ///
    /// `Over` targets 1..=5 (Over 6 can never win), `Under` targets 2..=6,
    /// `Exact` targets 1..=6.
    pub fn validate(&self) -> Result<(), BetError> {
        match *self {
            DiceBet::Over(t) if (1..=5).contains(&t) => Ok(()),
            DiceBet::Under(t) if (2..=6).contains(&t) => Ok(()),
            DiceBet::Exact(t) if (1..=6).contains(&t) => Ok(()),
            DiceBet::Over(t) => Err(BetError::InvalidDiceTarget { bet: "over", target: t }),
            DiceBet::Under(t) => Err(BetError::InvalidDiceTarget { bet: "under", target: t }),
            DiceBet::Exact(t) => Err(BetError::InvalidDiceTarget { bet: "exact", target: t }),
        }
    }

    pub fn target(&self) -> u8 {
        match *self {
            DiceBet::Over(t) | DiceBet::Under(t) | DiceBet::Exact(t) => t,
        }
    }
}

/// Continuous roll-over dice bet: threshold in hundredths over [0, 100).
///
/// Kept distinct from [`DiceBet`]; the payout formulas differ.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOverBet {
    threshold_hundredths: u16,
}

impl RollOverBet {
    /// Build a bet from a threshold in hundredths (e.g. 5050 = 50.50).
    ///
    /// Thresholds of 0 (always wins) and >= 10000 (never wins) are rejected.
    pub fn new(threshold_hundredths: u16) -> Result<Self, BetError> {
        if threshold_hundredths == 0 || threshold_hundredths >= 10_000 {
            return Err(BetError::InvalidThreshold(threshold_hundredths));
        }
        Ok(Self { threshold_hundredths })
    }

    pub fn threshold_hundredths(&self) -> u16 {
        self.threshold_hundredths
    }
}

/// Roulette bet categories.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouletteBetKind {
    Straight = 0, // Single number (pays 36x total)
    Red = 1,      // 2x
    Black = 2,    // 2x
    Even = 3,     // 2x
    Odd = 4,      // 2x
    Low = 5,      // 1-18 (2x)
    High = 6,     // 19-36 (2x)
    Dozen = 7,    // 1-12, 13-24, 25-36 (3x) - number = 0/1/2
    Column = 8,   // First, second, third column (3x) - number = 0/1/2
}

impl RouletteBetKind {
    /// Total payout multiplier, stake included.
    pub fn payout_multiplier(&self) -> u64 {
        match self {
            RouletteBetKind::Straight => 36,
            RouletteBetKind::Dozen | RouletteBetKind::Column => 3,
            _ => 2,
        }
    }
}

impl TryFrom<u8> for RouletteBetKind {
    type Error = BetError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(RouletteBetKind::Straight),
            1 => Ok(RouletteBetKind::Red),
            2 => Ok(RouletteBetKind::Black),
            3 => Ok(RouletteBetKind::Even),
            4 => Ok(RouletteBetKind::Odd),
            5 => Ok(RouletteBetKind::Low),
            6 => Ok(RouletteBetKind::High),
            7 => Ok(RouletteBetKind::Dozen),
            8 => Ok(RouletteBetKind::Column),
            _ => Err(BetError::InvalidSelection { bet: "kind", number: value }),
        }
    }
}

/// One roulette bet: a category, its selection number, and a stake.
///
/// Multiple bets may ride on a single spin; each resolves independently.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouletteBet {
    pub kind: RouletteBetKind,
    /// Straight: 0-36. Dozen/Column: 0/1/2. Ignored otherwise.
    pub number: u8,
    pub amount: u64,
}

impl RouletteBet {
    pub fn new(kind: RouletteBetKind, number: u8, amount: u64) -> Result<Self, BetError> {
        let bet = Self { kind, number, amount };
        bet.validate()?;
        Ok(bet)
    }

    /// Check the selection domain. The fields are public, so a bet built
    /// without [`new`](Self::new) must be validated before it is staked.
    pub fn validate(&self) -> Result<(), BetError> {
        let number = self.number;
        match self.kind {
            RouletteBetKind::Straight if number > 36 => {
                Err(BetError::InvalidSelection { bet: "straight", number })
            }
            RouletteBetKind::Dozen if number > 2 => {
                Err(BetError::InvalidSelection { bet: "dozen", number })
            }
            RouletteBetKind::Column if number > 2 => {
                Err(BetError::InvalidSelection { bet: "column", number })
            }
            _ => Ok(()),
        }
    }
}

/// Slots bet: active paylines and stake per line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotsBet {
    pub lines: u8,
    pub bet_per_line: u64,
}

impl SlotsBet {
    pub fn new(lines: u8, bet_per_line: u64) -> Result<Self, BetError> {
        let bet = Self { lines, bet_per_line };
        bet.validate()?;
        Ok(bet)
    }

    /// Check the line count. The fields are public, so a bet built without
    /// [`new`](Self::new) must be validated before it is staked.
    pub fn validate(&self) -> Result<(), BetError> {
        if self.lines == 0 || self.lines > 5 {
            return Err(BetError::InvalidLineCount(self.lines));
        }
        Ok(())
    }

    /// Total stake across all active lines.
    pub fn total(&self) -> u64 {
        u64::from(self.lines) * self.bet_per_line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dice_bet_domains() {
        assert!(DiceBet::Over(1).validate().is_ok());
        assert!(DiceBet::Over(5).validate().is_ok());
        assert!(DiceBet::Over(6).validate().is_err());
        assert!(DiceBet::Under(2).validate().is_ok());
        assert!(DiceBet::Under(1).validate().is_err());
        assert!(DiceBet::Exact(6).validate().is_ok());
        assert!(DiceBet::Exact(0).validate().is_err());
        assert!(DiceBet::Exact(7).validate().is_err());
    }

    #[test]
    fn test_roll_over_threshold_domain() {
        assert!(RollOverBet::new(1).is_ok());
        assert!(RollOverBet::new(5050).is_ok());
        assert!(RollOverBet::new(9999).is_ok());
        assert_eq!(RollOverBet::new(0), Err(BetError::InvalidThreshold(0)));
        assert_eq!(
            RollOverBet::new(10_000),
            Err(BetError::InvalidThreshold(10_000))
        );
    }

    #[test]
    fn test_roulette_selection_domains() {
        assert!(RouletteBet::new(RouletteBetKind::Straight, 36, 10).is_ok());
        assert!(RouletteBet::new(RouletteBetKind::Straight, 37, 10).is_err());
        assert!(RouletteBet::new(RouletteBetKind::Dozen, 2, 10).is_ok());
        assert!(RouletteBet::new(RouletteBetKind::Dozen, 3, 10).is_err());
        // Selection number is irrelevant for even-money bets.
        assert!(RouletteBet::new(RouletteBetKind::Red, 99, 10).is_ok());
    }

    #[test]
    fn test_validate_catches_hand_built_bets() {
        let straight = RouletteBet {
            kind: RouletteBetKind::Straight,
            number: 37,
            amount: 10,
        };
        assert!(straight.validate().is_err());
        let slots = SlotsBet {
            lines: 6,
            bet_per_line: 10,
        };
        assert!(slots.validate().is_err());
    }

    #[test]
    fn test_roulette_kind_tags() {
        assert_eq!(RouletteBetKind::try_from(0), Ok(RouletteBetKind::Straight));
        assert_eq!(RouletteBetKind::try_from(8), Ok(RouletteBetKind::Column));
        assert!(RouletteBetKind::try_from(9).is_err());
    }

    #[test]
    fn test_slots_bet_total() {
        let bet = SlotsBet::new(5, 10).unwrap();
        assert_eq!(bet.total(), 50);
        assert!(SlotsBet::new(0, 10).is_err());
        assert!(SlotsBet::new(6, 10).is_err());
    }
}
