//! Deterministic game engines.
//!
//! Each module resolves one game: given bet parameters and revealed
//! randomness it decides win/push/loss and the payout. Engines are pure over
//! their inputs apart from the [`GameRng`] they draw from; custody of chips
//! lives with the caller.

pub mod blackjack;
pub mod dice;
pub mod roll_over;
pub mod roulette;
pub mod slots;

mod rng;

pub use rng::GameRng;

use chiphouse_types::casino::BetError;
use thiserror::Error;

/// Errors surfaced by the game engines.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error(transparent)]
    InvalidBet(#[from] BetError),
    #[error("move not valid in the current round state")]
    InvalidMove,
    #[error("round is already complete")]
    RoundComplete,
    #[error("shoe exhausted")]
    DeckExhausted,
}
