//! Client core: the game-session state machine, the ledger view, and the
//! table backend boundary.
//!
//! The session issues intents to a [`TableBackend`], reconciles the results
//! into a coherent [`GameState`], and surfaces every failure as a
//! user-facing message. Nothing here is fatal to the process.

pub mod events;
pub mod ledger;
pub mod session;
pub mod table;


pub use events::{TableEvent, TableEvents};
pub use ledger::{MockLedger, SharedLedger};
pub use session::{ConfirmationPolicy, GameState, Session, SessionStatus};
pub use table::{MockTable, TableBackend};

use chiphouse_engine::GameError;
use chiphouse_types::casino::{BetError, ChipConversionError};
use thiserror::Error;

/// Error type for client operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid bet: {0} (balance {1})")]
    InvalidBet(u64, u64),
    #[error("insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: u64, available: u64 },
    #[error("approval failed: {0}")]
    ApprovalFailed(String),
    #[error("action rejected: {0}")]
    ActionRejected(String),
    #[error("timed out waiting for confirmation")]
    Timeout,
    #[error("another action is in flight")]
    SessionBusy,
    #[error("no active round")]
    NoActiveRound,
    #[error("free chips already claimed")]
    AlreadyClaimed,
    #[error(transparent)]
    Bet(#[from] BetError),
    #[error(transparent)]
    Game(#[from] GameError),
    #[error(transparent)]
    Conversion(#[from] ChipConversionError),
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;
