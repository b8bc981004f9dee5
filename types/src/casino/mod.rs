//! Casino domain types.
//!
//! Defines the card codec, bet parameters, outcomes, chip conversion, and the
//! wire shapes used at the table-contract boundary.

mod bets;
mod cards;
mod chips;
mod constants;
mod game;
mod outcome;
mod wire;

pub use bets::*;
pub use cards::*;
pub use chips::*;
pub use constants::*;
pub use game::*;
pub use outcome::*;
pub use wire::*;
