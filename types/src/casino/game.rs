//! Game identifiers and table metadata.

use crate::casino::{MAX_BET, MIN_BET};
use bytes::{Buf, BufMut};
use commonware_codec::{Error, FixedSize, Read, ReadExt, Write};
use serde::{Deserialize, Serialize};

/// Games offered at the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum GameType {
    Blackjack = 0,
    Dice = 1,
    RollOver = 2,
    Roulette = 3,
    Slots = 4,
}

impl GameType {
    pub const ALL: [GameType; 5] = [
        GameType::Blackjack,
        GameType::Dice,
        GameType::RollOver,
        GameType::Roulette,
        GameType::Slots,
    ];
}

impl Write for GameType {
    fn write(&self, writer: &mut impl BufMut) {
        (*self as u8).write(writer);
    }
}

impl Read for GameType {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let value = u8::read(reader)?;
        match value {
            0 => Ok(Self::Blackjack),
            1 => Ok(Self::Dice),
            2 => Ok(Self::RollOver),
            3 => Ok(Self::Roulette),
            4 => Ok(Self::Slots),
            i => Err(Error::InvalidEnum(i)),
        }
    }
}

impl FixedSize for GameType {
    const SIZE: usize = 1;
}

/// Broad game category for listing and filtering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameCategory {
    Cards,
    Dice,
    Wheel,
    Reels,
}

/// Display metadata for one game.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GameInfo {
    pub game_type: GameType,
    pub name: &'static str,
    pub category: GameCategory,
    /// Long-run house advantage in basis points.
    pub house_edge_bps: u16,
    pub min_bet: u64,
    pub max_bet: u64,
}

impl GameInfo {
    /// Metadata for a game type.
    pub fn for_game(game_type: GameType) -> Self {
        let (name, category, house_edge_bps) = match game_type {
            GameType::Blackjack => ("Blackjack", GameCategory::Cards, 50),
            GameType::Dice => ("Dice", GameCategory::Dice, 280),
            GameType::RollOver => ("Roll Over", GameCategory::Dice, 100),
            GameType::Roulette => ("Roulette", GameCategory::Wheel, 270),
            GameType::Slots => ("Slots", GameCategory::Reels, 400),
        };
        Self {
            game_type,
            name,
            category,
            house_edge_bps,
            min_bet: MIN_BET,
            max_bet: MAX_BET,
        }
    }

    /// Metadata for every offered game, in listing order.
    pub fn all() -> Vec<Self> {
        GameType::ALL.iter().copied().map(Self::for_game).collect()
    }
}
