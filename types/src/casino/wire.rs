//! Wire shapes at the table-contract boundary.
//!
//! Instructions are tag-prefixed binary records; all integers are
//! big-endian. Boundary amounts are 18-decimal fixed-point `u128`, encoded
//! as 16 raw bytes.

use crate::casino::GameType;
use crate::Address;
use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, FixedSize, Read, ReadExt, Write};

fn write_u128(value: u128, writer: &mut impl BufMut) {
    writer.put_slice(&value.to_be_bytes());
}

fn read_u128(reader: &mut impl Buf) -> Result<u128, Error> {
    if reader.remaining() < 16 {
        return Err(Error::EndOfBuffer);
    }
    let mut bytes = [0u8; 16];
    reader.copy_to_slice(&mut bytes);
    Ok(u128::from_be_bytes(bytes))
}

fn read_bool(reader: &mut impl Buf) -> Result<bool, Error> {
    match u8::read(reader)? {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(Error::Invalid("GameData", "invalid boolean byte")),
    }
}

/// Actions the client issues to the external table contract.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TableInstruction {
    /// Start a round with a bet in whole chips.
    /// Binary: [0] [gameType:u8] [bet:u64 BE]
    StartGame { game_type: GameType, bet: u64 },

    /// Draw one more player card.
    /// Binary: [1]
    Hit,

    /// Stop drawing; dealer plays out.
    /// Binary: [2]
    Stand,

    /// Settle the finished round.
    /// Binary: [3]
    ResolveGame,

    /// Authorize the table to debit up to `amount` (wire units).
    /// Binary: [4] [spender:20] [amount:u128 BE]
    Approve { spender: Address, amount: u128 },

    /// Deposit the external asset (wire units) for chips.
    /// Binary: [5] [amount:u128 BE]
    DepositEth { amount: u128 },

    /// Cash chips out to the external asset.
    /// Binary: [6] [amount:u64 BE] [target:20]
    CashoutChip { amount: u64, target: Address },

    /// One-time free chip grant.
    /// Binary: [7]
    ClaimFreeChips,
}

impl Write for TableInstruction {
    fn write(&self, writer: &mut impl BufMut) {
        match self {
            Self::StartGame { game_type, bet } => {
                0u8.write(writer);
                game_type.write(writer);
                bet.write(writer);
            }
            Self::Hit => {
                1u8.write(writer);
            }
            Self::Stand => {
                2u8.write(writer);
            }
            Self::ResolveGame => {
                3u8.write(writer);
            }
            Self::Approve { spender, amount } => {
                4u8.write(writer);
                spender.write(writer);
                write_u128(*amount, writer);
            }
            Self::DepositEth { amount } => {
                5u8.write(writer);
                write_u128(*amount, writer);
            }
            Self::CashoutChip { amount, target } => {
                6u8.write(writer);
                amount.write(writer);
                target.write(writer);
            }
            Self::ClaimFreeChips => {
                7u8.write(writer);
            }
        }
    }
}

impl Read for TableInstruction {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let tag = u8::read(reader)?;
        match tag {
            0 => {
                let game_type = GameType::read(reader)?;
                let bet = u64::read(reader)?;
                Ok(Self::StartGame { game_type, bet })
            }
            1 => Ok(Self::Hit),
            2 => Ok(Self::Stand),
            3 => Ok(Self::ResolveGame),
            4 => {
                let spender = Address::read(reader)?;
                let amount = read_u128(reader)?;
                Ok(Self::Approve { spender, amount })
            }
            5 => {
                let amount = read_u128(reader)?;
                Ok(Self::DepositEth { amount })
            }
            6 => {
                let amount = u64::read(reader)?;
                let target = Address::read(reader)?;
                Ok(Self::CashoutChip { amount, target })
            }
            7 => Ok(Self::ClaimFreeChips),
            i => Err(Error::InvalidEnum(i)),
        }
    }
}

impl EncodeSize for TableInstruction {
    fn encode_size(&self) -> usize {
        1 + match self {
            Self::StartGame { .. } => 1 + 8,
            Self::Hit | Self::Stand | Self::ResolveGame | Self::ClaimFreeChips => 0,
            Self::Approve { .. } => Address::SIZE + 16,
            Self::DepositEth { .. } => 16,
            Self::CashoutChip { .. } => 8 + Address::SIZE,
        }
    }
}

/// Round snapshot read back from the table contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct GameData {
    /// Bet riding on the current round, whole chips.
    pub bet: u64,
    /// A round is in progress.
    pub is_active: bool,
    /// The player has stood; dealer play may still be running.
    pub player_stood: bool,
    /// Dealer play has finished; the round awaits resolution.
    pub dealer_done: bool,
}

impl Write for GameData {
    fn write(&self, writer: &mut impl BufMut) {
        self.bet.write(writer);
        (self.is_active as u8).write(writer);
        (self.player_stood as u8).write(writer);
        (self.dealer_done as u8).write(writer);
    }
}

impl Read for GameData {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let bet = u64::read(reader)?;
        let is_active = read_bool(reader)?;
        let player_stood = read_bool(reader)?;
        let dealer_done = read_bool(reader)?;
        Ok(Self {
            bet,
            is_active,
            player_stood,
            dealer_done,
        })
    }
}

impl FixedSize for GameData {
    const SIZE: usize = 8 + 3;
}

#[cfg(test)]
mod tests {
    use super::*;
    use commonware_codec::{Encode, ReadExt};

    #[test]
    fn test_start_game_binary_format() {
        let instruction = TableInstruction::StartGame {
            game_type: GameType::Blackjack,
            bet: 100,
        };
        let encoded = instruction.encode();
        assert_eq!(encoded.len(), instruction.encode_size());
        assert_eq!(encoded[0], 0); // tag
        assert_eq!(encoded[1], 0); // game type
        assert_eq!(&encoded[2..10], &100u64.to_be_bytes());
    }

    #[test]
    fn test_unit_instructions_are_one_byte() {
        for (instruction, tag) in [
            (TableInstruction::Hit, 1u8),
            (TableInstruction::Stand, 2),
            (TableInstruction::ResolveGame, 3),
            (TableInstruction::ClaimFreeChips, 7),
        ] {
            let encoded = instruction.encode();
            assert_eq!(encoded.as_ref(), &[tag]);
        }
    }

    #[test]
    fn test_approve_binary_format() {
        let spender = Address::new([0x22; 20]);
        let instruction = TableInstruction::Approve {
            spender,
            amount: 5 * crate::casino::WIRE_SCALE,
        };
        let encoded = instruction.encode();
        assert_eq!(encoded.len(), 1 + 20 + 16);
        assert_eq!(encoded[0], 4);
        assert_eq!(&encoded[1..21], spender.as_bytes());
        assert_eq!(
            &encoded[21..37],
            &(5 * crate::casino::WIRE_SCALE).to_be_bytes()
        );
    }

    #[test]
    fn test_instruction_roundtrip() {
        let instructions = [
            TableInstruction::StartGame {
                game_type: GameType::Roulette,
                bet: 42,
            },
            TableInstruction::Hit,
            TableInstruction::Stand,
            TableInstruction::ResolveGame,
            TableInstruction::Approve {
                spender: Address::new([7; 20]),
                amount: u128::MAX,
            },
            TableInstruction::DepositEth { amount: 1 },
            TableInstruction::CashoutChip {
                amount: 999,
                target: Address::new([9; 20]),
            },
            TableInstruction::ClaimFreeChips,
        ];
        for instruction in instructions {
            let encoded = instruction.encode();
            let decoded = TableInstruction::read(&mut &encoded[..]).unwrap();
            assert_eq!(instruction, decoded);
        }
    }

    #[test]
    fn test_unknown_tag_rejected() {
        let bytes = [8u8];
        assert!(TableInstruction::read(&mut &bytes[..]).is_err());
    }

    #[test]
    fn test_game_data_roundtrip() {
        let data = GameData {
            bet: 250,
            is_active: true,
            player_stood: true,
            dealer_done: false,
        };
        let encoded = data.encode();
        assert_eq!(encoded.len(), GameData::SIZE);
        let decoded = GameData::read(&mut &encoded[..]).unwrap();
        assert_eq!(data, decoded);
    }

    #[test]
    fn test_game_data_rejects_bad_boolean() {
        let mut bytes = GameData::default().encode().to_vec();
        bytes[8] = 2;
        assert!(GameData::read(&mut &bytes[..]).is_err());
    }
}
