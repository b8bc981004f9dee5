//! Playing-card codec.
//!
//! Cards cross the contract boundary as integers in `0..=51`, where:
//! - rank = index % 13 (0 = Ace .. 12 = King)
//! - suit = index / 13 (0 = ♠, 1 = ♥, 2 = ♦, 3 = ♣)
//!
//! Raw indices are decoded into [`Card`] once on ingress; nothing downstream
//! branches on the integer representation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Total cards in a standard deck.
pub const CARDS_PER_DECK: u8 = 52;

/// Ranks per suit.
pub const RANKS_PER_SUIT: u8 = 13;

/// Card rank, ordered Ace-low as encoded on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    Ace = 0,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    /// Decode from the 0-based rank index (0..=12).
    fn from_index(index: u8) -> Self {
        match index {
            0 => Rank::Ace,
            1 => Rank::Two,
            2 => Rank::Three,
            3 => Rank::Four,
            4 => Rank::Five,
            5 => Rank::Six,
            6 => Rank::Seven,
            7 => Rank::Eight,
            8 => Rank::Nine,
            9 => Rank::Ten,
            10 => Rank::Jack,
            11 => Rank::Queen,
            12 => Rank::King,
            _ => unreachable!("rank index restricted by caller"),
        }
    }

    /// Display label ("A", "2".."10", "J", "Q", "K").
    pub fn label(&self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }
}

/// Card suit, in wire encoding order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Suit {
    Spades = 0,
    Hearts = 1,
    Diamonds = 2,
    Clubs = 3,
}

impl Suit {
    fn from_index(index: u8) -> Self {
        match index {
            0 => Suit::Spades,
            1 => Suit::Hearts,
            2 => Suit::Diamonds,
            3 => Suit::Clubs,
            _ => unreachable!("suit index restricted by caller"),
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
        }
    }

    /// Hearts and diamonds are red.
    pub fn is_red(&self) -> bool {
        matches!(self, Suit::Hearts | Suit::Diamonds)
    }
}

/// A single playing card, decoded from its wire index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    index: u8,
}

impl Card {
    /// Decode a wire index into a card.
    ///
    /// The domain is restricted by the caller; an out-of-range index is a
    /// contract violation, not a recoverable error.
    pub fn from_index(index: u8) -> Self {
        debug_assert!(index < CARDS_PER_DECK, "card index {index} out of range");
        Self { index }
    }

    /// The wire encoding of this card.
    pub fn index(&self) -> u8 {
        self.index
    }

    pub fn rank(&self) -> Rank {
        Rank::from_index(self.index % RANKS_PER_SUIT)
    }

    pub fn suit(&self) -> Suit {
        Suit::from_index(self.index / RANKS_PER_SUIT)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank().label(), self.suit().symbol())
    }
}

/// Decode a slice of wire indices into cards.
pub fn decode_cards(indices: &[u8]) -> Vec<Card> {
    indices.iter().copied().map(Card::from_index).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_table_order() {
        // index % 13 maps through [A, 2..10, J, Q, K]
        assert_eq!(Card::from_index(0).rank(), Rank::Ace);
        assert_eq!(Card::from_index(9).rank(), Rank::Ten);
        assert_eq!(Card::from_index(10).rank(), Rank::Jack);
        assert_eq!(Card::from_index(12).rank(), Rank::King);
        assert_eq!(Card::from_index(13).rank(), Rank::Ace);
        assert_eq!(Card::from_index(51).rank(), Rank::King);
    }

    #[test]
    fn test_suit_table_order() {
        assert_eq!(Card::from_index(0).suit(), Suit::Spades);
        assert_eq!(Card::from_index(13).suit(), Suit::Hearts);
        assert_eq!(Card::from_index(26).suit(), Suit::Diamonds);
        assert_eq!(Card::from_index(39).suit(), Suit::Clubs);
    }

    #[test]
    fn test_red_suits() {
        assert!(!Suit::Spades.is_red());
        assert!(Suit::Hearts.is_red());
        assert!(Suit::Diamonds.is_red());
        assert!(!Suit::Clubs.is_red());
    }

    #[test]
    fn test_display() {
        assert_eq!(Card::from_index(0).to_string(), "A♠");
        assert_eq!(Card::from_index(25).to_string(), "K♥");
        assert_eq!(Card::from_index(35).to_string(), "10♦");
    }

    #[test]
    fn test_decode_cards() {
        let cards = decode_cards(&[0, 14, 51]);
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[1].rank(), Rank::Two);
        assert_eq!(cards[1].suit(), Suit::Hearts);
    }
}
