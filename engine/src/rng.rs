//! Seeded randomness source shared by the engines.

use chiphouse_types::casino::{Card, CARDS_PER_DECK, ROLL_OVER_SCALE, ROULETTE_POCKETS};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// RNG for game randomness.
///
/// Deterministic when seeded, which keeps engine tests and mock replays
/// reproducible.
pub struct GameRng {
    inner: ChaCha8Rng,
}

impl GameRng {
    /// Deterministic RNG from a 64-bit seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// RNG seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            inner: ChaCha8Rng::from_entropy(),
        }
    }

    /// Build a shuffled shoe of `decks` decks of card indices.
    pub fn create_shoe(&mut self, decks: u8) -> Vec<u8> {
        let mut shoe = Vec::with_capacity(usize::from(decks) * usize::from(CARDS_PER_DECK));
        for _ in 0..decks {
            shoe.extend(0..CARDS_PER_DECK);
        }
        shoe.shuffle(&mut self.inner);
        shoe
    }

    /// Draw the top card from a shoe, or `None` if exhausted.
    pub fn draw_card(&mut self, shoe: &mut Vec<u8>) -> Option<Card> {
        shoe.pop().map(Card::from_index)
    }

    /// Roll a standard die: 1..=6.
    pub fn roll_die(&mut self) -> u8 {
        self.inner.gen_range(1..=6)
    }

    /// Spin a European wheel: pocket 0..=36.
    pub fn spin_wheel(&mut self) -> u8 {
        self.inner.gen_range(0..ROULETTE_POCKETS)
    }

    /// Continuous roll in hundredths: 0..10000.
    pub fn roll_hundredths(&mut self) -> u16 {
        self.inner.gen_range(0..ROLL_OVER_SCALE) as u16
    }

    /// One reel symbol out of `symbols`.
    pub fn reel_symbol(&mut self, symbols: u8) -> u8 {
        self.inner.gen_range(0..symbols)
    }
}
