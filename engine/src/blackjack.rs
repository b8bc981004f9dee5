//! Blackjack round engine.
//!
//! House rules (defaults):
//! - Single-deck shoe reshuffled every round
//! - Dealer stands on all 17s
//! - Single hand, no splits, doubles, or side bets

use crate::{GameError, GameRng};
use chiphouse_types::casino::{
    Card, Outcome, OutcomeDetail, OutcomeKind, Rank, BLACKJACK_TARGET, DEALER_STAND_TOTAL,
};
use tracing::debug;

/// Table rules for a blackjack round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlackjackRules {
    /// When set the dealer draws on soft 17 instead of standing.
    pub dealer_hits_soft_17: bool,
    /// Decks in the shoe.
    pub decks: u8,
}

impl Default for BlackjackRules {
    fn default() -> Self {
        Self {
            dealer_hits_soft_17: false,
            decks: 1,
        }
    }
}

/// Calculate the value of a blackjack hand.
///
/// Aces count 11 and reduce to 1 one at a time while the total busts.
/// Returns the total and whether the hand is soft (an Ace still counts 11).
/// A total above 21 is a valid terminal value; callers branch on it.
pub fn hand_value(cards: &[Card]) -> (u8, bool) {
    let mut value: u16 = 0;
    let mut aces: u8 = 0;

    for card in cards {
        match card.rank() {
            Rank::Ace => {
                aces += 1;
                value += 11;
            }
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => value += 10,
            rank => value += rank as u16 + 1,
        }
    }

    while value > u16::from(BLACKJACK_TARGET) && aces > 0 {
        value -= 10;
        aces -= 1;
    }

    let is_soft = aces > 0 && value <= u16::from(BLACKJACK_TARGET);
    (value.min(255) as u8, is_soft)
}

/// Check if a hand is a natural blackjack (21 with 2 cards).
pub fn is_blackjack(cards: &[Card]) -> bool {
    cards.len() == 2 && hand_value(cards).0 == BLACKJACK_TARGET
}

/// One blackjack round: two hands and the shoe they draw from.
///
/// The round itself holds no chips. The caller validates and debits the bet
/// before dealing and credits the payout [`resolve`](Self::resolve) reports.
#[derive(Debug)]
pub struct BlackjackRound {
    shoe: Vec<u8>,
    player: Vec<Card>,
    dealer: Vec<Card>,
    hole_revealed: bool,
    rules: BlackjackRules,
}

impl BlackjackRound {
    /// Deal a fresh round: player two cards up, dealer one up and one hidden.
    pub fn deal(rules: BlackjackRules, rng: &mut GameRng) -> Result<Self, GameError> {
        let mut shoe = rng.create_shoe(rules.decks);
        let p1 = rng.draw_card(&mut shoe).ok_or(GameError::DeckExhausted)?;
        let p2 = rng.draw_card(&mut shoe).ok_or(GameError::DeckExhausted)?;
        let dealer_up = rng.draw_card(&mut shoe).ok_or(GameError::DeckExhausted)?;
        let dealer_hole = rng.draw_card(&mut shoe).ok_or(GameError::DeckExhausted)?;

        let round = Self {
            shoe,
            player: vec![p1, p2],
            dealer: vec![dealer_up, dealer_hole],
            hole_revealed: false,
            rules,
        };
        debug!(
            player = %format_hand(&round.player),
            dealer_up = %dealer_up,
            "dealt blackjack round"
        );
        Ok(round)
    }

    pub fn player_hand(&self) -> &[Card] {
        &self.player
    }

    /// Dealer cards visible so far: the up card only until the hole card is
    /// revealed, then the whole hand.
    pub fn visible_dealer_hand(&self) -> &[Card] {
        if self.hole_revealed {
            &self.dealer
        } else {
            &self.dealer[0..1]
        }
    }

    pub fn player_value(&self) -> u8 {
        hand_value(&self.player).0
    }

    /// Value of the dealer cards visible so far.
    pub fn dealer_visible_value(&self) -> u8 {
        hand_value(self.visible_dealer_hand()).0
    }

    pub fn player_busted(&self) -> bool {
        self.player_value() > BLACKJACK_TARGET
    }

    /// Draw one more player card. Invalid once the player has busted or the
    /// hole card has been revealed.
    pub fn hit(&mut self, rng: &mut GameRng) -> Result<Card, GameError> {
        if self.player_busted() || self.hole_revealed {
            return Err(GameError::InvalidMove);
        }
        let card = rng.draw_card(&mut self.shoe).ok_or(GameError::DeckExhausted)?;
        self.player.push(card);
        debug!(card = %card, total = self.player_value(), "player hit");
        Ok(card)
    }

    /// Turn over the dealer's hole card. Idempotent.
    pub fn reveal_hole(&mut self) {
        self.hole_revealed = true;
    }

    /// Dealer play as a draw-at-a-time iterator.
    ///
    /// Reveals the hole card, then yields one card per draw so each can be
    /// shown before the next. The dealer draws while under 17 and stands on
    /// all 17s unless the rules say to hit soft 17.
    pub fn dealer_draws<'a>(&'a mut self, rng: &'a mut GameRng) -> DealerDraws<'a> {
        self.reveal_hole();
        DealerDraws { round: self, rng }
    }

    /// Settle the round against a bet in whole chips.
    pub fn resolve(&self, bet: u64) -> Outcome {
        resolve_scores(self.player_value(), hand_value(&self.dealer).0, bet)
    }
}

/// Settle final scores against a bet in whole chips.
///
/// Precedence: player bust loses regardless of the dealer's hand; then
/// dealer bust wins; then higher total wins; equal totals push (stake
/// returned). The payout is the total credited back. The scores are
/// snapshotted into the outcome so displays survive the round being cleared.
pub fn resolve_scores(player_score: u8, dealer_score: u8, bet: u64) -> Outcome {
    let (kind, payout) = if player_score > BLACKJACK_TARGET {
        (OutcomeKind::Loss, 0)
    } else if dealer_score > BLACKJACK_TARGET {
        (OutcomeKind::Win, bet * 2)
    } else if player_score > dealer_score {
        (OutcomeKind::Win, bet * 2)
    } else if player_score == dealer_score {
        (OutcomeKind::Push, bet)
    } else {
        (OutcomeKind::Loss, 0)
    };

    debug!(?kind, payout, player_score, dealer_score, "round resolved");
    Outcome {
        kind,
        payout,
        detail: OutcomeDetail::Blackjack {
            player_score,
            dealer_score,
        },
    }
}

/// Iterator over individual dealer draws; see [`BlackjackRound::dealer_draws`].
pub struct DealerDraws<'a> {
    round: &'a mut BlackjackRound,
    rng: &'a mut GameRng,
}

impl Iterator for DealerDraws<'_> {
    type Item = Result<Card, GameError>;

    fn next(&mut self) -> Option<Self::Item> {
        let (value, is_soft) = hand_value(&self.round.dealer);
        let must_stand = value > DEALER_STAND_TOTAL
            || (value == DEALER_STAND_TOTAL
                && (!is_soft || !self.round.rules.dealer_hits_soft_17));
        if must_stand {
            return None;
        }
        match self.rng.draw_card(&mut self.round.shoe) {
            Some(card) => {
                self.round.dealer.push(card);
                debug!(card = %card, total = hand_value(&self.round.dealer).0, "dealer drew");
                Some(Ok(card))
            }
            None => Some(Err(GameError::DeckExhausted)),
        }
    }
}

fn format_hand(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
