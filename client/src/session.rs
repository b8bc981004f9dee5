//! Game-session state machine.
//!
//! Reconciles asynchronous table reads and user intents into a coherent
//! state across Start -> Play -> Resolve. One logical actor drives the
//! session; the `in_flight` guard makes actions single-flight and strictly
//! ordered. Every failure is recovered here into a user-facing message.

use crate::events::{channel, EventSink, TableEvent, TableEvents};
use crate::ledger::SharedLedger;
use crate::table::TableBackend;
use crate::{Error, Result};
use chiphouse_engine::blackjack::{hand_value, resolve_scores};
use chiphouse_engine::{dice, roll_over, roulette, slots, GameRng};
use chiphouse_types::casino::{
    decode_cards, to_wire_amount, Card, DiceBet, Outcome, RollOverBet, RouletteBet, SlotsBet,
    BLACKJACK_TARGET,
};
use serde::Serialize;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Bounded wait applied to each external confirmation.
#[derive(Clone, Copy, Debug)]
pub struct ConfirmationPolicy {
    pub wait: Duration,
}

impl Default for ConfirmationPolicy {
    fn default() -> Self {
        Self {
            wait: Duration::from_secs(30),
        }
    }
}

/// Session lifecycle states.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SessionStatus {
    Idle,
    Playing,
    PlayerStood,
    GameOver,
}

/// Read-only snapshot for the presentation layer.
#[derive(Clone, Debug, Serialize)]
pub struct GameState {
    pub status: SessionStatus,
    pub player_hand: Vec<Card>,
    pub dealer_hand: Vec<Card>,
    pub player_score: u8,
    pub dealer_score: u8,
    pub bet: u64,
    pub balance: u64,
    pub message: Option<String>,
    pub in_flight: bool,
    pub pending_result: Option<Outcome>,
    pub last_result: Option<Outcome>,
}

/// One player's game session.
///
/// Owns the blackjack lifecycle against the table backend and plays the
/// single-shot games (dice, roll-over, roulette, slots) locally against the
/// engine. Exactly one session per identity is active at a time.
///
/// The async action methods are not cancel-safe: each returned future must
/// be driven to completion (including its timeout). Dropping one mid-await
/// abandons the action with the single-flight guard still held, and every
/// later intent is rejected with [`Error::SessionBusy`].
pub struct Session<B: TableBackend> {
    backend: B,
    ledger: SharedLedger,
    policy: ConfirmationPolicy,
    rng: GameRng,
    events: EventSink,

    status: SessionStatus,
    player_hand: Vec<Card>,
    dealer_hand: Vec<Card>,
    bet: u64,
    /// Outcome captured at resolution, not yet acknowledged by the display.
    pending_result: Option<Outcome>,
    /// Last acknowledged outcome, retained for display.
    last_result: Option<Outcome>,
    in_flight: bool,
    message: Option<String>,
}

impl<B: TableBackend> Session<B> {
    /// Create a session and the event stream feeding the presentation layer.
    pub fn new(backend: B, ledger: SharedLedger, rng: GameRng) -> (Self, TableEvents) {
        Self::with_policy(backend, ledger, rng, ConfirmationPolicy::default())
    }

    pub fn with_policy(
        backend: B,
        ledger: SharedLedger,
        rng: GameRng,
        policy: ConfirmationPolicy,
    ) -> (Self, TableEvents) {
        let (events, stream) = channel(0);
        let session = Self {
            backend,
            ledger,
            policy,
            rng,
            events,
            status: SessionStatus::Idle,
            player_hand: Vec::new(),
            dealer_hand: Vec::new(),
            bet: 0,
            pending_result: None,
            last_result: None,
            in_flight: false,
            message: None,
        };
        (session, stream)
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn balance(&self) -> u64 {
        self.lock_ledger().balance()
    }

    /// Read-only snapshot of everything the presentation layer renders.
    pub fn snapshot(&self) -> GameState {
        GameState {
            status: self.status,
            player_hand: self.player_hand.clone(),
            dealer_hand: self.dealer_hand.clone(),
            player_score: hand_value(&self.player_hand).0,
            dealer_score: hand_value(&self.dealer_hand).0,
            bet: self.bet,
            balance: self.balance(),
            message: self.message.clone(),
            in_flight: self.in_flight,
            pending_result: self.pending_result.clone(),
            last_result: self.last_result.clone(),
        }
    }

    fn lock_ledger(&self) -> std::sync::MutexGuard<'_, crate::MockLedger> {
        match self.ledger.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Wrap one external confirmation in the bounded wait.
    async fn confirmed<T, F>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        match tokio::time::timeout(self.policy.wait, fut).await {
            Ok(result) => result,
            Err(_) => Err(Error::Timeout),
        }
    }

    /// Enter the single-flight section; rejects while an action is
    /// outstanding, including one abandoned mid-await.
    fn begin_action(&mut self) -> Result<()> {
        if self.in_flight {
            return Err(Error::SessionBusy);
        }
        self.in_flight = true;
        self.message = None;
        Ok(())
    }

    /// Leave the single-flight section, converting a failure into the
    /// user-facing message. State mutations never precede a confirmed step,
    /// so a failure leaves the session as it was.
    fn finish_action<T>(&mut self, result: Result<T>) -> Result<T> {
        self.in_flight = false;
        if let Err(err) = &result {
            let text = err.to_string();
            warn!(error = %text, "action failed");
            self.message = Some(text.clone());
            self.events.emit(TableEvent::Message(text));
        }
        result
    }

    fn emit_balance(&self) {
        self.events.emit(TableEvent::BalanceChanged(self.balance()));
    }

    /// Place a bet and deal a blackjack round.
    ///
    /// Rejects a zero or overdrawn bet before any mutation. Sequences an
    /// `approve` ahead of the bet when the table's allowance is short; both
    /// steps sit behind the bounded confirmation wait.
    pub async fn start_game(&mut self, bet: u64) -> Result<()> {
        self.begin_action()?;
        let result = self.start_game_inner(bet).await;
        self.finish_action(result)
    }

    async fn start_game_inner(&mut self, bet: u64) -> Result<()> {
        if self.status != SessionStatus::Idle {
            return Err(Error::ActionRejected("round already in progress".into()));
        }
        let balance = self.balance();
        if bet == 0 || bet > balance {
            return Err(Error::InvalidBet(bet, balance));
        }

        let wire_bet = to_wire_amount(bet);
        let allowance = self.backend.allowance().await?;
        if allowance < wire_bet {
            // A timed-out approval is still an approval failure; the approve
            // step is the one to retry.
            self.confirmed(self.backend.approve(wire_bet))
                .await
                .map_err(|err| Error::ApprovalFailed(err.to_string()))?;
        }

        self.confirmed(self.backend.start_game(bet)).await?;

        // Only mutate after the external step confirmed.
        self.bet = bet;
        self.player_hand = decode_cards(&self.backend.player_cards().await?);
        self.dealer_hand = decode_cards(&self.backend.dealer_cards().await?);
        self.status = SessionStatus::Playing;
        for card in &self.player_hand {
            self.events.emit(TableEvent::PlayerCard(*card));
        }
        for card in &self.dealer_hand {
            self.events.emit(TableEvent::DealerCard(*card));
        }
        self.emit_balance();
        debug!(bet, "round started");
        Ok(())
    }

    /// Draw one more card. A bust short-circuits straight to `GameOver`
    /// without the dealer drawing.
    pub async fn hit(&mut self) -> Result<()> {
        self.begin_action()?;
        let result = self.hit_inner().await;
        self.finish_action(result)
    }

    async fn hit_inner(&mut self) -> Result<()> {
        if self.status != SessionStatus::Playing {
            return Err(Error::ActionRejected("not your turn".into()));
        }
        self.confirmed(self.backend.hit()).await?;

        let cards = decode_cards(&self.backend.player_cards().await?);
        if let Some(card) = cards.last() {
            self.events.emit(TableEvent::PlayerCard(*card));
        }
        self.player_hand = cards;
        let (score, _) = hand_value(&self.player_hand);
        debug!(score, "player hit");
        if score > BLACKJACK_TARGET {
            self.status = SessionStatus::GameOver;
        }
        Ok(())
    }

    /// Stop drawing; the dealer's hand plays out. Each dealer card becomes
    /// visible as its own event before the round settles.
    pub async fn stand(&mut self) -> Result<()> {
        self.begin_action()?;
        let result = self.stand_inner().await;
        self.finish_action(result)
    }

    async fn stand_inner(&mut self) -> Result<()> {
        if self.status != SessionStatus::Playing {
            return Err(Error::ActionRejected("not your turn".into()));
        }
        // No optimistic transition: the state only moves once the external
        // step confirms.
        self.confirmed(self.backend.stand()).await?;
        self.status = SessionStatus::PlayerStood;

        let dealer = decode_cards(&self.backend.dealer_cards().await?);
        for card in &dealer[self.dealer_hand.len()..] {
            self.events.emit(TableEvent::DealerCard(*card));
        }
        self.dealer_hand = dealer;
        self.status = SessionStatus::GameOver;
        debug!(dealer_score = hand_value(&self.dealer_hand).0, "dealer done");
        Ok(())
    }

    /// Settle the finished round. A no-op in any other state.
    ///
    /// The final scores are snapshotted into the outcome **before** hands
    /// are cleared, so the result stays displayable after the session
    /// resets; the outcome parks in `pending_result` until acknowledged.
    pub async fn resolve_game(&mut self) -> Result<()> {
        if self.status != SessionStatus::GameOver {
            return Ok(());
        }
        self.begin_action()?;
        let result = self.resolve_game_inner().await;
        self.finish_action(result)
    }

    async fn resolve_game_inner(&mut self) -> Result<()> {
        let (player_score, _) = hand_value(&self.player_hand);
        let (dealer_score, _) = hand_value(&self.dealer_hand);
        let outcome = resolve_scores(player_score, dealer_score, self.bet);

        self.confirmed(self.backend.resolve_game()).await?;
        self.lock_ledger().credit(outcome.payout);

        // Snapshot first, clear after: the display may lag the reset.
        self.pending_result = Some(outcome.clone());
        self.player_hand.clear();
        self.dealer_hand.clear();
        self.bet = 0;
        self.status = SessionStatus::Idle;
        self.events.emit(TableEvent::RoundResolved(outcome));
        self.emit_balance();
        Ok(())
    }

    /// Acknowledge the pending outcome, promoting it to `last_result`.
    pub fn acknowledge_result(&mut self) -> Option<Outcome> {
        let outcome = self.pending_result.take()?;
        self.last_result = Some(outcome.clone());
        Some(outcome)
    }

    /// Debit, play, credit for the single-shot games.
    fn play_local<F>(&mut self, total_stake: u64, play: F) -> Result<Outcome>
    where
        F: FnOnce(&mut GameRng) -> Result<Outcome>,
    {
        self.begin_action()?;
        let result = (|| {
            let balance = self.balance();
            if total_stake == 0 || total_stake > balance {
                return Err(Error::InvalidBet(total_stake, balance));
            }
            self.lock_ledger().debit(total_stake)?;
            let outcome = play(&mut self.rng)?;
            self.lock_ledger().credit(outcome.payout);
            self.last_result = Some(outcome.clone());
            self.events.emit(TableEvent::RoundResolved(outcome.clone()));
            self.emit_balance();
            Ok(outcome)
        })();
        self.finish_action(result)
    }

    /// Play one discrete dice roll.
    pub fn play_dice(&mut self, bet: DiceBet, amount: u64) -> Result<Outcome> {
        bet.validate()?;
        self.play_local(amount, |rng| Ok(dice::play(bet, amount, rng)?))
    }

    /// Play one continuous roll-over round.
    pub fn play_roll_over(&mut self, bet: RollOverBet, amount: u64) -> Result<Outcome> {
        self.play_local(amount, |rng| Ok(roll_over::play(bet, amount, rng)?))
    }

    /// Spin the wheel with a set of simultaneous bets.
    pub fn play_roulette(&mut self, bets: &[RouletteBet]) -> Result<Outcome> {
        for bet in bets {
            bet.validate()?;
        }
        let total: u64 = bets.iter().map(|b| b.amount).sum();
        self.play_local(total, |rng| Ok(roulette::play(bets, rng)?))
    }

    /// Spin the reels.
    pub fn play_slots(&mut self, bet: SlotsBet) -> Result<Outcome> {
        bet.validate()?;
        let paytable = slots::SlotsPaytable::default();
        self.play_local(bet.total(), move |rng| Ok(slots::play(bet, &paytable, rng)?))
    }

    /// Deposit the external asset; returns chips credited.
    pub async fn deposit(&mut self, wire_amount: u128) -> Result<u64> {
        self.begin_action()?;
        let result = self.confirmed(self.backend.deposit_eth(wire_amount)).await;
        if result.is_ok() {
            self.emit_balance();
        }
        self.finish_action(result)
    }

    /// Cash out chips; returns the external wire amount owed.
    pub async fn withdraw(&mut self, chips: u64) -> Result<u128> {
        self.begin_action()?;
        let result = self.confirmed(self.backend.cashout_chip(chips)).await;
        if result.is_ok() {
            self.emit_balance();
        }
        self.finish_action(result)
    }

    /// One-time free chip grant.
    pub async fn claim_free_chips(&mut self) -> Result<u64> {
        self.begin_action()?;
        let result = self.confirmed(self.backend.claim_free_chips()).await;
        if result.is_ok() {
            self.emit_balance();
        }
        self.finish_action(result)
    }
}
