//! The external-collaborator boundary.
//!
//! [`TableBackend`] carries the reads and actions the session exchanges
//! with the table contract. Amounts cross this boundary as 18-decimal wire
//! integers. [`MockTable`] implements the boundary over the local engine
//! with a simulated confirmation delay; the live variant would submit
//! transactions and poll reads instead.

use crate::ledger::SharedLedger;
use crate::{Error, Result};
use chiphouse_engine::blackjack::{BlackjackRound, BlackjackRules};
use chiphouse_engine::GameRng;
use chiphouse_types::casino::{to_wire_amount, GameData};
use std::sync::Mutex;
use std::time::Duration;
use tracing::debug;

/// Boundary contract with the external table.
#[allow(async_fn_in_trait)]
pub trait TableBackend {
    /// A blackjack round is in progress for this identity.
    async fn is_in_game(&self) -> Result<bool>;

    /// Player cards as wire indices.
    async fn player_cards(&self) -> Result<Vec<u8>>;

    /// Dealer cards currently visible, as wire indices. The hole card is
    /// absent until the dealer's hand plays out.
    async fn dealer_cards(&self) -> Result<Vec<u8>>;

    /// Round snapshot.
    async fn game_data(&self) -> Result<GameData>;

    /// Balance in wire units.
    async fn balance_of(&self) -> Result<u128>;

    /// Remaining table allowance in wire units.
    async fn allowance(&self) -> Result<u128>;

    /// Authorize the table to debit up to `amount` wire units.
    async fn approve(&self, amount: u128) -> Result<()>;

    /// Place a bet and deal. The bet is debited on acceptance.
    async fn start_game(&self, bet: u64) -> Result<()>;

    /// Draw one more player card.
    async fn hit(&self) -> Result<()>;

    /// Stop drawing; the dealer's hand plays out.
    async fn stand(&self) -> Result<()>;

    /// Clear the finished round.
    async fn resolve_game(&self) -> Result<()>;

    /// Deposit the external asset; returns chips credited.
    async fn deposit_eth(&self, wire_amount: u128) -> Result<u64>;

    /// Cash out chips; returns the wire amount owed.
    async fn cashout_chip(&self, chips: u64) -> Result<u128>;

    /// One-time free chip grant; returns chips credited.
    async fn claim_free_chips(&self) -> Result<u64>;
}

struct MockState {
    round: Option<BlackjackRound>,
    bet: u64,
    player_stood: bool,
    allowance: u128,
}

/// Mock table: the engine standing in for the contract.
///
/// Shares the [`MockLedger`](crate::MockLedger) with the session; the bet
/// is debited here on `start_game`, matching the contract taking custody of
/// the stake. Resolution credit is applied by the session, where the mock
/// path settles locally.
pub struct MockTable {
    ledger: SharedLedger,
    state: Mutex<MockState>,
    rng: Mutex<GameRng>,
    rules: BlackjackRules,
    delay: Duration,
}

impl MockTable {
    pub fn new(ledger: SharedLedger, rng: GameRng) -> Self {
        Self {
            ledger,
            state: Mutex::new(MockState {
                round: None,
                bet: 0,
                player_stood: false,
                allowance: 0,
            }),
            rng: Mutex::new(rng),
            rules: BlackjackRules::default(),
            delay: Duration::ZERO,
        }
    }

    /// Simulated confirmation delay applied to every call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_rules(mut self, rules: BlackjackRules) -> Self {
        self.rules = rules;
        self
    }

    async fn confirm(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, MockState> {
        // Mutex poisoning cannot outlive the mock; propagate the inner state.
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn lock_rng(&self) -> std::sync::MutexGuard<'_, GameRng> {
        match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn lock_ledger(&self) -> std::sync::MutexGuard<'_, crate::MockLedger> {
        match self.ledger.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl TableBackend for MockTable {
    async fn is_in_game(&self) -> Result<bool> {
        Ok(self.lock_state().round.is_some())
    }

    async fn player_cards(&self) -> Result<Vec<u8>> {
        let state = self.lock_state();
        let round = state.round.as_ref().ok_or(Error::NoActiveRound)?;
        Ok(round.player_hand().iter().map(|c| c.index()).collect())
    }

    async fn dealer_cards(&self) -> Result<Vec<u8>> {
        let state = self.lock_state();
        let round = state.round.as_ref().ok_or(Error::NoActiveRound)?;
        Ok(round
            .visible_dealer_hand()
            .iter()
            .map(|c| c.index())
            .collect())
    }

    async fn game_data(&self) -> Result<GameData> {
        let state = self.lock_state();
        let (bet, dealer_done) = match &state.round {
            Some(round) => (state.bet, state.player_stood || round.player_busted()),
            None => (0, false),
        };
        Ok(GameData {
            bet,
            is_active: state.round.is_some(),
            player_stood: state.player_stood,
            dealer_done,
        })
    }

    async fn balance_of(&self) -> Result<u128> {
        Ok(to_wire_amount(self.lock_ledger().balance()))
    }

    async fn allowance(&self) -> Result<u128> {
        Ok(self.lock_state().allowance)
    }

    async fn approve(&self, amount: u128) -> Result<()> {
        self.confirm().await;
        self.lock_state().allowance = amount;
        debug!(amount, "allowance set");
        Ok(())
    }

    async fn start_game(&self, bet: u64) -> Result<()> {
        self.confirm().await;
        let mut rng = self.lock_rng();
        let mut state = self.lock_state();
        if state.round.is_some() {
            return Err(Error::ActionRejected("round already active".into()));
        }
        let wire_bet = to_wire_amount(bet);
        if state.allowance < wire_bet {
            return Err(Error::ActionRejected("insufficient allowance".into()));
        }
        self.lock_ledger().debit(bet)?;
        state.allowance -= wire_bet;
        let round = BlackjackRound::deal(self.rules, &mut rng)?;
        state.round = Some(round);
        state.bet = bet;
        state.player_stood = false;
        Ok(())
    }

    async fn hit(&self) -> Result<()> {
        self.confirm().await;
        let mut rng = self.lock_rng();
        let mut state = self.lock_state();
        if state.player_stood {
            return Err(Error::ActionRejected("player already stood".into()));
        }
        let round = state.round.as_mut().ok_or(Error::NoActiveRound)?;
        round.hit(&mut rng)?;
        Ok(())
    }

    async fn stand(&self) -> Result<()> {
        self.confirm().await;
        let mut rng = self.lock_rng();
        let mut state = self.lock_state();
        if state.player_stood {
            return Err(Error::ActionRejected("player already stood".into()));
        }
        let round = state.round.as_mut().ok_or(Error::NoActiveRound)?;
        if round.player_busted() {
            return Err(Error::ActionRejected("player busted".into()));
        }
        let mut draws = round.dealer_draws(&mut rng);
        while let Some(draw) = draws.next() {
            draw?;
        }
        state.player_stood = true;
        Ok(())
    }

    async fn resolve_game(&self) -> Result<()> {
        self.confirm().await;
        let mut state = self.lock_state();
        if state.round.is_none() {
            return Err(Error::NoActiveRound);
        }
        state.round = None;
        state.bet = 0;
        state.player_stood = false;
        Ok(())
    }

    async fn deposit_eth(&self, wire_amount: u128) -> Result<u64> {
        self.confirm().await;
        self.lock_ledger().deposit(wire_amount)
    }

    async fn cashout_chip(&self, chips: u64) -> Result<u128> {
        self.confirm().await;
        self.lock_ledger().withdraw(chips)
    }

    async fn claim_free_chips(&self) -> Result<u64> {
        self.confirm().await;
        self.lock_ledger().claim_free_chips()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MockLedger;

    fn mock_table(seed: u64) -> MockTable {
        MockTable::new(MockLedger::shared(), GameRng::from_seed(seed))
    }

    #[tokio::test]
    async fn test_start_requires_allowance() {
        let table = mock_table(1);
        let err = table.start_game(100).await.unwrap_err();
        assert!(matches!(err, Error::ActionRejected(_)));
        assert!(!table.is_in_game().await.unwrap());

        table.approve(to_wire_amount(100)).await.unwrap();
        table.start_game(100).await.unwrap();
        assert!(table.is_in_game().await.unwrap());
        assert_eq!(table.allowance().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_start_debits_bet() {
        let table = mock_table(1);
        table.approve(to_wire_amount(100)).await.unwrap();
        table.start_game(100).await.unwrap();
        assert_eq!(table.balance_of().await.unwrap(), to_wire_amount(900));
    }

    #[tokio::test]
    async fn test_double_start_rejected() {
        let table = mock_table(1);
        table.approve(to_wire_amount(200)).await.unwrap();
        table.start_game(100).await.unwrap();
        assert!(matches!(
            table.start_game(100).await,
            Err(Error::ActionRejected(_))
        ));
    }

    #[tokio::test]
    async fn test_hole_card_hidden_until_stand() {
        let table = mock_table(1);
        table.approve(to_wire_amount(100)).await.unwrap();
        table.start_game(100).await.unwrap();
        assert_eq!(table.dealer_cards().await.unwrap().len(), 1);
        assert_eq!(table.player_cards().await.unwrap().len(), 2);

        let data = table.game_data().await.unwrap();
        assert!(data.is_active);
        assert!(!data.player_stood);

        table.stand().await.unwrap();
        assert!(table.dealer_cards().await.unwrap().len() >= 2);
        let data = table.game_data().await.unwrap();
        assert!(data.player_stood);
        assert!(data.dealer_done);
    }

    #[tokio::test]
    async fn test_resolve_clears_round() {
        let table = mock_table(1);
        table.approve(to_wire_amount(100)).await.unwrap();
        table.start_game(100).await.unwrap();
        table.stand().await.unwrap();
        table.resolve_game().await.unwrap();
        assert!(!table.is_in_game().await.unwrap());
        assert!(matches!(
            table.resolve_game().await,
            Err(Error::NoActiveRound)
        ));
    }
}
