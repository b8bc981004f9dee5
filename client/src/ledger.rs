//! Balance custody for the mock path.
//!
//! In the mock variant this **is** the ledger; in the live variant the same
//! interface sits as a read-through cache over the external contract's
//! `balanceOf`. The ledger is an explicit object shared by handle, never
//! ambient state.

use crate::{Error, Result};
use chiphouse_types::casino::{
    chips_to_withdrawal, deposit_to_chips, FREE_CLAIM_AMOUNT, STARTING_CHIPS,
};
use std::sync::{Arc, Mutex};
use tracing::debug;

/// In-memory chip ledger.
#[derive(Debug)]
pub struct MockLedger {
    balance: u64,
    free_claimed: bool,
}

/// Handle shared between a session and its mock table backend.
///
/// Debits and credits are serialized behind the session's single-flight
/// guard; the mutex only protects the shared read path.
pub type SharedLedger = Arc<Mutex<MockLedger>>;

impl MockLedger {
    pub fn new(balance: u64) -> Self {
        Self {
            balance,
            free_claimed: false,
        }
    }

    /// Shared ledger with the standard starting balance.
    pub fn shared() -> SharedLedger {
        Arc::new(Mutex::new(Self::new(STARTING_CHIPS)))
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    /// Remove chips; fails without mutation on overdraft.
    pub fn debit(&mut self, amount: u64) -> Result<()> {
        if amount > self.balance {
            return Err(Error::InsufficientFunds {
                needed: amount,
                available: self.balance,
            });
        }
        self.balance -= amount;
        debug!(amount, balance = self.balance, "debited");
        Ok(())
    }

    pub fn credit(&mut self, amount: u64) {
        self.balance += amount;
        debug!(amount, balance = self.balance, "credited");
    }

    /// One-time free chip grant; the claimed flag persists for the identity's
    /// lifetime.
    pub fn claim_free_chips(&mut self) -> Result<u64> {
        if self.free_claimed {
            return Err(Error::AlreadyClaimed);
        }
        self.free_claimed = true;
        self.balance += FREE_CLAIM_AMOUNT;
        debug!(balance = self.balance, "claimed free chips");
        Ok(FREE_CLAIM_AMOUNT)
    }

    pub fn free_claimed(&self) -> bool {
        self.free_claimed
    }

    /// Credit a deposit of the external asset (18-decimal wire units).
    /// Returns the chips credited.
    pub fn deposit(&mut self, wire_amount: u128) -> Result<u64> {
        let chips = deposit_to_chips(wire_amount)?;
        self.balance += chips;
        debug!(chips, balance = self.balance, "deposit converted");
        Ok(chips)
    }

    /// Debit chips for a cashout. Returns the external wire amount owed.
    pub fn withdraw(&mut self, chips: u64) -> Result<u128> {
        self.debit(chips)?;
        Ok(chips_to_withdrawal(chips))
    }
}
