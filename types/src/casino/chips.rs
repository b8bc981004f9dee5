//! Fixed-point conversion at the external-contract boundary.
//!
//! Internal arithmetic runs on whole chips (`u64`). Amounts cross the
//! boundary as 18-decimal fixed-point integers (`u128`); conversion happens
//! here and nowhere else.

use crate::casino::{CHIPS_PER_ETH, WIRE_SCALE};
use thiserror::Error;

/// A conversion at the boundary could not be represented exactly.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChipConversionError {
    #[error("wire amount has a fractional chip component")]
    FractionalAmount,
    #[error("wire amount exceeds the representable chip range")]
    AmountTooLarge,
}

/// Scale a whole-chip amount up to its 18-decimal wire representation.
pub fn to_wire_amount(chips: u64) -> u128 {
    u128::from(chips) * WIRE_SCALE
}

/// Scale an 18-decimal wire amount down to whole chips.
///
/// Conversion is lossless or rejected: a fractional remainder or an amount
/// beyond `u64` is an error, never silently truncated.
pub fn from_wire_amount(wire: u128) -> Result<u64, ChipConversionError> {
    if wire % WIRE_SCALE != 0 {
        return Err(ChipConversionError::FractionalAmount);
    }
    let whole = wire / WIRE_SCALE;
    u64::try_from(whole).map_err(|_| ChipConversionError::AmountTooLarge)
}

/// Chips credited for a deposit of the external asset (18-decimal wire units).
///
/// Sub-chip dust truncates toward zero; the house keeps the remainder.
pub fn deposit_to_chips(wire_eth: u128) -> Result<u64, ChipConversionError> {
    let chips = wire_eth
        .checked_mul(u128::from(CHIPS_PER_ETH))
        .ok_or(ChipConversionError::AmountTooLarge)?
        / WIRE_SCALE;
    u64::try_from(chips).map_err(|_| ChipConversionError::AmountTooLarge)
}

/// External-asset wire amount returned when cashing out whole chips.
pub fn chips_to_withdrawal(chips: u64) -> u128 {
    u128::from(chips) * (WIRE_SCALE / u128::from(CHIPS_PER_ETH))
}
