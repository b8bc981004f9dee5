/// Implied decimal places for amounts crossing the external-contract boundary.
pub const CHIP_DECIMALS: u32 = 18;

/// Fixed-point scale for boundary amounts (10^18).
pub const WIRE_SCALE: u128 = 1_000_000_000_000_000_000;

/// Starting balance for a fresh mock ledger.
pub const STARTING_CHIPS: u64 = 1_000;

/// One-time free-claim grant per identity.
pub const FREE_CLAIM_AMOUNT: u64 = 1_000;

/// Deposit/withdraw conversion rate: chips credited per unit of the external asset.
pub const CHIPS_PER_ETH: u64 = 100_000;

/// Minimum accepted bet, in whole chips.
pub const MIN_BET: u64 = 1;

/// Maximum accepted bet, in whole chips.
pub const MAX_BET: u64 = 10_000;

/// Blackjack dealer must draw to at least this total.
pub const DEALER_STAND_TOTAL: u8 = 17;

/// Blackjack bust boundary.
pub const BLACKJACK_TARGET: u8 = 21;

/// Pockets on a European roulette wheel.
pub const ROULETTE_POCKETS: u8 = 37;

/// Roll-over dice domain: thresholds and rolls are hundredths over [0, 100).
pub const ROLL_OVER_SCALE: u32 = 10_000;

/// Roll-over dice RTP numerator: multiplier = 99_000_000 / win_chance (both
/// in hundredths), yielding a 99% return target.
pub const ROLL_OVER_RTP_NUMERATOR: u64 = 99_000_000;
