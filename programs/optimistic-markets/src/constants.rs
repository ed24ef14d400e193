/// Seconds between an outcome proposal and the end of its dispute window.
pub const DISPUTE_PERIOD_SECONDS: i64 = 5 * 60;

/// Seconds between the jury draw and the end of voting.
pub const VOTING_PERIOD_SECONDS: i64 = 15 * 60;

/// Number of jurors drawn per disputed market.
pub const JURY_SIZE: usize = 10;

/// Blocks after which the dispute block hash can no longer seed the jury draw.
pub const BLOCKHASH_WINDOW: u64 = 256;

/// Fixed-point scale used for the winner proportion in payout math.
pub const PAYOUT_SCALE: u128 = 1_000_000;

/// Decimal places of the settlement token.
pub const TOKEN_DECIMALS: u32 = 6;

/// 0.1 token.
pub const DEFAULT_PROPOSAL_BOND: u64 = 100_000;
/// 0.1 token.
pub const DEFAULT_MARKET_CREATION_STAKE: u64 = 100_000;
/// 0.5 token.
pub const DEFAULT_MIN_JUROR_STAKE: u64 = 500_000;

pub const MAX_QUESTION_LEN: usize = 256;
pub const MIN_MARKET_DURATION_SECONDS: i64 = 10 * 60;
pub const MAX_MARKET_DURATION_SECONDS: i64 = 365 * 24 * 60 * 60;

/// Remaining time at or below which a deadline is shown as a live countdown.
pub const COUNTDOWN_THRESHOLD_SECONDS: u64 = 30 * 60;

/// How often the caller re-reads the ledger for a visible market.
pub const POLL_INTERVAL_SECONDS: u64 = 3;

/// Substrings the ledger uses when rejecting a jury draw whose block hash is gone.
pub const BLOCKHASH_EXPIRY_MARKERS: [&str; 2] = ["Blockhash not available", "256 blocks"];
