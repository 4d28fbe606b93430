//! Protocol constants. Token amounts use 18 decimals.

/// One whole token in base units.
pub const TOKEN_UNIT: u128 = 1_000_000_000_000_000_000;

/// Seconds per day. Ledger terms are expressed in days.
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Seconds per week. The reward curve advances one entry per elapsed week.
pub const SECONDS_PER_WEEK: u64 = 7 * SECONDS_PER_DAY;

/// Fixed-point denominator of the reward curve (parts-per-billion).
pub const MULTIPLIER_PRECISION: u64 = 1_000_000_000;

/// Denominator for fee and share ratios expressed in basis points.
pub const BPS_PRECISION: u64 = 10_000;

/// Default portion of a claim's bonus mint routed to the fee receiver (5%).
pub const DEFAULT_CLAIM_FEE_BPS: u64 = 500;

/// Default portion of a rescued reward and bonus routed to the rescuer (20%, i.e. 1:4).
pub const DEFAULT_RESCUE_SHARE_BPS: u64 = 2_000;

/// Default neglect window past maturity before a claim may be rescued.
pub const DEFAULT_RESCUE_GRACE_SECS: u64 = 14 * SECONDS_PER_DAY;

/// Shortest term the in-memory ledger accepts.
pub const LEDGER_MIN_TERM_DAYS: u64 = 1;

/// Longest term the in-memory ledger accepts by default.
pub const LEDGER_MAX_TERM_DAYS: u64 = 100;

/// Default in-memory ledger reward per term day per unit of log2 rank delta.
pub const LEDGER_REWARD_PER_DAY: u128 = 3_000 * TOKEN_UNIT;

/// Domain string hashed into the default sub-account template identity.
pub const SUB_ACCOUNT_TEMPLATE_LABEL: &str = "mintfarm-sub-account-proxy-v1";

/// Prefix byte of the CREATE2-style address preimage.
pub const DERIVATION_PREFIX: u8 = 0xff;
