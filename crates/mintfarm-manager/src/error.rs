//! Manager error types.

use mintfarm_core::error::{CurveError, LedgerError, MintError};
use thiserror::Error;

/// Errors surfaced by batch operations and registry queries.
///
/// Every variant is reported before any state is committed; a failed batch
/// leaves the registry, the ledger and the bonus token untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ManagerError {
    /// A sub-account proxy was invoked by someone other than its manager.
    #[error("access denied: {invoker} may not drive proxy {proxy}")]
    AccessDenied {
        /// Proxy address.
        proxy: String,
        /// Offending invoker.
        invoker: String,
    },

    /// Requested term is below the ledger's minimum.
    #[error("term too short: {term_days} < {min_days} days")]
    TermTooShort {
        /// Requested term in days.
        term_days: u64,
        /// Ledger minimum in days.
        min_days: u64,
    },

    /// Range is malformed or reaches past the owner's slot count.
    #[error("range [{start}, {end}] out of bounds for {total} sub-accounts")]
    OutOfRange {
        /// First index requested.
        start: u64,
        /// Last index requested (inclusive).
        end: u64,
        /// Owner's total slot count.
        total: u64,
    },

    /// A claim in the batch has not matured yet.
    #[error("sub-account {index} matures at {maturity_ts}, now {now}")]
    MaturityNotReached {
        /// Offending slot index.
        index: u64,
        /// Claim maturity timestamp.
        maturity_ts: u64,
        /// Time at which the call was evaluated.
        now: u64,
    },

    /// A slot in the batch was already claimed or rescued.
    #[error("sub-account {index} already claimed")]
    AlreadyClaimed {
        /// Offending slot index.
        index: u64,
    },

    /// Caller lacks the role required by a privileged operation.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// A batch creation asked for zero sub-accounts.
    #[error("empty batch")]
    EmptyBatch,

    /// A proxy operation was attempted from the wrong lifecycle state.
    #[error("proxy {proxy} is {state}")]
    ProxyState {
        /// Proxy address.
        proxy: String,
        /// Current state name.
        state: &'static str,
    },

    /// Manager configuration failed validation.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Counter or amount overflow.
    #[error("arithmetic overflow")]
    ArithmeticOverflow,

    /// Error from the external reward ledger.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Error from the bonus token.
    #[error(transparent)]
    Mint(#[from] MintError),

    /// Error from the reward curve.
    #[error(transparent)]
    Curve(#[from] CurveError),
}
