//! Trait interfaces between the manager and its collaborators.
//!
//! - [`ClaimRegistrar`] / [`ClaimRedeemer`]: the external reward ledger
//! - [`Minter`]: the bonus token the manager is mint authority of
//! - [`Clock`]: wall-clock source read once per operation
//! - [`RewardCurve`]: elapsed-week multiplier math (mintfarm-curve implements)
//!
//! Every ledger call names its `caller` explicitly. The ledger keys claims by
//! caller address, which is why each logical sub-account needs its own proxy
//! address.

use crate::address::Address;
use crate::error::{CurveError, LedgerError, MintError};
use crate::types::{ClaimInfo, ShareReceipt};

/// Registration half of the external reward ledger.
pub trait ClaimRegistrar {
    /// Register a time-locked claim for `caller` with a term of `term_days`.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::TermTooShort`] / [`LedgerError::TermTooLong`] outside the accepted range
    /// - [`LedgerError::ClaimAlreadyPending`] if `caller` already holds a claim
    fn register_claim(&mut self, caller: &Address, term_days: u64, now: u64)
    -> Result<(), LedgerError>;

    /// Shortest accepted term in days.
    fn min_term_days(&self) -> u64;
}

/// Redemption half of the external reward ledger.
pub trait ClaimRedeemer {
    /// Redeem `caller`'s matured claim, crediting the whole reward to `recipient`.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::NoPendingClaim`] if `caller` holds no claim
    /// - [`LedgerError::NotMatured`] if `now` precedes the maturity timestamp
    fn redeem_claim(
        &mut self,
        caller: &Address,
        recipient: &Address,
        now: u64,
    ) -> Result<u128, LedgerError>;

    /// Redeem `caller`'s matured claim, crediting `share_pct` percent to `other`
    /// and the remainder to `recipient`.
    fn redeem_claim_and_share(
        &mut self,
        caller: &Address,
        recipient: &Address,
        other: &Address,
        share_pct: u64,
        now: u64,
    ) -> Result<ShareReceipt, LedgerError>;

    /// The pending claim registered by `caller`, if any.
    fn claim_of(&self, caller: &Address) -> Option<ClaimInfo>;

    /// Primary reward token balance of `account`.
    fn balance_of(&self, account: &Address) -> u128;
}

/// The full external ledger surface the manager drives.
pub trait ClaimLedger: ClaimRegistrar + ClaimRedeemer {}

impl<T: ClaimRegistrar + ClaimRedeemer> ClaimLedger for T {}

/// Bonus token mint primitive.
pub trait Minter {
    /// Mint `amount` to `recipient` on behalf of `caller`.
    ///
    /// # Errors
    ///
    /// - [`MintError::NotAuthority`] if `caller` may not mint
    /// - [`MintError::ZeroRecipient`] when minting to the sentinel address
    fn mint(&mut self, caller: &Address, recipient: &Address, amount: u128)
    -> Result<(), MintError>;

    fn balance_of(&self, account: &Address) -> u128;

    fn total_supply(&self) -> u128;
}

/// Source of the current Unix time in seconds.
pub trait Clock {
    fn now(&self) -> u64;
}

/// Conversion of protocol age into a bonus-mint multiplier.
///
/// Multipliers are fixed-point parts-per-billion of the theoretical maximum.
pub trait RewardCurve {
    /// Whole weeks elapsed between `deploy_ts` and `now` (0 before deploy).
    fn elapsed_weeks(&self, now: u64, deploy_ts: u64) -> u64;

    /// Cumulative multiplier unlocked through week `week` (saturating).
    fn cumulative_multiplier(&self, week: u64) -> u64;

    /// Multiplier unlocked during week `week` alone. Zero past the horizon.
    fn weekly_multiplier(&self, week: u64) -> u64;

    /// Bonus owed on `raw_amount` of primary reward claimed during week `week`.
    fn bonus_amount(&self, raw_amount: u128, week: u64) -> Result<u128, CurveError>;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> u64 {
        (**self).now()
    }
}
