//! In-memory reward ledger and bonus token.
//!
//! [`MemoryLedger`] honours the observable contract of the external mint
//! ledger (one pending claim per caller, maturity gating, non-negative
//! rewards) with a deliberately simple reward formula:
//!
//! ```text
//! reward = log2(max(global_rank - claim_rank, 2)) * term_days * reward_per_day
//! ```
//!
//! [`MemoryToken`] is a balance map with a single mint authority. Both are
//! `Clone` so the manager can stage a batch against a copy and discard it on
//! failure. Suitable for tests and simulation; not a model of any deployed
//! ledger's economics.

use std::collections::HashMap;

use crate::address::Address;
use crate::constants::{
    LEDGER_MAX_TERM_DAYS, LEDGER_MIN_TERM_DAYS, LEDGER_REWARD_PER_DAY, SECONDS_PER_DAY,
};
use crate::error::{LedgerError, MintError};
use crate::traits::{ClaimRedeemer, ClaimRegistrar, Minter};
use crate::types::{ClaimInfo, ShareReceipt};

/// In-memory external reward ledger.
#[derive(Debug, Clone)]
pub struct MemoryLedger {
    /// Pending claims keyed by the registering address.
    claims: HashMap<Address, ClaimInfo>,
    /// Primary reward token balances.
    balances: HashMap<Address, u128>,
    /// Rank handed to the most recent registration.
    global_rank: u64,
    min_term_days: u64,
    max_term_days: u64,
    reward_per_day: u128,
    total_supply: u128,
}

impl MemoryLedger {
    /// Ledger with the default term bounds and reward rate.
    pub fn new() -> Self {
        Self::with_params(LEDGER_MIN_TERM_DAYS, LEDGER_MAX_TERM_DAYS, LEDGER_REWARD_PER_DAY)
    }

    pub fn with_params(min_term_days: u64, max_term_days: u64, reward_per_day: u128) -> Self {
        Self {
            claims: HashMap::new(),
            balances: HashMap::new(),
            global_rank: 0,
            min_term_days,
            max_term_days,
            reward_per_day,
            total_supply: 0,
        }
    }

    /// Rank of the most recent registration.
    pub fn global_rank(&self) -> u64 {
        self.global_rank
    }

    /// Number of claims registered and not yet redeemed.
    pub fn pending_count(&self) -> usize {
        self.claims.len()
    }

    /// Total primary reward credited so far.
    pub fn total_supply(&self) -> u128 {
        self.total_supply
    }

    /// Reward `claim` would pay if redeemed now.
    pub fn reward_for(&self, claim: &ClaimInfo) -> Result<u128, LedgerError> {
        let delta = self.global_rank.saturating_sub(claim.rank).max(2);
        let log2 = delta.ilog2() as u128;
        log2.checked_mul(claim.term_days as u128)
            .and_then(|v| v.checked_mul(self.reward_per_day))
            .ok_or(LedgerError::ArithmeticOverflow)
    }

    /// Reward of `caller`'s claim, provided it has matured.
    fn matured_reward(&self, caller: &Address, now: u64) -> Result<u128, LedgerError> {
        let claim = self
            .claims
            .get(caller)
            .ok_or_else(|| LedgerError::NoPendingClaim(caller.to_string()))?;
        if !claim.is_mature(now) {
            return Err(LedgerError::NotMatured {
                maturity_ts: claim.maturity_ts,
                now,
            });
        }
        self.reward_for(claim)
    }

    /// Retire `caller`'s claim and account for its `reward`.
    fn settle(&mut self, caller: &Address, reward: u128) -> Result<(), LedgerError> {
        self.total_supply = self
            .total_supply
            .checked_add(reward)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        self.claims.remove(caller);
        Ok(())
    }

    fn credit(&mut self, account: &Address, amount: u128) {
        if amount > 0 {
            *self.balances.entry(*account).or_default() += amount;
        }
    }
}

impl Default for MemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimRegistrar for MemoryLedger {
    fn register_claim(
        &mut self,
        caller: &Address,
        term_days: u64,
        now: u64,
    ) -> Result<(), LedgerError> {
        if term_days < self.min_term_days {
            return Err(LedgerError::TermTooShort {
                term_days,
                min_days: self.min_term_days,
            });
        }
        if term_days > self.max_term_days {
            return Err(LedgerError::TermTooLong {
                term_days,
                max_days: self.max_term_days,
            });
        }
        if self.claims.contains_key(caller) {
            return Err(LedgerError::ClaimAlreadyPending(caller.to_string()));
        }
        let maturity_ts = term_days
            .checked_mul(SECONDS_PER_DAY)
            .and_then(|secs| now.checked_add(secs))
            .ok_or(LedgerError::ArithmeticOverflow)?;

        self.global_rank += 1;
        self.claims.insert(
            *caller,
            ClaimInfo {
                user: *caller,
                rank: self.global_rank,
                term_days,
                maturity_ts,
            },
        );
        Ok(())
    }

    fn min_term_days(&self) -> u64 {
        self.min_term_days
    }
}

impl ClaimRedeemer for MemoryLedger {
    fn redeem_claim(
        &mut self,
        caller: &Address,
        recipient: &Address,
        now: u64,
    ) -> Result<u128, LedgerError> {
        let reward = self.matured_reward(caller, now)?;
        self.settle(caller, reward)?;
        self.credit(recipient, reward);
        Ok(reward)
    }

    fn redeem_claim_and_share(
        &mut self,
        caller: &Address,
        recipient: &Address,
        other: &Address,
        share_pct: u64,
        now: u64,
    ) -> Result<ShareReceipt, LedgerError> {
        if share_pct > 100 {
            return Err(LedgerError::InvalidShare(share_pct));
        }
        let total = self.matured_reward(caller, now)?;
        let shared = total
            .checked_mul(share_pct as u128)
            .ok_or(LedgerError::ArithmeticOverflow)?
            / 100;
        self.settle(caller, total)?;
        self.credit(other, shared);
        self.credit(recipient, total - shared);
        Ok(ShareReceipt { total, shared })
    }

    fn claim_of(&self, caller: &Address) -> Option<ClaimInfo> {
        self.claims.get(caller).cloned()
    }

    fn balance_of(&self, account: &Address) -> u128 {
        self.balances.get(account).copied().unwrap_or(0)
    }
}

/// In-memory bonus token with a single mint authority.
#[derive(Debug, Clone)]
pub struct MemoryToken {
    authority: Address,
    balances: HashMap<Address, u128>,
    total_supply: u128,
}

impl MemoryToken {
    /// Token mintable only by `authority` (normally the manager's address).
    pub fn new(authority: Address) -> Self {
        Self {
            authority,
            balances: HashMap::new(),
            total_supply: 0,
        }
    }

    pub fn authority(&self) -> Address {
        self.authority
    }

    /// Number of accounts with a non-zero balance.
    pub fn holder_count(&self) -> usize {
        self.balances.len()
    }
}

impl Minter for MemoryToken {
    fn mint(
        &mut self,
        caller: &Address,
        recipient: &Address,
        amount: u128,
    ) -> Result<(), MintError> {
        if *caller != self.authority {
            return Err(MintError::NotAuthority(caller.to_string()));
        }
        if recipient.is_zero() {
            return Err(MintError::ZeroRecipient);
        }
        if amount == 0 {
            return Ok(());
        }
        let supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(MintError::SupplyOverflow)?;
        self.total_supply = supply;
        *self.balances.entry(*recipient).or_default() += amount;
        Ok(())
    }

    fn balance_of(&self, account: &Address) -> u128 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    fn total_supply(&self) -> u128 {
        self.total_supply
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TOKEN_UNIT;

    const T0: u64 = 1_700_000_000;

    fn addr(seed: u8) -> Address {
        Address([seed; 20])
    }

    // --- registration ---

    #[test]
    fn register_sets_maturity_and_rank() {
        let mut l = MemoryLedger::new();
        l.register_claim(&addr(1), 3, T0).unwrap();
        let c = l.claim_of(&addr(1)).unwrap();
        assert_eq!(c.user, addr(1));
        assert_eq!(c.rank, 1);
        assert_eq!(c.term_days, 3);
        assert_eq!(c.maturity_ts, T0 + 3 * SECONDS_PER_DAY);
        assert_eq!(l.global_rank(), 1);
    }

    #[test]
    fn register_rejects_short_term() {
        let mut l = MemoryLedger::new();
        assert_eq!(
            l.register_claim(&addr(1), 0, T0),
            Err(LedgerError::TermTooShort {
                term_days: 0,
                min_days: 1
            })
        );
        assert_eq!(l.pending_count(), 0);
    }

    #[test]
    fn register_rejects_long_term() {
        let mut l = MemoryLedger::with_params(1, 10, 1);
        assert!(matches!(
            l.register_claim(&addr(1), 11, T0),
            Err(LedgerError::TermTooLong { .. })
        ));
    }

    #[test]
    fn one_pending_claim_per_caller() {
        let mut l = MemoryLedger::new();
        l.register_claim(&addr(1), 1, T0).unwrap();
        assert!(matches!(
            l.register_claim(&addr(1), 1, T0),
            Err(LedgerError::ClaimAlreadyPending(_))
        ));
        assert_eq!(l.global_rank(), 1);
    }

    // --- redemption ---

    #[test]
    fn redeem_before_maturity_fails() {
        let mut l = MemoryLedger::new();
        l.register_claim(&addr(1), 1, T0).unwrap();
        let err = l
            .redeem_claim(&addr(1), &addr(9), T0 + SECONDS_PER_DAY - 1)
            .unwrap_err();
        assert_eq!(
            err,
            LedgerError::NotMatured {
                maturity_ts: T0 + SECONDS_PER_DAY,
                now: T0 + SECONDS_PER_DAY - 1
            }
        );
        assert!(l.claim_of(&addr(1)).is_some());
    }

    #[test]
    fn redeem_credits_recipient_and_clears_claim() {
        let mut l = MemoryLedger::new();
        l.register_claim(&addr(1), 2, T0).unwrap();
        let got = l
            .redeem_claim(&addr(1), &addr(9), T0 + 2 * SECONDS_PER_DAY)
            .unwrap();
        // Single registration: rank delta clamps to 2, log2 = 1.
        assert_eq!(got, 2 * LEDGER_REWARD_PER_DAY);
        assert_eq!(l.balance_of(&addr(9)), got);
        assert_eq!(l.balance_of(&addr(1)), 0);
        assert!(l.claim_of(&addr(1)).is_none());
        assert_eq!(l.total_supply(), got);
    }

    #[test]
    fn redeem_without_claim_fails() {
        let mut l = MemoryLedger::new();
        assert!(matches!(
            l.redeem_claim(&addr(1), &addr(9), T0),
            Err(LedgerError::NoPendingClaim(_))
        ));
    }

    #[test]
    fn reward_grows_with_rank_delta() {
        let mut l = MemoryLedger::with_params(1, 100, TOKEN_UNIT);
        l.register_claim(&addr(1), 1, T0).unwrap();
        for i in 2..=9 {
            l.register_claim(&addr(i), 1, T0).unwrap();
        }
        // Delta for the first claim is 8 → log2 = 3.
        let first = l.claim_of(&addr(1)).unwrap();
        assert_eq!(l.reward_for(&first).unwrap(), 3 * TOKEN_UNIT);
        let last = l.claim_of(&addr(9)).unwrap();
        assert_eq!(l.reward_for(&last).unwrap(), TOKEN_UNIT);
    }

    #[test]
    fn shared_redeem_splits_by_percent() {
        let mut l = MemoryLedger::with_params(1, 100, 1_000);
        l.register_claim(&addr(1), 1, T0).unwrap();
        let r = l
            .redeem_claim_and_share(&addr(1), &addr(8), &addr(9), 20, T0 + SECONDS_PER_DAY)
            .unwrap();
        assert_eq!(r.total, 1_000);
        assert_eq!(r.shared, 200);
        assert_eq!(l.balance_of(&addr(9)), 200);
        assert_eq!(l.balance_of(&addr(8)), 800);
    }

    #[test]
    fn shared_redeem_rejects_bad_percent() {
        let mut l = MemoryLedger::new();
        l.register_claim(&addr(1), 1, T0).unwrap();
        assert_eq!(
            l.redeem_claim_and_share(&addr(1), &addr(8), &addr(9), 101, T0 + SECONDS_PER_DAY),
            Err(LedgerError::InvalidShare(101))
        );
        assert!(l.claim_of(&addr(1)).is_some());
    }

    #[test]
    fn shared_redeem_overflow_keeps_claim() {
        let mut l = MemoryLedger::with_params(1, 10, u128::MAX / 10);
        l.register_claim(&addr(1), 1, T0).unwrap();
        let now = T0 + SECONDS_PER_DAY;
        assert_eq!(
            l.redeem_claim_and_share(&addr(1), &addr(8), &addr(9), 20, now),
            Err(LedgerError::ArithmeticOverflow)
        );
        assert!(l.claim_of(&addr(1)).is_some());
        assert_eq!(l.total_supply(), 0);
        assert_eq!(l.balance_of(&addr(9)), 0);

        assert_eq!(l.redeem_claim(&addr(1), &addr(8), now).unwrap(), u128::MAX / 10);
    }

    #[test]
    fn clone_is_independent() {
        let mut l = MemoryLedger::new();
        l.register_claim(&addr(1), 1, T0).unwrap();
        let mut staged = l.clone();
        staged.redeem_claim(&addr(1), &addr(9), T0 + SECONDS_PER_DAY).unwrap();
        assert!(l.claim_of(&addr(1)).is_some());
        assert_eq!(l.balance_of(&addr(9)), 0);
    }

    // --- token ---

    #[test]
    fn token_mint_by_authority() {
        let mut t = MemoryToken::new(addr(7));
        t.mint(&addr(7), &addr(1), 50).unwrap();
        assert_eq!(t.balance_of(&addr(1)), 50);
        assert_eq!(t.total_supply(), 50);
        assert_eq!(t.holder_count(), 1);
    }

    #[test]
    fn token_mint_rejects_other_callers() {
        let mut t = MemoryToken::new(addr(7));
        assert!(matches!(
            t.mint(&addr(1), &addr(1), 50),
            Err(MintError::NotAuthority(_))
        ));
        assert_eq!(t.total_supply(), 0);
    }

    #[test]
    fn token_mint_rejects_zero_recipient() {
        let mut t = MemoryToken::new(addr(7));
        assert_eq!(
            t.mint(&addr(7), &Address::ZERO, 1),
            Err(MintError::ZeroRecipient)
        );
    }

    #[test]
    fn token_zero_amount_is_noop() {
        let mut t = MemoryToken::new(addr(7));
        t.mint(&addr(7), &addr(1), 0).unwrap();
        assert_eq!(t.holder_count(), 0);
    }

    #[test]
    fn token_supply_overflow() {
        let mut t = MemoryToken::new(addr(7));
        t.mint(&addr(7), &addr(1), u128::MAX).unwrap();
        assert_eq!(
            t.mint(&addr(7), &addr(2), 1),
            Err(MintError::SupplyOverflow)
        );
        assert_eq!(t.balance_of(&addr(2)), 0);
    }
}
