//! Batch orchestration over the registry, the ledger and the bonus token.
//!
//! Every mutating call follows the same shape:
//!
//! 1. Read the clock once.
//! 2. Validate the whole batch against current state.
//! 3. Run the ledger and mint calls against clones of both collaborators.
//! 4. Zero registry slots, then swap the clones in.
//!
//! A failure at any step returns before step 4, so callers observe either
//! the complete batch or no change at all.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use mintfarm_core::address::Address;
use mintfarm_core::error::LedgerError;
use mintfarm_core::traits::{ClaimLedger, Clock, Minter, RewardCurve};
use mintfarm_core::types::ClaimInfo;
use mintfarm_curve::CurveEngine;

use crate::config::ManagerConfig;
use crate::error::ManagerError;
use crate::proxy::SubAccountProxy;
use crate::receipt::{ClaimReceipt, CreateReceipt, RescueOutcome, RescueReceipt};
use crate::registry::WalletRegistry;

/// A live sub-account and its pending ledger claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubAccountInfo {
    pub index: u64,
    pub address: Address,
    pub claim: ClaimInfo,
}

/// The wallet manager: owner of the registry and every collaborator.
pub struct WalletManager<L, M, C> {
    config: ManagerConfig,
    registry: WalletRegistry,
    ledger: L,
    minter: M,
    clock: C,
    curve: Box<dyn RewardCurve>,
}

impl<L, M, C> WalletManager<L, M, C>
where
    L: ClaimLedger + Clone,
    M: Minter + Clone,
    C: Clock,
{
    /// Build a manager around the given collaborators with the default curve.
    pub fn new(config: ManagerConfig, ledger: L, minter: M, clock: C) -> Result<Self, ManagerError> {
        config.validate()?;
        let registry = WalletRegistry::new(config.manager, config.template);
        info!(
            manager = %config.manager,
            owner = %config.owner,
            deploy_ts = config.deploy_ts,
            "manager: initialized"
        );
        Ok(Self {
            config,
            registry,
            ledger,
            minter,
            clock,
            curve: Box::new(CurveEngine::new()),
        })
    }

    /// Replace the reward curve.
    pub fn with_curve(mut self, curve: impl RewardCurve + 'static) -> Self {
        self.curve = Box::new(curve);
        self
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    pub fn registry(&self) -> &WalletRegistry {
        &self.registry
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn minter(&self) -> &M {
        &self.minter
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    // --- batch operations ---

    /// Create `count` sub-accounts for `caller`, each registering a claim of
    /// `term_days` with the ledger.
    ///
    /// # Errors
    ///
    /// - [`ManagerError::EmptyBatch`] if `count` is zero
    /// - [`ManagerError::TermTooShort`] below the ledger minimum
    /// - [`ManagerError::Ledger`] if any registration fails
    pub fn batch_create(
        &mut self,
        caller: &Address,
        count: u64,
        term_days: u64,
    ) -> Result<CreateReceipt, ManagerError> {
        let now = self.clock.now();
        let first_index = self.registry.count_for(caller);

        let mut ledger = self.ledger.clone();
        let addresses = self
            .registry
            .allocate(caller, count, term_days, &mut ledger, now)?;
        let maturity_ts = addresses
            .iter()
            .filter_map(|a| ledger.claim_of(a))
            .map(|c| c.maturity_ts)
            .max()
            .unwrap_or(now);
        self.ledger = ledger;

        info!(
            owner = %caller,
            first_index,
            count,
            term_days,
            maturity_ts,
            "manager: batch created"
        );
        Ok(CreateReceipt {
            owner: *caller,
            first_index,
            addresses,
            term_days,
            maturity_ts,
        })
    }

    /// Claim `caller`'s matured sub-accounts `[start, end]` and mint the bonus.
    ///
    /// The primary reward goes to `caller`. The bonus is split between
    /// `caller` and the fee receiver per the fee schedule.
    ///
    /// # Errors
    ///
    /// - [`ManagerError::OutOfRange`] for a malformed or oversized range
    /// - [`ManagerError::AlreadyClaimed`] if any slot is already zeroed
    /// - [`ManagerError::MaturityNotReached`] if any claim is still locked
    pub fn batch_claim(
        &mut self,
        caller: &Address,
        start: u64,
        end: u64,
    ) -> Result<ClaimReceipt, ManagerError> {
        let now = self.clock.now();
        let owner = *caller;
        let proxies = self.live_proxies(&owner, start, end)?;
        for (index, proxy) in &proxies {
            let claim = self.pending_claim(proxy)?;
            if !claim.is_mature(now) {
                return Err(ManagerError::MaturityNotReached {
                    index: *index,
                    maturity_ts: claim.maturity_ts,
                    now,
                });
            }
        }

        let manager = self.config.manager;
        let mut ledger = self.ledger.clone();
        let mut raw_total = 0u128;
        for (_, mut proxy) in proxies {
            let amount = proxy.redeem(&manager, &mut ledger, &owner, now)?;
            raw_total = raw_total
                .checked_add(amount)
                .ok_or(ManagerError::ArithmeticOverflow)?;
        }

        let week = self.curve.elapsed_weeks(now, self.config.deploy_ts);
        let bonus = self.curve.bonus_amount(raw_total, week)?;
        let fee = self.config.fees.claim_fee(bonus);
        let owner_bonus = bonus - fee;
        let fee_receiver = self.config.fee_receiver;

        let mut minter = self.minter.clone();
        mint_nonzero(&mut minter, &manager, &owner, owner_bonus)?;
        mint_nonzero(&mut minter, &manager, &fee_receiver, fee)?;

        self.registry.zero(&owner, start, end)?;
        self.ledger = ledger;
        self.minter = minter;

        info!(
            %owner,
            start,
            end,
            week,
            raw_total = %raw_total,
            bonus = %bonus,
            fee = %fee,
            "manager: batch claimed"
        );
        Ok(ClaimReceipt {
            owner,
            start,
            end,
            raw_total,
            week,
            bonus,
            owner_bonus,
            fee,
            fee_receiver,
        })
    }

    /// Redeem `owner`'s abandoned sub-accounts `[start, end]` on their behalf.
    ///
    /// Only the manager owner or the rescuer may call this, and never for
    /// their own sub-accounts. If any matured claim in the range has not yet
    /// been neglected for the grace window, nothing happens and
    /// [`RescueOutcome::Skipped`] is returned. Otherwise the caller receives
    /// the rescue share of both the primary reward and the bonus, and
    /// `owner` receives the rest.
    ///
    /// # Errors
    ///
    /// - [`ManagerError::Unauthorized`] for a caller without the role, or
    ///   one rescuing their own range
    /// - [`ManagerError::OutOfRange`] and [`ManagerError::AlreadyClaimed`]
    ///   as for [`Self::batch_claim`]
    /// - [`ManagerError::MaturityNotReached`] if any claim is still locked
    pub fn batch_rescue(
        &mut self,
        caller: &Address,
        owner: &Address,
        start: u64,
        end: u64,
    ) -> Result<RescueOutcome, ManagerError> {
        if !self.config.can_rescue(caller) {
            return Err(ManagerError::Unauthorized(format!(
                "{caller} is not the owner or rescuer"
            )));
        }
        if caller == owner {
            return Err(ManagerError::Unauthorized(format!(
                "{caller} cannot rescue its own sub-accounts"
            )));
        }
        let now = self.clock.now();
        let proxies = self.live_proxies(owner, start, end)?;

        let grace = self.config.fees.rescue_grace_secs;
        let mut not_before = 0u64;
        let mut premature = false;
        for (index, proxy) in &proxies {
            let claim = self.pending_claim(proxy)?;
            if !claim.is_mature(now) {
                return Err(ManagerError::MaturityNotReached {
                    index: *index,
                    maturity_ts: claim.maturity_ts,
                    now,
                });
            }
            not_before = not_before.max(claim.maturity_ts.saturating_add(grace));
            premature |= !claim.is_neglected(now, grace);
        }
        if premature {
            debug!(%owner, start, end, now, not_before, "manager: rescue skipped");
            return Ok(RescueOutcome::Skipped { not_before });
        }

        let manager = self.config.manager;
        let share_pct = self.config.fees.rescue_share_pct();
        let mut ledger = self.ledger.clone();
        let mut raw_total = 0u128;
        let mut rescuer_reward = 0u128;
        for (_, mut proxy) in proxies {
            let share =
                proxy.redeem_and_share(&manager, &mut ledger, owner, caller, share_pct, now)?;
            raw_total = raw_total
                .checked_add(share.total)
                .ok_or(ManagerError::ArithmeticOverflow)?;
            rescuer_reward = rescuer_reward
                .checked_add(share.shared)
                .ok_or(ManagerError::ArithmeticOverflow)?;
        }

        let week = self.curve.elapsed_weeks(now, self.config.deploy_ts);
        let bonus = self.curve.bonus_amount(raw_total, week)?;
        let rescuer_bonus = self.config.fees.rescue_share(bonus);
        let owner_bonus = bonus - rescuer_bonus;

        let mut minter = self.minter.clone();
        mint_nonzero(&mut minter, &manager, owner, owner_bonus)?;
        mint_nonzero(&mut minter, &manager, caller, rescuer_bonus)?;

        self.registry.zero(owner, start, end)?;
        self.ledger = ledger;
        self.minter = minter;

        warn!(
            %owner,
            rescuer = %caller,
            start,
            end,
            raw_total = %raw_total,
            bonus = %bonus,
            "manager: abandoned claims rescued"
        );
        Ok(RescueOutcome::Rescued(RescueReceipt {
            owner: *owner,
            rescuer: *caller,
            start,
            end,
            raw_total,
            rescuer_reward,
            week,
            bonus,
            owner_bonus,
            rescuer_bonus,
        }))
    }

    // --- administration ---

    pub fn set_fee_receiver(
        &mut self,
        caller: &Address,
        fee_receiver: Address,
    ) -> Result<(), ManagerError> {
        self.require_owner(caller)?;
        if fee_receiver.is_zero() {
            return Err(ManagerError::InvalidConfig("fee receiver is zero".into()));
        }
        info!(old = %self.config.fee_receiver, new = %fee_receiver, "manager: fee receiver changed");
        self.config.fee_receiver = fee_receiver;
        Ok(())
    }

    /// Set the rescuer. The zero address leaves only the owner able to rescue.
    pub fn set_rescuer(&mut self, caller: &Address, rescuer: Address) -> Result<(), ManagerError> {
        self.require_owner(caller)?;
        info!(old = %self.config.rescuer, new = %rescuer, "manager: rescuer changed");
        self.config.rescuer = rescuer;
        Ok(())
    }

    // --- queries ---

    pub fn wallet_count(&self, owner: &Address) -> u64 {
        self.registry.count_for(owner)
    }

    pub fn active_wallet_count(&self, owner: &Address) -> u64 {
        self.registry.active_for(owner)
    }

    /// Slots `[start, end]` of `owner`; zeroed slots appear as [`Address::ZERO`].
    pub fn wallets(&self, owner: &Address, start: u64, end: u64) -> Result<Vec<Address>, ManagerError> {
        Ok(self.registry.range_of(owner, start, end)?.to_vec())
    }

    /// Ledger records of the live sub-accounts in `[start, end]`.
    pub fn claim_infos(
        &self,
        owner: &Address,
        start: u64,
        end: u64,
    ) -> Result<Vec<SubAccountInfo>, ManagerError> {
        let slots = self.registry.range_of(owner, start, end)?;
        Ok((start..)
            .zip(slots)
            .filter(|(_, a)| !a.is_zero())
            .filter_map(|(index, a)| {
                self.ledger.claim_of(a).map(|claim| SubAccountInfo {
                    index,
                    address: *a,
                    claim,
                })
            })
            .collect())
    }

    pub fn predict_address(&self, owner: &Address, index: u64) -> Address {
        self.registry.predict(owner, index)
    }

    /// Whole weeks since deploy at the current clock reading.
    pub fn elapsed_weeks(&self) -> u64 {
        self.curve.elapsed_weeks(self.clock.now(), self.config.deploy_ts)
    }

    pub fn weekly_multiplier(&self, week: u64) -> u64 {
        self.curve.weekly_multiplier(week)
    }

    pub fn cumulative_multiplier(&self, week: u64) -> u64 {
        self.curve.cumulative_multiplier(week)
    }

    /// Bonus a claim of `raw_amount` would mint right now, before fees.
    pub fn bonus_preview(&self, raw_amount: u128) -> Result<u128, ManagerError> {
        Ok(self.curve.bonus_amount(raw_amount, self.elapsed_weeks())?)
    }

    // --- helpers ---

    fn require_owner(&self, caller: &Address) -> Result<(), ManagerError> {
        if *caller != self.config.owner {
            return Err(ManagerError::Unauthorized(format!(
                "{caller} is not the manager owner"
            )));
        }
        Ok(())
    }

    /// Copies of the proxies behind `[start, end]`, failing on any zeroed slot.
    fn live_proxies(
        &self,
        owner: &Address,
        start: u64,
        end: u64,
    ) -> Result<Vec<(u64, SubAccountProxy)>, ManagerError> {
        let slots = self.registry.range_of(owner, start, end)?;
        let mut proxies = Vec::with_capacity(slots.len());
        for (index, slot) in (start..).zip(slots) {
            let Some(proxy) = self.registry.proxy(slot) else {
                return Err(ManagerError::AlreadyClaimed { index });
            };
            proxies.push((index, proxy.clone()));
        }
        Ok(proxies)
    }

    fn pending_claim(&self, proxy: &SubAccountProxy) -> Result<ClaimInfo, ManagerError> {
        self.ledger
            .claim_of(&proxy.address())
            .ok_or_else(|| LedgerError::NoPendingClaim(proxy.address().to_string()).into())
    }
}

fn mint_nonzero<M: Minter>(
    minter: &mut M,
    manager: &Address,
    recipient: &Address,
    amount: u128,
) -> Result<(), ManagerError> {
    if amount > 0 {
        minter.mint(manager, recipient, amount)?;
    }
    Ok(())
}
