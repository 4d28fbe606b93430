//! Manager configuration.
//!
//! [`ManagerConfig`] is fixed at construction except for the fee receiver and
//! rescuer, which the manager owner may change. [`FeeSchedule`] holds the
//! split ratios; they vary between deployments, so none is hard-wired into
//! the orchestration code.

use serde::{Deserialize, Serialize};

use mintfarm_core::address::{default_template, Address};
use mintfarm_core::constants::{
    BPS_PRECISION, DEFAULT_CLAIM_FEE_BPS, DEFAULT_RESCUE_GRACE_SECS, DEFAULT_RESCUE_SHARE_BPS,
};
use mintfarm_core::types::Hash256;

use crate::error::ManagerError;

/// Split ratios and the rescue neglect window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeSchedule {
    /// Portion of a normal claim's bonus routed to the fee receiver, in bps.
    pub claim_fee_bps: u64,
    /// Portion of a rescued reward and bonus routed to the rescuer, in bps.
    ///
    /// Must be a whole percentage: the ledger shares in percent.
    pub rescue_share_bps: u64,
    /// Seconds past maturity before a claim counts as abandoned.
    pub rescue_grace_secs: u64,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            claim_fee_bps: DEFAULT_CLAIM_FEE_BPS,
            rescue_share_bps: DEFAULT_RESCUE_SHARE_BPS,
            rescue_grace_secs: DEFAULT_RESCUE_GRACE_SECS,
        }
    }
}

impl FeeSchedule {
    pub fn validate(&self) -> Result<(), ManagerError> {
        if self.claim_fee_bps > BPS_PRECISION {
            return Err(ManagerError::InvalidConfig(format!(
                "claim_fee_bps {} exceeds {BPS_PRECISION}",
                self.claim_fee_bps
            )));
        }
        if self.rescue_share_bps > BPS_PRECISION {
            return Err(ManagerError::InvalidConfig(format!(
                "rescue_share_bps {} exceeds {BPS_PRECISION}",
                self.rescue_share_bps
            )));
        }
        if self.rescue_share_bps % 100 != 0 {
            return Err(ManagerError::InvalidConfig(format!(
                "rescue_share_bps {} is not a whole percentage",
                self.rescue_share_bps
            )));
        }
        Ok(())
    }

    /// Rescue share as the whole percentage the ledger expects.
    pub fn rescue_share_pct(&self) -> u64 {
        self.rescue_share_bps / 100
    }

    /// Fee receiver's cut of a claim bonus.
    pub fn claim_fee(&self, bonus: u128) -> u128 {
        apply_bps(bonus, self.claim_fee_bps)
    }

    /// Rescuer's cut of a rescued amount.
    pub fn rescue_share(&self, amount: u128) -> u128 {
        apply_bps(amount, self.rescue_share_bps)
    }
}

/// `amount * bps / 10_000` without intermediate overflow.
fn apply_bps(amount: u128, bps: u64) -> u128 {
    let bps = bps as u128;
    let precision = BPS_PRECISION as u128;
    // Split to keep the product inside u128 for any amount.
    (amount / precision) * bps + (amount % precision) * bps / precision
}

/// Process-wide manager settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerConfig {
    /// The manager's own address: mint authority and sole proxy invoker.
    pub manager: Address,
    /// Sub-account proxy template identity, hashed into every derived address.
    pub template: Hash256,
    /// Timestamp at which week 0 of the reward curve begins.
    pub deploy_ts: u64,
    /// Administrator allowed to change the fee receiver and rescuer.
    pub owner: Address,
    /// Additional address allowed to rescue abandoned claims.
    pub rescuer: Address,
    /// Recipient of the claim fee.
    pub fee_receiver: Address,
    /// Split ratios.
    pub fees: FeeSchedule,
}

impl ManagerConfig {
    /// Config with the default template and fees; owner doubles as rescuer and
    /// fee receiver.
    pub fn new(manager: Address, owner: Address, deploy_ts: u64) -> Self {
        Self {
            manager,
            template: default_template(),
            deploy_ts,
            owner,
            rescuer: owner,
            fee_receiver: owner,
            fees: FeeSchedule::default(),
        }
    }

    pub fn with_fee_receiver(mut self, fee_receiver: Address) -> Self {
        self.fee_receiver = fee_receiver;
        self
    }

    pub fn with_rescuer(mut self, rescuer: Address) -> Self {
        self.rescuer = rescuer;
        self
    }

    pub fn with_fees(mut self, fees: FeeSchedule) -> Self {
        self.fees = fees;
        self
    }

    pub fn validate(&self) -> Result<(), ManagerError> {
        if self.manager.is_zero() {
            return Err(ManagerError::InvalidConfig("manager address is zero".into()));
        }
        if self.owner.is_zero() {
            return Err(ManagerError::InvalidConfig("owner address is zero".into()));
        }
        if self.fee_receiver.is_zero() {
            return Err(ManagerError::InvalidConfig("fee receiver is zero".into()));
        }
        self.fees.validate()
    }

    /// Whether `caller` may run a rescue.
    pub fn can_rescue(&self, caller: &Address) -> bool {
        *caller == self.owner || (!self.rescuer.is_zero() && *caller == self.rescuer)
    }
}
