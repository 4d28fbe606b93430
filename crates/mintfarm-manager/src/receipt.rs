//! Results of batch operations.

use serde::{Deserialize, Serialize};

use mintfarm_core::address::Address;

/// Sub-accounts created by one `batch_create` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateReceipt {
    pub owner: Address,
    /// Id of the first new sub-account.
    pub first_index: u64,
    pub addresses: Vec<Address>,
    pub term_days: u64,
    /// Latest maturity across the batch.
    pub maturity_ts: u64,
}

impl CreateReceipt {
    /// Id of the last new sub-account.
    pub fn last_index(&self) -> u64 {
        self.first_index + self.addresses.len() as u64 - 1
    }
}

/// Outcome of one `batch_claim` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimReceipt {
    pub owner: Address,
    pub start: u64,
    pub end: u64,
    /// Primary reward redeemed across the range, credited to the owner.
    pub raw_total: u128,
    /// Elapsed week the bonus was priced at.
    pub week: u64,
    /// Total bonus minted.
    pub bonus: u128,
    pub owner_bonus: u128,
    pub fee: u128,
    pub fee_receiver: Address,
}

/// Split of a successful rescue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RescueReceipt {
    pub owner: Address,
    pub rescuer: Address,
    pub start: u64,
    pub end: u64,
    pub raw_total: u128,
    /// Primary reward routed to the rescuer.
    pub rescuer_reward: u128,
    pub week: u64,
    pub bonus: u128,
    pub owner_bonus: u128,
    pub rescuer_bonus: u128,
}

impl RescueReceipt {
    /// Primary reward routed to the owner.
    pub fn owner_reward(&self) -> u128 {
        self.raw_total - self.rescuer_reward
    }
}

/// Result of `batch_rescue`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RescueOutcome {
    /// At least one claim was still inside its grace window; nothing changed.
    Skipped {
        /// Earliest time at which the whole range becomes rescuable.
        not_before: u64,
    },
    Rescued(RescueReceipt),
}

impl RescueOutcome {
    pub fn is_rescued(&self) -> bool {
        matches!(self, RescueOutcome::Rescued(_))
    }

    pub fn receipt(&self) -> Option<&RescueReceipt> {
        match self {
            RescueOutcome::Rescued(r) => Some(r),
            RescueOutcome::Skipped { .. } => None,
        }
    }
}
