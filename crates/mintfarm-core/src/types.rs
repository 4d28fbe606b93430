//! Core protocol types: hashes, sub-account identities and ledger claim records.
//!
//! All token amounts are `u128` in the token's smallest unit. Timestamps are
//! Unix seconds as `u64`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::address::Address;

/// A 32-byte hash value.
///
/// Used for derivation salts and sub-account template identities.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
)]
pub struct Hash256(pub [u8; 32]);

impl Hash256 {
    /// The zero hash (32 zero bytes).
    pub const ZERO: Self = Self([0u8; 32]);

    /// Create a Hash256 from a byte array.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Return the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Check if this is the zero hash.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl From<[u8; 32]> for Hash256 {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Hash256 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Logical identity of a sub-account: the owner plus its per-owner sequence id.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubAccountId {
    /// Address that created and controls the sub-account.
    pub owner: Address,
    /// Zero-based position in the owner's slot sequence.
    pub index: u64,
}

impl SubAccountId {
    pub fn new(owner: Address, index: u64) -> Self {
        Self { owner, index }
    }
}

impl fmt::Display for SubAccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.owner, self.index)
    }
}

/// A pending claim as recorded by the external reward ledger.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ClaimInfo {
    /// The address that registered the claim (a sub-account).
    pub user: Address,
    /// Global rank assigned by the ledger at registration.
    pub rank: u64,
    /// Term in days.
    pub term_days: u64,
    /// Timestamp from which the claim is redeemable.
    pub maturity_ts: u64,
}

impl ClaimInfo {
    /// Whether the claim can be redeemed at `now`.
    pub fn is_mature(&self, now: u64) -> bool {
        now >= self.maturity_ts
    }

    /// Whether the claim has sat unredeemed for at least `grace_secs` past maturity.
    pub fn is_neglected(&self, now: u64, grace_secs: u64) -> bool {
        now >= self.maturity_ts.saturating_add(grace_secs)
    }
}

/// Result of a shared redemption: how the reward was divided.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ShareReceipt {
    /// Total reward redeemed.
    pub total: u128,
    /// Portion routed to the share recipient.
    pub shared: u128,
}

impl ShareReceipt {
    /// Portion routed to the primary recipient.
    pub fn kept(&self) -> u128 {
        self.total - self.shared
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claim(maturity_ts: u64) -> ClaimInfo {
        ClaimInfo {
            user: Address::ZERO,
            rank: 1,
            term_days: 1,
            maturity_ts,
        }
    }

    #[test]
    fn hash_display_is_lowercase_hex() {
        let h = Hash256([0xAB; 32]);
        assert_eq!(h.to_string(), "ab".repeat(32));
    }

    #[test]
    fn zero_hash_is_zero() {
        assert!(Hash256::ZERO.is_zero());
        assert!(!Hash256([1; 32]).is_zero());
    }

    #[test]
    fn claim_maturity_boundary() {
        let c = claim(1_000);
        assert!(!c.is_mature(999));
        assert!(c.is_mature(1_000));
        assert!(c.is_mature(1_001));
    }

    #[test]
    fn claim_neglect_requires_grace() {
        let c = claim(1_000);
        assert!(!c.is_neglected(1_000, 100));
        assert!(!c.is_neglected(1_099, 100));
        assert!(c.is_neglected(1_100, 100));
    }

    #[test]
    fn claim_neglect_saturates() {
        let c = claim(u64::MAX - 1);
        assert!(!c.is_neglected(u64::MAX - 1, 100));
        assert!(c.is_neglected(u64::MAX, 100));
    }

    #[test]
    fn share_receipt_kept() {
        let r = ShareReceipt {
            total: 100,
            shared: 20,
        };
        assert_eq!(r.kept(), 80);
    }

    #[test]
    fn sub_account_id_display() {
        let id = SubAccountId::new(Address([0x11; 20]), 7);
        assert_eq!(id.to_string(), format!("0x{}#7", "11".repeat(20)));
    }
}
