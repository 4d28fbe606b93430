//! Account addresses and deterministic sub-account derivation.
//!
//! Addresses are 20 bytes, rendered as `0x`-prefixed lowercase hex. The
//! all-zero address is the sentinel for an empty registry slot.
//!
//! Sub-account addresses follow the CREATE2 construction with SHA-256 in place
//! of Keccak:
//!
//! ```text
//! salt    = SHA-256(owner ‖ index as u64 big-endian)
//! address = SHA-256(0xff ‖ manager ‖ salt ‖ template)[12..32]
//! ```
//!
//! The address is a pure function of its inputs, so callers can predict it
//! before the sub-account exists.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

use crate::constants::{DERIVATION_PREFIX, SUB_ACCOUNT_TEMPLATE_LABEL};
use crate::error::AddressError;
use crate::types::Hash256;

/// Address length in bytes.
pub const ADDRESS_LEN: usize = 20;

/// A 20-byte account address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address(pub [u8; ADDRESS_LEN]);

impl Address {
    /// The empty-slot sentinel.
    pub const ZERO: Self = Self([0u8; ADDRESS_LEN]);

    pub fn from_bytes(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; ADDRESS_LEN]
    }

    /// A throwaway address derived from a human label.
    ///
    /// Used by fixtures and the simulator to name participants. Never zero in
    /// practice; BLAKE3 output is truncated to 20 bytes.
    pub fn from_label(label: &str) -> Self {
        let digest = blake3::hash(label.as_bytes());
        let mut bytes = [0u8; ADDRESS_LEN];
        bytes.copy_from_slice(&digest.as_bytes()[..ADDRESS_LEN]);
        Self(bytes)
    }

    /// Encode as `0x`-prefixed lowercase hex.
    pub fn encode(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Parse a `0x`-prefixed hex address. Case-insensitive.
    pub fn decode(s: &str) -> Result<Self, AddressError> {
        let body = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or(AddressError::MissingPrefix)?;
        if body.len() != ADDRESS_LEN * 2 {
            return Err(AddressError::InvalidLength(body.len()));
        }
        let mut bytes = [0u8; ADDRESS_LEN];
        hex::decode_to_slice(body, &mut bytes)
            .map_err(|e| AddressError::InvalidHex(e.to_string()))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.encode())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.encode())
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

impl From<[u8; ADDRESS_LEN]> for Address {
    fn from(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::decode(&s).map_err(serde::de::Error::custom)
    }
}

/// Identity of the code every sub-account proxy is instantiated from.
///
/// Plays the role of the init-code hash in the address preimage, so two
/// managers built from different proxy templates never collide.
pub fn default_template() -> Hash256 {
    Hash256(blake3::hash(SUB_ACCOUNT_TEMPLATE_LABEL.as_bytes()).into())
}

/// Per-slot salt: `SHA-256(owner ‖ index_be)`.
pub fn sub_account_salt(owner: &Address, index: u64) -> Hash256 {
    let mut hasher = Sha256::new();
    hasher.update(owner.as_bytes());
    hasher.update(index.to_be_bytes());
    Hash256(hasher.finalize().into())
}

/// Deterministic address of the sub-account at `(owner, index)` under `manager`.
pub fn derive_sub_account(
    manager: &Address,
    template: &Hash256,
    owner: &Address,
    index: u64,
) -> Address {
    let salt = sub_account_salt(owner, index);
    let mut hasher = Sha256::new();
    hasher.update([DERIVATION_PREFIX]);
    hasher.update(manager.as_bytes());
    hasher.update(salt.as_bytes());
    hasher.update(template.as_bytes());
    let digest: [u8; 32] = hasher.finalize().into();
    let mut bytes = [0u8; ADDRESS_LEN];
    bytes.copy_from_slice(&digest[32 - ADDRESS_LEN..]);
    Address(bytes)
}
