//! Per-owner sub-account registry.
//!
//! Each owner holds an append-only sequence of slots. Slot `i` stores the
//! derived address of sub-account `(owner, i)` until the sub-account is
//! claimed or rescued, after which it holds [`Address::ZERO`] forever. Ids
//! are never recycled, so `total` only grows.

use std::collections::HashMap;

use tracing::debug;

use mintfarm_core::address::{derive_sub_account, Address};
use mintfarm_core::traits::ClaimRegistrar;
use mintfarm_core::types::Hash256;

use crate::error::ManagerError;
use crate::proxy::SubAccountProxy;

/// One owner's slot sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnerEntry {
    slots: Vec<Address>,
    active: u64,
}

impl OwnerEntry {
    /// Ever-created slot count.
    pub fn total(&self) -> u64 {
        self.slots.len() as u64
    }

    /// Slots not yet claimed or rescued.
    pub fn active(&self) -> u64 {
        self.active
    }

    pub fn slots(&self) -> &[Address] {
        &self.slots
    }
}

/// All owners' sub-accounts plus the live proxies behind them.
#[derive(Debug, Clone)]
pub struct WalletRegistry {
    manager: Address,
    template: Hash256,
    entries: HashMap<Address, OwnerEntry>,
    /// Live proxies keyed by their derived address.
    proxies: HashMap<Address, SubAccountProxy>,
}

impl WalletRegistry {
    pub fn new(manager: Address, template: Hash256) -> Self {
        Self {
            manager,
            template,
            entries: HashMap::new(),
            proxies: HashMap::new(),
        }
    }

    /// Address sub-account `(owner, index)` has or will have.
    pub fn predict(&self, owner: &Address, index: u64) -> Address {
        derive_sub_account(&self.manager, &self.template, owner, index)
    }

    /// Create `count` sub-accounts for `owner` and register each with `ledger`.
    ///
    /// New ids start at the owner's current total. Nothing is recorded unless
    /// every registration succeeds; the caller owns rollback of `ledger`.
    pub fn allocate<L>(
        &mut self,
        owner: &Address,
        count: u64,
        term_days: u64,
        ledger: &mut L,
        now: u64,
    ) -> Result<Vec<Address>, ManagerError>
    where
        L: ClaimRegistrar + ?Sized,
    {
        if count == 0 {
            return Err(ManagerError::EmptyBatch);
        }
        let min_days = ledger.min_term_days();
        if term_days < min_days {
            return Err(ManagerError::TermTooShort { term_days, min_days });
        }

        let first = self.count_for(owner);
        let end = first
            .checked_add(count)
            .ok_or(ManagerError::ArithmeticOverflow)?;

        let mut staged = Vec::with_capacity(count as usize);
        for index in first..end {
            let mut proxy = SubAccountProxy::new(self.manager, &self.template, *owner, index);
            if self.proxies.contains_key(&proxy.address()) {
                return Err(ManagerError::ProxyState {
                    proxy: proxy.address().to_string(),
                    state: "occupied",
                });
            }
            proxy.register(&self.manager, ledger, term_days, now)?;
            staged.push(proxy);
        }

        let entry = self.entries.entry(*owner).or_default();
        let active = entry
            .active
            .checked_add(count)
            .ok_or(ManagerError::ArithmeticOverflow)?;
        let addresses: Vec<Address> = staged.iter().map(SubAccountProxy::address).collect();
        entry.slots.extend_from_slice(&addresses);
        entry.active = active;
        for proxy in staged {
            self.proxies.insert(proxy.address(), proxy);
        }

        debug!(%owner, first, count, term_days, "registry: allocated sub-accounts");
        Ok(addresses)
    }

    /// Slots `[start, end]` of `owner`, zeroed ones included.
    pub fn range_of(&self, owner: &Address, start: u64, end: u64) -> Result<&[Address], ManagerError> {
        let total = self.count_for(owner);
        if start > end || end >= total {
            return Err(ManagerError::OutOfRange { start, end, total });
        }
        let slots = self
            .entries
            .get(owner)
            .map(OwnerEntry::slots)
            .unwrap_or_default();
        Ok(&slots[start as usize..=end as usize])
    }

    pub fn count_for(&self, owner: &Address) -> u64 {
        self.entries.get(owner).map_or(0, OwnerEntry::total)
    }

    pub fn active_for(&self, owner: &Address) -> u64 {
        self.entries.get(owner).map_or(0, OwnerEntry::active)
    }

    pub fn entry(&self, owner: &Address) -> Option<&OwnerEntry> {
        self.entries.get(owner)
    }

    /// Zero slots `[start, end]` and drop their proxies.
    ///
    /// Returns how many slots were live before the call. Already-zero slots
    /// are skipped, so repeating the call is harmless.
    pub fn zero(&mut self, owner: &Address, start: u64, end: u64) -> Result<u64, ManagerError> {
        let total = self.count_for(owner);
        if start > end || end >= total {
            return Err(ManagerError::OutOfRange { start, end, total });
        }
        let Some(entry) = self.entries.get_mut(owner) else {
            return Err(ManagerError::OutOfRange { start, end, total });
        };

        let mut zeroed = 0u64;
        for slot in &mut entry.slots[start as usize..=end as usize] {
            if slot.is_zero() {
                continue;
            }
            self.proxies.remove(slot);
            *slot = Address::ZERO;
            zeroed += 1;
        }
        entry.active -= zeroed;

        debug!(%owner, start, end, zeroed, "registry: zeroed range");
        Ok(zeroed)
    }

    /// Live proxy at `address`.
    pub fn proxy(&self, address: &Address) -> Option<&SubAccountProxy> {
        self.proxies.get(address)
    }

    /// Owner of the live sub-account at `address`.
    pub fn owner_of(&self, address: &Address) -> Option<Address> {
        self.proxies.get(address).map(|p| p.id().owner)
    }

    /// Number of owners that ever created a sub-account.
    pub fn owner_count(&self) -> usize {
        self.entries.len()
    }
}
