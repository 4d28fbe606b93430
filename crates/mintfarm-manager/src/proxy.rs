//! Per-slot sub-account proxy.
//!
//! A proxy is the ledger-facing identity of one sub-account. It owns nothing
//! but its derived address and a lifecycle state, and forwards exactly two
//! operations to the ledger: register and redeem. Only the manager that
//! created it may drive it.

use serde::{Deserialize, Serialize};

use mintfarm_core::address::{derive_sub_account, Address};
use mintfarm_core::traits::{ClaimRedeemer, ClaimRegistrar};
use mintfarm_core::types::{Hash256, ShareReceipt, SubAccountId};

use crate::error::ManagerError;

/// Lifecycle of a proxy. `Claimed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProxyState {
    Unregistered,
    Pending { term_days: u64, registered_at: u64 },
    Claimed,
}

impl ProxyState {
    pub fn name(&self) -> &'static str {
        match self {
            ProxyState::Unregistered => "unregistered",
            ProxyState::Pending { .. } => "pending",
            ProxyState::Claimed => "claimed",
        }
    }
}

/// Manager-gated forwarder for one `(owner, index)` slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubAccountProxy {
    address: Address,
    manager: Address,
    id: SubAccountId,
    state: ProxyState,
}

impl SubAccountProxy {
    /// Instantiate the proxy at its derived address.
    pub fn new(manager: Address, template: &Hash256, owner: Address, index: u64) -> Self {
        Self {
            address: derive_sub_account(&manager, template, &owner, index),
            manager,
            id: SubAccountId::new(owner, index),
            state: ProxyState::Unregistered,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn manager(&self) -> Address {
        self.manager
    }

    pub fn id(&self) -> SubAccountId {
        self.id
    }

    pub fn state(&self) -> ProxyState {
        self.state
    }

    /// Register a claim of `term_days` with the ledger under this proxy's address.
    pub fn register<L>(
        &mut self,
        invoker: &Address,
        ledger: &mut L,
        term_days: u64,
        now: u64,
    ) -> Result<(), ManagerError>
    where
        L: ClaimRegistrar + ?Sized,
    {
        self.check_invoker(invoker)?;
        if self.state != ProxyState::Unregistered {
            return Err(self.state_error());
        }
        ledger.register_claim(&self.address, term_days, now)?;
        self.state = ProxyState::Pending {
            term_days,
            registered_at: now,
        };
        Ok(())
    }

    /// Redeem the matured claim, crediting the whole reward to `recipient`.
    pub fn redeem<L>(
        &mut self,
        invoker: &Address,
        ledger: &mut L,
        recipient: &Address,
        now: u64,
    ) -> Result<u128, ManagerError>
    where
        L: ClaimRedeemer + ?Sized,
    {
        self.check_pending(invoker)?;
        let amount = ledger.redeem_claim(&self.address, recipient, now)?;
        self.state = ProxyState::Claimed;
        Ok(amount)
    }

    /// Redeem the matured claim, sharing `share_pct` percent with `other`.
    pub fn redeem_and_share<L>(
        &mut self,
        invoker: &Address,
        ledger: &mut L,
        recipient: &Address,
        other: &Address,
        share_pct: u64,
        now: u64,
    ) -> Result<ShareReceipt, ManagerError>
    where
        L: ClaimRedeemer + ?Sized,
    {
        self.check_pending(invoker)?;
        let receipt =
            ledger.redeem_claim_and_share(&self.address, recipient, other, share_pct, now)?;
        self.state = ProxyState::Claimed;
        Ok(receipt)
    }

    fn check_invoker(&self, invoker: &Address) -> Result<(), ManagerError> {
        if *invoker != self.manager {
            return Err(ManagerError::AccessDenied {
                proxy: self.address.to_string(),
                invoker: invoker.to_string(),
            });
        }
        Ok(())
    }

    fn check_pending(&self, invoker: &Address) -> Result<(), ManagerError> {
        self.check_invoker(invoker)?;
        match self.state {
            ProxyState::Pending { .. } => Ok(()),
            _ => Err(self.state_error()),
        }
    }

    fn state_error(&self) -> ManagerError {
        ManagerError::ProxyState {
            proxy: self.address.to_string(),
            state: self.state.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mintfarm_core::address::default_template;
    use mintfarm_core::constants::SECONDS_PER_DAY;
    use mintfarm_core::error::LedgerError;
    use mintfarm_core::memory::MemoryLedger;

    const T0: u64 = 1_700_000_000;

    fn manager() -> Address {
        Address::from_label("manager")
    }

    fn owner() -> Address {
        Address::from_label("owner")
    }

    fn proxy(index: u64) -> SubAccountProxy {
        SubAccountProxy::new(manager(), &default_template(), owner(), index)
    }

    #[test]
    fn address_matches_deriver() {
        let p = proxy(7);
        assert_eq!(
            p.address(),
            derive_sub_account(&manager(), &default_template(), &owner(), 7)
        );
        assert_eq!(p.id(), SubAccountId::new(owner(), 7));
        assert_eq!(p.state(), ProxyState::Unregistered);
    }

    #[test]
    fn register_then_redeem() {
        let mut ledger = MemoryLedger::new();
        let mut p = proxy(0);
        p.register(&manager(), &mut ledger, 2, T0).unwrap();
        assert_eq!(
            p.state(),
            ProxyState::Pending {
                term_days: 2,
                registered_at: T0
            }
        );
        assert!(ledger.claim_of(&p.address()).is_some());

        let amount = p
            .redeem(&manager(), &mut ledger, &owner(), T0 + 2 * SECONDS_PER_DAY)
            .unwrap();
        assert!(amount > 0);
        assert_eq!(p.state(), ProxyState::Claimed);
        assert_eq!(ledger.balance_of(&owner()), amount);
    }

    #[test]
    fn foreign_invoker_denied() {
        let mut ledger = MemoryLedger::new();
        let mut p = proxy(0);
        let intruder = Address::from_label("intruder");
        let err = p.register(&intruder, &mut ledger, 2, T0).unwrap_err();
        assert!(matches!(err, ManagerError::AccessDenied { .. }));
        assert_eq!(ledger.pending_count(), 0);

        p.register(&manager(), &mut ledger, 2, T0).unwrap();
        let err = p
            .redeem(&intruder, &mut ledger, &intruder, T0 + 2 * SECONDS_PER_DAY)
            .unwrap_err();
        assert!(matches!(err, ManagerError::AccessDenied { .. }));
        assert_eq!(ledger.balance_of(&intruder), 0);
    }

    #[test]
    fn register_twice_rejected() {
        let mut ledger = MemoryLedger::new();
        let mut p = proxy(0);
        p.register(&manager(), &mut ledger, 2, T0).unwrap();
        let err = p.register(&manager(), &mut ledger, 2, T0).unwrap_err();
        assert_eq!(
            err,
            ManagerError::ProxyState {
                proxy: p.address().to_string(),
                state: "pending"
            }
        );
    }

    #[test]
    fn redeem_unregistered_rejected() {
        let mut ledger = MemoryLedger::new();
        let mut p = proxy(0);
        let err = p.redeem(&manager(), &mut ledger, &owner(), T0).unwrap_err();
        assert!(matches!(
            err,
            ManagerError::ProxyState {
                state: "unregistered",
                ..
            }
        ));
    }

    #[test]
    fn redeem_after_claim_rejected() {
        let mut ledger = MemoryLedger::new();
        let mut p = proxy(0);
        p.register(&manager(), &mut ledger, 1, T0).unwrap();
        p.redeem(&manager(), &mut ledger, &owner(), T0 + SECONDS_PER_DAY)
            .unwrap();
        let err = p
            .redeem(&manager(), &mut ledger, &owner(), T0 + SECONDS_PER_DAY)
            .unwrap_err();
        assert!(matches!(err, ManagerError::ProxyState { state: "claimed", .. }));
    }

    #[test]
    fn early_redeem_propagates_ledger_error() {
        let mut ledger = MemoryLedger::new();
        let mut p = proxy(0);
        p.register(&manager(), &mut ledger, 3, T0).unwrap();
        let err = p
            .redeem(&manager(), &mut ledger, &owner(), T0 + 1)
            .unwrap_err();
        assert_eq!(
            err,
            ManagerError::Ledger(LedgerError::NotMatured {
                maturity_ts: T0 + 3 * SECONDS_PER_DAY,
                now: T0 + 1
            })
        );
        assert!(matches!(p.state(), ProxyState::Pending { .. }));
    }

    #[test]
    fn short_term_leaves_unregistered() {
        let mut ledger = MemoryLedger::new();
        let mut p = proxy(0);
        let err = p.register(&manager(), &mut ledger, 0, T0).unwrap_err();
        assert!(matches!(err, ManagerError::Ledger(LedgerError::TermTooShort { .. })));
        assert_eq!(p.state(), ProxyState::Unregistered);
    }

    #[test]
    fn redeem_and_share_splits() {
        let mut ledger = MemoryLedger::new();
        let mut p = proxy(0);
        let rescuer = Address::from_label("rescuer");
        p.register(&manager(), &mut ledger, 1, T0).unwrap();
        let receipt = p
            .redeem_and_share(
                &manager(),
                &mut ledger,
                &owner(),
                &rescuer,
                20,
                T0 + SECONDS_PER_DAY,
            )
            .unwrap();
        assert_eq!(receipt.shared, receipt.total * 20 / 100);
        assert_eq!(ledger.balance_of(&rescuer), receipt.shared);
        assert_eq!(ledger.balance_of(&owner()), receipt.kept());
        assert_eq!(p.state(), ProxyState::Claimed);
    }
}
