//! Shared fixtures for the integration tests.

use mintfarm_core::address::Address;
use mintfarm_core::clock::ManualClock;
use mintfarm_core::constants::SECONDS_PER_DAY;
use mintfarm_core::memory::{MemoryLedger, MemoryToken};
use mintfarm_manager::{ManagerConfig, WalletManager};

/// Deploy timestamp used by every fixture.
pub const DEPLOY_TS: u64 = 1_700_000_000;

/// Default rescue grace window.
pub const GRACE_SECS: u64 = 14 * SECONDS_PER_DAY;

pub type TestManager = WalletManager<MemoryLedger, MemoryToken, ManualClock>;

/// Deterministic address from a human label.
pub fn addr(label: &str) -> Address {
    Address::from_label(label)
}

pub fn manager_addr() -> Address {
    addr("manager")
}

pub fn admin() -> Address {
    addr("admin")
}

pub fn rescuer() -> Address {
    addr("rescuer")
}

pub fn treasury() -> Address {
    addr("treasury")
}

/// Config with distinct admin, rescuer and fee receiver.
pub fn test_config() -> ManagerConfig {
    ManagerConfig::new(manager_addr(), admin(), DEPLOY_TS)
        .with_rescuer(rescuer())
        .with_fee_receiver(treasury())
}

/// Manager over fresh in-memory collaborators, clock at deploy time.
pub fn test_manager() -> TestManager {
    manager_with(test_config(), MemoryLedger::new())
}

/// Manager over a caller-supplied config and ledger.
pub fn manager_with(config: ManagerConfig, ledger: MemoryLedger) -> TestManager {
    let token = MemoryToken::new(config.manager);
    WalletManager::new(config, ledger, token, ManualClock::new(DEPLOY_TS))
        .unwrap_or_else(|e| panic!("fixture config rejected: {e}"))
}

/// Move the manager's clock forward.
pub fn advance(manager: &TestManager, secs: u64) {
    manager.clock().advance(secs);
}

/// Move the manager's clock forward by whole days.
pub fn advance_days(manager: &TestManager, days: u64) {
    advance(manager, days * SECONDS_PER_DAY);
}
