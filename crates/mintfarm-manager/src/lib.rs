//! # mintfarm-manager: Sub-account registry and batch claim orchestration.
//!
//! Creates many isolated sub-accounts per owner at deterministic addresses,
//! drives them through the external reward ledger in bulk, and sizes the
//! bonus mint with the reward curve.
//!
//! # Modules
//!
//! - [`error`]: `ManagerError` enum
//! - [`config`]: `ManagerConfig` and `FeeSchedule`
//! - [`proxy`]: Manager-gated per-slot ledger proxy
//! - [`registry`]: Per-owner append-only slot sequences
//! - [`receipt`]: Results of batch operations
//! - [`manager`]: Batch create / claim / rescue orchestration

pub mod config;
pub mod error;
pub mod manager;
pub mod proxy;
pub mod receipt;
pub mod registry;

// Re-exports for convenient access
pub use config::{FeeSchedule, ManagerConfig};
pub use error::ManagerError;
pub use manager::{SubAccountInfo, WalletManager};
pub use proxy::{ProxyState, SubAccountProxy};
pub use receipt::{ClaimReceipt, CreateReceipt, RescueOutcome, RescueReceipt};
pub use registry::{OwnerEntry, WalletRegistry};
