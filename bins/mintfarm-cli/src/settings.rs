//! CLI settings: a TOML file layered under `MINTFARM_*` environment variables.
//!
//! Every field has a default, so the CLI runs with no file at all. Nested
//! keys are overridden with a double underscore, e.g.
//! `MINTFARM_FEES__CLAIM_FEE_BPS=250`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use mintfarm_core::address::Address;
use mintfarm_core::constants::{LEDGER_MAX_TERM_DAYS, LEDGER_MIN_TERM_DAYS, TOKEN_UNIT};
use mintfarm_core::memory::MemoryLedger;
use mintfarm_manager::{FeeSchedule, ManagerConfig};

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "MINTFARM";

/// In-memory ledger parameters used by `simulate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerSettings {
    pub min_term_days: u64,
    pub max_term_days: u64,
    /// Reward per term day in whole tokens.
    pub reward_per_day: u64,
}

impl Default for LedgerSettings {
    fn default() -> Self {
        Self {
            min_term_days: LEDGER_MIN_TERM_DAYS,
            max_term_days: LEDGER_MAX_TERM_DAYS,
            reward_per_day: 3_000,
        }
    }
}

/// Top-level CLI settings.
///
/// Address fields accept `0x`-prefixed hex or a free-form label that is
/// hashed into a stable address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub manager: String,
    pub owner: String,
    pub rescuer: Option<String>,
    pub fee_receiver: Option<String>,
    /// Week-0 epoch. Unset means "now".
    pub deploy_ts: Option<u64>,
    pub fees: FeeSchedule,
    pub ledger: LedgerSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            manager: "mintfarm-manager".into(),
            owner: "mintfarm-admin".into(),
            rescuer: None,
            fee_receiver: None,
            deploy_ts: None,
            fees: FeeSchedule::default(),
            ledger: LedgerSettings::default(),
        }
    }
}

impl Settings {
    /// `<config_dir>/mintfarm/settings.toml`.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mintfarm")
            .join("settings.toml")
    }

    /// Load from `path` (required) or the default path (optional), then
    /// apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (Self::default_path(), false),
        };
        config::Config::builder()
            .add_source(config::File::from(path.clone()).required(required))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .and_then(|c| c.try_deserialize())
            .with_context(|| format!("failed to load settings from {}", path.display()))
    }

    /// Load from a single TOML file, ignoring the environment.
    pub fn from_file(path: &Path) -> Result<Self> {
        config::Config::builder()
            .add_source(config::File::from(path.to_path_buf()))
            .build()
            .and_then(|c| c.try_deserialize())
            .with_context(|| format!("failed to load settings from {}", path.display()))
    }

    pub fn manager_address(&self) -> Result<Address> {
        parse_address(&self.manager)
    }

    /// Manager config with `now` as the deploy timestamp unless one is set.
    pub fn manager_config(&self, now: u64) -> Result<ManagerConfig> {
        let owner = parse_address(&self.owner)?;
        let mut cfg = ManagerConfig::new(self.manager_address()?, owner, self.deploy_ts.unwrap_or(now))
            .with_fees(self.fees);
        if let Some(r) = &self.rescuer {
            cfg = cfg.with_rescuer(parse_address(r)?);
        }
        if let Some(f) = &self.fee_receiver {
            cfg = cfg.with_fee_receiver(parse_address(f)?);
        }
        cfg.validate().context("invalid manager settings")?;
        Ok(cfg)
    }

    pub fn ledger(&self) -> MemoryLedger {
        MemoryLedger::with_params(
            self.ledger.min_term_days,
            self.ledger.max_term_days,
            self.ledger.reward_per_day as u128 * TOKEN_UNIT,
        )
    }
}

/// Hex address when `0x`-prefixed, otherwise a labelled address.
pub fn parse_address(s: &str) -> Result<Address> {
    if s.starts_with("0x") {
        Address::decode(s).with_context(|| format!("invalid address: {s}"))
    } else {
        Ok(Address::from_label(s))
    }
}
