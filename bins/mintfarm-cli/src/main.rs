//! mintfarm-cli: inspect the reward curve, predict sub-account addresses and
//! simulate batch create / claim / rescue runs against in-memory collaborators.

mod settings;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use mintfarm_core::address::{derive_sub_account, Address};
use mintfarm_core::clock::{ManualClock, SystemClock};
use mintfarm_core::constants::{MULTIPLIER_PRECISION, SECONDS_PER_WEEK};
use mintfarm_core::memory::MemoryToken;
use mintfarm_core::traits::{ClaimRedeemer, Clock, Minter, RewardCurve};
use mintfarm_curve::{CurveEngine, CURVE_WEEKS};
use mintfarm_manager::{ClaimReceipt, CreateReceipt, RescueOutcome, WalletManager};

use crate::settings::{parse_address, Settings};

/// Batch sub-account manager tooling.
#[derive(Parser)]
#[command(name = "mintfarm-cli")]
#[command(version, about = "Inspect and simulate the Mintfarm wallet manager")]
struct Cli {
    /// Settings file (default: <config_dir>/mintfarm/settings.toml).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Log output format ("text" or "json")
    #[arg(long, global = true, default_value = "text")]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print weekly and cumulative bonus multipliers.
    Curve(CurveArgs),
    /// Print predicted sub-account addresses for an owner.
    Derive(DeriveArgs),
    /// Create sub-accounts, advance a simulated clock, then claim or rescue.
    Simulate(SimulateArgs),
}

#[derive(Args)]
struct CurveArgs {
    /// First week to print.
    #[arg(long, default_value_t = 0)]
    from: u64,

    /// Number of weeks to print.
    #[arg(short, long, default_value_t = 10)]
    weeks: u64,

    /// Emit JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct DeriveArgs {
    /// Owner address (0x-hex or label).
    owner: String,

    /// First sub-account id.
    #[arg(long, default_value_t = 0)]
    start: u64,

    /// Number of addresses to print.
    #[arg(short = 'n', long, default_value_t = 5)]
    count: u64,
}

#[derive(Args)]
struct SimulateArgs {
    /// Owner address (0x-hex or label).
    #[arg(long, default_value = "alice")]
    owner: String,

    /// Sub-accounts to create.
    #[arg(short = 'n', long, default_value_t = 10)]
    count: u64,

    /// Claim term in days.
    #[arg(short, long, default_value_t = 1)]
    term: u64,

    /// Whole weeks to let pass after deploy before creating.
    #[arg(long, default_value_t = 0)]
    age_weeks: u64,

    /// Abandon the claims and let the rescuer redeem them after the grace window.
    #[arg(long)]
    rescue: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, &cli.log_format);

    match cli.command {
        Commands::Curve(args) => cmd_curve(args),
        Commands::Derive(args) => {
            let settings = Settings::load(cli.config.as_deref())?;
            cmd_derive(&settings, args)
        }
        Commands::Simulate(args) => {
            let settings = Settings::load(cli.config.as_deref())?;
            cmd_simulate(&settings, args)
        }
    }
}

fn init_logging(level_str: &str, format: &str) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_str));

    if format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}

#[derive(Serialize)]
struct CurveRow {
    week: u64,
    weekly: u64,
    cumulative: u64,
}

fn cmd_curve(args: CurveArgs) -> Result<()> {
    let curve = CurveEngine::new();
    let end = args.from.saturating_add(args.weeks);
    let rows: Vec<CurveRow> = (args.from..end)
        .map(|week| CurveRow {
            week,
            weekly: curve.weekly_multiplier(week),
            cumulative: curve.cumulative_multiplier(week),
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    let precision = MULTIPLIER_PRECISION as f64;
    println!("{:>6}  {:>12}  {:>14}  {:>9}", "week", "weekly", "cumulative", "unlocked");
    for row in &rows {
        println!(
            "{:>6}  {:>12}  {:>14}  {:>8.4}%",
            row.week,
            row.weekly,
            row.cumulative,
            row.cumulative as f64 / precision * 100.0
        );
    }
    if end > CURVE_WEEKS as u64 {
        println!("\nBonus window closes after week {}.", CURVE_WEEKS - 1);
    }
    Ok(())
}

fn cmd_derive(settings: &Settings, args: DeriveArgs) -> Result<()> {
    let manager = settings.manager_address()?;
    let template = settings.manager_config(0)?.template;
    let owner = parse_address(&args.owner)?;
    let end = args
        .start
        .checked_add(args.count)
        .context("id range overflows u64")?;

    println!("manager: {manager}");
    println!("owner:   {owner}");
    for index in args.start..end {
        println!("{index:>6}  {}", derive_sub_account(&manager, &template, &owner, index));
    }
    Ok(())
}

#[derive(Serialize)]
struct Balance {
    account: Address,
    reward: u128,
    bonus: u128,
}

#[derive(Serialize)]
struct SimulationReport {
    deploy_ts: u64,
    finished_at: String,
    created: CreateReceipt,
    maturity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    claim: Option<ClaimReceipt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rescue: Option<RescueOutcome>,
    balances: Vec<Balance>,
}

fn cmd_simulate(settings: &Settings, args: SimulateArgs) -> Result<()> {
    if args.count == 0 {
        bail!("--count must be at least 1");
    }
    let config = settings.manager_config(SystemClock.now())?;
    let deploy_ts = config.deploy_ts;
    let grace = config.fees.rescue_grace_secs;
    let rescuer = config.rescuer;
    let fee_receiver = config.fee_receiver;
    let token = MemoryToken::new(config.manager);
    let owner = parse_address(&args.owner)?;

    let mut manager = WalletManager::new(
        config,
        settings.ledger(),
        token,
        ManualClock::new(deploy_ts),
    )?;
    manager
        .clock()
        .advance(args.age_weeks.saturating_mul(SECONDS_PER_WEEK));

    let created = manager
        .batch_create(&owner, args.count, args.term)
        .context("batch create failed")?;
    manager.clock().set(created.maturity_ts);
    let last = created.last_index();

    let (claim, rescue) = if args.rescue {
        manager.clock().advance(grace);
        let outcome = manager
            .batch_rescue(&rescuer, &owner, created.first_index, last)
            .context("batch rescue failed")?;
        (None, Some(outcome))
    } else {
        let receipt = manager
            .batch_claim(&owner, created.first_index, last)
            .context("batch claim failed")?;
        (Some(receipt), None)
    };

    let mut accounts = vec![owner, fee_receiver, rescuer];
    accounts.sort();
    accounts.dedup();
    let balances = accounts
        .into_iter()
        .map(|account| Balance {
            account,
            reward: manager.ledger().balance_of(&account),
            bonus: manager.minter().balance_of(&account),
        })
        .collect();

    let finished = manager.clock().now();
    info!(%owner, count = args.count, finished, "simulation complete");

    let report = SimulationReport {
        deploy_ts,
        finished_at: format_ts(finished),
        maturity: format_ts(created.maturity_ts),
        created,
        claim,
        rescue,
        balances,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn format_ts(ts: u64) -> String {
    i64::try_from(ts)
        .ok()
        .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0))
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| format!("{ts}s"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mintfarm_core::constants::SECONDS_PER_DAY;

    #[test]
    fn format_ts_epoch() {
        assert_eq!(format_ts(0), "1970-01-01T00:00:00+00:00");
        assert_eq!(format_ts(SECONDS_PER_DAY), "1970-01-02T00:00:00+00:00");
    }

    #[test]
    fn format_ts_out_of_range() {
        assert_eq!(format_ts(u64::MAX), format!("{}s", u64::MAX));
    }

    #[test]
    fn cli_parses_simulate() {
        let cli = Cli::try_parse_from([
            "mintfarm-cli",
            "simulate",
            "--owner",
            "bob",
            "-n",
            "3",
            "--rescue",
        ])
        .unwrap();
        match cli.command {
            Commands::Simulate(args) => {
                assert_eq!(args.owner, "bob");
                assert_eq!(args.count, 3);
                assert!(args.rescue);
            }
            _ => panic!("expected simulate"),
        }
    }
}
