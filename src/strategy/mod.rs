//! Replay strategy module
//!
//! This module defines the Strategy pattern for complete replay pipelines:
//! seeding the account store from CSV, replaying transfer instructions
//! through the ledger engine, and writing the final balances. Strategies
//! differ only in how they drive the engine - the engine's own per-account
//! locking is what keeps results correct, so the concurrent strategy never
//! trades safety for throughput.

use crate::cli::StrategyType;
use crate::core::LedgerEngine;
use crate::io::csv_format::load_accounts_csv;
use rust_decimal::Decimal;
use std::io::Write;
use std::path::Path;

pub mod concurrent;
pub mod sync;

pub use concurrent::{BatchConfig, ConcurrentReplayStrategy};
pub use sync::SyncReplayStrategy;

/// A complete replay pipeline
///
/// Implementations read the account seed, replay every instruction in the
/// transfers file against the engine, and write final balances to `output`.
///
/// # Errors
///
/// Fatal errors (unreadable files, runtime construction failures, output
/// failures) are returned. Individual rejected or malformed instructions
/// are logged and never abort the run.
pub trait ReplayStrategy: Send + Sync {
    fn process(
        &self,
        accounts_path: &Path,
        transfers_path: &Path,
        output: &mut dyn Write,
    ) -> Result<(), String>;
}

/// Create a replay strategy for the given type
///
/// `config` applies to the concurrent strategy only and is ignored for the
/// sync strategy; `daily_limit` configures the engine's limit policy in
/// both cases.
pub fn create_strategy(
    strategy_type: StrategyType,
    daily_limit: Decimal,
    config: Option<BatchConfig>,
) -> Box<dyn ReplayStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncReplayStrategy::new(daily_limit)),
        StrategyType::Concurrent => {
            let config = config.unwrap_or_default();
            Box::new(ConcurrentReplayStrategy::new(config, daily_limit))
        }
    }
}

/// Seed the engine's account store from a CSV book export
///
/// Malformed rows and duplicate account numbers are logged and skipped;
/// only an unreadable file is fatal. Returns the number of accounts
/// registered.
pub(crate) fn seed_engine(engine: &LedgerEngine, path: &Path) -> Result<usize, String> {
    let rows = load_accounts_csv(path)?;
    let mut registered = 0;

    for row in rows {
        match row {
            Ok(account) => match engine.register_account(account) {
                Ok(()) => registered += 1,
                Err(e) => log::warn!("skipping seed account: {}", e),
            },
            Err(e) => log::warn!("skipping seed row: {}", e),
        }
    }

    log::info!("seeded {} accounts from {}", registered, path.display());
    Ok(registered)
}
