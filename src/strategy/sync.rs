//! Synchronous replay strategy
//!
//! Single-threaded pipeline: seed the account store, stream the
//! instruction file row by row through the engine, write final balances.
//! Instructions are applied in exact file order, which makes every outcome
//! deterministic - the reference behavior the concurrent strategy is
//! measured against.

use crate::core::LedgerEngine;
use crate::io::csv_format::write_balances_csv;
use crate::io::sync_reader::SyncReader;
use crate::strategy::{seed_engine, ReplayStrategy};
use rust_decimal::Decimal;
use std::io::Write;
use std::path::Path;

/// Sequential, in-order replay
///
/// # Examples
///
/// ```no_run
/// use banking_core::strategy::{ReplayStrategy, SyncReplayStrategy};
/// use rust_decimal::Decimal;
/// use std::path::Path;
/// use std::io;
///
/// let strategy = SyncReplayStrategy::new(Decimal::from(100_000));
/// let mut output = io::stdout();
///
/// strategy
///     .process(Path::new("accounts.csv"), Path::new("transfers.csv"), &mut output)
///     .expect("replay failed");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SyncReplayStrategy {
    daily_limit: Decimal,
}

impl SyncReplayStrategy {
    pub fn new(daily_limit: Decimal) -> Self {
        Self { daily_limit }
    }
}

impl ReplayStrategy for SyncReplayStrategy {
    fn process(
        &self,
        accounts_path: &Path,
        transfers_path: &Path,
        output: &mut dyn Write,
    ) -> Result<(), String> {
        let engine = LedgerEngine::with_daily_limit(self.daily_limit);
        seed_engine(&engine, accounts_path)?;

        let reader = SyncReader::new(transfers_path)?;

        let mut applied: u64 = 0;
        let mut rejected: u64 = 0;

        for result in reader {
            match result {
                Ok(request) => match engine.transfer(&request) {
                    Ok(record) => {
                        applied += 1;
                        log::debug!("applied transfer {}", record.id);
                    }
                    Err(e) => {
                        rejected += 1;
                        log::warn!("transfer rejected ({}): {}", e.code(), e);
                    }
                },
                Err(e) => {
                    rejected += 1;
                    log::warn!("skipping instruction: {}", e);
                }
            }
        }

        log::info!("replay finished: {} applied, {} rejected", applied, rejected);

        write_balances_csv(&engine.accounts().snapshot(), output)?;

        Ok(())
    }
}
