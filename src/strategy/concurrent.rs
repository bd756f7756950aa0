//! Concurrent replay strategy
//!
//! Multi-threaded pipeline built on the tokio runtime:
//!
//! ```text
//! ConcurrentReplayStrategy
//!     ├── BatchConfig          (batch_size, max_concurrent)
//!     ├── AsyncReader          (batched instruction reading)
//!     ├── TransferDispatcher   (sender partitioning + tasks)
//!     └── LedgerEngine         (per-account locking, atomic commits)
//! ```
//!
//! Batches are read sequentially; within a batch, instructions are
//! partitioned by sender account and replayed in parallel, one task per
//! sender. A sender's instructions therefore keep file order both within
//! and across batches, while unrelated senders proceed concurrently.
//! Cross-sender interleaving is unspecified - exactly the guarantee the
//! engine itself provides.

use crate::core::{LedgerEngine, TransferDispatcher};
use crate::io::async_reader::AsyncReader;
use crate::io::csv_format::write_balances_csv;
use crate::strategy::{seed_engine, ReplayStrategy};
use rust_decimal::Decimal;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// Configuration for batched concurrent replay
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Number of instructions per batch
    pub batch_size: usize,
    /// Maximum number of worker threads
    pub max_concurrent: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a BatchConfig, falling back to defaults on zero values
    pub fn new(batch_size: usize, max_concurrent: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            log::warn!(
                "invalid batch_size (0), using default ({})",
                default.batch_size
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent = if max_concurrent == 0 {
            log::warn!(
                "invalid max_concurrent (0), using default ({})",
                default.max_concurrent
            );
            default.max_concurrent
        } else {
            max_concurrent
        };

        Self {
            batch_size,
            max_concurrent,
        }
    }
}

/// Parallel replay with per-sender ordering
#[derive(Debug, Clone)]
pub struct ConcurrentReplayStrategy {
    config: BatchConfig,
    daily_limit: Decimal,
}

impl ConcurrentReplayStrategy {
    pub fn new(config: BatchConfig, daily_limit: Decimal) -> Self {
        Self {
            config,
            daily_limit,
        }
    }
}

impl ReplayStrategy for ConcurrentReplayStrategy {
    fn process(
        &self,
        accounts_path: &Path,
        transfers_path: &Path,
        output: &mut dyn Write,
    ) -> Result<(), String> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent)
            .build()
            .map_err(|e| format!("Failed to create tokio runtime: {}", e))?;

        runtime.block_on(async {
            let engine = Arc::new(LedgerEngine::with_daily_limit(self.daily_limit));
            seed_engine(&engine, accounts_path)?;

            let dispatcher = TransferDispatcher::new(Arc::clone(&engine));

            let file = tokio::fs::File::open(transfers_path).await.map_err(|e| {
                format!("Failed to open file '{}': {}", transfers_path.display(), e)
            })?;

            // csv-async speaks futures::io, tokio files speak tokio::io
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);
            let mut reader = AsyncReader::new(compat_file);

            let mut applied: u64 = 0;
            let mut rejected: u64 = 0;

            // Batches run one after another so a sender's instructions keep
            // file order across batch boundaries too
            loop {
                let batch = reader.read_batch(self.config.batch_size).await;
                if batch.is_empty() {
                    break;
                }

                for outcome in dispatcher.replay_batch(batch).await {
                    match outcome.result {
                        Ok(_) => applied += 1,
                        Err(e) => {
                            rejected += 1;
                            log::warn!("transfer rejected ({}): {}", e.code(), e);
                        }
                    }
                }
            }

            log::info!("replay finished: {} applied, {} rejected", applied, rejected);

            write_balances_csv(&engine.accounts().snapshot(), output)?;

            Ok(())
        })
    }
}
