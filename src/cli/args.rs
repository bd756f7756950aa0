use crate::strategy::BatchConfig;
use clap::{Parser, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Replay banking transfers against a seeded account book
#[derive(Parser, Debug)]
#[command(name = "banking-core")]
#[command(about = "Replay transfer instructions against a seeded account book", long_about = None)]
pub struct CliArgs {
    /// Input CSV file with transfer instructions
    #[arg(value_name = "TRANSFERS", help = "Path to the transfer instructions CSV")]
    pub transfers_file: PathBuf,

    /// Account seed CSV file
    #[arg(
        long = "accounts",
        value_name = "ACCOUNTS",
        help = "Path to the account seed CSV (account_number,customer,account_type,balance)"
    )]
    pub accounts_file: PathBuf,

    /// Processing strategy for replaying instructions
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "concurrent",
        help = "Replay strategy: 'sync' for sequential or 'concurrent' for parallel"
    )]
    pub strategy: StrategyType,

    /// Number of instructions per batch (concurrent mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of instructions per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Maximum number of worker threads (concurrent mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Maximum number of worker threads (default: CPU cores)"
    )]
    pub max_concurrent: Option<usize>,

    /// Daily outgoing transfer ceiling per account
    #[arg(
        long = "daily-limit",
        value_name = "AMOUNT",
        help = "Daily outgoing transfer ceiling per account (default: 100000)"
    )]
    pub daily_limit: Option<Decimal>,
}

/// Available replay strategies
#[derive(Clone, Debug, ValueEnum)]
pub enum StrategyType {
    Sync,
    Concurrent,
}

impl CliArgs {
    /// Create a BatchConfig from CLI arguments
    ///
    /// Uses the CLI values if provided, falling back to defaults, and
    /// validates the configuration (zero values fall back with a warning).
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_some() || self.max_concurrent.is_some() {
            let default = BatchConfig::default();
            BatchConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.max_concurrent.unwrap_or(default.max_concurrent),
            )
        } else {
            BatchConfig::default()
        }
    }

    /// The effective daily limit ceiling
    pub fn daily_limit(&self) -> Decimal {
        self.daily_limit
            .unwrap_or_else(crate::core::default_daily_limit)
    }
}
