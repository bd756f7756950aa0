//! Banking Core CLI
//!
//! Command-line batch driver for the ledger transfer engine.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- --accounts accounts.csv transfers.csv > balances.csv
//! cargo run -- --accounts accounts.csv --strategy sync transfers.csv > balances.csv
//! cargo run -- --accounts accounts.csv --strategy concurrent --batch-size 2000 \
//!     --max-concurrent 8 --daily-limit 50000 transfers.csv > balances.csv
//! ```
//!
//! The program seeds the account store from the accounts CSV, replays the
//! transfer instructions through the ledger engine using the selected
//! strategy, and writes the final balances to stdout. Rejected and
//! malformed instructions are logged to stderr and never abort the run.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Fatal error (missing arguments, unreadable files, etc.)

use banking_core::cli;
use banking_core::strategy;
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::process;

/// Route log output to stderr so stdout stays a clean CSV stream
fn init_logging() {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S)} {l} {t} - {m}{n}")))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Info))
        .expect("valid logging config");

    if let Err(e) = log4rs::init_config(config) {
        eprintln!("Failed to initialize logging: {}", e);
    }
}

fn main() {
    init_logging();

    // Parse command-line arguments using clap
    let args = cli::parse_args();

    // Create the appropriate replay strategy based on CLI arguments
    let strategy = {
        let config = if matches!(args.strategy, cli::StrategyType::Concurrent) {
            Some(args.to_batch_config())
        } else {
            None
        };
        let daily_limit = args.daily_limit();
        strategy::create_strategy(args.strategy, daily_limit, config)
    };

    // Replay instructions using the selected strategy; balances go to stdout
    let mut output = std::io::stdout();
    if let Err(e) = strategy.process(&args.accounts_file, &args.transfers_file, &mut output) {
        log::error!("{}", e);
        process::exit(1);
    }
}
