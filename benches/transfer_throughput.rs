//! Benchmark suite for comparing replay strategies
//!
//! Compares the synchronous and concurrent replay strategies using the
//! divan benchmarking framework.
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench
//! ```
//!
//! # Benchmark Fixtures
//!
//! Fixtures are generated once into a tempdir at first use:
//! - small: 64 accounts, 1,000 transfer instructions
//! - medium: 64 accounts, 10,000 transfer instructions
//!
//! Senders rotate across all accounts with amounts small enough that no
//! instruction trips the daily limit, so both strategies do the same
//! amount of committed work.

use banking_core::cli::StrategyType;
use banking_core::core::default_daily_limit;
use banking_core::strategy::{create_strategy, BatchConfig};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tempfile::TempDir;

fn main() {
    divan::main();
}

struct Fixture {
    _dir: TempDir,
    accounts: PathBuf,
    transfers: PathBuf,
}

const ACCOUNT_COUNT: usize = 64;

fn generate_fixture(transfer_count: usize) -> Fixture {
    let dir = TempDir::new().expect("Failed to create tempdir");

    let numbers: Vec<String> = (0..ACCOUNT_COUNT)
        .map(|i| format!("{:012}", 100_000_000_000u64 + i as u64))
        .collect();

    let mut accounts = String::from("account_number,customer,account_type,balance\n");
    for (i, number) in numbers.iter().enumerate() {
        writeln!(
            accounts,
            "{},customer{}@example.com,CURRENT,1000000",
            number, i
        )
        .unwrap();
    }
    let accounts_path = dir.path().join("accounts.csv");
    std::fs::write(&accounts_path, accounts).expect("Failed to write accounts fixture");

    let mut transfers = String::from("sender,receiver,amount,remark\n");
    for i in 0..transfer_count {
        let sender = i % ACCOUNT_COUNT;
        let mut receiver = (i * 7 + 1) % ACCOUNT_COUNT;
        if receiver == sender {
            receiver = (receiver + 1) % ACCOUNT_COUNT;
        }
        writeln!(
            transfers,
            "{},{},{},",
            numbers[sender],
            numbers[receiver],
            1 + (i % 50)
        )
        .unwrap();
    }
    let transfers_path = dir.path().join("transfers.csv");
    std::fs::write(&transfers_path, transfers).expect("Failed to write transfers fixture");

    Fixture {
        _dir: dir,
        accounts: accounts_path,
        transfers: transfers_path,
    }
}

fn small() -> &'static Fixture {
    static FIXTURE: OnceLock<Fixture> = OnceLock::new();
    FIXTURE.get_or_init(|| generate_fixture(1_000))
}

fn medium() -> &'static Fixture {
    static FIXTURE: OnceLock<Fixture> = OnceLock::new();
    FIXTURE.get_or_init(|| generate_fixture(10_000))
}

fn run(strategy_type: StrategyType, accounts: &Path, transfers: &Path) {
    let config = match strategy_type {
        StrategyType::Concurrent => Some(BatchConfig::default()),
        StrategyType::Sync => None,
    };
    let strategy = create_strategy(strategy_type, default_daily_limit(), config);
    let mut output = Vec::new();

    strategy
        .process(accounts, transfers, &mut output)
        .expect("Replay failed");
}

/// Benchmark synchronous replay with the small fixture (1,000 instructions)
#[divan::bench]
fn sync_strategy_small() {
    let fixture = small();
    run(StrategyType::Sync, &fixture.accounts, &fixture.transfers);
}

/// Benchmark concurrent replay with the small fixture (1,000 instructions)
#[divan::bench]
fn concurrent_strategy_small() {
    let fixture = small();
    run(
        StrategyType::Concurrent,
        &fixture.accounts,
        &fixture.transfers,
    );
}

/// Benchmark synchronous replay with the medium fixture (10,000 instructions)
#[divan::bench]
fn sync_strategy_medium() {
    let fixture = medium();
    run(StrategyType::Sync, &fixture.accounts, &fixture.transfers);
}

/// Benchmark concurrent replay with the medium fixture (10,000 instructions)
#[divan::bench]
fn concurrent_strategy_medium() {
    let fixture = medium();
    run(
        StrategyType::Concurrent,
        &fixture.accounts,
        &fixture.transfers,
    );
}
