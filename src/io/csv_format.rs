//! CSV format handling for account seeds, transfer instructions and output
//!
//! This module centralizes all CSV format concerns, providing:
//! - Record structures for deserialization
//! - Conversion from CSV records to domain types
//! - Balance output serialization
//! - The account seed loader
//!
//! Conversion functions are pure (no I/O) for easy testing.
//!
//! # Formats
//!
//! Account seed: `account_number,customer,account_type,balance`
//! Transfer instructions: `sender,receiver,amount,remark` (remark optional)
//! Balance output: `account_number,customer,account_type,balance`, sorted by
//! account number, balances with 2 decimal places.

use crate::types::{Account, AccountType, TransferRequest};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

/// CSV record for one account seed row
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AccountSeedRecord {
    pub account_number: String,
    pub customer: String,
    pub account_type: String,
    pub balance: String,
}

/// CSV record for one transfer instruction row
///
/// The remark column may be missing or empty.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TransferCsvRecord {
    pub sender: String,
    pub receiver: String,
    pub amount: String,
    pub remark: Option<String>,
}

/// Convert a seed record into an account
///
/// Validates the account-number shape (12 digits), the category name and
/// the balance (a non-negative decimal). The opening timestamp is stamped
/// at load time; seeds are an import of an existing book, not new opens,
/// so no deposit floor applies.
pub fn convert_seed_record(record: AccountSeedRecord) -> Result<Account, String> {
    let number = record.account_number.trim();
    if number.len() != 12 || !number.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!(
            "Invalid account number '{}': expected 12 digits",
            record.account_number
        ));
    }

    let account_type = AccountType::parse(&record.account_type)
        .ok_or_else(|| format!("Unknown account type '{}'", record.account_type))?;

    let balance = Decimal::from_str(record.balance.trim())
        .map_err(|_| format!("Invalid balance '{}' for account {}", record.balance, number))?;
    if balance < Decimal::ZERO {
        return Err(format!(
            "Negative balance '{}' for account {}",
            record.balance, number
        ));
    }

    Ok(Account::new(
        number.to_string(),
        record.customer.trim().to_string(),
        account_type,
        balance,
        Utc::now(),
    ))
}

/// Convert an instruction record into a transfer request
///
/// Only the amount's shape is checked here; business validation (positive
/// amount, account existence, funds, limits) is the engine's job and runs
/// in its fixed order.
pub fn convert_transfer_record(record: TransferCsvRecord) -> Result<TransferRequest, String> {
    let amount = Decimal::from_str(record.amount.trim())
        .map_err(|_| format!("Invalid amount '{}'", record.amount))?;

    Ok(TransferRequest {
        sender_account: record.sender.trim().to_string(),
        receiver_account: record.receiver.trim().to_string(),
        amount,
        remark: record.remark.unwrap_or_default().trim().to_string(),
    })
}

/// Load the account seed file
///
/// Fatal on unreadable files; individual malformed rows are returned as
/// per-row errors so the caller can log and skip them.
pub fn load_accounts_csv(path: &Path) -> Result<Vec<Result<Account, String>>, String> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| format!("Failed to open accounts file '{}': {}", path.display(), e))?;

    let mut accounts = Vec::new();
    for (index, row) in reader.deserialize::<AccountSeedRecord>().enumerate() {
        let line = index + 2; // header is line 1
        match row {
            Ok(record) => accounts.push(
                convert_seed_record(record).map_err(|e| format!("Line {}: {}", line, e)),
            ),
            Err(e) => accounts.push(Err(format!("Line {}: CSV parse error: {}", line, e))),
        }
    }
    Ok(accounts)
}

/// Write final balances as CSV
///
/// Accounts are sorted by account number for deterministic output.
pub fn write_balances_csv(accounts: &[Account], output: &mut dyn Write) -> Result<(), String> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer
        .write_record(["account_number", "customer", "account_type", "balance"])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    let mut sorted_accounts = accounts.to_vec();
    sorted_accounts.sort_by(|a, b| a.number.cmp(&b.number));

    for account in sorted_accounts {
        writer
            .write_record(&[
                account.number.clone(),
                account.customer.clone(),
                account.account_type.to_string(),
                format!("{:.2}", account.balance),
            ])
            .map_err(|e| format!("Failed to write balance record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}
