//! I/O module
//!
//! Handles CSV parsing and output.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (seed/instruction conversion, balance output)
//! - `sync_reader` - Synchronous instruction reader with iterator interface
//! - `async_reader` - Asynchronous instruction reader with batch interface

pub mod async_reader;
pub mod csv_format;
pub mod sync_reader;

pub use async_reader::AsyncReader;
pub use csv_format::{
    convert_seed_record, convert_transfer_record, load_accounts_csv, write_balances_csv,
    AccountSeedRecord, TransferCsvRecord,
};
pub use sync_reader::SyncReader;
