//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over transfer instructions from a CSV
//! file. Delegates CSV format concerns to the csv_format module.
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual row errors are yielded as Err variants in the iterator
//! - Line numbers are included in error messages for debugging
//!
//! # Memory Efficiency
//!
//! Rows are read one at a time; memory usage is O(1) per row, not
//! O(file_size).

use crate::io::csv_format::{convert_transfer_record, TransferCsvRecord};
use crate::types::TransferRequest;
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

/// Streaming reader of transfer instructions
///
/// # Examples
///
/// ```no_run
/// use banking_core::io::sync_reader::SyncReader;
/// use std::path::Path;
///
/// let reader = SyncReader::new(Path::new("transfers.csv")).unwrap();
/// for result in reader {
///     match result {
///         Ok(request) => println!("replaying {:?}", request),
///         Err(e) => eprintln!("skipping row: {}", e),
///     }
/// }
/// ```
#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<File>,
    line_num: usize,
}

impl SyncReader {
    /// Open a transfer instruction file for streaming
    ///
    /// The CSV reader trims whitespace and allows the remark column to be
    /// absent.
    pub fn new(path: &Path) -> Result<Self, String> {
        let file = File::open(path)
            .map_err(|e| format!("Failed to open file '{}': {}", path.display(), e))?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            reader,
            line_num: 0,
        })
    }
}

impl Iterator for SyncReader {
    type Item = Result<TransferRequest, String>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<TransferCsvRecord>();

        match deserializer.next()? {
            Ok(csv_record) => {
                self.line_num += 1;
                // Add line number context to any conversion errors
                Some(
                    convert_transfer_record(csv_record)
                        .map_err(|e| format!("Line {}: {}", self.line_num + 1, e)),
                )
            }
            Err(e) => {
                self.line_num += 1;
                Some(Err(format!(
                    "Line {}: CSV parse error: {}",
                    self.line_num + 1,
                    e
                )))
            }
        }
    }
}
