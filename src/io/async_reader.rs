//! Asynchronous CSV reader with batch interface
//!
//! Streams transfer instructions from a CSV source in batches for the
//! concurrent processing strategy. Delegates parsing and conversion to the
//! csv_format module.

use crate::io::csv_format::{convert_transfer_record, TransferCsvRecord};
use crate::types::TransferRequest;
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;

/// Asynchronous transfer instruction reader
///
/// Maintains streaming behavior with constant memory usage per batch.
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncDeserializer<R>,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        Self { csv_reader }
    }

    /// Read up to `batch_size` instructions
    ///
    /// Malformed rows are logged and skipped. An empty vector signals end
    /// of input.
    pub async fn read_batch(&mut self, batch_size: usize) -> Vec<TransferRequest> {
        let mut batch = Vec::with_capacity(batch_size);
        let mut records = self.csv_reader.deserialize::<TransferCsvRecord>();

        while batch.len() < batch_size {
            match records.next().await {
                Some(Ok(csv_record)) => match convert_transfer_record(csv_record) {
                    Ok(request) => batch.push(request),
                    Err(e) => log::warn!("skipping instruction: {}", e),
                },
                Some(Err(e)) => log::warn!("CSV parse error: {}", e),
                None => break,
            }
        }

        batch
    }
}
