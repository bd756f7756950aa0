//! Concurrent transfer dispatch with sender-based partitioning
//!
//! This module provides the `TransferDispatcher`, which replays a batch of
//! transfer instructions concurrently while keeping instructions from the
//! same sender in their original order.
//!
//! # Design
//!
//! A batch is partitioned by sender account. Each partition is replayed
//! sequentially on its own tokio task, so different senders proceed in
//! parallel while a single sender's instructions keep file order (which
//! matters for deterministic daily-limit and insufficient-funds outcomes).
//!
//! Correctness never depends on this partitioning: the engine's own
//! per-account locking is the serialization point. The partitioning only
//! buys predictable per-sender ordering and contention-free parallelism.

use crate::core::engine::LedgerEngine;
use crate::types::{AccountNumber, BankError, TransactionRecord, TransferRequest};
use std::collections::HashMap;
use std::sync::Arc;

/// Outcome of replaying a single transfer instruction
#[derive(Debug, Clone)]
pub struct TransferOutcome {
    /// The instruction that was replayed
    pub request: TransferRequest,

    /// The engine's verdict
    pub result: Result<TransactionRecord, BankError>,
}

/// Replays transfer batches with per-sender partitioning
#[derive(Clone)]
pub struct TransferDispatcher {
    engine: Arc<LedgerEngine>,
}

impl TransferDispatcher {
    pub fn new(engine: Arc<LedgerEngine>) -> Self {
        Self { engine }
    }

    /// Partition a batch by sender account
    ///
    /// Every instruction lands in exactly one partition; instructions for
    /// each sender keep their original relative order.
    pub fn partition_by_sender(
        &self,
        batch: Vec<TransferRequest>,
    ) -> HashMap<AccountNumber, Vec<TransferRequest>> {
        let mut partitions: HashMap<AccountNumber, Vec<TransferRequest>> = HashMap::new();

        for request in batch {
            partitions
                .entry(request.sender_account.clone())
                .or_default()
                .push(request);
        }

        partitions
    }

    /// Replay one sender's instructions sequentially, in order
    ///
    /// Failures are captured per instruction and never stop the queue.
    pub async fn replay_sender_queue(
        &self,
        requests: Vec<TransferRequest>,
    ) -> Vec<TransferOutcome> {
        let mut outcomes = Vec::with_capacity(requests.len());

        for request in requests {
            let result = self.engine.transfer(&request);
            outcomes.push(TransferOutcome { request, result });
        }

        outcomes
    }

    /// Replay a batch: senders in parallel, each sender in order
    ///
    /// Outcomes may come back in any cross-sender order.
    pub async fn replay_batch(&self, batch: Vec<TransferRequest>) -> Vec<TransferOutcome> {
        let partitions = self.partition_by_sender(batch);

        let mut tasks = Vec::with_capacity(partitions.len());
        for (_sender, requests) in partitions {
            let dispatcher = self.clone();
            tasks.push(tokio::spawn(async move {
                dispatcher.replay_sender_queue(requests).await
            }));
        }

        let mut outcomes = Vec::new();
        for task in tasks {
            match task.await {
                Ok(sender_outcomes) => outcomes.extend(sender_outcomes),
                Err(e) => {
                    log::error!("dispatch task panicked: {:?}", e);
                }
            }
        }

        outcomes
    }
}
