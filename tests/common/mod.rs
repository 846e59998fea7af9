//! Shared in-memory chain doubles for integration tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use alloy::primitives::TxHash;
use async_trait::async_trait;

use contract_initializer::blockchain::{
    BlockchainError, BlockchainResult, ConfirmationPoller, ConfirmationStatus, ReceiptSource,
    ReceiptStatus,
};
use contract_initializer::initializer::InitStep;
use contract_initializer::ContractKind;

/// Receipt source that answers every lookup with the same status.
pub struct FixedReceipts {
    status: ReceiptStatus,
    lookups: AtomicU32,
}

impl FixedReceipts {
    pub fn new(status: ReceiptStatus) -> Self {
        Self { status, lookups: AtomicU32::new(0) }
    }

    pub fn lookups(&self) -> u32 {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReceiptSource for FixedReceipts {
    async fn receipt_status(&self, _tx_hash: TxHash) -> BlockchainResult<ReceiptStatus> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.status)
    }
}

/// What the fake chain does for one contract.
#[derive(Debug, Clone, Copy)]
pub enum Outcome {
    /// Receipt with this status on every lookup.
    Receipt(ReceiptStatus),
    /// Submission failed, no handle.
    SendFails,
    /// The connection dropped while polling.
    RpcDown,
}

/// Step that submits nothing but runs the real poller against scripted
/// receipts, recording which contracts were attempted.
pub struct ScriptedChain {
    outcomes: HashMap<ContractKind, Outcome>,
    poller: ConfirmationPoller,
    calls: Mutex<Vec<ContractKind>>,
}

impl ScriptedChain {
    /// Every contract confirms unless overridden.
    pub fn new(poller: ConfirmationPoller) -> Self {
        Self {
            outcomes: HashMap::new(),
            poller,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with(mut self, kind: ContractKind, outcome: Outcome) -> Self {
        self.outcomes.insert(kind, outcome);
        self
    }

    pub fn calls(&self) -> Vec<ContractKind> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl InitStep for ScriptedChain {
    async fn initialize(&self, kind: ContractKind) -> BlockchainResult<ConfirmationStatus> {
        self.calls.lock().unwrap().push(kind);

        let outcome = self
            .outcomes
            .get(&kind)
            .copied()
            .unwrap_or(Outcome::Receipt(ReceiptStatus::Success));

        match outcome {
            Outcome::Receipt(status) => {
                let receipts = FixedReceipts::new(status);
                self.poller.wait(&receipts, Some(TxHash::with_last_byte(1))).await
            }
            Outcome::SendFails => {
                let receipts = FixedReceipts::new(ReceiptStatus::Success);
                self.poller.wait(&receipts, None).await
            }
            Outcome::RpcDown => Err(BlockchainError::Rpc("connection closed".to_string())),
        }
    }
}
