//! Confirmation polling.
//!
//! # States
//! ```text
//! PENDING → CONFIRMED   receipt with status 1
//! PENDING → NOT FOUND   attempts exhausted (missing or reverted receipt)
//! ```
//!
//! One immediate lookup plus `max_retries` more, `interval` apart. A reverted
//! receipt keeps the poller waiting exactly like a missing one.

use std::time::Duration;

use alloy::primitives::TxHash;
use async_trait::async_trait;
use tokio::time::sleep;

use crate::blockchain::types::{BlockchainResult, ConfirmationStatus, ReceiptStatus};

/// Retries after the first lookup.
pub const DEFAULT_MAX_RETRIES: u32 = 15;

/// Pause between lookups.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Anything that can look up a receipt by transaction hash.
#[async_trait]
pub trait ReceiptSource: Send + Sync {
    async fn receipt_status(&self, tx_hash: TxHash) -> BlockchainResult<ReceiptStatus>;
}

/// Bounded receipt poller.
#[derive(Debug, Clone, Copy)]
pub struct ConfirmationPoller {
    max_retries: u32,
    interval: Duration,
}

impl Default for ConfirmationPoller {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl ConfirmationPoller {
    pub fn new(max_retries: u32, interval: Duration) -> Self {
        Self { max_retries, interval }
    }

    /// Total lookups performed before giving up.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries + 1
    }

    /// Poll until `tx_hash` has a successful receipt or attempts run out.
    ///
    /// A missing handle (submission failed) is `NotConfirmed` without any
    /// lookup. RPC failures other than "no receipt yet" are returned as errors.
    pub async fn wait<S>(
        &self,
        source: &S,
        tx_hash: Option<TxHash>,
    ) -> BlockchainResult<ConfirmationStatus>
    where
        S: ReceiptSource + ?Sized,
    {
        let Some(tx_hash) = tx_hash else {
            tracing::warn!("No transaction hash to check");
            return Ok(ConfirmationStatus::NotConfirmed);
        };

        tracing::info!(tx_hash = %tx_hash, "Checking transaction until found in network");

        for attempt in 1..=self.max_attempts() {
            match source.receipt_status(tx_hash).await? {
                ReceiptStatus::Success => {
                    tracing::info!(tx_hash = %tx_hash, attempt, "Ok, found transaction and it was completed");
                    return Ok(ConfirmationStatus::Confirmed);
                }
                ReceiptStatus::Reverted => {
                    // Treated the same as a missing receipt.
                    tracing::warn!(tx_hash = %tx_hash, attempt, "Transaction receipt has failed status");
                }
                ReceiptStatus::NotFound => {
                    tracing::debug!(tx_hash = %tx_hash, attempt, "Transaction pending");
                }
            }

            if attempt < self.max_attempts() {
                sleep(self.interval).await;
            }
        }

        tracing::error!(
            tx_hash = %tx_hash,
            waited_secs = self.interval.as_secs() * u64::from(self.max_retries),
            "Transaction receipt not found. Supposedly it failed, please check hash on Etherscan"
        );
        tracing::error!("Stopping init for now");
        Ok(ConfirmationStatus::NotConfirmed)
    }
}
