//! Chain-specific types and error definitions.

use thiserror::Error;

/// Errors that can occur during blockchain operations.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// Node URL could not be assembled.
    #[error("Invalid node endpoint: {0}")]
    Endpoint(String),

    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// Invalid private key format or address mismatch.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Transaction could not be built or signed.
    #[error("Signing failed: {0}")]
    Signing(String),
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;

/// Outcome of a single receipt lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiptStatus {
    /// Receipt exists with status 1.
    Success,
    /// Receipt exists with status 0.
    Reverted,
    /// No receipt yet (pending, dropped or unknown hash).
    NotFound,
}

/// Result of polling a transaction until a bound is reached.
///
/// A reverted receipt and a receipt that never appeared both end as
/// `NotConfirmed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationStatus {
    Confirmed,
    NotConfirmed,
}

impl ConfirmationStatus {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, ConfirmationStatus::Confirmed)
    }
}
