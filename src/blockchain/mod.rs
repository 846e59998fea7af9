//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! DeploymentSettings (node credentials, setter key, gas)
//!     → client.rs (one WebSocket JSON-RPC connection)
//!     → wallet.rs (key loading, signing)
//!     → transaction.rs (envelope, sign, broadcast)
//!     → confirmation.rs (receipt polling)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from the environment
//! - Never log private keys or the node secret
//! - All RPC calls have a timeout
//! - No reconnection: a dropped socket fails the next call

pub mod client;
pub mod confirmation;
#[cfg(test)]
pub(crate) mod mock;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use client::{ChainClient, NodeEndpoint};
pub use confirmation::{ConfirmationPoller, ReceiptSource};
pub use transaction::TxBuilder;
pub use types::{BlockchainError, BlockchainResult, ConfirmationStatus, ReceiptStatus};
pub use wallet::Wallet;
