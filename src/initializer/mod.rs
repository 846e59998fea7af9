//! Per-contract initialization.
//!
//! # Data Flow
//! ```text
//! Selector
//!     → dispatch.rs (fixed order, stop at first failure)
//!     → Initializer::submit (build call → envelope → sign → send)
//!     → ConfirmationPoller::wait (receipt polling)
//! ```
//!
//! Every contract goes through the same executor; only the argument table in
//! `contracts::calls` differs between them.

pub mod dispatch;

use alloy::primitives::TxHash;
use async_trait::async_trait;
use thiserror::Error;

use crate::blockchain::transaction::GasSettings;
use crate::blockchain::{
    BlockchainError, BlockchainResult, ChainClient, ConfirmationPoller, ConfirmationStatus,
    NodeEndpoint, TxBuilder, Wallet,
};
use crate::config::InitializerConfig;
use crate::contracts::{ArtifactError, CallError, ContractKind, InitCall, InterfaceSet};

pub use dispatch::{dispatch, DispatchError, InitStep, Selector};

/// Why a transaction could not be submitted.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    #[error(transparent)]
    Call(#[from] CallError),

    #[error(transparent)]
    Chain(#[from] BlockchainError),

    /// Signed locally but the node refused the broadcast.
    #[error("transaction {tx_hash} rejected: {source}")]
    Rejected {
        tx_hash: TxHash,
        #[source]
        source: BlockchainError,
    },
}

impl SubmitError {
    /// Locally computed hash, when the failure happened after signing.
    pub fn tx_hash(&self) -> Option<TxHash> {
        match self {
            Self::Rejected { tx_hash, .. } => Some(*tx_hash),
            _ => None,
        }
    }
}

/// Everything an init run needs, built once at startup.
#[derive(Debug)]
pub struct Initializer {
    config: InitializerConfig,
    interfaces: InterfaceSet,
    client: ChainClient,
    wallet: Wallet,
    poller: ConfirmationPoller,
}

impl Initializer {
    /// Load the setter wallet and open the node connection.
    pub async fn connect(
        config: InitializerConfig,
        interfaces: InterfaceSet,
    ) -> BlockchainResult<Self> {
        let settings = &config.deployment;
        let wallet = Wallet::for_setter(&settings.setter_priv, settings.setter_address)?;
        let client = ChainClient::connect(NodeEndpoint::from_settings(settings)?).await?;

        Ok(Self::from_parts(config, interfaces, client, wallet, ConfirmationPoller::default()))
    }

    pub(crate) fn from_parts(
        config: InitializerConfig,
        interfaces: InterfaceSet,
        client: ChainClient,
        wallet: Wallet,
        poller: ConfirmationPoller,
    ) -> Self {
        Self { config, interfaces, client, wallet, poller }
    }

    fn gas(&self) -> GasSettings {
        GasSettings {
            gas_limit: self.config.deployment.gas_limit,
            gas_price_wei: self.config.deployment.gas_price_wei,
        }
    }

    /// Build, sign and send the `init` transaction for `kind`.
    pub async fn try_submit(&self, kind: ContractKind) -> Result<TxHash, SubmitError> {
        let abi = self.interfaces.get(kind)?;
        let call = InitCall::build(kind, &self.config, abi)?;

        let builder = TxBuilder::new(&self.client, &self.wallet, self.gas());
        let request = builder.build(call.to, call.calldata.clone()).await?;

        tracing::info!(contract = %kind, function = %call.signature, call = %call, "Raw transaction");
        tracing::debug!(?request, "Unsigned transaction fields");

        let envelope = builder.sign(request).await?;
        let tx_hash = *envelope.tx_hash();
        builder
            .send(&envelope)
            .await
            .map_err(|source| SubmitError::Rejected { tx_hash, source })
    }

    /// Submit and report; a failed submission yields no handle.
    pub async fn submit(&self, kind: ContractKind) -> Option<TxHash> {
        tracing::info!("Initializing {} contract", kind);

        match self.try_submit(kind).await {
            Ok(tx_hash) => {
                tracing::info!(contract = %kind, tx_hash = %tx_hash, "Transaction hash");
                Some(tx_hash)
            }
            Err(e) => {
                tracing::error!(contract = %kind, tx_hash = ?e.tx_hash(), reason = %e, "Transaction failed to send");
                None
            }
        }
    }
}

#[async_trait]
impl InitStep for Initializer {
    async fn initialize(&self, kind: ContractKind) -> BlockchainResult<ConfirmationStatus> {
        let tx_hash = self.submit(kind).await;
        self.poller.wait(&self.client, tx_hash).await
    }
}
