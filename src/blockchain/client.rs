//! Blockchain RPC client over a persistent WebSocket.
//!
//! # Responsibilities
//! - Connect once to the node endpoint and hold the socket for the process lifetime
//! - Query chain state (chain id, pending nonce, receipts)
//! - Broadcast signed transactions
//! - Bound every request with a timeout

use std::fmt;
use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::{Address, TxHash};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::transports::ws::WsConnect;
use alloy::transports::{Authorization, TransportResult};
use async_trait::async_trait;
use tokio::time::timeout;
use url::Url;

use crate::blockchain::confirmation::ReceiptSource;
use crate::blockchain::types::{BlockchainError, BlockchainResult, ReceiptStatus};
use crate::config::DeploymentSettings;

/// Upper bound for a single RPC round trip.
pub const RPC_TIMEOUT_SECS: u64 = 30;

/// Node WebSocket URL plus the credential sent with the handshake.
#[derive(Clone)]
pub struct NodeEndpoint {
    url: Url,
    secret: String,
}

impl NodeEndpoint {
    /// `wss://{network}.infura.io/ws/v3/{project_id}`, authenticated with the
    /// project secret as basic-auth password.
    pub fn infura(network: &str, project_id: &str, secret: &str) -> BlockchainResult<Self> {
        let url = Url::parse(&format!("wss://{network}.infura.io/ws/v3/{project_id}"))
            .map_err(|e| BlockchainError::Endpoint(format!("network '{network}': {e}")))?;
        Ok(Self { url, secret: secret.to_string() })
    }

    pub fn from_settings(settings: &DeploymentSettings) -> BlockchainResult<Self> {
        Self::infura(
            &settings.network,
            &settings.infura_project_id,
            &settings.infura_project_secret,
        )
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    fn connector(&self) -> WsConnect {
        WsConnect::new(self.url.as_str()).with_auth(Authorization::basic("", &self.secret))
    }
}

impl fmt::Display for NodeEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}

impl fmt::Debug for NodeEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeEndpoint")
            .field("url", &self.url.as_str())
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// JSON-RPC client bound to a single node connection.
#[derive(Clone)]
pub struct ChainClient {
    provider: Arc<dyn Provider + Send + Sync>,
    endpoint: NodeEndpoint,
    timeout_duration: Duration,
}

impl ChainClient {
    /// Open the WebSocket connection.
    pub async fn connect(endpoint: NodeEndpoint) -> BlockchainResult<Self> {
        let provider = match timeout(
            Duration::from_secs(RPC_TIMEOUT_SECS),
            ProviderBuilder::new().connect_ws(endpoint.connector()),
        )
        .await
        {
            Ok(Ok(provider)) => provider,
            Ok(Err(e)) => {
                return Err(BlockchainError::Rpc(format!(
                    "failed to connect to {endpoint}: {e}"
                )))
            }
            Err(_) => return Err(BlockchainError::Timeout(RPC_TIMEOUT_SECS)),
        };

        tracing::info!(node = %endpoint, "Connected to node");

        Ok(Self::from_provider(Arc::new(provider), endpoint))
    }

    /// Wrap an already connected provider.
    pub(crate) fn from_provider(
        provider: Arc<dyn Provider + Send + Sync>,
        endpoint: NodeEndpoint,
    ) -> Self {
        Self {
            provider,
            endpoint,
            timeout_duration: Duration::from_secs(RPC_TIMEOUT_SECS),
        }
    }

    /// Get the chain ID from the node.
    pub async fn get_chain_id(&self) -> BlockchainResult<u64> {
        self.request("eth_chainId", self.provider.get_chain_id()).await
    }

    /// Transaction count of `address` including pending transactions.
    pub async fn get_pending_nonce(&self, address: Address) -> BlockchainResult<u64> {
        self.request(
            "eth_getTransactionCount",
            self.provider.get_transaction_count(address).pending(),
        )
        .await
    }

    /// Broadcast an EIP-2718 encoded signed transaction.
    pub async fn send_raw_transaction(&self, encoded: &[u8]) -> BlockchainResult<TxHash> {
        let pending = self
            .request("eth_sendRawTransaction", self.provider.send_raw_transaction(encoded))
            .await?;
        Ok(*pending.tx_hash())
    }

    async fn request<T, F>(&self, method: &'static str, call: F) -> BlockchainResult<T>
    where
        F: IntoFuture<Output = TransportResult<T>>,
    {
        match timeout(self.timeout_duration, call).await {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(e)) => {
                tracing::warn!(method, error = %e, "RPC error");
                Err(BlockchainError::Rpc(format!("{method}: {e}")))
            }
            Err(_) => {
                tracing::warn!(method, "RPC timeout");
                Err(BlockchainError::Timeout(self.timeout_duration.as_secs()))
            }
        }
    }
}

#[async_trait]
impl ReceiptSource for ChainClient {
    async fn receipt_status(&self, tx_hash: TxHash) -> BlockchainResult<ReceiptStatus> {
        let receipt = self
            .request("eth_getTransactionReceipt", self.provider.get_transaction_receipt(tx_hash))
            .await?;

        Ok(match receipt {
            None => ReceiptStatus::NotFound,
            Some(r) if r.status() => ReceiptStatus::Success,
            Some(_) => ReceiptStatus::Reverted,
        })
    }
}

impl fmt::Debug for ChainClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainClient")
            .field("endpoint", &self.endpoint)
            .field("timeout_secs", &self.timeout_duration.as_secs())
            .finish()
    }
}
