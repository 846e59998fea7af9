//! Transaction building, signing, and broadcasting.
//!
//! # Responsibilities
//! - Wrap encoded calldata in a legacy envelope (chain id, gas limit, gas price, nonce)
//! - Fetch the pending nonce and chain id fresh for every submission
//! - Sign, then broadcast; a failed broadcast is never resent

use alloy::consensus::TxEnvelope;
use alloy::eips::eip2718::Encodable2718;
use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, TxHash};
use alloy::rpc::types::TransactionRequest;

use crate::blockchain::client::ChainClient;
use crate::blockchain::types::BlockchainResult;
use crate::blockchain::wallet::Wallet;

/// Fixed gas parameters from the deployment settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasSettings {
    pub gas_limit: u64,
    pub gas_price_wei: u128,
}

/// Envelope fields fetched from the node per submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainState {
    pub chain_id: u64,
    pub nonce: u64,
}

/// Assemble the unsigned request.
pub fn unsigned_request(
    to: Address,
    data: Bytes,
    gas: GasSettings,
    state: ChainState,
) -> TransactionRequest {
    TransactionRequest::default()
        .with_to(to)
        .with_input(data)
        .with_nonce(state.nonce)
        .with_chain_id(state.chain_id)
        .with_gas_limit(gas.gas_limit)
        .with_gas_price(gas.gas_price_wei)
}

/// Transaction builder for the setter account.
pub struct TxBuilder<'a> {
    client: &'a ChainClient,
    wallet: &'a Wallet,
    gas: GasSettings,
}

impl<'a> TxBuilder<'a> {
    pub fn new(client: &'a ChainClient, wallet: &'a Wallet, gas: GasSettings) -> Self {
        Self { client, wallet, gas }
    }

    /// Build a request using the current pending nonce and chain id.
    pub async fn build(&self, to: Address, data: Bytes) -> BlockchainResult<TransactionRequest> {
        let nonce = self.client.get_pending_nonce(self.wallet.address()).await?;
        let chain_id = self.client.get_chain_id().await?;

        Ok(unsigned_request(to, data, self.gas, ChainState { chain_id, nonce }))
    }

    /// Sign `request` into a broadcastable envelope.
    pub async fn sign(&self, request: TransactionRequest) -> BlockchainResult<TxEnvelope> {
        let envelope = self.wallet.sign(request).await?;
        tracing::debug!(tx_hash = %envelope.tx_hash(), "Signed transaction");
        Ok(envelope)
    }

    /// Broadcast a signed envelope, returning the hash reported by the node.
    pub async fn send(&self, envelope: &TxEnvelope) -> BlockchainResult<TxHash> {
        let tx_hash = *envelope.tx_hash();
        let sent = self.client.send_raw_transaction(&envelope.encoded_2718()).await?;
        if sent != tx_hash {
            tracing::warn!(local = %tx_hash, node = %sent, "Node returned a different transaction hash");
        }
        Ok(sent)
    }
}
