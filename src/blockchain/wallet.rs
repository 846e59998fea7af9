//! Wallet management and transaction signing.
//!
//! # Security
//! - The private key comes from the validated configuration only
//! - Keys are never logged or serialized

use alloy::consensus::TxEnvelope;
use alloy::network::{EthereumWallet, TransactionBuilder};
use alloy::primitives::Address;
use alloy::rpc::types::TransactionRequest;
use alloy::signers::local::PrivateKeySigner;

use crate::blockchain::types::{BlockchainError, BlockchainResult};

/// Signing account for init transactions.
#[derive(Clone)]
pub struct Wallet {
    address: Address,
    inner: EthereumWallet,
}

impl Wallet {
    /// Create a wallet from a hex-encoded private key string.
    ///
    /// # Arguments
    /// * `private_key_hex` - Hex string (with or without 0x prefix)
    pub fn from_private_key(private_key_hex: &str) -> BlockchainResult<Self> {
        let key_hex = private_key_hex.strip_prefix("0x").unwrap_or(private_key_hex);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| BlockchainError::Wallet(format!("Invalid private key format: {}", e)))?;
        let address = signer.address();

        tracing::debug!(address = %address, "Wallet initialized");

        Ok(Self {
            address,
            inner: EthereumWallet::from(signer),
        })
    }

    /// Load the setter key and check it controls `expected`.
    ///
    /// The pending nonce is read for the configured address, so a key for any
    /// other account can never produce a valid transaction.
    pub fn for_setter(private_key_hex: &str, expected: Address) -> BlockchainResult<Self> {
        let wallet = Self::from_private_key(private_key_hex)?;
        if wallet.address != expected {
            return Err(BlockchainError::Wallet(format!(
                "private key belongs to {}, not setter address {}",
                wallet.address, expected
            )));
        }
        Ok(wallet)
    }

    /// Get the wallet's address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Sign a fully populated request into a broadcastable envelope.
    pub async fn sign(&self, request: TransactionRequest) -> BlockchainResult<TxEnvelope> {
        request
            .build(&self.inner)
            .await
            .map_err(|e| BlockchainError::Signing(e.to_string()))
    }
}

impl std::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet").field("address", &self.address).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::consensus::Transaction;
    use alloy::primitives::{Bytes, U256};

    // Well-known test private key (Anvil's first account)
    const TEST_PRIVATE_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const TEST_ADDRESS: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";

    #[test]
    fn test_wallet_from_private_key() {
        let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        assert_eq!(wallet.address().to_string().to_lowercase(), TEST_ADDRESS);
    }

    #[test]
    fn test_wallet_with_0x_prefix() {
        let wallet = Wallet::from_private_key(&format!("0x{}", TEST_PRIVATE_KEY)).unwrap();
        assert_eq!(wallet.address().to_string().to_lowercase(), TEST_ADDRESS);
    }

    #[test]
    fn test_invalid_private_key() {
        let result = Wallet::from_private_key("invalid_key");
        assert!(result.unwrap_err().to_string().contains("Invalid private key"));
    }

    #[test]
    fn test_setter_mismatch() {
        let other = Address::with_last_byte(1);
        let err = Wallet::for_setter(TEST_PRIVATE_KEY, other).unwrap_err();
        assert!(matches!(err, BlockchainError::Wallet(_)));

        let ok = Wallet::for_setter(TEST_PRIVATE_KEY, TEST_ADDRESS.parse().unwrap());
        assert!(ok.is_ok());
    }

    #[test]
    fn test_debug_has_no_key() {
        let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        assert!(!format!("{:?}", wallet).contains(TEST_PRIVATE_KEY));
    }

    #[tokio::test]
    async fn test_sign_legacy_request() {
        let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        let request = TransactionRequest::default()
            .with_to(Address::with_last_byte(7))
            .with_input(Bytes::from_static(&[0xe1, 0xc7, 0x39, 0x2a]))
            .with_value(U256::ZERO)
            .with_nonce(3)
            .with_chain_id(1337)
            .with_gas_limit(6_000_000)
            .with_gas_price(20_000_000_000);

        let envelope = wallet.sign(request).await.unwrap();
        assert!(envelope.is_legacy());
        assert_eq!(envelope.nonce(), 3);
        assert_eq!(envelope.chain_id(), Some(1337));
        assert_eq!(envelope.gas_limit(), 6_000_000);
    }
}
