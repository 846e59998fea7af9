//! In-memory node for unit tests.

use std::sync::Arc;

use alloy::primitives::TxHash;
use alloy::providers::mock::Asserter;
use alloy::providers::ProviderBuilder;
use serde_json::{json, Value};

use crate::blockchain::client::{ChainClient, NodeEndpoint};

/// Client whose RPC responses are queued on `asserter`, in call order.
pub(crate) fn mocked_client(asserter: &Asserter) -> ChainClient {
    let provider = ProviderBuilder::new().connect_mocked_client(asserter.clone());
    let endpoint = NodeEndpoint::infura("localhost", "test", "").expect("static endpoint");
    ChainClient::from_provider(Arc::new(provider), endpoint)
}

/// `eth_getTransactionReceipt` result for a mined legacy transaction.
pub(crate) fn receipt_json(tx_hash: TxHash, success: bool) -> Value {
    json!({
        "type": "0x0",
        "status": if success { "0x1" } else { "0x0" },
        "cumulativeGasUsed": "0x5208",
        "logs": [],
        "logsBloom": format!("0x{}", "0".repeat(512)),
        "transactionHash": tx_hash,
        "transactionIndex": "0x0",
        "blockHash": TxHash::with_last_byte(0xbb),
        "blockNumber": "0x1",
        "gasUsed": "0x5208",
        "effectiveGasPrice": "0x4a817c800",
        "from": "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266",
        "to": "0x0000000000000000000000000000000000000006",
        "contractAddress": null
    })
}
