//! Testing utilities.
//!
//! Provides a mock JSON-RPC node backed by `httpmock` and JSON fixtures for the
//! responses the SDK deserializes.

use alloy::primitives::{Address, B256};
use chain_rpc_sdk::Web3Client;
use chain_rpc_sdk::receipt::ReceiptPollConfig;
use httpmock::{Method, Mock, MockServer};
use serde_json::{Value, json};
use url::Url;

/// Initializes the test logger. Safe to call from every test.
pub fn init_logger(debug: bool) {
    let level = if debug { "debug" } else { "info" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .is_test(true)
        .try_init();
}

/// A mock blockchain node answering JSON-RPC calls by method name.
pub struct MockNode {
    server: MockServer,
}

impl MockNode {
    /// Starts a mock node on a random local port.
    pub async fn start() -> Self {
        Self {
            server: MockServer::start_async().await,
        }
    }

    /// Gets the URL of the mock node.
    pub fn url(&self) -> Url {
        Url::parse(&self.server.base_url()).expect("mock server URL is valid")
    }

    /// Creates a client with default configuration for this node.
    pub fn client(&self) -> Web3Client {
        Web3Client::new(self.url())
    }

    /// Creates a client with the given receipt polling configuration.
    pub fn client_with_polling(&self, config: ReceiptPollConfig) -> Web3Client {
        Web3Client::builder()
            .rpc_url(self.url())
            .receipt_config(config)
            .build()
    }

    /// Answers every call of `method` with a successful `result`.
    pub async fn respond(&self, method: &str, result: Value) -> Mock<'_> {
        let body = json!({ "jsonrpc": "2.0", "id": 0, "result": result });
        self.mock_method(method, body).await
    }

    /// Answers every call of `method` with a JSON-RPC error object.
    pub async fn respond_error(&self, method: &str, code: i64, message: &str) -> Mock<'_> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 0,
            "error": { "code": code, "message": message }
        });
        self.mock_method(method, body).await
    }

    async fn mock_method(&self, method: &str, body: Value) -> Mock<'_> {
        let matcher = json!({ "method": method }).to_string();
        log::debug!("Mocking {method} with {body}");
        self.server
            .mock_async(|when, then| {
                when.method(Method::POST).json_body_partial(matcher);
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(body);
            })
            .await
    }
}

/// Empty logs bloom, 256 zero bytes.
fn empty_bloom() -> String {
    format!("0x{}", "00".repeat(256))
}

/// A mined block with the given number and hash and no transactions.
pub fn block_json(number: u64, hash: B256) -> Value {
    json!({
        "hash": hash,
        "parentHash": B256::ZERO,
        "sha3Uncles": "0x1dcc4de8dec75d7aab85b567b6ccd41ad312451b948a7413f0a142fd40d49347",
        "miner": Address::ZERO,
        "stateRoot": B256::repeat_byte(0x01),
        "transactionsRoot": "0x56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421",
        "receiptsRoot": "0x56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421",
        "logsBloom": empty_bloom(),
        "difficulty": "0x1",
        "number": format!("0x{number:x}"),
        "gasLimit": "0x7a1200",
        "gasUsed": "0x0",
        "timestamp": "0x5c7e4e5c",
        "extraData": "0x",
        "mixHash": B256::ZERO,
        "nonce": "0x0000000000000000",
        "size": "0x25c",
        "uncles": [],
        "transactions": []
    })
}

/// A legacy transaction; pending when `block_hash` is `None`.
pub fn transaction_json(hash: B256, from: Address, block_hash: Option<B256>) -> Value {
    let (block_number, index) = match block_hash {
        Some(_) => (json!("0x1"), json!("0x0")),
        None => (Value::Null, Value::Null),
    };
    json!({
        "hash": hash,
        "type": "0x0",
        "nonce": "0x0",
        "blockHash": block_hash,
        "blockNumber": block_number,
        "transactionIndex": index,
        "from": from,
        "to": Address::with_last_byte(0x42),
        "value": "0xde0b6b3a7640000",
        "gasPrice": "0x3b9aca00",
        "gas": "0x5208",
        "input": "0x",
        "v": "0x1b",
        "r": "0x2a",
        "s": "0x2a"
    })
}

/// A successful receipt of a contract-creation transaction.
pub fn receipt_json(tx_hash: B256, contract: Address) -> Value {
    json!({
        "type": "0x0",
        "transactionHash": tx_hash,
        "transactionIndex": "0x0",
        "blockHash": B256::repeat_byte(0x0b),
        "blockNumber": "0x1",
        "from": Address::with_last_byte(0x01),
        "to": null,
        "contractAddress": contract,
        "cumulativeGasUsed": "0x1d8a8",
        "gasUsed": "0x1d8a8",
        "effectiveGasPrice": "0x3b9aca00",
        "logs": [],
        "logsBloom": empty_bloom(),
        "status": "0x1"
    })
}
