use alloy::eips::{BlockId, BlockNumberOrTag};
use alloy::primitives::{Address, B256, Bytes, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::{Block, Transaction};
use alloy::transports::http::reqwest::Url;
use bon::bon;
use displaydoc::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::deploy::DeployConfig;
use crate::network::Network;
use crate::receipt::ReceiptPollConfig;

/// Represents errors that can occur in the SDK.
/// Wraps the underlying RPC client errors with a short context prefix.
#[derive(Debug, Display, Error)]
pub enum Error {
    /// Invalid RPC URL {0:?}: {1}
    InvalidUrl(String, String),
    /// Unknown network {0:?}
    UnknownNetwork(String),
    /// Failed to send the RPC request: {0}
    RpcRequestError(String),
    /// Block {0} not found
    BlockNotFound(BlockNumberOrTag),
    /// Transaction {0} not found
    TransactionNotFound(B256),
    /// Wrong private key: {0}
    InvalidPrivateKey(String),
    /// Cannot get gas price: {0}
    GasPrice(String),
    /// Cannot get nonce: {0}
    Nonce(String),
    /// Cannot decode contract data: {0}
    ContractData(String),
    /// Cannot sign transaction: {0}
    SigningError(String),
    /// Cannot send transaction: {0}
    SendTransaction(String),
    /// Cannot get the receipt: {0}
    Receipt(String),
    /// Operation cancelled
    Cancelled,
}

/// Identity of the network a client is connected to.
/// Fields the node failed to report are left empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkIdentity {
    /// Network ID as reported by `net_version`.
    pub network_id: Option<u64>,
    /// Chain ID as reported by `eth_chainId`.
    pub chain_id: Option<u64>,
    /// Hash of the genesis block.
    pub genesis_hash: Option<B256>,
}

/// A client for a blockchain node's JSON-RPC endpoint.
/// Holds the endpoint URL and the underlying provider; cheap to clone.
#[derive(Clone)]
pub struct Web3Client {
    /// The underlying provider for making RPC calls.
    pub(crate) provider: DynProvider,
    /// The URL of the RPC endpoint.
    pub(crate) rpc_url: Url,
    /// Receipt polling configuration.
    pub(crate) receipt_config: ReceiptPollConfig,
    /// Contract deployment configuration.
    pub(crate) deploy_config: DeployConfig,
}

#[bon]
impl Web3Client {
    /// Creates a client for the given endpoint with optional polling and deploy settings.
    /// The connection is lazy: no request is made until the first call.
    #[builder(start_fn = builder, finish_fn = build)]
    pub fn from_parts(
        rpc_url: Url,
        #[builder(default)] receipt_config: ReceiptPollConfig,
        #[builder(default)] deploy_config: DeployConfig,
    ) -> Self {
        let provider = ProviderBuilder::new()
            .connect_http(rpc_url.clone())
            .erased();

        Self {
            provider,
            rpc_url,
            receipt_config,
            deploy_config,
        }
    }

    /// Creates a new client with the given endpoint and default configuration.
    pub fn new(endpoint: Url) -> Self {
        Self::builder().rpc_url(endpoint).build()
    }

    /// Parses the given RPC URL and creates a client for it.
    pub fn connect(rpc_url: &str) -> Result<Self, Error> {
        let url =
            Url::parse(rpc_url).map_err(|e| Error::InvalidUrl(rpc_url.to_string(), e.to_string()))?;
        log::debug!("Connecting to {url}");
        Ok(Self::new(url))
    }

    /// Creates a client for one of the well-known networks, see [`crate::network_url`].
    pub fn for_network(network: &str) -> Result<Self, Error> {
        let network = network
            .parse::<Network>()
            .map_err(|_| Error::UnknownNetwork(network.to_string()))?;
        Self::connect(network.url())
    }

    /// Gets the URL of the RPC endpoint.
    pub fn rpc_url(&self) -> &Url {
        &self.rpc_url
    }

    /// Gets the underlying provider used for blockchain interactions.
    pub fn provider(&self) -> DynProvider {
        self.provider.clone()
    }

    /// Gets an account's balance in wei, at the given block or at the latest one.
    pub async fn get_balance(&self, address: Address, block: Option<u64>) -> Result<U256, Error> {
        log::debug!("Getting balance of {address} at block {block:?}");
        self.provider
            .get_balance(address)
            .block_id(block_id(block))
            .await
            .map_err(|e| Error::RpcRequestError(format!("Failed to get balance of {address}: {e}")))
    }

    /// Gets the code deployed at an address, at the given block or at the latest one.
    pub async fn get_code(&self, address: Address, block: Option<u64>) -> Result<Bytes, Error> {
        log::debug!("Getting code of {address} at block {block:?}");
        self.provider
            .get_code_at(address)
            .block_id(block_id(block))
            .await
            .map_err(|e| Error::RpcRequestError(format!("Failed to get code of {address}: {e}")))
    }

    /// Gets a block, including its transactions, by number.
    /// `None` selects the latest block.
    pub async fn get_block_by_number(&self, number: Option<u64>) -> Result<Block, Error> {
        let tag = number.map_or(BlockNumberOrTag::Latest, BlockNumberOrTag::Number);
        log::debug!("Getting block {tag}");
        self.provider
            .get_block_by_number(tag)
            .full()
            .await
            .map_err(|e| Error::RpcRequestError(format!("Failed to get block {tag}: {e}")))?
            .ok_or(Error::BlockNotFound(tag))
    }

    /// Gets the current block number.
    pub async fn get_block_number(&self) -> Result<u64, Error> {
        log::debug!("Getting current block number");
        self.provider
            .get_block_number()
            .await
            .map_err(|e| Error::RpcRequestError(format!("Failed to get block number: {e}")))
    }

    /// Gets a transaction by hash.
    /// Returns the transaction and whether it is still pending (not included in a block).
    pub async fn get_transaction_by_hash(&self, hash: B256) -> Result<(Transaction, bool), Error> {
        log::debug!("Getting transaction {hash}");
        let tx = self
            .provider
            .get_transaction_by_hash(hash)
            .await
            .map_err(|e| Error::RpcRequestError(format!("Failed to get transaction {hash}: {e}")))?
            .ok_or(Error::TransactionNotFound(hash))?;
        let pending = tx.block_hash.is_none();
        Ok((tx, pending))
    }

    /// Gets the current gas price suggested by the node, in wei.
    pub async fn get_gas_price(&self) -> Result<u128, Error> {
        log::debug!("Getting suggested gas price");
        self.provider
            .get_gas_price()
            .await
            .map_err(|e| Error::GasPrice(e.to_string()))
    }

    /// Gets the identity of the connected network.
    /// Each field is queried independently; failures are logged and leave the field empty.
    pub async fn get_id(&self) -> NetworkIdentity {
        let mut id = NetworkIdentity::default();

        match self.provider.get_net_version().await {
            Ok(network_id) => id.network_id = Some(network_id),
            Err(e) => log::warn!("Failed to get network ID: {e}"),
        }

        match self.provider.get_chain_id().await {
            Ok(chain_id) => id.chain_id = Some(chain_id),
            Err(e) => log::warn!("Failed to get chain ID: {e}"),
        }

        match self
            .provider
            .get_block_by_number(BlockNumberOrTag::Number(0))
            .await
        {
            Ok(Some(genesis)) => id.genesis_hash = Some(genesis.header.hash),
            Ok(None) => log::warn!("Failed to get genesis block: block not found"),
            Err(e) => log::warn!("Failed to get genesis block: {e}"),
        }

        id
    }
}

/// Maps an optional block number to a block id, `None` being the latest block.
fn block_id(block: Option<u64>) -> BlockId {
    block.map_or(BlockId::latest(), BlockId::number)
}
