// # Chain RPC SDK
//!
//! A thin convenience layer over a blockchain node's JSON-RPC interface, built on top of
//! [Alloy](https://github.com/alloy-rs/alloy).
//!
//! The SDK resolves well-known network names to RPC endpoints, opens a connection and exposes
//! pass-through accessors for balances, code, blocks, transactions, the network identity and
//! the clique consensus snapshot. On top of that it can sign and broadcast a contract-creation
//! transaction and poll for its receipt.
//!
//! ```no_run
//! use chain_rpc_sdk::Web3Client;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let client = Web3Client::for_network("testnet")?;
//! let id = client.get_id().await;
//! println!("chain id: {:?}", id.chain_id);
//!
//! let tx = client.deploy_contract("0x...", "0x6080...").await?;
//! let receipt = client
//!     .wait_for_receipt(*tx.hash(), &CancellationToken::new())
//!     .await?;
//! println!("contract deployed at {:?}", receipt.contract_address);
//! # Ok(())
//! # }
//! ```

/// Re-export commonly used types from `alloy`.
pub use alloy::primitives::{Address, B256, Bytes, TxHash, U256};
pub use alloy::signers::Signature;
pub use alloy::signers::local::PrivateKeySigner;
pub use alloy::transports::http::reqwest::Url;

pub use client::{Error, NetworkIdentity, Web3Client};
pub use network::{Network, network_url};

/// Module with the network-name lookup table.
pub mod network;

/// Module for the RPC client handle and its pass-through accessors.
pub mod client;

/// Module for signing and broadcasting contract-creation transactions.
pub mod deploy;

/// Module for polling transaction receipts.
pub mod receipt;

/// Module for raw JSON-RPC calls and the clique snapshot types.
pub mod rpc;

/// Module for custom signers.
/// Provides abstractions and implementations for signing transactions.
pub mod signers;

/// Module with utility functions.
/// Includes helpers for unit conversion and hex parsing.
pub mod utils;
