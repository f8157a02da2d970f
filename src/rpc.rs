use std::borrow::Cow;
use std::collections::BTreeMap;

use alloy::eips::BlockNumberOrTag;
use alloy::primitives::{Address, B256};
use alloy::providers::Provider;
use alloy::rpc::json_rpc::{RpcError, RpcRecv, RpcSend};
use serde::{Deserialize, Serialize};

use crate::client::{Error, Web3Client};

/// A single vote cast by a signer to add or remove an authorized signer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    /// The authorized signer that cast this vote.
    pub signer: Address,
    /// Block number the vote was cast in.
    pub block: u64,
    /// Account being voted on.
    pub address: Address,
    /// Whether to authorize or deauthorize the voted account.
    pub authorize: bool,
}

/// Running tally of the votes for a single account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    /// Whether the vote is about authorizing or kicking someone.
    pub authorize: bool,
    /// Number of votes until now wanting to pass the proposal.
    pub votes: u64,
}

/// State of the clique proof-of-authority consensus at a given point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    /// Block number where the snapshot was created.
    pub number: u64,
    /// Block hash where the snapshot was created.
    pub hash: B256,
    /// Authorized signers, mapped to the last block they signed.
    pub signers: BTreeMap<Address, u64>,
    /// Accounts allowed to vote, mapped to the last block they voted in.
    pub voters: BTreeMap<Address, u64>,
    /// List of votes cast in chronological order.
    pub votes: Vec<Vote>,
    /// Current vote tally to avoid recalculating.
    pub tally: BTreeMap<Address, Tally>,
}

impl Web3Client {
    /// Makes a JSON-RPC call to the endpoint.
    /// Handles serialization, deserialization, and error mapping for RPC requests.
    pub async fn rpc_call<S: RpcSend, R: RpcRecv>(
        &self,
        method: impl Into<Cow<'static, str>>,
        params: S,
    ) -> Result<R, Error> {
        let method = method.into();
        log::debug!("RPC Call - Method: {method}, Params: {params:?}");
        self.provider
            .client()
            .request(method.clone(), params)
            .await
            .inspect(|res| log::trace!("RPC Response: {res:?}"))
            .map_err(|e| match e {
                RpcError::ErrorResp(err) => {
                    format!("Error response from RPC service: {err}")
                }
                RpcError::SerError(err) => format!("Serialization error: {err}"),
                RpcError::DeserError { err, text } => {
                    log::debug!("Deserialization error: {err}, response text: {text}");
                    format!("Deserialization error: {err}")
                }
                e => e.to_string(),
            })
            .map_err(|e| Error::RpcRequestError(format!("{method}: {e}")))
    }

    /// Gets the clique consensus snapshot at the latest block.
    pub async fn get_snapshot(&self) -> Result<Snapshot, Error> {
        self.rpc_call::<_, Snapshot>("clique_getSnapshot", (BlockNumberOrTag::Latest,))
            .await
    }
}
