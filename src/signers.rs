use std::str::FromStr;

use alloy::primitives::{Address, B256, keccak256};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::{Signature, SignerSync};
use async_trait::async_trait;

use crate::client::Error;
use crate::utils::strip_hex_prefix;

/// Signs transaction payloads on behalf of a single account.
#[async_trait]
pub trait TransactionSigner: Send + Sync {
    /// Returns the address of the account this signer signs for.
    fn address(&self) -> Address;

    /// Signs the keccak-256 hash of `data`.
    async fn sign(&self, data: &[u8]) -> anyhow::Result<Signature>;
}

/// A signer that keeps the private key in memory
pub struct InMemorySigner {
    signer: PrivateKeySigner,
}

impl InMemorySigner {
    /// Generates a new random private key
    pub fn generate() -> Self {
        let signer = PrivateKeySigner::random();
        Self { signer }
    }

    /// Parses a hex encoded private key, with or without the `0x` prefix.
    pub fn from_hex(private_key: &str) -> Result<Self, Error> {
        let key = B256::from_str(strip_hex_prefix(private_key))
            .map_err(|e| Error::InvalidPrivateKey(e.to_string()))?;
        let signer = PrivateKeySigner::from_bytes(&key)
            .map_err(|e| Error::InvalidPrivateKey(e.to_string()))?;
        Ok(Self { signer })
    }

    /// Returns the underlying alloy signer.
    pub fn inner(&self) -> &PrivateKeySigner {
        &self.signer
    }
}

impl From<PrivateKeySigner> for InMemorySigner {
    fn from(signer: PrivateKeySigner) -> Self {
        Self { signer }
    }
}

#[async_trait]
impl TransactionSigner for InMemorySigner {
    fn address(&self) -> Address {
        self.signer.address()
    }

    async fn sign(&self, data: &[u8]) -> anyhow::Result<Signature> {
        let hash = keccak256(data);
        Ok(self.signer.sign_hash_sync(&hash)?)
    }
}
