use alloy::consensus::{SignableTransaction, Signed, TxEnvelope, TxLegacy};
use alloy::eips::eip2718::Encodable2718;
use alloy::hex;
use alloy::primitives::{TxKind, U256};
use alloy::providers::Provider;

use crate::client::{Error, Web3Client};
use crate::signers::{InMemorySigner, TransactionSigner};
use crate::utils::decode_prefixed_hex;

/// Configuration for contract-creation transactions.
#[derive(Debug, Clone)]
pub struct DeployConfig {
    /// Gas limit of the contract-creation transaction.
    pub gas_limit: u64,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            gas_limit: 2_000_000,
        }
    }
}

impl Web3Client {
    /// Signs and broadcasts a contract-creation transaction.
    ///
    /// `private_key_hex` may carry a `0x` prefix; `contract_data` must be `0x`-prefixed hex.
    /// Returns the signed transaction; its hash can be passed to
    /// [`wait_for_receipt`](Web3Client::wait_for_receipt).
    pub async fn deploy_contract(
        &self,
        private_key_hex: &str,
        contract_data: &str,
    ) -> Result<Signed<TxLegacy>, Error> {
        let signer = InMemorySigner::from_hex(private_key_hex)?;
        self.deploy_contract_with_signer(&signer, contract_data)
            .await
    }

    /// Signs a contract-creation transaction with the given signer and broadcasts it.
    ///
    /// The transaction is a legacy one without a chain ID, carrying no value, the node's
    /// suggested gas price and the sender's pending nonce.
    pub async fn deploy_contract_with_signer(
        &self,
        signer: &dyn TransactionSigner,
        contract_data: &str,
    ) -> Result<Signed<TxLegacy>, Error> {
        let gas_price = self.get_gas_price().await?;

        let from = signer.address();
        let nonce = self
            .provider
            .get_transaction_count(from)
            .pending()
            .await
            .map_err(|e| Error::Nonce(e.to_string()))?;

        let input =
            decode_prefixed_hex(contract_data).map_err(|e| Error::ContractData(e.to_string()))?;

        let tx = TxLegacy {
            chain_id: None,
            nonce,
            gas_price,
            gas_limit: self.deploy_config.gas_limit,
            to: TxKind::Create,
            value: U256::ZERO,
            input: input.into(),
        };

        let signature = signer
            .sign(&tx.encoded_for_signing())
            .await
            .map_err(|e| Error::SigningError(e.to_string()))?;
        let signed = tx.into_signed(signature);

        let encoded = TxEnvelope::from(signed.clone()).encoded_2718();
        log::trace!(
            "RLP encoded transaction (hash: 0x{:x}): 0x{}",
            signed.hash(),
            hex::encode(&encoded)
        );

        let pending = self
            .provider
            .send_raw_transaction(&encoded)
            .await
            .map_err(|e| Error::SendTransaction(e.to_string()))?;

        log::info!(
            "Contract creation transaction {} sent from {from} with nonce {nonce}",
            pending.tx_hash()
        );
        Ok(signed)
    }
}
