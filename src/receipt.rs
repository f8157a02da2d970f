use std::time::Duration;

use alloy::primitives::TxHash;
use alloy::providers::Provider;
use alloy::rpc::types::TransactionReceipt;
use tokio_util::sync::CancellationToken;

use crate::client::{Error, Web3Client};

/// Configuration for receipt polling.
#[derive(Clone, Debug)]
pub struct ReceiptPollConfig {
    /// Number of retries after the first failed attempt.
    pub max_retries: u32,
    /// Delay between attempts.
    pub retry_delay: Duration,
}

impl Default for ReceiptPollConfig {
    fn default() -> Self {
        Self {
            max_retries: 5,
            retry_delay: Duration::from_secs(2),
        }
    }
}

impl Web3Client {
    /// Polls for the receipt of a transaction.
    ///
    /// Gives up with [`Error::Receipt`] once the first attempt and all configured retries
    /// failed, and returns [`Error::Cancelled`] as soon as `cancel` fires.
    pub async fn wait_for_receipt(
        &self,
        tx_hash: TxHash,
        cancel: &CancellationToken,
    ) -> Result<TransactionReceipt, Error> {
        let max_retries = self.receipt_config.max_retries;
        let mut attempt: u32 = 0;

        loop {
            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(Error::Cancelled),
                result = self.provider.get_transaction_receipt(tx_hash) => result,
            };

            // A missing receipt means the transaction was not mined yet.
            let error = match result {
                Ok(Some(receipt)) => {
                    log::info!(
                        "Transaction {tx_hash} was included in block {:?} after {} attempt(s)",
                        receipt.block_number,
                        attempt + 1
                    );
                    return Ok(receipt);
                }
                Ok(None) => "not found".to_string(),
                Err(e) => e.to_string(),
            };

            if attempt >= max_retries {
                return Err(Error::Receipt(error));
            }
            attempt += 1;

            log::debug!(
                "Receipt for {tx_hash} not available ({error}), retry {attempt}/{max_retries}"
            );

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(Error::Cancelled),
                _ = tokio::time::sleep(self.receipt_config.retry_delay) => {}
            }
        }
    }
}
