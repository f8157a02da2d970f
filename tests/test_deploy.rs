use alloy::primitives::{Address, B256, TxKind, address};
use anyhow::Result;
use serde_json::json;

use chain_rpc_sdk::Error;
use chain_rpc_sdk::deploy::DeployConfig;
use chain_rpc_sdk::signers::InMemorySigner;
use chain_rpc_test_utils::{MockNode, init_logger};

// Well-known development key (account #0 of the default test mnemonic).
const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
const DEV_ADDRESS: Address = address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

const CONTRACT_DATA: &str = "0x6080604052348015600f57600080fd5b50";

#[test]
fn test_default_deploy_config() {
    assert_eq!(DeployConfig::default().gas_limit, 2_000_000);
}

#[tokio::test]
async fn test_deploy_contract() -> Result<()> {
    init_logger(true);
    let node = MockNode::start().await;
    node.respond("eth_gasPrice", json!("0x3b9aca00")).await;
    let nonce_mock = node
        .respond("eth_getTransactionCount", json!("0x7"))
        .await;
    let send_mock = node
        .respond("eth_sendRawTransaction", json!(B256::repeat_byte(0x01)))
        .await;

    let signed = node.client().deploy_contract(DEV_KEY, CONTRACT_DATA).await?;
    let tx = signed.tx();

    assert_eq!(tx.nonce, 7);
    assert_eq!(tx.gas_price, 1_000_000_000);
    assert_eq!(tx.gas_limit, 2_000_000);
    assert_eq!(tx.to, TxKind::Create);
    assert_eq!(tx.chain_id, None);
    assert!(tx.value.is_zero());
    assert_eq!(tx.input.as_ref(), &alloy::hex::decode(&CONTRACT_DATA[2..])?[..]);
    assert_eq!(signed.recover_signer()?, DEV_ADDRESS);

    nonce_mock.assert_async().await;
    send_mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_deploy_with_custom_gas_limit_and_signer() -> Result<()> {
    init_logger(false);
    let node = MockNode::start().await;
    node.respond("eth_gasPrice", json!("0x1")).await;
    node.respond("eth_getTransactionCount", json!("0x0")).await;
    node.respond("eth_sendRawTransaction", json!(B256::repeat_byte(0x02)))
        .await;

    let client = chain_rpc_sdk::Web3Client::builder()
        .rpc_url(node.url())
        .deploy_config(DeployConfig { gas_limit: 500_000 })
        .build();
    let signer = InMemorySigner::generate();

    let signed = client
        .deploy_contract_with_signer(&signer, "0x")
        .await?;

    assert_eq!(signed.tx().gas_limit, 500_000);
    assert!(signed.tx().input.is_empty());
    assert_eq!(signed.recover_signer()?, signer.inner().address());
    Ok(())
}

#[tokio::test]
async fn test_deploy_rejects_wrong_private_key() -> Result<()> {
    init_logger(false);
    let node = MockNode::start().await;
    let gas_mock = node.respond("eth_gasPrice", json!("0x1")).await;

    let err = node
        .client()
        .deploy_contract("0xnot-a-key", CONTRACT_DATA)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidPrivateKey(_)));
    assert!(err.to_string().starts_with("Wrong private key"), "{err}");
    gas_mock.assert_hits_async(0).await;
    Ok(())
}

#[tokio::test]
async fn test_deploy_rejects_unprefixed_contract_data() -> Result<()> {
    init_logger(false);
    let node = MockNode::start().await;
    node.respond("eth_gasPrice", json!("0x1")).await;
    node.respond("eth_getTransactionCount", json!("0x0")).await;
    let send_mock = node
        .respond("eth_sendRawTransaction", json!(B256::repeat_byte(0x01)))
        .await;

    let err = node
        .client()
        .deploy_contract(DEV_KEY, &CONTRACT_DATA[2..])
        .await
        .unwrap_err();

    assert!(matches!(err, Error::ContractData(_)));
    assert!(err.to_string().contains("without 0x prefix"), "{err}");
    send_mock.assert_hits_async(0).await;
    Ok(())
}

#[tokio::test]
async fn test_deploy_reports_gas_price_failure() -> Result<()> {
    init_logger(false);
    let node = MockNode::start().await;
    node.respond_error("eth_gasPrice", -32000, "gas oracle unavailable")
        .await;

    let err = node
        .client()
        .deploy_contract(DEV_KEY, CONTRACT_DATA)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::GasPrice(_)));
    assert!(err.to_string().starts_with("Cannot get gas price"), "{err}");
    Ok(())
}

#[tokio::test]
async fn test_deploy_reports_rejected_transaction() -> Result<()> {
    init_logger(false);
    let node = MockNode::start().await;
    node.respond("eth_gasPrice", json!("0x1")).await;
    node.respond("eth_getTransactionCount", json!("0x0")).await;
    node.respond_error(
        "eth_sendRawTransaction",
        -32000,
        "insufficient funds for gas * price + value",
    )
    .await;

    let err = node
        .client()
        .deploy_contract(DEV_KEY, CONTRACT_DATA)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::SendTransaction(_)));
    assert!(err.to_string().contains("insufficient funds"), "{err}");
    Ok(())
}

#[tokio::test]
async fn test_deploy_reports_nonce_failure() -> Result<()> {
    init_logger(false);
    let node = MockNode::start().await;
    node.respond("eth_gasPrice", json!("0x1")).await;
    node.respond_error("eth_getTransactionCount", -32000, "nonce unavailable").await;
    let send_mock = node
        .respond("eth_sendRawTransaction", json!(B256::repeat_byte(0x01)))
        .await;

    let err = node
        .client()
        .deploy_contract(DEV_KEY, CONTRACT_DATA)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Nonce(_)));
    assert!(err.to_string().starts_with("Cannot get nonce"), "{err}");
    send_mock.assert_hits_async(0).await;
    Ok(())
}

#[tokio::test]
async fn test_deploy_rejects_malformed_contract_data() -> Result<()> {
    init_logger(false);
    let node = MockNode::start().await;
    node.respond("eth_gasPrice", json!("0x1")).await;
    node.respond("eth_getTransactionCount", json!("0x0")).await;
    let send_mock = node
        .respond("eth_sendRawTransaction", json!(B256::repeat_byte(0x01)))
        .await;
    let client = node.client();

    for data in ["0x608", "0xzz"] {
        let err = client.deploy_contract(DEV_KEY, data).await.unwrap_err();
        assert!(matches!(err, Error::ContractData(_)), "{data}: {err}");
        assert!(
            err.to_string().starts_with("Cannot decode contract data"),
            "{err}"
        );
    }
    send_mock.assert_hits_async(0).await;
    Ok(())
}
