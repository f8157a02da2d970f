use anyhow::{Context, Result};
use chain_rpc_sdk::utils::{parse_address, parse_hash, wei_to_eth};
use chain_rpc_sdk::{Network, Web3Client};
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;

/// Program to query a blockchain node and deploy contracts
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Name of the network to connect to
    #[arg(short, long, env = "WEB3_NETWORK", default_value = "mainnet")]
    network: String,

    /// URL of the RPC endpoint, overrides the network
    #[arg(short, long, env = "WEB3_RPC_URL")]
    rpc_url: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the known networks and their RPC endpoints
    Networks,
    /// Show the balance of an account
    Balance {
        /// Address of the account
        address: String,
        /// Block number, latest if not provided
        #[arg(short, long)]
        block: Option<u64>,
        /// Print the balance in wei instead of ether
        #[arg(long)]
        wei: bool,
    },
    /// Show the code deployed at an address
    Code {
        /// Address of the contract
        address: String,
        /// Block number, latest if not provided
        #[arg(short, long)]
        block: Option<u64>,
    },
    /// Show a block, latest if no number is provided
    Block {
        /// Block number
        number: Option<u64>,
    },
    /// Show a transaction
    Tx {
        /// Transaction hash
        hash: String,
    },
    /// Show the network ID, chain ID and genesis hash
    Id,
    /// Show the clique consensus snapshot
    Snapshot,
    /// Deploy a contract and wait for its receipt
    Deploy {
        /// Hex encoded contract bytecode, `0x` prefixed
        contract_data: String,
        /// Private key of the deploying account
        #[arg(long, env = "WEB3_PRIVATE_KEY", hide_env_values = true)]
        private_key: String,
    },
}

impl Command {
    async fn execute(&self, client: &Web3Client) -> Result<()> {
        match self {
            Command::Networks => self.handle_networks(),
            Command::Balance {
                address,
                block,
                wei,
            } => self.handle_balance(client, address, *block, *wei).await,
            Command::Code { address, block } => self.handle_code(client, address, *block).await,
            Command::Block { number } => self.handle_block(client, *number).await,
            Command::Tx { hash } => self.handle_tx(client, hash).await,
            Command::Id => self.handle_id(client).await,
            Command::Snapshot => self.handle_snapshot(client).await,
            Command::Deploy {
                contract_data,
                private_key,
            } => self.handle_deploy(client, private_key, contract_data).await,
        }
    }

    fn handle_networks(&self) -> Result<()> {
        for network in Network::ALL {
            println!("{:<10} {}", network.name(), network.url());
        }
        Ok(())
    }

    async fn handle_balance(
        &self,
        client: &Web3Client,
        address: &str,
        block: Option<u64>,
        wei: bool,
    ) -> Result<()> {
        let balance = client.get_balance(parse_address(address)?, block).await?;
        if wei {
            println!("{balance} wei");
        } else {
            println!("{} ETH", wei_to_eth(balance));
        }
        Ok(())
    }

    async fn handle_code(
        &self,
        client: &Web3Client,
        address: &str,
        block: Option<u64>,
    ) -> Result<()> {
        let code = client.get_code(parse_address(address)?, block).await?;
        if code.is_empty() {
            println!("No code at {address}");
        } else {
            println!("{code}");
        }
        Ok(())
    }

    async fn handle_block(&self, client: &Web3Client, number: Option<u64>) -> Result<()> {
        let block = client.get_block_by_number(number).await?;
        println!("{}", serde_json::to_string_pretty(&block)?);
        Ok(())
    }

    async fn handle_tx(&self, client: &Web3Client, hash: &str) -> Result<()> {
        let (tx, pending) = client.get_transaction_by_hash(parse_hash(hash)?).await?;
        println!("{}", serde_json::to_string_pretty(&tx)?);
        println!("Pending: {pending}");
        Ok(())
    }

    async fn handle_id(&self, client: &Web3Client) -> Result<()> {
        let id = client.get_id().await;
        println!("{}", serde_json::to_string_pretty(&id)?);
        Ok(())
    }

    async fn handle_snapshot(&self, client: &Web3Client) -> Result<()> {
        let snapshot = client.get_snapshot().await?;
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        Ok(())
    }

    async fn handle_deploy(
        &self,
        client: &Web3Client,
        private_key: &str,
        contract_data: &str,
    ) -> Result<()> {
        let tx = client.deploy_contract(private_key, contract_data).await?;
        let tx_hash = *tx.hash();
        println!("Transaction sent: {tx_hash}");

        // Ctrl-C stops waiting for the receipt; the transaction itself is already sent.
        let cancel = CancellationToken::new();
        let on_ctrl_c = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                on_ctrl_c.cancel();
            }
        });

        let receipt = client.wait_for_receipt(tx_hash, &cancel).await?;
        match receipt.contract_address {
            Some(address) if receipt.status() => println!("Contract deployed at: {address}"),
            _ => println!("Contract deployment failed in block {:?}", receipt.block_number),
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let client = match &args.rpc_url {
        Some(url) => Web3Client::connect(url)?,
        None => Web3Client::for_network(&args.network)
            .with_context(|| format!("Known networks: {:?}", Network::ALL.map(|n| n.name())))?,
    };
    log::info!("Using RPC endpoint {}", client.rpc_url());

    args.command.execute(&client).await
}
