use std::fmt;
use std::str::FromStr;

/// Well-known networks with a public RPC endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Network {
    Testnet,
    Mainnet,
    Localhost,
    Ethereum,
    Ropsten,
}

impl Network {
    /// All known networks, in lookup-table order.
    pub const ALL: [Network; 5] = [
        Network::Testnet,
        Network::Mainnet,
        Network::Localhost,
        Network::Ethereum,
        Network::Ropsten,
    ];

    /// Canonical name of the network, as accepted by [`network_url`].
    pub fn name(&self) -> &'static str {
        match self {
            Network::Testnet => "testnet",
            Network::Mainnet => "mainnet",
            Network::Localhost => "localhost",
            Network::Ethereum => "ethereum",
            Network::Ropsten => "ropsten",
        }
    }

    /// RPC endpoint URL of the network.
    pub fn url(&self) -> &'static str {
        match self {
            Network::Testnet => "https://testnet-rpc.gochain.io",
            Network::Mainnet => "https://rpc.gochain.io",
            Network::Localhost => "http://localhost:8545",
            Network::Ethereum => "https://main-rpc.linkpool.io",
            Network::Ropsten => "https://ropsten-rpc.linkpool.io",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Network {
    type Err = String;

    /// An empty name selects mainnet.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "testnet" => Ok(Network::Testnet),
            "mainnet" | "" => Ok(Network::Mainnet),
            "localhost" => Ok(Network::Localhost),
            "ethereum" => Ok(Network::Ethereum),
            "ropsten" => Ok(Network::Ropsten),
            other => Err(format!("unknown network {other:?}")),
        }
    }
}

/// Resolves a network name to its RPC endpoint URL.
/// Returns `None` for names that are not in the lookup table.
pub fn network_url(network: &str) -> Option<&'static str> {
    network.parse::<Network>().ok().map(|n| n.url())
}
