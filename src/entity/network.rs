use std::fmt;

use crate::utils::explorer_tx_url;

/// Preset slippage tolerances offered to the user, in percent.
pub const SLIPPAGE_OPTIONS: [f64; 3] = [0.1, 0.5, 1.0];

/// Upper bound accepted for a custom slippage value, in percent.
pub const MAX_SLIPPAGE: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NetworkMode {
    #[default]
    Mainnet,
    Testnet,
}

impl NetworkMode {
    pub fn from_testnet(is_testnet: bool) -> Self {
        if is_testnet {
            Self::Testnet
        } else {
            Self::Mainnet
        }
    }

    pub fn is_testnet(self) -> bool {
        self == Self::Testnet
    }
}

impl fmt::Display for NetworkMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Self::Mainnet => write!(f, "Mainnet"),
            Self::Testnet => write!(f, "Testnet"),
        }
    }
}

/// A supported chain. Static configuration, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Network {
    pub id: &'static str,
    pub name: &'static str,
    pub chain_id: u64,
    pub testnet_chain_id: u64,
    pub block_explorer: Option<&'static str>,
}

impl Network {
    pub fn chain_id_for(&self, mode: NetworkMode) -> u64 {
        match mode {
            NetworkMode::Mainnet => self.chain_id,
            NetworkMode::Testnet => self.testnet_chain_id,
        }
    }

    /// Label stored on ledger entries, e.g. "Ethereum Testnet".
    pub fn label(&self, mode: NetworkMode) -> String {
        format!("{} {}", self.name, mode)
    }

    pub fn explorer_tx_url(&self, mode: NetworkMode, reference: &str) -> Option<String> {
        self.block_explorer
            .map(|host| explorer_tx_url(host, mode, reference))
    }

    pub fn find(id: &str) -> Option<&'static Network> {
        NETWORKS
            .iter()
            .find(|network| network.id.eq_ignore_ascii_case(id))
    }

    pub fn default_network() -> &'static Network {
        &NETWORKS[0]
    }
}

pub static NETWORKS: &[Network] = &[
    Network {
        id: "ethereum",
        name: "Ethereum",
        chain_id: 1,
        testnet_chain_id: 11155111,
        block_explorer: Some("etherscan.io"),
    },
    Network {
        id: "bsc",
        name: "BNB Chain",
        chain_id: 56,
        testnet_chain_id: 97,
        block_explorer: Some("bscscan.com"),
    },
    Network {
        id: "polygon",
        name: "Polygon",
        chain_id: 137,
        testnet_chain_id: 80002,
        block_explorer: Some("polygonscan.com"),
    },
    Network {
        id: "arbitrum",
        name: "Arbitrum",
        chain_id: 42161,
        testnet_chain_id: 421614,
        block_explorer: Some("arbiscan.io"),
    },
    Network {
        id: "avalanche",
        name: "Avalanche",
        chain_id: 43114,
        testnet_chain_id: 43113,
        block_explorer: Some("snowtrace.io"),
    },
    Network {
        id: "base",
        name: "Base",
        chain_id: 8453,
        testnet_chain_id: 84532,
        block_explorer: Some("basescan.org"),
    },
    Network {
        id: "zksync",
        name: "zkSync Era",
        chain_id: 324,
        testnet_chain_id: 300,
        block_explorer: None,
    },
];
