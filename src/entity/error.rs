use crate::entity::TransactionStatus;

/// Classification of a failed quote, decided at the aggregator boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QuoteError {
    #[error("Token pair is not supported: {0}")]
    Unsupported(String),

    #[error("Quote rate limited: {0}")]
    RateLimited(String),

    #[error("{0}")]
    Unknown(String),
}

impl QuoteError {
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported(_))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Symbiosis API error ({status}): {message}")]
    Api { status: u16, message: String },
}

#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("Wallet is not connected")]
    NotConnected,

    #[error("Wallet returned no accounts")]
    NoAccounts,

    #[error("Wallet RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Wallet transport error: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum SwapError {
    #[error("Please select tokens and enter an amount to swap")]
    MissingInputs,

    #[error("Please connect your wallet first")]
    WalletNotConnected,

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Symbiosis API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected swap response: {0}")]
    InvalidResponse(String),

    #[error("{0}")]
    Wallet(#[from] WalletError),
}

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Transaction {0} not found")]
    NotFound(String),

    #[error("Transaction {id} cannot move from {from} to {to}")]
    InvalidTransition {
        id: String,
        from: TransactionStatus,
        to: TransactionStatus,
    },

    #[error("Storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
