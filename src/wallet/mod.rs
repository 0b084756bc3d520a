pub mod json_rpc;

use async_trait::async_trait;

use crate::entity::{TransactionRequest, WalletError};

pub use json_rpc::JsonRpcWallet;

/// Wallet context supplied from outside the swap core.
#[async_trait]
pub trait WalletSession: Send + Sync {
    fn is_connected(&self) -> bool;

    /// Wallet the user picked earlier, used to reconnect on demand
    fn selected_wallet(&self) -> Option<String>;

    fn address(&self) -> Option<String>;

    /// Connects the given wallet and returns the active account
    async fn connect(&self, wallet_id: &str) -> Result<String, WalletError>;

    /// Signs and broadcasts a transaction. `None` means the wallet declined
    /// without reporting an error.
    async fn send_transaction(
        &self,
        tx: &TransactionRequest,
    ) -> Result<Option<String>, WalletError>;
}
