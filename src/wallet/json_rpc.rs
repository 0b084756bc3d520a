use async_trait::async_trait;
use log::{debug, error, info};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

use crate::entity::{TransactionRequest, WalletError};
use crate::utils::{shorten_address, to_hex_quantity};
use crate::wallet::WalletSession;

/// JSON-RPC "invalid params" error code
const INVALID_PARAMS: i64 = -32602;

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorBody>,
}

#[derive(Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

/// Wallet reached over an EIP-1193 style JSON-RPC endpoint (a desktop signer
/// or a development node with unlocked accounts).
pub struct JsonRpcWallet {
    http_client: Client,
    rpc_url: String,
    selected_wallet: Option<String>,
    account: RwLock<Option<String>>,
    request_id: AtomicU64,
}

impl JsonRpcWallet {
    pub fn new(http_client: Client, rpc_url: String, selected_wallet: Option<String>) -> Self {
        Self {
            http_client,
            rpc_url,
            selected_wallet,
            account: RwLock::new(None),
            request_id: AtomicU64::new(1),
        }
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<Option<T>, WalletError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.request_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };
        debug!("Wallet RPC call: {}", method);

        let response: RpcResponse<T> = self
            .http_client
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(err) = response.error {
            error!("Wallet RPC error [{}]: {} {}", method, err.code, err.message);
            return Err(WalletError::Rpc {
                code: err.code,
                message: err.message,
            });
        }

        Ok(response.result)
    }
}

#[async_trait]
impl WalletSession for JsonRpcWallet {
    fn is_connected(&self) -> bool {
        self.address().is_some()
    }

    fn selected_wallet(&self) -> Option<String> {
        self.selected_wallet.clone()
    }

    fn address(&self) -> Option<String> {
        self.account
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    async fn connect(&self, wallet_id: &str) -> Result<String, WalletError> {
        info!("Connecting wallet '{}' at {}", wallet_id, self.rpc_url);

        let accounts: Vec<String> = self
            .call("eth_requestAccounts", json!([]))
            .await?
            .unwrap_or_default();
        let account = accounts.into_iter().next().ok_or(WalletError::NoAccounts)?;

        *self
            .account
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(account.clone());
        info!("Wallet connected: {}", shorten_address(&account));

        Ok(account)
    }

    async fn send_transaction(
        &self,
        tx: &TransactionRequest,
    ) -> Result<Option<String>, WalletError> {
        let from = tx
            .from
            .clone()
            .or_else(|| self.address())
            .ok_or(WalletError::NotConnected)?;

        let mut payload = json!({
            "from": from,
            "to": tx.to,
            "data": tx.data,
            "chainId": format!("0x{:x}", tx.chain_id),
        });

        if let Some(value) = tx.value.as_deref() {
            let value = to_hex_quantity(value).map_err(|e| WalletError::Rpc {
                code: INVALID_PARAMS,
                message: e.to_string(),
            })?;
            payload["value"] = Value::String(value);
        }

        self.call::<String>("eth_sendTransaction", json!([payload]))
            .await
    }
}
