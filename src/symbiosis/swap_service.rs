use async_trait::async_trait;
use log::{debug, info, warn};
use std::sync::Arc;

use crate::entity::{SwapError, SwapParams, TransactionRequest};
use crate::symbiosis::client::SymbiosisClient;
use crate::symbiosis::models::SwapRequest;
use crate::utils::{encode_approve_call, parse_units};
use crate::wallet::WalletSession;

/// Submits swaps through the aggregator
#[async_trait]
pub trait SwapService: Send + Sync {
    /// Returns the broadcast transaction hash, or `None` when nothing was submitted
    async fn swap_tokens(&self, params: &SwapParams) -> Result<Option<String>, SwapError>;
}

/// Builds the swap calldata via Symbiosis and hands it to the wallet for signing
pub struct SymbiosisSwapService {
    client: Arc<SymbiosisClient>,
    wallet: Arc<dyn WalletSession>,
}

impl SymbiosisSwapService {
    pub fn new(client: Arc<SymbiosisClient>, wallet: Arc<dyn WalletSession>) -> Self {
        Self { client, wallet }
    }

    fn approval_request(
        params: &SwapParams,
        spender: &str,
        amount_in: &str,
    ) -> Result<TransactionRequest, SwapError> {
        let data = encode_approve_call(spender, amount_in)
            .map_err(|e| SwapError::InvalidResponse(e.to_string()))?;

        Ok(TransactionRequest {
            chain_id: params.from_token.chain_id,
            from: Some(params.wallet_address.clone()),
            to: params.from_token.address.clone(),
            data,
            value: None,
        })
    }
}

#[async_trait]
impl SwapService for SymbiosisSwapService {
    async fn swap_tokens(&self, params: &SwapParams) -> Result<Option<String>, SwapError> {
        let amount_in = parse_units(&params.amount, params.from_token.decimals)
            .map_err(|e| SwapError::InvalidAmount(e.to_string()))?;

        debug!(
            "Preparing swap of {} {} to {} with slippage {}%",
            params.amount, params.from_token.symbol, params.to_token.symbol, params.slippage
        );

        let request = SwapRequest::new(
            &params.from_token,
            &params.to_token,
            amount_in.clone(),
            Some(params.wallet_address.clone()),
            params.slippage_bps(),
        );

        let response = self.client.swap(&request, params.mode).await?;

        let Some(mut tx) = response.tx else {
            warn!("Symbiosis returned no transaction for the swap");
            return Ok(None);
        };

        if let Some(spender) = response.approve_to.as_deref() {
            if !params.from_token.is_native() {
                let approval = Self::approval_request(params, spender, &amount_in)?;
                info!(
                    "Approving {} {} for spender {}",
                    params.amount, params.from_token.symbol, spender
                );

                if self.wallet.send_transaction(&approval).await?.is_none() {
                    warn!("Wallet did not submit the approval transaction");
                    return Ok(None);
                }
            }
        }

        if tx.from.is_none() {
            tx.from = Some(params.wallet_address.clone());
        }

        let reference = self.wallet.send_transaction(&tx).await?;
        match &reference {
            Some(hash) => info!("Swap transaction submitted: {}", hash),
            None => warn!("Wallet did not return a transaction hash"),
        }

        Ok(reference)
    }
}
