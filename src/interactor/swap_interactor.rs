use async_trait::async_trait;
use log::{error, info, warn};
use std::sync::Arc;

use crate::entity::{
    Network, NetworkMode, SwapError, SwapParams, SwapResult, SwapState, TokenAmount, Transaction,
};
use crate::interactor::ledger::TransactionLedger;
use crate::symbiosis::SwapService;

#[async_trait]
pub trait SwapInteractor: Send + Sync {
    fn validate_swap_parameters(
        &self,
        state: &SwapState,
        wallet_address: Option<&str>,
        mode: NetworkMode,
    ) -> Result<SwapParams, SwapError>;

    /// Records a pending ledger entry, submits the swap and settles the entry
    async fn execute_swap(
        &self,
        params: SwapParams,
        network: &Network,
        expected_amount_out: &str,
    ) -> SwapResult;
}

pub struct SwapInteractorImpl {
    swap_service: Arc<dyn SwapService>,
    ledger: Arc<TransactionLedger>,
}

impl SwapInteractorImpl {
    pub fn new(swap_service: Arc<dyn SwapService>, ledger: Arc<TransactionLedger>) -> Self {
        Self {
            swap_service,
            ledger,
        }
    }
}

#[async_trait]
impl SwapInteractor for SwapInteractorImpl {
    fn validate_swap_parameters(
        &self,
        state: &SwapState,
        wallet_address: Option<&str>,
        mode: NetworkMode,
    ) -> Result<SwapParams, SwapError> {
        let (Some(from_token), Some(to_token)) = (&state.from_token, &state.to_token) else {
            return Err(SwapError::MissingInputs);
        };
        if state.from_amount.trim().is_empty() {
            return Err(SwapError::MissingInputs);
        }

        let wallet_address = wallet_address
            .filter(|address| !address.is_empty())
            .ok_or(SwapError::WalletNotConnected)?;

        Ok(SwapParams {
            from_token: from_token.clone(),
            to_token: to_token.clone(),
            amount: state.from_amount.trim().to_string(),
            slippage: state.slippage,
            wallet_address: wallet_address.to_string(),
            mode,
        })
    }

    async fn execute_swap(
        &self,
        params: SwapParams,
        network: &Network,
        expected_amount_out: &str,
    ) -> SwapResult {
        let transaction = Transaction::pending(
            TokenAmount::new(params.from_token.symbol.clone(), params.amount.clone()),
            TokenAmount::new(params.to_token.symbol.clone(), expected_amount_out),
            network.label(params.mode),
        );
        let transaction_id = transaction.id.clone();
        self.ledger.record_pending(transaction);

        let mut result = SwapResult {
            transaction_id: transaction_id.clone(),
            source_token: params.from_token.symbol.clone(),
            target_token: params.to_token.symbol.clone(),
            amount_in: params.amount.clone(),
            amount_out: expected_amount_out.to_string(),
            signature: None,
            explorer_url: None,
            success: false,
            error_message: None,
        };

        match self.swap_service.swap_tokens(&params).await {
            Ok(Some(reference)) => {
                let explorer_url = network.explorer_tx_url(params.mode, &reference);
                if let Err(e) = self.ledger.mark_success(&transaction_id, explorer_url.clone()) {
                    error!("Failed to settle transaction {}: {}", transaction_id, e);
                }
                info!("Swap {} succeeded: {}", transaction_id, reference);

                result.signature = Some(reference);
                result.explorer_url = explorer_url;
                result.success = true;
            }
            Ok(None) => {
                if let Err(e) = self.ledger.mark_failed(&transaction_id) {
                    error!("Failed to settle transaction {}: {}", transaction_id, e);
                }
                warn!("Swap {} returned no transaction reference", transaction_id);
            }
            Err(e) => {
                if let Err(settle_err) = self.ledger.mark_failed(&transaction_id) {
                    error!(
                        "Failed to settle transaction {}: {}",
                        transaction_id, settle_err
                    );
                }
                error!("Swap {} failed: {}", transaction_id, e);

                result.error_message = Some(e.to_string());
            }
        }

        result
    }
}
