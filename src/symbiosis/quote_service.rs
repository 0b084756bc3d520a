use async_trait::async_trait;
use log::{debug, info, warn};
use std::sync::Arc;

use crate::entity::{QuoteError, QuoteParams};
use crate::symbiosis::client::SymbiosisClient;
use crate::symbiosis::models::SwapRequest;
use crate::utils::{format_units, parse_units};

/// Slippage sent with price-only requests, in basis points.
const QUOTE_SLIPPAGE_BPS: u32 = 50;

/// Prices a token pair for a given input amount
#[async_trait]
pub trait QuoteService: Send + Sync {
    /// Returns the expected output as a display amount of the destination token
    async fn get_output_amount(&self, params: &QuoteParams) -> Result<String, QuoteError>;
}

pub struct SymbiosisQuoteService {
    client: Arc<SymbiosisClient>,
}

impl SymbiosisQuoteService {
    pub fn new(client: Arc<SymbiosisClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl QuoteService for SymbiosisQuoteService {
    async fn get_output_amount(&self, params: &QuoteParams) -> Result<String, QuoteError> {
        let amount_in = parse_units(&params.amount, params.from_token.decimals)
            .map_err(|e| QuoteError::Unknown(e.to_string()))?;

        debug!(
            "Getting quote for {} {} ({}) -> {} ({})",
            params.amount,
            params.from_token.symbol,
            params.from_token.chain_id,
            params.to_token.symbol,
            params.to_token.chain_id
        );

        let request = SwapRequest::new(
            &params.from_token,
            &params.to_token,
            amount_in,
            params.wallet_address.clone(),
            QUOTE_SLIPPAGE_BPS,
        );

        let response = self
            .client
            .swap(&request, params.mode)
            .await
            .map_err(|e| {
                let e = QuoteError::from(e);
                warn!("Quote request failed: {:?}", e);
                e
            })?;

        let out = response.token_amount_out;
        let amount = format_units(&out.amount, out.decimals)
            .map_err(|e| QuoteError::Unknown(e.to_string()))?;

        info!(
            "Quote received: {} {} -> {} {}",
            params.amount, params.from_token.symbol, amount, params.to_token.symbol
        );

        Ok(amount)
    }
}
