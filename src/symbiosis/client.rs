use log::{debug, error, info};
use reqwest::{Client, Response, StatusCode};

use crate::config::Config;
use crate::entity::{CatalogError, NetworkMode, QuoteError, SwapError};
use crate::symbiosis::models::{ErrorResponse, SwapRequest, SwapResponse, SymbiosisToken, TokenList};

/// A failed call to the aggregator, before it is mapped onto a domain error.
#[derive(Debug)]
pub enum ApiFailure {
    Http(reqwest::Error),
    Api {
        status: StatusCode,
        body: ErrorResponse,
    },
}

impl From<reqwest::Error> for ApiFailure {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e)
    }
}

impl From<ApiFailure> for CatalogError {
    fn from(failure: ApiFailure) -> Self {
        match failure {
            ApiFailure::Http(e) => CatalogError::Http(e),
            ApiFailure::Api { status, body } => CatalogError::Api {
                status: status.as_u16(),
                message: body.message(),
            },
        }
    }
}

impl From<ApiFailure> for SwapError {
    fn from(failure: ApiFailure) -> Self {
        match failure {
            ApiFailure::Http(e) => SwapError::Http(e),
            ApiFailure::Api { status, body } => SwapError::Api {
                status: status.as_u16(),
                message: body.message(),
            },
        }
    }
}

impl From<ApiFailure> for QuoteError {
    fn from(failure: ApiFailure) -> Self {
        match failure {
            ApiFailure::Http(e) => QuoteError::Unknown(e.to_string()),
            ApiFailure::Api { status, body } => body.classify(status),
        }
    }
}

/// Thin HTTP client for the Symbiosis cross-chain API
pub struct SymbiosisClient {
    http_client: Client,
    config: Config,
}

impl SymbiosisClient {
    pub fn new(http_client: Client, config: Config) -> Self {
        Self {
            http_client,
            config,
        }
    }

    pub fn base_url(&self, mode: NetworkMode) -> &str {
        self.config.api_url(mode).trim_end_matches('/')
    }

    /// Lists the tokens Symbiosis can route on the given chain
    pub async fn get_tokens(
        &self,
        chain_id: u64,
        mode: NetworkMode,
    ) -> Result<Vec<SymbiosisToken>, ApiFailure> {
        let url = format!("{}/v1/tokens", self.base_url(mode));
        debug!("Requesting token list: url={}, chain_id={}", url, chain_id);

        let response = self
            .http_client
            .get(&url)
            .query(&[("chainId", chain_id)])
            .send()
            .await?;

        let response = Self::check_status(response, "get_tokens").await?;
        let tokens = response.json::<TokenList>().await?.into_tokens();

        Ok(tokens
            .into_iter()
            .filter(|token| token.chain_id == chain_id)
            .collect())
    }

    /// Prices a swap and, when sender and recipient are known, returns the calldata for it
    pub async fn swap(
        &self,
        request: &SwapRequest,
        mode: NetworkMode,
    ) -> Result<SwapResponse, ApiFailure> {
        let url = format!("{}/v1/swap", self.base_url(mode));
        debug!("Requesting swap with parameters: {:?}", request);

        let response = self.http_client.post(&url).json(request).send().await?;
        let response = Self::check_status(response, "swap").await?;
        let swap = response.json::<SwapResponse>().await?;

        info!(
            "Swap route received: amount_in={}, amount_out={}, price_impact={}, has_tx={}",
            request.token_amount_in.amount,
            swap.token_amount_out.amount,
            swap.price_impact.as_deref().unwrap_or("n/a"),
            swap.tx.is_some()
        );

        Ok(swap)
    }

    async fn check_status(response: Response, operation: &str) -> Result<Response, ApiFailure> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        error!("Symbiosis API error [{}]: {} {}", operation, status, text);

        Err(ApiFailure::Api {
            status,
            body: ErrorResponse::from_text(&text),
        })
    }
}
