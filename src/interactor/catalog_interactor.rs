use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::entity::{CatalogError, Network, NetworkMode, Token};
use crate::symbiosis::TokenRepository;

#[async_trait]
pub trait CatalogInteractor: Send + Sync {
    async fn load_tokens(
        &self,
        network: &Network,
        mode: NetworkMode,
    ) -> Result<Vec<Token>, CatalogError>;
}

pub struct CatalogInteractorImpl {
    token_repository: Arc<dyn TokenRepository>,
}

impl CatalogInteractorImpl {
    pub fn new(token_repository: Arc<dyn TokenRepository>) -> Self {
        Self { token_repository }
    }
}

#[async_trait]
impl CatalogInteractor for CatalogInteractorImpl {
    async fn load_tokens(
        &self,
        network: &Network,
        mode: NetworkMode,
    ) -> Result<Vec<Token>, CatalogError> {
        info!(
            "Loading tokens for network: {}, testnet: {}",
            network.id,
            mode.is_testnet()
        );

        let mut tokens = self.token_repository.fetch_tokens(network, mode).await?;
        tokens.sort_by(|a, b| a.symbol.to_lowercase().cmp(&b.symbol.to_lowercase()));
        tokens.dedup_by(|a, b| a.address.eq_ignore_ascii_case(&b.address) && a.symbol == b.symbol);

        info!("Loaded {} tokens", tokens.len());
        Ok(tokens)
    }
}

/// Finds a token by symbol or address, case-insensitively
pub fn find_token<'a>(tokens: &'a [Token], query: &str) -> Option<&'a Token> {
    tokens.iter().find(|token| token.matches(query.trim()))
}
