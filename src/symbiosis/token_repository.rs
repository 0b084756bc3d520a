use async_trait::async_trait;
use log::{error, info};
use std::sync::Arc;

use crate::entity::{CatalogError, Network, NetworkMode, Token};
use crate::symbiosis::client::SymbiosisClient;

/// Source of the swappable tokens for a network
#[async_trait]
pub trait TokenRepository: Send + Sync {
    async fn fetch_tokens(
        &self,
        network: &Network,
        mode: NetworkMode,
    ) -> Result<Vec<Token>, CatalogError>;
}

/// Token catalog backed by the Symbiosis API. Always fetched fresh so
/// reference prices used for fallback estimates stay current.
pub struct SymbiosisTokenRepository {
    client: Arc<SymbiosisClient>,
}

impl SymbiosisTokenRepository {
    pub fn new(client: Arc<SymbiosisClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TokenRepository for SymbiosisTokenRepository {
    async fn fetch_tokens(
        &self,
        network: &Network,
        mode: NetworkMode,
    ) -> Result<Vec<Token>, CatalogError> {
        let chain_id = network.chain_id_for(mode);
        info!(
            "Fetching tokens for network: {} (chain {}), testnet: {}",
            network.id,
            chain_id,
            mode.is_testnet()
        );

        let tokens = self.client.get_tokens(chain_id, mode).await.map_err(|e| {
            let e = CatalogError::from(e);
            error!("Failed to fetch tokens from Symbiosis API: {}", e);
            e
        })?;

        Ok(tokens.into_iter().map(Token::from).collect())
    }
}
