use anyhow::{Context, Result};
use log::{info, warn};
use reqwest::Client;
use std::sync::Arc;

use crate::config::Config;
use crate::entity::{Network, NetworkMode};
use crate::interactor::{
    CatalogInteractor, CatalogInteractorImpl, JsonFileStore, QuoteInteractor, QuoteInteractorImpl,
    SwapInteractor, SwapInteractorImpl, TransactionLedger,
};
use crate::presenter::{FormSettings, HistoryPresenterImpl, SwapFormController};
use crate::router::SessionRouter;
use crate::symbiosis::{
    QuoteService, SwapService, SymbiosisClient, SymbiosisQuoteService, SymbiosisSwapService,
    SymbiosisTokenRepository, TokenRepository,
};
use crate::view::{ConsoleHistoryView, ConsoleSwapView};
use crate::wallet::{JsonRpcWallet, WalletSession};

/// ServiceContainer provides access to core application dependencies
pub struct ServiceContainer {
    config: Config,
    wallet: Arc<dyn WalletSession>,
    ledger: Arc<TransactionLedger>,

    // Symbiosis services
    token_repository: Arc<dyn TokenRepository>,
    quote_service: Arc<dyn QuoteService>,
    swap_service: Arc<dyn SwapService>,
}

impl ServiceContainer {
    pub fn new(config: Config) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.http_timeout)
            .build()
            .context("Failed to build HTTP client")?;

        let client = Arc::new(SymbiosisClient::new(http_client.clone(), config.clone()));

        let wallet = Arc::new(JsonRpcWallet::new(
            http_client,
            config.wallet_rpc_url.clone(),
            config.wallet_id.clone(),
        )) as Arc<dyn WalletSession>;

        let token_repository =
            Arc::new(SymbiosisTokenRepository::new(client.clone())) as Arc<dyn TokenRepository>;
        let quote_service =
            Arc::new(SymbiosisQuoteService::new(client.clone())) as Arc<dyn QuoteService>;
        let swap_service =
            Arc::new(SymbiosisSwapService::new(client, wallet.clone())) as Arc<dyn SwapService>;

        info!("Transaction history at {}", config.history_path.display());
        let ledger = Arc::new(TransactionLedger::open(
            Arc::new(JsonFileStore::new(config.history_path.clone())),
            config.history_max_entries,
        ));

        Ok(Self {
            config,
            wallet,
            ledger,
            token_repository,
            quote_service,
            swap_service,
        })
    }

    // Accessor methods

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn wallet(&self) -> Arc<dyn WalletSession> {
        self.wallet.clone()
    }

    pub fn ledger(&self) -> Arc<TransactionLedger> {
        self.ledger.clone()
    }

    pub fn catalog_interactor(&self) -> Arc<dyn CatalogInteractor> {
        Arc::new(CatalogInteractorImpl::new(self.token_repository.clone()))
    }

    pub fn quote_interactor(&self) -> Arc<dyn QuoteInteractor> {
        Arc::new(QuoteInteractorImpl::new(self.quote_service.clone()))
    }

    pub fn swap_interactor(&self) -> Arc<dyn SwapInteractor> {
        Arc::new(SwapInteractorImpl::new(
            self.swap_service.clone(),
            self.ledger.clone(),
        ))
    }

    pub fn form_settings(&self) -> FormSettings {
        let network = Network::find(&self.config.default_network).unwrap_or_else(|| {
            warn!(
                "Unknown network '{}', falling back to {}",
                self.config.default_network,
                Network::default_network().name
            );
            Network::default_network()
        });

        FormSettings {
            network,
            mode: NetworkMode::from_testnet(self.config.testnet),
            slippage: self.config.default_slippage,
            reset_delay: self.config.reset_delay,
        }
    }
}

/// Wires the console session: form controller, history pager and router
pub fn create_application(
    services: &ServiceContainer,
) -> (Arc<SwapFormController>, SessionRouter) {
    let swap_view = Arc::new(ConsoleSwapView::new());

    let controller = Arc::new(SwapFormController::new(
        services.catalog_interactor(),
        services.quote_interactor(),
        services.swap_interactor(),
        services.wallet(),
        swap_view.clone(),
        services.form_settings(),
    ));
    let history = Arc::new(HistoryPresenterImpl::new(
        services.ledger(),
        Arc::new(ConsoleHistoryView::new()),
    ));

    let router = SessionRouter::new(controller.clone(), history, swap_view);
    (controller, router)
}
