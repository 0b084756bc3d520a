use anyhow::Result;
use async_trait::async_trait;
use log::{debug, error, info, warn};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::entity::{
    FormPhase, FormSnapshot, Network, NetworkMode, QuoteError, SwapState, Token, MAX_SLIPPAGE,
};
use crate::interactor::{
    find_token, CatalogInteractor, QuoteInteractor, QuoteOutcome, RequestGeneration,
    SwapInteractor,
};
use crate::utils::shorten_address;
use crate::view::SwapView;
use crate::wallet::WalletSession;

#[async_trait]
pub trait SwapPresenter: Send + Sync {
    fn snapshot(&self) -> FormSnapshot;
    async fn show_form(&self) -> Result<()>;
    async fn show_tokens(&self) -> Result<()>;
    async fn reload_catalog(&self) -> Result<()>;
    async fn select_network(&self, network_id: &str) -> Result<()>;
    async fn set_testnet(&self, is_testnet: bool) -> Result<()>;
    async fn select_from_token(&self, query: &str) -> Result<()>;
    async fn select_to_token(&self, query: &str) -> Result<()>;
    async fn set_from_amount(&self, amount: &str) -> Result<()>;
    async fn set_slippage(&self, slippage: f64) -> Result<()>;
    async fn switch_tokens(&self) -> Result<()>;
    async fn connect_wallet(&self, wallet_id: Option<&str>) -> Result<()>;
    async fn submit(&self) -> Result<()>;
}

/// Initial form settings
#[derive(Debug, Clone)]
pub struct FormSettings {
    pub network: &'static Network,
    pub mode: NetworkMode,
    pub slippage: f64,
    pub reset_delay: Duration,
}

#[derive(Clone, Copy)]
enum Leg {
    From,
    To,
}

struct FormState {
    network: &'static Network,
    mode: NetworkMode,
    tokens: Vec<Token>,
    is_loading_tokens: bool,
    swap: SwapState,
    phase: FormPhase,
    is_pair_supported: bool,
    settle_epoch: u64,
}

fn lock_state(state: &Mutex<FormState>) -> MutexGuard<'_, FormState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Drives the swap form: reloads the catalog on network changes, re-quotes on
/// input changes and runs submissions through the swap interactor.
///
/// State lives behind a mutex that is never held across an await; network
/// calls run unlocked and their results are applied only if still current.
/// Edits made by concurrent callers while a swap runs are rejected.
pub struct SwapFormController {
    catalog: Arc<dyn CatalogInteractor>,
    quotes: Arc<dyn QuoteInteractor>,
    swaps: Arc<dyn SwapInteractor>,
    wallet: Arc<dyn WalletSession>,
    view: Arc<dyn SwapView>,
    state: Arc<Mutex<FormState>>,
    quote_generation: RequestGeneration,
    catalog_generation: RequestGeneration,
    reset_delay: Duration,
}

impl SwapFormController {
    pub fn new(
        catalog: Arc<dyn CatalogInteractor>,
        quotes: Arc<dyn QuoteInteractor>,
        swaps: Arc<dyn SwapInteractor>,
        wallet: Arc<dyn WalletSession>,
        view: Arc<dyn SwapView>,
        settings: FormSettings,
    ) -> Self {
        let state = FormState {
            network: settings.network,
            mode: settings.mode,
            tokens: Vec::new(),
            is_loading_tokens: false,
            swap: SwapState::new(settings.slippage),
            phase: FormPhase::Idle,
            is_pair_supported: true,
            settle_epoch: 0,
        };

        Self {
            catalog,
            quotes,
            swaps,
            wallet,
            view,
            state: Arc::new(Mutex::new(state)),
            quote_generation: RequestGeneration::new(),
            catalog_generation: RequestGeneration::new(),
            reset_delay: settings.reset_delay,
        }
    }

    fn lock(&self) -> MutexGuard<'_, FormState> {
        lock_state(&self.state)
    }

    async fn select_token(&self, query: &str, leg: Leg) -> Result<()> {
        let selected = {
            let mut state = self.lock();
            if state.phase.is_swapping() {
                None
            } else {
                let token = find_token(&state.tokens, query).cloned();
                if let Some(token) = token.clone() {
                    match leg {
                        Leg::From => state.swap.from_token = Some(token),
                        Leg::To => state.swap.to_token = Some(token),
                    }
                }
                Some(token)
            }
        };

        match selected {
            None => self.view.notify_error("A swap is already in progress").await,
            Some(None) => {
                self.view
                    .notify_error(&format!("Token {} is not available on this network", query))
                    .await
            }
            Some(Some(_)) => self.refresh_quote().await,
        }
    }

    /// Re-runs the quote for the current inputs. Superseded responses are dropped.
    pub async fn refresh_quote(&self) -> Result<()> {
        let generation = self.quote_generation.next();

        let (swap, mode) = {
            let mut state = self.lock();
            if state.phase.is_swapping() {
                return Ok(());
            }
            state.phase = FormPhase::Quoting;
            (state.swap.clone(), state.mode)
        };

        let wallet_address = self.wallet.address();
        let outcome = self
            .quotes
            .get_quote(&swap, wallet_address.as_deref(), mode)
            .await;

        if !self.quote_generation.is_current(generation) {
            debug!("Discarding stale quote from request {}", generation);
            return Ok(());
        }

        {
            let mut state = self.lock();
            state.swap.to_amount = outcome.display_amount().to_string();
            state.phase = match &outcome {
                QuoteOutcome::Cleared | QuoteOutcome::OutOfRange => FormPhase::Idle,
                QuoteOutcome::Fallback { error, .. } if error.is_unsupported() => {
                    FormPhase::Unsupported
                }
                _ => FormPhase::Ready,
            };
            if !matches!(outcome, QuoteOutcome::Cleared | QuoteOutcome::OutOfRange) {
                state.is_pair_supported = outcome.pair_supported();
            }
        }

        match &outcome {
            QuoteOutcome::OutOfRange => self.view.notify_error("Amount is out of range").await,
            QuoteOutcome::Fallback {
                error: QuoteError::Unsupported(_),
                ..
            } => {
                self.view
                    .notify_error("This token pair is not supported for swapping")
                    .await
            }
            QuoteOutcome::Fallback { error, .. } => {
                self.view
                    .notify_error(&format!("Quote error: {}", error))
                    .await
            }
            _ => Ok(()),
        }
    }

    fn schedule_reset(&self, epoch: u64, success: bool) {
        let state = Arc::clone(&self.state);
        let delay = self.reset_delay;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let mut state = lock_state(&state);
            // A newer swap or new input since settlement owns the form now
            if state.settle_epoch != epoch || !state.phase.is_settled() {
                return;
            }
            if success {
                state.swap.clear_amounts();
            }
            state.phase = FormPhase::Idle;
            debug!("Form reset after settled swap");
        });
    }
}

#[async_trait]
impl SwapPresenter for SwapFormController {
    fn snapshot(&self) -> FormSnapshot {
        let state = self.lock();
        FormSnapshot {
            network_name: state.network.name.to_string(),
            mode: state.mode,
            swap: state.swap.clone(),
            phase: state.phase,
            is_pair_supported: state.is_pair_supported,
            is_loading_tokens: state.is_loading_tokens,
            is_connected: self.wallet.is_connected(),
            wallet_address: self.wallet.address(),
            token_count: state.tokens.len(),
        }
    }

    async fn show_form(&self) -> Result<()> {
        self.view.display_form(&self.snapshot()).await
    }

    async fn show_tokens(&self) -> Result<()> {
        let (network, mode, tokens) = {
            let state = self.lock();
            (state.network, state.mode, state.tokens.clone())
        };
        self.view.display_tokens(network, mode, &tokens).await
    }

    async fn reload_catalog(&self) -> Result<()> {
        let generation = self.catalog_generation.next();
        // Quotes in flight were priced against the old catalog
        self.quote_generation.next();

        let (network, mode) = {
            let mut state = self.lock();
            state.swap.clear_selection();
            state.tokens.clear();
            state.is_loading_tokens = true;
            state.is_pair_supported = true;
            if !state.phase.is_swapping() {
                state.phase = FormPhase::Idle;
            }
            (state.network, state.mode)
        };

        let result = self.catalog.load_tokens(network, mode).await;

        if !self.catalog_generation.is_current(generation) {
            debug!("Discarding stale token catalog for {}", network.id);
            return Ok(());
        }

        match result {
            Ok(tokens) => {
                {
                    let mut state = self.lock();
                    state.tokens = tokens;
                    state.is_loading_tokens = false;
                }
                self.view
                    .notify_info(&format!("Switched to {} on {}", mode, network.name))
                    .await
            }
            Err(e) => {
                error!("Error loading tokens: {}", e);
                self.lock().is_loading_tokens = false;
                self.view
                    .notify_error("Failed to load tokens. Please try again later.")
                    .await
            }
        }
    }

    async fn select_network(&self, network_id: &str) -> Result<()> {
        let Some(network) = Network::find(network_id) else {
            return self
                .view
                .notify_error(&format!("Unknown network: {}", network_id))
                .await;
        };

        self.lock().network = network;
        self.reload_catalog().await
    }

    async fn set_testnet(&self, is_testnet: bool) -> Result<()> {
        self.lock().mode = NetworkMode::from_testnet(is_testnet);
        self.reload_catalog().await
    }

    async fn select_from_token(&self, query: &str) -> Result<()> {
        self.select_token(query, Leg::From).await
    }

    async fn select_to_token(&self, query: &str) -> Result<()> {
        self.select_token(query, Leg::To).await
    }

    async fn set_from_amount(&self, amount: &str) -> Result<()> {
        let accepted = {
            let mut state = self.lock();
            if state.phase.is_swapping() {
                false
            } else {
                state.swap.from_amount = amount.trim().to_string();
                true
            }
        };

        if accepted {
            self.refresh_quote().await
        } else {
            self.view.notify_error("A swap is already in progress").await
        }
    }

    async fn set_slippage(&self, slippage: f64) -> Result<()> {
        if !(slippage > 0.0 && slippage <= MAX_SLIPPAGE) {
            return self
                .view
                .notify_error(&format!(
                    "Slippage must be greater than 0% and at most {}%",
                    MAX_SLIPPAGE
                ))
                .await;
        }

        self.lock().swap.slippage = slippage;
        self.view
            .notify_info(&format!("Slippage set to {}%", slippage))
            .await
    }

    async fn switch_tokens(&self) -> Result<()> {
        let switched = {
            let mut state = self.lock();
            !state.phase.is_swapping() && state.swap.switch_tokens()
        };

        if switched {
            self.refresh_quote().await
        } else {
            Ok(())
        }
    }

    async fn connect_wallet(&self, wallet_id: Option<&str>) -> Result<()> {
        let Some(wallet_id) = wallet_id
            .map(str::to_string)
            .or_else(|| self.wallet.selected_wallet())
        else {
            return self.view.notify_info("Please connect a wallet first").await;
        };

        match self.wallet.connect(&wallet_id).await {
            Ok(address) => {
                self.view
                    .notify_info(&format!("Wallet connected: {}", shorten_address(&address)))
                    .await?;
                // Quotes depend on the wallet address
                self.refresh_quote().await
            }
            Err(e) => {
                error!("Failed to connect wallet {}: {}", wallet_id, e);
                self.view
                    .notify_error(&format!("Failed to connect wallet: {}", e))
                    .await
            }
        }
    }

    async fn submit(&self) -> Result<()> {
        if !self.wallet.is_connected() {
            return self.connect_wallet(None).await;
        }

        let wallet_address = self.wallet.address();
        let prepared = {
            let mut state = self.lock();
            if state.phase.is_swapping() {
                Err("A swap is already in progress".to_string())
            } else {
                match self.swaps.validate_swap_parameters(
                    &state.swap,
                    wallet_address.as_deref(),
                    state.mode,
                ) {
                    Ok(params) => {
                        state.phase = FormPhase::Swapping;
                        state.settle_epoch += 1;
                        Ok((
                            params,
                            state.network,
                            state.swap.to_amount.clone(),
                            state.settle_epoch,
                        ))
                    }
                    Err(e) => Err(e.to_string()),
                }
            }
        };

        let (params, network, expected_amount_out, epoch) = match prepared {
            Ok(prepared) => prepared,
            Err(message) => return self.view.notify_error(&message).await,
        };

        // No quote may land while the swap is in flight
        self.quote_generation.next();

        info!(
            "Submitting swap: {} {} -> {} on {}",
            params.amount,
            params.from_token.symbol,
            params.to_token.symbol,
            network.label(params.mode)
        );
        if let Err(e) = self
            .view
            .display_processing(
                &params.from_token.symbol,
                &params.to_token.symbol,
                &params.amount,
            )
            .await
        {
            warn!("Failed to display swap progress: {}", e);
        }

        let result = self
            .swaps
            .execute_swap(params, network, &expected_amount_out)
            .await;

        self.lock().phase = if result.success {
            FormPhase::SettledSuccess
        } else {
            FormPhase::SettledFailed
        };
        self.schedule_reset(epoch, result.success);

        if result.success {
            self.view.display_swap_success(&result).await
        } else if let Some(message) = &result.error_message {
            self.view
                .notify_error(&format!("Swap failed: {}", message))
                .await
        } else {
            self.view.display_swap_error(&result).await
        }
    }
}
