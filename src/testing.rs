//! In-memory fakes for the service seams.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

use crate::entity::{
    CatalogError, FormSnapshot, LedgerError, Network, NetworkMode, QuoteError, QuoteParams,
    SwapError, SwapParams, SwapResult, Token, Transaction, TransactionRequest, TransactionStatus,
    WalletError,
};
use crate::interactor::{HistoryPage, LedgerStore, TransactionLedger};
use crate::symbiosis::{QuoteService, SwapService, TokenRepository};
use crate::view::{HistoryView, SwapView};
use crate::wallet::WalletSession;

pub fn token(symbol: &str, price: Option<f64>, decimals: u8) -> Token {
    Token {
        symbol: symbol.to_string(),
        name: format!("{} Token", symbol),
        address: format!("0x{}", symbol.to_lowercase()),
        chain_id: 1,
        decimals,
        price,
        logo_uri: None,
    }
}

pub struct FakeTokenRepository {
    tokens: Option<Vec<Token>>,
    gate: Option<Arc<Notify>>,
}

impl FakeTokenRepository {
    pub fn with_tokens(tokens: Vec<Token>) -> Self {
        Self {
            tokens: Some(tokens),
            gate: None,
        }
    }

    pub fn failing() -> Self {
        Self {
            tokens: None,
            gate: None,
        }
    }

    /// Each fetch waits for one notification before answering
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }
}

#[async_trait]
impl TokenRepository for FakeTokenRepository {
    async fn fetch_tokens(
        &self,
        _network: &Network,
        _mode: NetworkMode,
    ) -> Result<Vec<Token>, CatalogError> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        self.tokens.clone().ok_or(CatalogError::Api {
            status: 500,
            message: "catalog unavailable".to_string(),
        })
    }
}

enum QuoteScript {
    Fixed(String),
    Echo,
    Fail(QuoteError),
}

pub struct FakeQuoteService {
    script: QuoteScript,
    delays: HashMap<String, Duration>,
    calls: AtomicUsize,
    last_wallet: Mutex<Option<String>>,
}

impl FakeQuoteService {
    fn scripted(script: QuoteScript) -> Self {
        Self {
            script,
            delays: HashMap::new(),
            calls: AtomicUsize::new(0),
            last_wallet: Mutex::new(None),
        }
    }

    pub fn returning(amount: &str) -> Self {
        Self::scripted(QuoteScript::Fixed(amount.to_string()))
    }

    /// Answers `quote:<amount>` for every request
    pub fn echoing() -> Self {
        Self::scripted(QuoteScript::Echo)
    }

    pub fn failing(error: QuoteError) -> Self {
        Self::scripted(QuoteScript::Fail(error))
    }

    pub fn with_delay(mut self, amount: &str, delay: Duration) -> Self {
        self.delays.insert(amount.to_string(), delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_wallet(&self) -> Option<String> {
        self.last_wallet.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuoteService for FakeQuoteService {
    async fn get_output_amount(&self, params: &QuoteParams) -> Result<String, QuoteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_wallet.lock().unwrap() = params.wallet_address.clone();

        if let Some(delay) = self.delays.get(&params.amount) {
            tokio::time::sleep(*delay).await;
        }

        match &self.script {
            QuoteScript::Fixed(amount) => Ok(amount.clone()),
            QuoteScript::Echo => Ok(format!("quote:{}", params.amount)),
            QuoteScript::Fail(error) => Err(error.clone()),
        }
    }
}

/// Scripted outcome of a swap call
#[derive(Debug, Clone)]
pub enum ScriptedSwap {
    Reference(String),
    Falsy,
    Reject(String),
}

pub struct FakeSwapService {
    script: ScriptedSwap,
    delay: Option<Duration>,
    ledger: Option<Arc<TransactionLedger>>,
    seen_statuses: Mutex<Vec<TransactionStatus>>,
    calls: AtomicUsize,
}

impl FakeSwapService {
    pub fn new(script: ScriptedSwap) -> Self {
        Self {
            script,
            delay: None,
            ledger: None,
            seen_statuses: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Records the newest ledger entry's status whenever the swap is called
    pub fn observing(mut self, ledger: Arc<TransactionLedger>) -> Self {
        self.ledger = Some(ledger);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn seen_statuses(&self) -> Vec<TransactionStatus> {
        self.seen_statuses.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SwapService for FakeSwapService {
    async fn swap_tokens(&self, _params: &SwapParams) -> Result<Option<String>, SwapError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(ledger) = &self.ledger {
            if let Some(newest) = ledger.entries().first() {
                self.seen_statuses.lock().unwrap().push(newest.status);
            }
        }

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.script {
            ScriptedSwap::Reference(reference) => Ok(Some(reference.clone())),
            ScriptedSwap::Falsy => Ok(None),
            ScriptedSwap::Reject(message) => Err(SwapError::Wallet(WalletError::Rpc {
                code: 4001,
                message: message.clone(),
            })),
        }
    }
}

pub struct FakeWallet {
    selected: Option<String>,
    address: Mutex<Option<String>>,
    connect_calls: Mutex<Vec<String>>,
    sent: Mutex<Vec<TransactionRequest>>,
}

impl FakeWallet {
    pub fn connected(address: &str) -> Self {
        Self {
            selected: Some("injected".to_string()),
            address: Mutex::new(Some(address.to_string())),
            connect_calls: Mutex::new(Vec::new()),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn disconnected(selected: Option<&str>) -> Self {
        Self {
            selected: selected.map(str::to_string),
            address: Mutex::new(None),
            connect_calls: Mutex::new(Vec::new()),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn connect_calls(&self) -> Vec<String> {
        self.connect_calls.lock().unwrap().clone()
    }

    /// Transactions handed to the wallet, in order
    pub fn sent(&self) -> Vec<TransactionRequest> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl WalletSession for FakeWallet {
    fn is_connected(&self) -> bool {
        self.address.lock().unwrap().is_some()
    }

    fn selected_wallet(&self) -> Option<String> {
        self.selected.clone()
    }

    fn address(&self) -> Option<String> {
        self.address.lock().unwrap().clone()
    }

    async fn connect(&self, wallet_id: &str) -> Result<String, WalletError> {
        self.connect_calls.lock().unwrap().push(wallet_id.to_string());
        let address = "0x2222222222222222222222222222222222222222".to_string();
        *self.address.lock().unwrap() = Some(address.clone());
        Ok(address)
    }

    async fn send_transaction(
        &self,
        tx: &TransactionRequest,
    ) -> Result<Option<String>, WalletError> {
        if !self.is_connected() {
            return Err(WalletError::NotConnected);
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push(tx.clone());
        Ok(Some(format!("0xhash{}", sent.len())))
    }
}

#[derive(Default)]
pub struct RecordingView {
    infos: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
    pages: Mutex<Vec<usize>>,
    empty_shown: AtomicUsize,
}

impl RecordingView {
    pub fn infos(&self) -> Vec<String> {
        self.infos.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }

    /// Page numbers displayed so far
    pub fn pages(&self) -> Vec<usize> {
        self.pages.lock().unwrap().clone()
    }

    pub fn empty_shown(&self) -> usize {
        self.empty_shown.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SwapView for RecordingView {
    async fn notify_info(&self, message: &str) -> Result<()> {
        self.infos.lock().unwrap().push(message.to_string());
        Ok(())
    }

    async fn notify_error(&self, message: &str) -> Result<()> {
        self.errors.lock().unwrap().push(message.to_string());
        Ok(())
    }

    async fn display_tokens(
        &self,
        _network: &Network,
        _mode: NetworkMode,
        _tokens: &[Token],
    ) -> Result<()> {
        Ok(())
    }

    async fn display_form(&self, _form: &FormSnapshot) -> Result<()> {
        Ok(())
    }

    async fn display_processing(
        &self,
        _source_token: &str,
        _target_token: &str,
        _amount: &str,
    ) -> Result<()> {
        Ok(())
    }

    async fn display_swap_success(&self, result: &SwapResult) -> Result<()> {
        self.infos
            .lock()
            .unwrap()
            .push(format!("swapped {}", result.transaction_id));
        Ok(())
    }

    async fn display_swap_error(&self, result: &SwapResult) -> Result<()> {
        self.errors
            .lock()
            .unwrap()
            .push(format!("swap {} failed", result.transaction_id));
        Ok(())
    }
}

#[async_trait]
impl HistoryView for RecordingView {
    async fn display_empty(&self) -> Result<()> {
        self.empty_shown.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn display_page(&self, page: &HistoryPage) -> Result<()> {
        self.pages.lock().unwrap().push(page.page);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryStore {
    transactions: Mutex<Vec<Transaction>>,
    saves: AtomicUsize,
}

impl MemoryStore {
    pub fn with_transactions(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions: Mutex::new(transactions),
            saves: AtomicUsize::new(0),
        }
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl LedgerStore for MemoryStore {
    fn load(&self) -> Vec<Transaction> {
        self.transactions.lock().unwrap().clone()
    }

    fn save(&self, transactions: &[Transaction]) -> Result<(), LedgerError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        *self.transactions.lock().unwrap() = transactions.to_vec();
        Ok(())
    }
}
