use log::{error, info, warn};
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

use crate::entity::{LedgerError, Transaction, TransactionStatus};

/// Number of entries shown per history page.
pub const HISTORY_PAGE_SIZE: usize = 5;

/// Durable storage for the transaction list
pub trait LedgerStore: Send + Sync {
    /// Reads the stored list; missing or corrupt data yields an empty list
    fn load(&self) -> Vec<Transaction>;

    fn save(&self, transactions: &[Transaction]) -> Result<(), LedgerError>;
}

/// Stores the whole list as one JSON document
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LedgerStore for JsonFileStore {
    fn load(&self) -> Vec<Transaction> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return Vec::new(),
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(
                "Ignoring unreadable transaction history at {}: {}",
                self.path.display(),
                e
            );
            Vec::new()
        })
    }

    fn save(&self, transactions: &[Transaction]) -> Result<(), LedgerError> {
        let json = serde_json::to_string(transactions)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// One page of history, newest first.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryPage {
    pub page: usize,
    pub total_pages: usize,
    pub entries: Vec<Transaction>,
}

impl HistoryPage {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1))
}

/// Slices a newest-first list into 1-based pages
pub fn paginate(transactions: &[Transaction], page: usize, page_size: usize) -> HistoryPage {
    let page_size = page_size.max(1);
    let total_pages = total_pages(transactions.len(), page_size);
    let page = page.clamp(1, total_pages.max(1));

    let entries = transactions
        .iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .cloned()
        .collect();

    HistoryPage {
        page,
        total_pages,
        entries,
    }
}

/// Append-only list of swap attempts, newest first. Each entry settles at
/// most once; every mutation is written through to the store.
pub struct TransactionLedger {
    store: Arc<dyn LedgerStore>,
    entries: RwLock<Vec<Transaction>>,
    max_entries: Option<usize>,
}

impl TransactionLedger {
    /// Rehydrates the ledger from the store. A cap of 0 is raised to 1 so a
    /// pending entry always survives its own insert.
    pub fn open(store: Arc<dyn LedgerStore>, max_entries: Option<usize>) -> Self {
        let max_entries = max_entries.map(|max| max.max(1));
        let mut entries = store.load();
        if let Some(max) = max_entries {
            entries.truncate(max);
        }
        info!("Loaded {} transactions from history", entries.len());

        Self {
            store,
            entries: RwLock::new(entries),
            max_entries,
        }
    }

    pub fn entries(&self) -> Vec<Transaction> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: &str) -> Option<Transaction> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|tx| tx.id == id)
            .cloned()
    }

    pub fn page(&self, page: usize) -> HistoryPage {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        paginate(&entries, page, HISTORY_PAGE_SIZE)
    }

    /// Prepends a new entry, pruning the oldest ones past the retention cap
    pub fn record_pending(&self, transaction: Transaction) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(0, transaction);
        if let Some(max) = self.max_entries {
            entries.truncate(max);
        }
        self.persist(&entries);
    }

    pub fn mark_success(
        &self,
        id: &str,
        block_explorer_url: Option<String>,
    ) -> Result<Transaction, LedgerError> {
        self.settle(id, TransactionStatus::Success, block_explorer_url)
    }

    pub fn mark_failed(&self, id: &str) -> Result<Transaction, LedgerError> {
        self.settle(id, TransactionStatus::Failed, None)
    }

    fn settle(
        &self,
        id: &str,
        status: TransactionStatus,
        block_explorer_url: Option<String>,
    ) -> Result<Transaction, LedgerError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let entry = entries
            .iter_mut()
            .find(|tx| tx.id == id)
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))?;

        entry.settle(status, block_explorer_url)?;
        let settled = entry.clone();
        self.persist(&entries);

        Ok(settled)
    }

    // Storage failures keep the in-memory list authoritative
    fn persist(&self, entries: &[Transaction]) {
        if let Err(e) = self.store.save(entries) {
            error!("Failed to persist transaction history: {}", e);
        }
    }
}
