use anyhow::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::interactor::TransactionLedger;
use crate::view::HistoryView;

#[async_trait]
pub trait HistoryPresenter: Send + Sync {
    /// Shows the given 1-based page, clamped to the available range
    async fn show_page(&self, page: usize) -> Result<()>;
    async fn show_current(&self) -> Result<()>;
    async fn next_page(&self) -> Result<()>;
    async fn previous_page(&self) -> Result<()>;
    fn current_page(&self) -> usize;
}

pub struct HistoryPresenterImpl<V> {
    ledger: Arc<TransactionLedger>,
    view: Arc<V>,
    current_page: AtomicUsize,
}

impl<V> HistoryPresenterImpl<V>
where
    V: HistoryView,
{
    pub fn new(ledger: Arc<TransactionLedger>, view: Arc<V>) -> Self {
        Self {
            ledger,
            view,
            current_page: AtomicUsize::new(1),
        }
    }
}

#[async_trait]
impl<V> HistoryPresenter for HistoryPresenterImpl<V>
where
    V: HistoryView + Send + Sync,
{
    async fn show_page(&self, page: usize) -> Result<()> {
        if self.ledger.is_empty() {
            self.current_page.store(1, Ordering::SeqCst);
            return self.view.display_empty().await;
        }

        let page = self.ledger.page(page);
        self.current_page.store(page.page, Ordering::SeqCst);
        self.view.display_page(&page).await
    }

    async fn show_current(&self) -> Result<()> {
        self.show_page(self.current_page()).await
    }

    async fn next_page(&self) -> Result<()> {
        self.show_page(self.current_page() + 1).await
    }

    async fn previous_page(&self) -> Result<()> {
        self.show_page(self.current_page().saturating_sub(1)).await
    }

    fn current_page(&self) -> usize {
        self.current_page.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{TokenAmount, Transaction};
    use crate::testing::{MemoryStore, RecordingView};

    fn ledger_with(count: usize) -> Arc<TransactionLedger> {
        let transactions = (1..=count)
            .rev()
            .map(|n| {
                Transaction::pending(
                    TokenAmount::new("ETH", n.to_string()),
                    TokenAmount::new("USDC", "0"),
                    "Ethereum Mainnet".to_string(),
                )
            })
            .collect();
        Arc::new(TransactionLedger::open(
            Arc::new(MemoryStore::with_transactions(transactions)),
            None,
        ))
    }

    #[tokio::test]
    async fn empty_history_shows_placeholder() {
        let view = Arc::new(RecordingView::default());
        let presenter = HistoryPresenterImpl::new(ledger_with(0), view.clone());

        presenter.show_page(1).await.unwrap();
        presenter.next_page().await.unwrap();

        assert_eq!(view.empty_shown(), 2);
        assert!(view.pages().is_empty());
        assert_eq!(presenter.current_page(), 1);
    }

    #[tokio::test]
    async fn paging_stays_in_range() {
        let view = Arc::new(RecordingView::default());
        let presenter = HistoryPresenterImpl::new(ledger_with(11), view.clone());

        presenter.show_current().await.unwrap();
        presenter.previous_page().await.unwrap();
        presenter.next_page().await.unwrap();
        presenter.next_page().await.unwrap();
        presenter.next_page().await.unwrap();
        presenter.show_page(2).await.unwrap();

        assert_eq!(view.pages(), vec![1, 1, 2, 3, 3, 2]);
        assert_eq!(presenter.current_page(), 2);
    }
}
