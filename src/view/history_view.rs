use anyhow::Result;
use async_trait::async_trait;

use crate::interactor::HistoryPage;
use crate::utils::format_timestamp;

#[async_trait]
pub trait HistoryView: Send + Sync {
    async fn display_empty(&self) -> Result<()>;
    async fn display_page(&self, page: &HistoryPage) -> Result<()>;
}

#[derive(Default)]
pub struct ConsoleHistoryView;

impl ConsoleHistoryView {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl HistoryView for ConsoleHistoryView {
    async fn display_empty(&self) -> Result<()> {
        println!("No transaction history yet");
        Ok(())
    }

    async fn display_page(&self, page: &HistoryPage) -> Result<()> {
        println!("Transaction History");
        println!(
            "{:<20} {:<24} {:<24} {:<22} {:<8} Details",
            "Time", "From", "To", "Network", "Status"
        );

        for tx in &page.entries {
            println!(
                "{:<20} {:<24} {:<24} {:<22} {:<8} {}",
                format_timestamp(tx.timestamp),
                format!("{} {}", tx.from_token.amount, tx.from_token.symbol),
                format!("{} {}", tx.to_token.amount, tx.to_token.symbol),
                tx.network,
                tx.status.to_string(),
                tx.block_explorer_url.as_deref().unwrap_or("")
            );
        }

        if page.total_pages > 1 {
            let prev = if page.has_previous() { "< prev" } else { "" };
            let next = if page.has_next() { "next >" } else { "" };
            println!("{}  Page {} of {}  {}", prev, page.page, page.total_pages, next);
        }

        Ok(())
    }
}
