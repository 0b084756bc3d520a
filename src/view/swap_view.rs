use anyhow::Result;
use async_trait::async_trait;

use crate::entity::{FormSnapshot, Network, NetworkMode, SwapResult, Token};
use crate::utils::shorten_address;

#[async_trait]
pub trait SwapView: Send + Sync {
    async fn notify_info(&self, message: &str) -> Result<()>;
    async fn notify_error(&self, message: &str) -> Result<()>;
    async fn display_tokens(
        &self,
        network: &Network,
        mode: NetworkMode,
        tokens: &[Token],
    ) -> Result<()>;
    async fn display_form(&self, form: &FormSnapshot) -> Result<()>;
    async fn display_processing(
        &self,
        source_token: &str,
        target_token: &str,
        amount: &str,
    ) -> Result<()>;
    async fn display_swap_success(&self, result: &SwapResult) -> Result<()>;
    async fn display_swap_error(&self, result: &SwapResult) -> Result<()>;
}

/// Writes the form to standard output
#[derive(Default)]
pub struct ConsoleSwapView;

impl ConsoleSwapView {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SwapView for ConsoleSwapView {
    async fn notify_info(&self, message: &str) -> Result<()> {
        println!("ℹ️  {}", message);
        Ok(())
    }

    async fn notify_error(&self, message: &str) -> Result<()> {
        println!("❌ {}", message);
        Ok(())
    }

    async fn display_tokens(
        &self,
        network: &Network,
        mode: NetworkMode,
        tokens: &[Token],
    ) -> Result<()> {
        if tokens.is_empty() {
            println!("No tokens available on {} {}", network.name, mode);
            return Ok(());
        }

        println!("Tokens on {} {}:", network.name, mode);
        for token in tokens {
            let price = token
                .known_price()
                .map(|price| format!("${:.4}", price))
                .unwrap_or_else(|| "-".to_string());
            println!(
                "  {:<10} {:<28} {:>14}  {}",
                token.symbol,
                token.name,
                price,
                shorten_address(&token.address)
            );
        }

        Ok(())
    }

    async fn display_form(&self, form: &FormSnapshot) -> Result<()> {
        let badge = if form.mode.is_testnet() { " [Testnet]" } else { "" };
        let symbol = |token: &Option<Token>| {
            token
                .as_ref()
                .map(|token| token.symbol.clone())
                .unwrap_or_else(|| "(select)".to_string())
        };
        let loading = if form.is_loading_tokens {
            " (loading tokens...)"
        } else {
            ""
        };

        println!(
            "{}{}  |  Slippage Fee: {}%{}",
            form.network_name, badge, form.swap.slippage, loading
        );
        println!("  From: {:<12} {}", symbol(&form.swap.from_token), form.swap.from_amount);
        println!("  To:   {:<12} {}", symbol(&form.swap.to_token), form.swap.to_amount);

        if form.show_unsupported_banner() {
            println!(
                "  ⚠️  This token pair may not be supported for swapping via Symbiosis, but we'll try a fallback method."
            );
        }

        let wallet = form
            .wallet_address
            .as_deref()
            .map(shorten_address)
            .unwrap_or_else(|| "not connected".to_string());
        let disabled = if form.can_submit() || !form.is_connected {
            ""
        } else {
            " (disabled)"
        };
        println!("  Wallet: {}  [{}]{}", wallet, form.button_label(), disabled);

        Ok(())
    }

    async fn display_processing(
        &self,
        source_token: &str,
        target_token: &str,
        amount: &str,
    ) -> Result<()> {
        println!(
            "Swapping {} {} to {}... Waiting for the wallet...",
            amount, source_token, target_token
        );
        Ok(())
    }

    async fn display_swap_success(&self, result: &SwapResult) -> Result<()> {
        println!(
            "✅ Swap completed successfully!\n\
             Sent: {} {}\n\
             Expected: ~{} {}\n\
             Transaction: {}",
            result.amount_in,
            result.source_token,
            result.amount_out,
            result.target_token,
            result.signature.as_deref().unwrap_or("unknown")
        );
        if let Some(url) = &result.explorer_url {
            println!("Check transaction: {}", url);
        }

        Ok(())
    }

    async fn display_swap_error(&self, result: &SwapResult) -> Result<()> {
        println!(
            "❌ Swap of {} {} to {} failed: {}",
            result.amount_in,
            result.source_token,
            result.target_token,
            result
                .error_message
                .as_deref()
                .unwrap_or("no transaction was submitted")
        );
        Ok(())
    }
}
