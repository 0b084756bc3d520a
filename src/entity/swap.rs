use crate::entity::{NetworkMode, Token};

/// Everything the aggregator needs to price a pair.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteParams {
    pub from_token: Token,
    pub to_token: Token,
    pub amount: String,
    pub wallet_address: Option<String>,
    pub mode: NetworkMode,
}

/// A fully specified trade, validated and ready to submit.
#[derive(Debug, Clone, PartialEq)]
pub struct SwapParams {
    pub from_token: Token,
    pub to_token: Token,
    pub amount: String,
    pub slippage: f64, // Percent, e.g. 0.5
    pub wallet_address: String,
    pub mode: NetworkMode,
}

impl SwapParams {
    /// Slippage in basis points, as the aggregator expects it.
    pub fn slippage_bps(&self) -> u32 {
        (self.slippage * 100.0).round().max(0.0) as u32
    }
}
