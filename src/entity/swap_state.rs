use crate::entity::Token;

/// Default slippage tolerance, in percent.
pub const DEFAULT_SLIPPAGE: f64 = 0.5;

/// Mutable form state. `to_amount` is derived from the other inputs and is
/// recomputed whenever the pair or `from_amount` changes.
#[derive(Debug, Clone, PartialEq)]
pub struct SwapState {
    pub from_token: Option<Token>,
    pub to_token: Option<Token>,
    pub from_amount: String,
    pub to_amount: String,
    pub slippage: f64,
}

impl Default for SwapState {
    fn default() -> Self {
        Self::new(DEFAULT_SLIPPAGE)
    }
}

impl SwapState {
    pub fn new(slippage: f64) -> Self {
        Self {
            from_token: None,
            to_token: None,
            from_amount: String::new(),
            to_amount: String::new(),
            slippage,
        }
    }

    /// Drops the selected pair and both amounts; slippage is kept.
    pub fn clear_selection(&mut self) {
        self.from_token = None;
        self.to_token = None;
        self.clear_amounts();
    }

    pub fn clear_amounts(&mut self) {
        self.from_amount.clear();
        self.to_amount.clear();
    }

    pub fn has_pair(&self) -> bool {
        self.from_token.is_some() && self.to_token.is_some()
    }

    /// True when every field required for submission is filled in.
    pub fn is_complete(&self) -> bool {
        self.has_pair() && !self.from_amount.trim().is_empty()
    }

    /// Swaps both legs, amounts included. No-op unless a pair is selected.
    pub fn switch_tokens(&mut self) -> bool {
        if !self.has_pair() {
            return false;
        }

        std::mem::swap(&mut self.from_token, &mut self.to_token);
        std::mem::swap(&mut self.from_amount, &mut self.to_amount);
        true
    }
}
