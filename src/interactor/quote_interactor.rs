use async_trait::async_trait;
use log::{debug, warn};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::entity::{NetworkMode, QuoteError, QuoteParams, SwapState, Token};
use crate::symbiosis::QuoteService;
use crate::utils::{format_fixed, is_out_of_range_amount, is_positive_amount, parse_amount};

/// Monotonic request counter. A response is applied only if the generation
/// it was issued under is still the latest one.
#[derive(Debug, Default)]
pub struct RequestGeneration(AtomicU64);

impl RequestGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new request, superseding every earlier one
    pub fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.0.load(Ordering::SeqCst) == generation
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum QuoteOutcome {
    /// Inputs are incomplete or the amount is not positive
    Cleared,
    /// The amount is a positive number too large to price
    OutOfRange,
    /// The aggregator priced the pair
    Quoted { amount: String },
    /// The aggregator failed; `amount` is the local estimate or "0"
    Fallback { amount: String, error: QuoteError },
}

impl QuoteOutcome {
    pub fn display_amount(&self) -> &str {
        match self {
            Self::Cleared | Self::OutOfRange => "",
            Self::Quoted { amount } | Self::Fallback { amount, .. } => amount,
        }
    }

    /// Only an explicit "unsupported" classification marks the pair unsupported.
    /// Other failures leave it supported even though no quote was obtained.
    pub fn pair_supported(&self) -> bool {
        match self {
            Self::Fallback { error, .. } => !error.is_unsupported(),
            _ => true,
        }
    }
}

#[async_trait]
pub trait QuoteInteractor: Send + Sync {
    async fn get_quote(
        &self,
        state: &SwapState,
        wallet_address: Option<&str>,
        mode: NetworkMode,
    ) -> QuoteOutcome;
}

pub struct QuoteInteractorImpl {
    quote_service: Arc<dyn QuoteService>,
}

impl QuoteInteractorImpl {
    pub fn new(quote_service: Arc<dyn QuoteService>) -> Self {
        Self { quote_service }
    }
}

#[async_trait]
impl QuoteInteractor for QuoteInteractorImpl {
    async fn get_quote(
        &self,
        state: &SwapState,
        wallet_address: Option<&str>,
        mode: NetworkMode,
    ) -> QuoteOutcome {
        let (Some(from_token), Some(to_token)) = (&state.from_token, &state.to_token) else {
            return QuoteOutcome::Cleared;
        };
        if is_out_of_range_amount(&state.from_amount) {
            debug!("Amount out of range: {}", state.from_amount);
            return QuoteOutcome::OutOfRange;
        }
        if !is_positive_amount(&state.from_amount) {
            return QuoteOutcome::Cleared;
        }

        let params = QuoteParams {
            from_token: from_token.clone(),
            to_token: to_token.clone(),
            amount: state.from_amount.trim().to_string(),
            wallet_address: wallet_address.map(str::to_string),
            mode,
        };

        match self.quote_service.get_output_amount(&params).await {
            Ok(amount) => QuoteOutcome::Quoted { amount },
            Err(error) => {
                warn!("Error getting swap quote: {}", error);
                let amount = fallback_estimate(from_token, to_token, &params.amount);
                debug!("Fallback estimate: {} {}", amount, to_token.symbol);
                QuoteOutcome::Fallback { amount, error }
            }
        }
    }
}

/// `amount * from.price / to.price` at the destination's display precision,
/// or "0" when either reference price is unknown.
pub fn fallback_estimate(from_token: &Token, to_token: &Token, amount: &str) -> String {
    let prices = from_token
        .known_price()
        .and_then(Decimal::from_f64)
        .zip(to_token.known_price().and_then(Decimal::from_f64));
    let input = parse_amount(amount);

    let (Some((from_price, to_price)), Some(input)) = (prices, input) else {
        return "0".to_string();
    };

    input
        .checked_mul(from_price)
        .and_then(|value| value.checked_div(to_price))
        .map(|value| format_fixed(value, to_token.display_decimals() as u32))
        .unwrap_or_else(|| "0".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{token, FakeQuoteService};

    fn state(from: Option<Token>, to: Option<Token>, amount: &str) -> SwapState {
        SwapState {
            from_token: from,
            to_token: to,
            from_amount: amount.to_string(),
            ..SwapState::default()
        }
    }

    #[test]
    fn fallback_uses_price_ratio() {
        let from = token("ETH", Some(2000.0), 6);
        let to = token("BNB", Some(1000.0), 6);
        assert_eq!(fallback_estimate(&from, &to, "1"), "2.000000");
    }

    #[test]
    fn fallback_defaults_precision_and_handles_missing_prices() {
        let from = token("ETH", Some(3.0), 18);
        let to = token("XYZ", Some(2.0), 0);
        assert_eq!(fallback_estimate(&from, &to, "1"), "1.500000");

        let unpriced = token("ABC", None, 18);
        assert_eq!(fallback_estimate(&from, &unpriced, "1"), "0");
        assert_eq!(fallback_estimate(&unpriced, &to, "1"), "0");

        let zero = token("ZERO", Some(0.0), 18);
        assert_eq!(fallback_estimate(&from, &zero, "1"), "0");
    }

    #[test]
    fn fallback_keeps_full_precision_for_large_outputs() {
        let eth = token("ETH", Some(2000.0), 18);
        let meme = token("MEME", Some(0.000001), 18);

        let estimate = fallback_estimate(&eth, &meme, "1000");
        let (_, fraction) = estimate.split_once('.').unwrap();
        assert_eq!(fraction.len(), 18);

        let value: f64 = estimate.parse().unwrap();
        assert!((value - 2.0e12).abs() < 1.0);
    }

    #[tokio::test]
    async fn oversized_amount_is_reported_without_calling_remote() {
        let service = Arc::new(FakeQuoteService::returning("5.0"));
        let interactor = QuoteInteractorImpl::new(service.clone());
        let s = state(
            Some(token("ETH", Some(2000.0), 18)),
            Some(token("USDC", Some(1.0), 6)),
            "1e30",
        );

        let outcome = interactor.get_quote(&s, None, NetworkMode::Mainnet).await;
        assert_eq!(outcome, QuoteOutcome::OutOfRange);
        assert_eq!(outcome.display_amount(), "");
        assert!(outcome.pair_supported());
        assert_eq!(service.calls(), 0);
    }

    #[tokio::test]
    async fn invalid_inputs_clear_without_calling_remote() {
        let service = Arc::new(FakeQuoteService::returning("5.0"));
        let interactor = QuoteInteractorImpl::new(service.clone());
        let eth = token("ETH", Some(2000.0), 18);
        let usdc = token("USDC", Some(1.0), 6);

        for s in [
            state(Some(eth.clone()), Some(usdc.clone()), ""),
            state(Some(eth.clone()), Some(usdc.clone()), "0"),
            state(Some(eth.clone()), Some(usdc.clone()), "-2"),
            state(Some(eth.clone()), Some(usdc.clone()), "abc"),
            state(None, Some(usdc.clone()), "1"),
            state(Some(eth.clone()), None, "1"),
        ] {
            let outcome = interactor.get_quote(&s, None, NetworkMode::Mainnet).await;
            assert_eq!(outcome, QuoteOutcome::Cleared);
            assert_eq!(outcome.display_amount(), "");
        }
        assert_eq!(service.calls(), 0);
    }

    #[tokio::test]
    async fn remote_amount_is_taken_verbatim() {
        let service = Arc::new(FakeQuoteService::returning("1999.87"));
        let interactor = QuoteInteractorImpl::new(service.clone());
        let s = state(
            Some(token("ETH", Some(2000.0), 18)),
            Some(token("USDC", Some(1.0), 6)),
            "1",
        );

        let outcome = interactor.get_quote(&s, Some("0xabc"), NetworkMode::Mainnet).await;
        assert_eq!(outcome.display_amount(), "1999.87");
        assert!(outcome.pair_supported());
        assert_eq!(service.last_wallet().as_deref(), Some("0xabc"));
    }

    #[tokio::test]
    async fn unsupported_pair_still_gets_estimate() {
        let service = Arc::new(FakeQuoteService::failing(QuoteError::Unsupported(
            "pair not supported".to_string(),
        )));
        let interactor = QuoteInteractorImpl::new(service);
        let s = state(
            Some(token("ETH", Some(2000.0), 6)),
            Some(token("BNB", Some(1000.0), 6)),
            "1",
        );

        let outcome = interactor.get_quote(&s, None, NetworkMode::Mainnet).await;
        assert_eq!(outcome.display_amount(), "2.000000");
        assert!(!outcome.pair_supported());
    }

    #[tokio::test]
    async fn other_failures_keep_pair_supported() {
        let service = Arc::new(FakeQuoteService::failing(QuoteError::RateLimited(
            "too many requests".to_string(),
        )));
        let interactor = QuoteInteractorImpl::new(service);
        let s = state(
            Some(token("ETH", None, 18)),
            Some(token("USDC", Some(1.0), 6)),
            "1",
        );

        let outcome = interactor.get_quote(&s, None, NetworkMode::Mainnet).await;
        assert_eq!(outcome.display_amount(), "0");
        assert!(outcome.pair_supported());
    }

    #[test]
    fn generation_supersedes_older_requests() {
        let generation = RequestGeneration::new();
        let first = generation.next();
        assert!(generation.is_current(first));

        let second = generation.next();
        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
    }
}
