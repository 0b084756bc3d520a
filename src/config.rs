use std::env;
use std::path::PathBuf;
use std::time::Duration;

use log::warn;

use crate::entity::{Network, NetworkMode, DEFAULT_SLIPPAGE, MAX_SLIPPAGE};

const MAINNET_API_URL: &str = "https://api.symbiosis.finance/crosschain";
const TESTNET_API_URL: &str = "https://api.testnet.symbiosis.finance/crosschain";
const WALLET_RPC_URL: &str = "http://127.0.0.1:1248";
const HISTORY_PATH: &str = "swapTransactions.json";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Symbiosis API base URL for mainnet
    pub mainnet_api_url: String,

    /// Symbiosis API base URL for testnet
    pub testnet_api_url: String,

    /// JSON-RPC endpoint of the signing wallet
    pub wallet_rpc_url: String,

    /// Wallet to connect when the user asks to swap while disconnected
    pub wallet_id: Option<String>,

    /// File holding the persisted transaction history
    pub history_path: PathBuf,

    /// Optional retention cap for the history, unbounded when `None`
    pub history_max_entries: Option<usize>,

    /// Initial slippage tolerance, in percent
    pub default_slippage: f64,

    /// Delay before a settled swap resets the form
    pub reset_delay: Duration,

    /// Timeout applied to every HTTP request
    pub http_timeout: Duration,

    /// Network selected at startup
    pub default_network: String,

    /// Start in testnet mode
    pub testnet: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mainnet_api_url: MAINNET_API_URL.to_string(),
            testnet_api_url: TESTNET_API_URL.to_string(),
            wallet_rpc_url: WALLET_RPC_URL.to_string(),
            wallet_id: None,
            history_path: PathBuf::from(HISTORY_PATH),
            history_max_entries: None,
            default_slippage: DEFAULT_SLIPPAGE,
            reset_delay: Duration::from_secs(5),
            http_timeout: Duration::from_secs(30),
            default_network: Network::default_network().id.to_string(),
            testnet: false,
        }
    }
}

impl Config {
    /// Builds the configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            mainnet_api_url: env::var("SYMBIOSIS_API_URL").unwrap_or(defaults.mainnet_api_url),
            testnet_api_url: env::var("SYMBIOSIS_TESTNET_API_URL")
                .unwrap_or(defaults.testnet_api_url),
            wallet_rpc_url: env::var("WALLET_RPC_URL").unwrap_or(defaults.wallet_rpc_url),
            wallet_id: env::var("WALLET_ID").ok().filter(|id| !id.trim().is_empty()),
            history_path: env::var("HISTORY_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.history_path),
            history_max_entries: parse_var("HISTORY_MAX_ENTRIES").and_then(retention_cap),
            default_slippage: parse_var("DEFAULT_SLIPPAGE")
                .and_then(slippage_in_range)
                .unwrap_or(defaults.default_slippage),
            reset_delay: parse_var("RESET_DELAY_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.reset_delay),
            http_timeout: parse_var("HTTP_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.http_timeout),
            default_network: env::var("DEFAULT_NETWORK").unwrap_or(defaults.default_network),
            testnet: parse_var("TESTNET").unwrap_or(defaults.testnet),
        }
    }

    pub fn api_url(&self, mode: NetworkMode) -> &str {
        match mode {
            NetworkMode::Mainnet => &self.mainnet_api_url,
            NetworkMode::Testnet => &self.testnet_api_url,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = env::var(name).ok()?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring invalid value for {}: '{}'", name, raw);
            None
        }
    }
}

fn retention_cap(max: usize) -> Option<usize> {
    if max == 0 {
        warn!("Ignoring HISTORY_MAX_ENTRIES=0, history stays unbounded");
        return None;
    }
    Some(max)
}

fn slippage_in_range(slippage: f64) -> Option<f64> {
    if slippage > 0.0 && slippage <= MAX_SLIPPAGE {
        return Some(slippage);
    }
    warn!(
        "Ignoring DEFAULT_SLIPPAGE={}, expected a value in (0, {}]",
        slippage, MAX_SLIPPAGE
    );
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_url_follows_mode() {
        let config = Config::default();
        assert_eq!(config.api_url(NetworkMode::Mainnet), MAINNET_API_URL);
        assert_eq!(config.api_url(NetworkMode::Testnet), TESTNET_API_URL);
    }

    #[test]
    fn defaults_match_form_behaviour() {
        let config = Config::default();
        assert_eq!(config.reset_delay, Duration::from_secs(5));
        assert_eq!(config.default_slippage, 0.5);
        assert_eq!(config.history_max_entries, None);
        assert!(Network::find(&config.default_network).is_some());
    }

    #[test]
    fn zero_retention_cap_is_ignored() {
        assert_eq!(retention_cap(0), None);
        assert_eq!(retention_cap(100), Some(100));
    }

    #[test]
    fn slippage_outside_range_is_ignored() {
        assert_eq!(slippage_in_range(-1.0), None);
        assert_eq!(slippage_in_range(0.0), None);
        assert_eq!(slippage_in_range(f64::NAN), None);
        assert_eq!(slippage_in_range(MAX_SLIPPAGE + 1.0), None);
        assert_eq!(slippage_in_range(1.0), Some(1.0));
        assert_eq!(slippage_in_range(MAX_SLIPPAGE), Some(MAX_SLIPPAGE));
    }
}
