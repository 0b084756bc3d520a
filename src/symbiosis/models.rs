use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::entity::{QuoteError, Token, TransactionRequest};

/// Error messages the aggregator uses when it has no route for a pair.
const UNSUPPORTED_MARKERS: [&str; 4] = [
    "not supported",
    "unsupported",
    "no route",
    "route not found",
];

// Deserializes a price that may arrive as a number, a numeric string or be absent
pub mod string_or_float {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrFloat {
        Float(f64),
        String(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<StringOrFloat>::deserialize(deserializer)? {
            None => Ok(None),
            Some(StringOrFloat::Float(value)) => Ok(Some(value)),
            Some(StringOrFloat::String(value)) if value.trim().is_empty() => Ok(None),
            Some(StringOrFloat::String(value)) => value
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbiosisToken {
    pub address: String,
    pub chain_id: u64,
    pub decimals: u8,
    pub symbol: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default, deserialize_with = "string_or_float::deserialize")]
    pub price: Option<f64>,
}

impl From<SymbiosisToken> for Token {
    fn from(token: SymbiosisToken) -> Self {
        Token {
            name: token.name.unwrap_or_else(|| token.symbol.clone()),
            symbol: token.symbol,
            address: token.address,
            chain_id: token.chain_id,
            decimals: token.decimals,
            price: token.price,
            logo_uri: token.icon,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TokenList {
    Plain(Vec<SymbiosisToken>),
    Wrapped { tokens: Vec<SymbiosisToken> },
}

impl TokenList {
    pub fn into_tokens(self) -> Vec<SymbiosisToken> {
        match self {
            Self::Plain(tokens) | Self::Wrapped { tokens } => tokens,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAmountIn {
    pub chain_id: u64,
    pub address: String,
    pub symbol: String,
    pub decimals: u8,
    pub amount: String, // Base units
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenOut {
    pub chain_id: u64,
    pub address: String,
    pub symbol: String,
    pub decimals: u8,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapRequest {
    pub token_amount_in: TokenAmountIn,
    pub token_out: TokenOut,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    pub slippage: u32, // Basis points
}

impl SwapRequest {
    pub fn new(
        from_token: &Token,
        to_token: &Token,
        amount_in: String,
        wallet_address: Option<String>,
        slippage_bps: u32,
    ) -> Self {
        Self {
            token_amount_in: TokenAmountIn {
                chain_id: from_token.chain_id,
                address: from_token.address.clone(),
                symbol: from_token.symbol.clone(),
                decimals: from_token.decimals,
                amount: amount_in,
            },
            token_out: TokenOut {
                chain_id: to_token.chain_id,
                address: to_token.address.clone(),
                symbol: to_token.symbol.clone(),
                decimals: to_token.decimals,
            },
            from: wallet_address.clone(),
            to: wallet_address,
            slippage: slippage_bps,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAmountOut {
    pub amount: String, // Base units
    pub decimals: u8,
    #[serde(default)]
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapResponse {
    pub token_amount_out: TokenAmountOut,
    #[serde(default)]
    pub tx: Option<TransactionRequest>,
    #[serde(default)]
    pub approve_to: Option<String>,
    #[serde(default)]
    pub price_impact: Option<String>,
}

/// Error body returned by the aggregator on non-2xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorResponse {
    pub fn from_text(text: &str) -> Self {
        serde_json::from_str(text).unwrap_or_else(|_| Self {
            message: Some(text.to_string()).filter(|text| !text.trim().is_empty()),
            ..Self::default()
        })
    }

    pub fn message(&self) -> String {
        self.message
            .clone()
            .or_else(|| self.error.clone())
            .unwrap_or_else(|| "Unknown error".to_string())
    }

    pub fn classify(&self, status: StatusCode) -> QuoteError {
        let message = self.message();

        if status == StatusCode::TOO_MANY_REQUESTS {
            return QuoteError::RateLimited(message);
        }

        let lowered = message.to_lowercase();
        if UNSUPPORTED_MARKERS
            .iter()
            .any(|marker| lowered.contains(marker))
        {
            QuoteError::Unsupported(message)
        } else {
            QuoteError::Unknown(message)
        }
    }
}
