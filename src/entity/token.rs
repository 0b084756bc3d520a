use serde::{Deserialize, Serialize};

/// Decimal places used for display when a token does not declare its own.
pub const DEFAULT_DISPLAY_DECIMALS: u8 = 6;

const NATIVE_ADDRESSES: [&str; 2] = [
    "0x0000000000000000000000000000000000000000",
    "0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub symbol: String,           // Token symbol (e.g. "ETH", "USDC")
    pub name: String,             // Full token name
    pub address: String,          // Contract address, empty or zero for the native coin
    pub chain_id: u64,            // Chain the token lives on
    pub decimals: u8,             // Number of decimal places
    pub price: Option<f64>,       // Reference price in USD, if the catalog knows it
    pub logo_uri: Option<String>, // Token logo URI
}

impl Token {
    pub fn is_native(&self) -> bool {
        self.address.is_empty()
            || NATIVE_ADDRESSES
                .iter()
                .any(|native| native.eq_ignore_ascii_case(&self.address))
    }

    /// Precision used when rendering an estimated amount of this token.
    /// A token reporting zero decimals falls back to the default.
    pub fn display_decimals(&self) -> u8 {
        if self.decimals == 0 {
            DEFAULT_DISPLAY_DECIMALS
        } else {
            self.decimals
        }
    }

    /// Reference price, treating a zero price as unknown.
    pub fn known_price(&self) -> Option<f64> {
        self.price.filter(|price| price.is_finite() && *price > 0.0)
    }

    pub fn matches(&self, query: &str) -> bool {
        self.symbol.eq_ignore_ascii_case(query) || self.address.eq_ignore_ascii_case(query)
    }
}
