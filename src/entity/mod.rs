mod error;
mod network;
mod state;
mod swap;
mod swap_result;
mod swap_state;
mod token;
mod transaction;
mod transaction_request;

pub use error::{CatalogError, LedgerError, QuoteError, SwapError, WalletError};
pub use network::{Network, NetworkMode, MAX_SLIPPAGE, NETWORKS, SLIPPAGE_OPTIONS};
pub use state::{FormPhase, FormSnapshot};
pub use swap::{QuoteParams, SwapParams};
pub use swap_result::SwapResult;
pub use swap_state::{SwapState, DEFAULT_SLIPPAGE};
pub use token::{Token, DEFAULT_DISPLAY_DECIMALS};
pub use transaction::{TokenAmount, Transaction, TransactionStatus};
pub use transaction_request::TransactionRequest;
