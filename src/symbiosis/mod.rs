pub mod client;
pub mod models;
pub mod quote_service;
pub mod swap_service;
pub mod token_repository;

pub use client::{ApiFailure, SymbiosisClient};
pub use quote_service::{QuoteService, SymbiosisQuoteService};
pub use swap_service::{SwapService, SymbiosisSwapService};
pub use token_repository::{SymbiosisTokenRepository, TokenRepository};
