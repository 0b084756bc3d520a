pub mod catalog_interactor;
pub mod ledger;
pub mod quote_interactor;
pub mod swap_interactor;

pub use catalog_interactor::{find_token, CatalogInteractor, CatalogInteractorImpl};
pub use ledger::{
    paginate, HistoryPage, JsonFileStore, LedgerStore, TransactionLedger, HISTORY_PAGE_SIZE,
};
pub use quote_interactor::{
    fallback_estimate, QuoteInteractor, QuoteInteractorImpl, QuoteOutcome, RequestGeneration,
};
pub use swap_interactor::{SwapInteractor, SwapInteractorImpl};
