pub mod history_presenter;
pub mod swap_presenter;

pub use history_presenter::{HistoryPresenter, HistoryPresenterImpl};
pub use swap_presenter::{FormSettings, SwapFormController, SwapPresenter};
