pub mod history_view;
pub mod swap_view;

pub use history_view::{ConsoleHistoryView, HistoryView};
pub use swap_view::{ConsoleSwapView, SwapView};
