pub mod config;
pub mod di;
pub mod entity;
pub mod interactor;
pub mod presenter;
pub mod router;
pub mod symbiosis;
pub mod utils;
pub mod view;
pub mod wallet;

#[cfg(test)]
mod testing;

// Re-export commonly used items
pub use config::Config;
pub use di::*;
pub use entity::*;
pub use presenter::*;
pub use router::{Router, SessionRouter};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
