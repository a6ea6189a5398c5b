pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use config::Config;
pub use error::{require_book_id, BookRelError};
pub use traits::GraphExtractor;
pub use types::*;
