pub mod config;
pub mod error;
pub mod result;

pub use config::AppConfig;
pub use error::GantryError;
pub use result::GantryResult;
