pub mod config;
pub mod delivery;
pub mod error;
pub mod loyalty;
pub mod settings;

pub use config::AppConfig;
pub use error::{ComandaError, CoreResult};
