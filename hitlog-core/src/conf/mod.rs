mod error;
mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{STORE_URI_ENV, load_config, load_config_with_env};
pub use types::HitlogConfig;
