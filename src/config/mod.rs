pub mod configs;
pub mod defaults;
pub mod envconfig;
pub mod validate;

pub use configs::{AppConfig, DatabaseConfig, LoggingConfig, NamingConfig, OutputConfig};
pub use envconfig::EnvConfig;
