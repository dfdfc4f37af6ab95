pub const DEFAULT_PACKAGE: &str = "model";
pub const DEFAULT_OUTPUT_DIR: &str = ".";
pub const DEFAULT_GOFMT_PATH: &str = "gofmt";
pub const DEFAULT_RUST_LOG: &str = "info";
pub const DEFAULT_VERBOSE_RUST_LOG: &str = "debug";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 1;
pub const DEFAULT_DB_MIN_IDLE: u32 = 0;
pub const DEFAULT_DB_CONNECT_TIMEOUT_SECS: u64 = 5;
