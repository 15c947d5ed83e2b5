// safecp/src/logger.rs
//! Logger initialization for the `safecp` binary.
//!
//! License: MIT OR Apache-2.0

use log::LevelFilter;

/// Initializes `env_logger`, with an explicit level overriding `RUST_LOG`.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = env_logger::Builder::from_default_env();
    if let Some(level) = level {
        builder.filter_level(level);
    }
    let _ = builder.format_timestamp_secs().try_init();
}
