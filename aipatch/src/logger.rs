// aipatch/src/logger.rs
//! Logger initialization for the aipatch CLI.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes `env_logger`, honoring `RUST_LOG` unless the CLI flags force a
/// level. Safe to call more than once (subsequent calls are no-ops).
pub fn init_logger(override_level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = override_level {
        builder.filter_level(level);
    }
    builder.format_timestamp(None);
    let _ = builder.try_init();
}
