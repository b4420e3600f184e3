//! logger.rs
//! Logger con env_logger. El filtro por defecto viene de `AppConfig::log_level`;
//! si RUST_LOG está definida, manda RUST_LOG.

use env_logger::{Builder, Env};
use log::LevelFilter;

pub fn init_logger(default_filter: &str) {
    Builder::new()
        .parse_filters(default_filter)
        // sqlx loguea cada query en info
        .filter_module("sqlx", LevelFilter::Warn)
        .parse_env(Env::default())
        .format_timestamp_secs()
        .init();
}
