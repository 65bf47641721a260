//=========================================================================
// Logging
//=========================================================================
//
// Installs the global `log` backend (env_logger).
//
// Filter precedence: `[logging] filter` from the config, then `RUST_LOG`,
// then `info`. Log targets used across the framework: `engine`, `input`,
// `physics`, `camera`, `graphics`, `assets`, `audio`, `screens`,
// `platform`, `config`.
//
//=========================================================================

use std::sync::Once;

use log::LevelFilter;

use crate::config::LoggingConfig;

static INIT: Once = Once::new();

/// Initializes the global logger once; later calls are ignored.
///
/// Call early in `main`, before building the GameManager.
pub fn init_logging(config: &LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match (&config.filter, std::env::var("RUST_LOG")) {
            (Some(filter), _) => {
                builder.parse_filters(filter);
            }
            (None, Ok(filter)) => {
                builder.parse_filters(&filter);
            }
            (None, Err(_)) => {
                builder.filter_level(LevelFilter::Info);
            }
        }

        // Another logger may already be installed (embedding, tests).
        if builder.try_init().is_ok() {
            log::debug!(target: "engine", "Logging initialized");
        }
    });
}

//=========================================================================
// Unit Tests
//=========================================================================
