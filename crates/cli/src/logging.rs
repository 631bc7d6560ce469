//! Logger setup.

use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes the global `env_logger` once; later calls are ignored.
///
/// `RUST_LOG` wins when set. Otherwise only warnings and errors are shown,
/// so a failed run prints just its one diagnostic line.
pub fn init_logging() {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match std::env::var("RUST_LOG") {
            Ok(filter) => {
                builder.parse_filters(&filter);
            }
            Err(_) => {
                builder.filter_level(log::LevelFilter::Warn);
            }
        }

        builder.format_timestamp(None).init();
        log::debug!("logging initialized");
    });
}
