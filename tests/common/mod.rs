use std::sync::Once;

use env_logger::Builder;
use log::LevelFilter;

static INIT: Once = Once::new();

/// Installs a test logger once per test binary; `RUST_LOG` overrides the
/// default `warn` level.
pub fn initialize_logger() {
    INIT.call_once_force(|_| {
        let mut builder = Builder::new();
        builder
            .filter_level(LevelFilter::Warn)
            .filter_module("strong_lru", LevelFilter::Debug)
            .is_test(true)
            .parse_default_env();

        let _ = builder.try_init();
    });
}
