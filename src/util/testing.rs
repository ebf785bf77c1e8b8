//! Shared test setup: tracing init for test binaries

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static TEST_SETUP: Once = Once::new();

/// Initialize a global tracing subscriber for tests, once per binary.
/// Honors `RUST_LOG`, defaulting to `debug`.
pub fn init_test_logging() {
    TEST_SETUP.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}
