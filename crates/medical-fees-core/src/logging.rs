//! Logging initialisation.
//!
//! Library code only emits `tracing` events; the host decides whether to
//! install a subscriber.

use tracing_subscriber::{fmt, EnvFilter};

/// Install the global fmt subscriber.
///
/// Filter comes from `RUST_LOG` (default `info`), e.g.
/// `RUST_LOG=medical_fees_core=debug`. Calling it again is a no-op.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .try_init();
}

/// Install a debug-level subscriber writing to the test harness.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
