//! `stockdesk-observability` — logging setup for the console.
//!
//! The core crates emit through `tracing` (unrecognized wire statuses,
//! discarded stale fetches, failed requests); this crate wires a subscriber
//! up once at startup.

use tracing_subscriber::EnvFilter;

/// Initialize the process-wide subscriber: JSON lines, `RUST_LOG`-style
/// filtering, `info` by default.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init() {
    init_with_default("info");
}

/// [`init`] with a custom default filter for when `RUST_LOG` is unset
/// (tests use `"debug"` to capture discarded-fetch logs).
pub fn init_with_default(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_target(false)
        .try_init();
}
