//! Logging setup for hosts that do not install their own subscriber.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "miniapp_client=info";

/// Install a fmt subscriber filtered by `RUST_LOG`.
///
/// Safe to call more than once; returns `false` if a global subscriber was
/// already set.
pub fn init_logging() -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}
