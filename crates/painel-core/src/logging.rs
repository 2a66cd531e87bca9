//! Log subscriber setup for native hosts and tests
//!
//! Library code only emits `tracing` events. Browser builds leave the
//! subscriber to the host page.

use tracing_subscriber::{fmt, EnvFilter};

pub const DEFAULT_FILTER: &str = "painel_core=info";

/// Install a formatting subscriber filtered by `RUST_LOG`
///
/// Does nothing if a global subscriber is already set.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = fmt().with_env_filter(filter).with_target(true).try_init();
}
