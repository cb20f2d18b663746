//! Tracing initialization for the `logo` driver.
//!
//! Controlled by environment variables: `LOGO_LOG` (falls back to
//! `RUST_LOG`), defaulting to `warn` when neither is set.

use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;

static INIT: OnceLock<()> = OnceLock::new();

/// Safe to call multiple times -- only the first call takes effect.
pub fn init() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_env("LOGO_LOG")
            .or_else(|_| EnvFilter::try_from_env("RUST_LOG"))
            .unwrap_or_else(|_| EnvFilter::new("warn"));
        tracing_subscriber::fmt()
            .with_target(true)
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .compact()
            .init();
    });
}
