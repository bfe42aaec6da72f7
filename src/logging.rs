//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
pub fn default_directive(debug_level: u8) -> &'static str {
    match debug_level {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

pub fn init(debug_level: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(debug_level)));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
