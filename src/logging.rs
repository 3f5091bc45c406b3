//! Sets up log output for the binaries.

use tracing_subscriber::{
    EnvFilter, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Print logs to stdout.
///
/// The `RUST_LOG` environment variable takes precedence, otherwise events at `default_level` and
/// above are printed.
///
/// # Panics
///
/// Panics if a global subscriber has already been set.
pub fn init_logging(default_level: LevelFilter) {
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();
}
