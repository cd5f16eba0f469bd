//! Tracing setup shared by both binaries.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber, writing to stderr.
///
/// The default level follows the `-v` count (warn, info, debug, trace);
/// `RUST_LOG` overrides it when set.
pub fn init(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
