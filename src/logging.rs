//! Tracing setup shared by the binaries.
//!
//! The library only emits events: `info` for search outcomes, `debug` for search
//! start and exhaustion, `trace` for every expansion.

use std::sync::OnceLock;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: OnceLock<()> = OnceLock::new();

/// Maps a `-v` count to the default level for this crate.
pub fn level_for_verbosity(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Installs a stderr subscriber. `RUST_LOG` takes precedence over `verbosity`.
///
/// Safe to call multiple times - only the first call has effect.
pub fn init(verbosity: u8) {
    INIT.get_or_init(|| {
        let directive = format!(
            "eight_puzzle={}",
            level_for_verbosity(verbosity).as_str().to_lowercase()
        );
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(directive));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for_verbosity(0), Level::WARN);
        assert_eq!(level_for_verbosity(2), Level::DEBUG);
        assert_eq!(level_for_verbosity(9), Level::TRACE);
    }

    #[test]
    fn test_init_is_idempotent() {
        init(0);
        init(3);
    }
}
