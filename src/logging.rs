// Auto Catalog - Logging
// Shared by the CLI and the server. RUST_LOG wins when set, otherwise -v / -q.

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Map a CLI verbosity count to a level
///
/// - quiet: error
/// - 0: info
/// - 1: debug
/// - 2+: trace
pub fn level_from_verbosity(verbose: u8, quiet: bool) -> Level {
    if quiet {
        return Level::ERROR;
    }
    match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the global subscriber, writing to stderr
pub fn init_logging(level: Level) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_verbosity() {
        assert_eq!(level_from_verbosity(0, false), Level::INFO);
        assert_eq!(level_from_verbosity(1, false), Level::DEBUG);
        assert_eq!(level_from_verbosity(3, false), Level::TRACE);
        assert_eq!(level_from_verbosity(2, true), Level::ERROR);
    }
}
