//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

use log::LevelFilter;

/// Parse a textual log level ("info", "debug", ...) falling back to `Info`
pub fn parse_level(level: &str) -> LevelFilter {
    level.parse().unwrap_or(LevelFilter::Info)
}

/// Initialize the logging system
///
/// `RUST_LOG` still wins over `level` for individual modules, the same as
/// `env_logger::Builder::from_default_env` always behaves.
pub fn init(level: &str) {
    let result = env_logger::Builder::from_default_env()
        .filter_level(parse_level(level))
        .format_timestamp_millis()
        .try_init();

    if result.is_err() {
        log::debug!("Logger already initialized, keeping the existing one");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level_known_and_unknown() {
        assert_eq!(parse_level("debug"), LevelFilter::Debug);
        assert_eq!(parse_level("TRACE"), LevelFilter::Trace);
        assert_eq!(parse_level("chatty"), LevelFilter::Info);
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init("warn");
        init("warn");
    }
}
