//! Logging setup

use crate::config::LoggingConfig;
use env_logger::Builder;
use log::{LevelFilter, SetLoggerError};
use std::io::Write;

/// Level for a verbosity count; `quiet` wins
pub fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Initialize logging based on verbosity level
///
/// Fails if a logger is already installed (the host may own one).
pub fn init_logging(verbose: u8, quiet: bool) -> Result<(), SetLoggerError> {
    Builder::new()
        .filter_level(level_for(verbose, quiet))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init()
}

/// Initialize logging from the `[logging]` config section
pub fn init_from_config(config: &LoggingConfig) -> Result<(), SetLoggerError> {
    init_logging(config.verbose, config.quiet)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_mapping() {
        assert_eq!(level_for(0, false), LevelFilter::Info);
        assert_eq!(level_for(1, false), LevelFilter::Debug);
        assert_eq!(level_for(5, false), LevelFilter::Trace);
        assert_eq!(level_for(3, true), LevelFilter::Error);
    }

    #[test]
    fn test_second_init_is_an_error_not_a_panic() {
        let _ = init_logging(0, false);
        assert!(init_from_config(&LoggingConfig::default()).is_err());
    }
}
