use crate::config::Config;
use log::{LevelFilter, SetLoggerError};
use simplelog::{self, ConfigBuilder};

/// Chatty dependencies whose records are dropped unless the level is Trace.
const FILTERED_MODULES: &[&str] = &["sqlx", "sea_orm", "tower", "hyper", "axum"];

pub struct Logger {}

impl Logger {
    /// Installs the global terminal logger at the level named by `config`.
    ///
    /// Dependency output listed in `FILTERED_MODULES` only shows up at Trace.
    pub fn init_logger(config: &Config) -> Result<(), SetLoggerError> {
        let level = config.log_level_filter;

        simplelog::TermLogger::init(
            Self::convert_level_filter(level),
            Self::build_log_config(level != LevelFilter::Trace),
            simplelog::TerminalMode::Mixed,
            simplelog::ColorChoice::Auto,
        )
    }

    fn convert_level_filter(level: LevelFilter) -> simplelog::LevelFilter {
        match level {
            LevelFilter::Off => simplelog::LevelFilter::Off,
            LevelFilter::Error => simplelog::LevelFilter::Error,
            LevelFilter::Warn => simplelog::LevelFilter::Warn,
            LevelFilter::Info => simplelog::LevelFilter::Info,
            LevelFilter::Debug => simplelog::LevelFilter::Debug,
            LevelFilter::Trace => simplelog::LevelFilter::Trace,
        }
    }

    fn build_log_config(filter_dependencies: bool) -> simplelog::Config {
        let mut builder = ConfigBuilder::new();
        builder.set_time_format_rfc3339();

        if filter_dependencies {
            for module in FILTERED_MODULES {
                builder.add_filter_ignore_str(module);
            }
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_and_http_stacks_are_filtered() {
        for module in ["sqlx", "sea_orm", "hyper", "axum"] {
            assert!(FILTERED_MODULES.contains(&module), "{module} should be filtered");
        }
    }

    #[test]
    fn level_filters_convert_one_to_one() {
        let levels = [
            (LevelFilter::Off, simplelog::LevelFilter::Off),
            (LevelFilter::Error, simplelog::LevelFilter::Error),
            (LevelFilter::Warn, simplelog::LevelFilter::Warn),
            (LevelFilter::Info, simplelog::LevelFilter::Info),
            (LevelFilter::Debug, simplelog::LevelFilter::Debug),
            (LevelFilter::Trace, simplelog::LevelFilter::Trace),
        ];

        for (from, to) in levels {
            assert_eq!(Logger::convert_level_filter(from), to);
        }
    }

    #[test]
    fn log_config_builds_with_and_without_filters() {
        let _filtered = Logger::build_log_config(true);
        let _unfiltered = Logger::build_log_config(false);
    }
}
