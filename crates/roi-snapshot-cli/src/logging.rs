use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "info";
const DEFAULT_LOG_FILE: &str = "./logs/roi-snapshot.log";

/// Where and how verbosely the CLI logs, read from `TRACING_LEVEL` and `LOG_FILE_PATH`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub filter: String,
    pub log_file: PathBuf,
}

impl LogSettings {
    pub fn from_env() -> Self {
        Self::from_vars(env::var("TRACING_LEVEL").ok(), env::var("LOG_FILE_PATH").ok())
    }

    fn from_vars(filter: Option<String>, log_file: Option<String>) -> Self {
        Self {
            filter: filter
                .filter(|f| !f.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_FILTER.to_string()),
            log_file: PathBuf::from(log_file.unwrap_or_else(|| DEFAULT_LOG_FILE.to_string())),
        }
    }
}

/// Console events go to stderr so `snapshot` output on stdout stays valid JSON.
pub fn init_logger(settings: &LogSettings) -> impl Drop {
    let file_appender = tracing_appender::rolling::never(Path::new("./"), &settings.log_file);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .pretty()
                .with_file(false)
                .without_time()
                .with_ansi(true),
        )
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .with(EnvFilter::new(&settings.filter))
        .init();

    debug!(
        "roi-snapshot logging at '{}', file log at {}",
        settings.filter,
        settings.log_file.display()
    );

    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_settings_defaults() {
        let settings = LogSettings::from_vars(None, None);
        assert_eq!(settings.filter, "info");
        assert_eq!(settings.log_file, PathBuf::from("./logs/roi-snapshot.log"));
    }

    #[test]
    fn test_log_settings_blank_filter_falls_back() {
        let settings = LogSettings::from_vars(
            Some("  ".to_string()),
            Some("/var/log/roi.log".to_string()),
        );
        assert_eq!(settings.filter, "info");
        assert_eq!(settings.log_file, PathBuf::from("/var/log/roi.log"));
    }
}
