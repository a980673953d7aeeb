use std::path::PathBuf;

use color_eyre::Report;
use directories::ProjectDirs;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    Layer, filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Configuration for the logging system
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Log level for file output
    pub file_level: Level,
    /// Log level for console output
    pub console_level: Level,
    /// Directory where log files should be written
    pub log_dir: Option<PathBuf>,
    /// Whether to enable JSON formatted logs for structured output
    pub json_format: bool,
    /// Whether the terminal is owned by the UI (disables console logging)
    pub is_tui: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file_level: Level::DEBUG,
            console_level: Level::WARN,
            log_dir: Some(Self::default_log_dir()),
            json_format: false,
            is_tui: false,
        }
    }
}

impl LoggingConfig {
    /// Get the OS-appropriate default log directory
    pub fn default_log_dir() -> PathBuf {
        // On Linux: ~/.cache/glyphwave
        ProjectDirs::from("", "", "glyphwave")
            .map_or_else(|| PathBuf::from("glyphwave-logs"), |dirs| dirs.cache_dir().to_path_buf())
    }

    /// Create logging configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let level = |key: &str| var(key).and_then(|value| value.parse::<Level>().ok());

        if let Some(level) = level("GLYPHWAVE_LOG_LEVEL") {
            config.file_level = level;
            config.console_level = level;
        }

        if let Some(level) = level("GLYPHWAVE_FILE_LOG_LEVEL") {
            config.file_level = level;
        }

        if let Some(log_dir) = var("GLYPHWAVE_LOG_DIR") {
            config.log_dir = Some(PathBuf::from(log_dir));
        }

        if var("GLYPHWAVE_NO_FILE_LOGS").is_some() {
            config.log_dir = None;
        }

        if var("GLYPHWAVE_JSON_LOGS").is_some() {
            config.json_format = true;
        }

        config
    }

    /// Disables console output so log lines don't tear through the UI.
    #[must_use]
    pub fn for_tui(self) -> Self {
        Self { is_tui: true, ..self }
    }
}

/// Initialize the logging system with the given configuration
pub fn init_logging(config: LoggingConfig) -> Result<Option<WorkerGuard>, Report> {
    let mut layers = vec![];
    let mut guard = None;

    if let Some(log_dir) = &config.log_dir {
        std::fs::create_dir_all(log_dir)?;

        let file_appender = tracing_appender::rolling::daily(log_dir, "glyphwave-preview.log");
        let (non_blocking, file_guard) = tracing_appender::non_blocking(file_appender);
        guard = Some(file_guard);

        let file_filter = EnvFilter::builder()
            .with_default_directive(config.file_level.into())
            .from_env_lossy();

        let file_layer = if config.json_format {
            fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_filter(file_filter)
                .boxed()
        } else {
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_filter(file_filter)
                .boxed()
        };

        layers.push(file_layer);
    }

    if !config.is_tui {
        let console_filter = EnvFilter::builder()
            .with_default_directive(config.console_level.into())
            .from_env_lossy();

        let console_layer = fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .with_filter(console_filter)
            .boxed();

        layers.push(console_layer);
    }

    tracing_subscriber::registry()
        .with(layers)
        .init();

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> LoggingConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        LoggingConfig::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_without_env() {
        assert_eq!(config(&[]), LoggingConfig::default());
    }

    #[test]
    fn test_level_overrides() {
        let cfg = config(&[("GLYPHWAVE_LOG_LEVEL", "trace")]);
        assert_eq!(cfg.file_level, Level::TRACE);
        assert_eq!(cfg.console_level, Level::TRACE);

        let cfg = config(&[("GLYPHWAVE_LOG_LEVEL", "info"), ("GLYPHWAVE_FILE_LOG_LEVEL", "error")]);
        assert_eq!(cfg.file_level, Level::ERROR);
        assert_eq!(cfg.console_level, Level::INFO);

        // unparseable levels are ignored
        let cfg = config(&[("GLYPHWAVE_LOG_LEVEL", "loud")]);
        assert_eq!(cfg.file_level, Level::DEBUG);
    }

    #[test]
    fn test_log_dir_overrides() {
        let cfg = config(&[("GLYPHWAVE_LOG_DIR", "/tmp/glyphwave")]);
        assert_eq!(cfg.log_dir, Some(PathBuf::from("/tmp/glyphwave")));

        let cfg = config(&[("GLYPHWAVE_LOG_DIR", "/tmp/glyphwave"), ("GLYPHWAVE_NO_FILE_LOGS", "1")]);
        assert_eq!(cfg.log_dir, None);
    }

    #[test]
    fn test_json_and_tui() {
        let cfg = config(&[("GLYPHWAVE_JSON_LOGS", "1")]).for_tui();
        assert!(cfg.json_format);
        assert!(cfg.is_tui);
    }
}
