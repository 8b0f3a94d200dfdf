use crate::error::LoggerError;
use crate::layers::{self, FileOutput};
use crate::{Logger, parse_level};
use boxdraft_domain::config::LoggingConfig;
use sealed::Naming;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_appender::rolling::Rotation;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const DEFAULT_MAX_FILES: usize = 10;

/// Builder stage before the log name is set.
#[derive(Debug, Default)]
pub struct Unnamed;

/// Builder stage holding the log name, used as the prefix of rolling files.
#[derive(Debug)]
pub struct Named(String);

mod sealed {
    pub trait Naming {}
}
impl Naming for Unnamed {}
impl Naming for Named {}

#[derive(Debug)]
struct Settings {
    level: LevelFilter,
    directives: Option<String>,
    console: bool,
    directory: Option<PathBuf>,
    file: FileOutput,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            level: LevelFilter::INFO,
            directives: None,
            console: true,
            directory: None,
            file: FileOutput { rotation: Rotation::DAILY, max_files: DEFAULT_MAX_FILES, json: false },
        }
    }
}

/// Configures the global subscriber. A name is required before [`init`](LoggerBuilder::init).
#[derive(Debug, Default)]
pub struct LoggerBuilder<N: Naming = Unnamed> {
    name: N,
    settings: Settings,
}

impl LoggerBuilder<Unnamed> {
    #[must_use]
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<Named> {
        LoggerBuilder { name: Named(name.into()), settings: self.settings }
    }
}

impl LoggerBuilder<Named> {
    #[must_use]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.settings.level = level;
        self
    }

    /// Module directives such as `boxdraft_registry=debug`. Replaces `RUST_LOG`; invalid
    /// directives make [`init`](LoggerBuilder::init) fail.
    #[must_use]
    pub fn env_filter(mut self, directives: impl Into<String>) -> Self {
        self.settings.directives = Some(directives.into());
        self
    }

    #[must_use]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.settings.console = enabled;
        self
    }

    /// Enables rolling files in `directory`.
    #[must_use]
    pub fn directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.settings.directory = Some(directory.into());
        self
    }

    #[must_use]
    pub const fn max_files(mut self, max: usize) -> Self {
        self.settings.file.max_files = max;
        self
    }

    #[must_use]
    pub const fn rotation(mut self, rotation: Rotation) -> Self {
        self.settings.file.rotation = rotation;
        self
    }

    /// File records as JSON objects. The console stays human-readable.
    #[must_use]
    pub const fn json(mut self, enabled: bool) -> Self {
        self.settings.file.json = enabled;
        self
    }

    /// Takes level, file directory and JSON flag from the `[logging]` section.
    ///
    /// # Errors
    /// [`LoggerError::InvalidConfiguration`] for an unknown level name.
    pub fn apply(mut self, config: &LoggingConfig) -> Result<Self, LoggerError> {
        self.settings.level = parse_level(&config.level)?;
        self.settings.file.json = config.json;
        if let Some(directory) = &config.directory {
            self.settings.directory = Some(directory.clone());
        }
        Ok(self)
    }

    /// Installs the subscriber.
    ///
    /// # Errors
    /// [`LoggerError::InvalidConfiguration`] for a blank name, zero `max_files`, bad
    /// directives or no output at all. [`LoggerError::Subscriber`] if a global subscriber is
    /// already installed.
    pub fn init(self) -> Result<Logger, LoggerError> {
        let Named(name) = self.name;
        let settings = self.settings;
        settings.check(&name)?;

        let filter = layers::filter(settings.level, settings.directives.as_deref())?;

        let mut outputs = Vec::new();
        if settings.console {
            outputs.push(layers::console());
        }
        let guard = match &settings.directory {
            Some(directory) => {
                let (layer, guard) = layers::rolling_file(&name, directory, &settings.file)?;
                outputs.push(layer);
                Some(guard)
            },
            None => None,
        };

        tracing_subscriber::registry().with(filter).with(outputs).try_init()?;
        Ok(Logger::new(guard))
    }
}

impl Settings {
    fn check(&self, name: &str) -> Result<(), LoggerError> {
        let problem = if name.trim().is_empty() {
            "Logger name cannot be empty"
        } else if self.file.max_files == 0 {
            "max_files must be greater than zero"
        } else if !self.console && self.directory.is_none() {
            "Neither console nor file output is enabled"
        } else {
            return Ok(());
        };
        Err(LoggerError::InvalidConfiguration { message: problem.into(), context: None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use std::time::Duration;
    use tempfile::tempdir;

    #[test]
    fn test_builder_defaults() {
        let builder = Logger::builder().name("boxdraft").env_filter("boxdraft_registry=debug");
        assert!(builder.settings.console);
        assert_eq!(builder.settings.level, LevelFilter::INFO);
        assert_eq!(builder.settings.directives.as_deref(), Some("boxdraft_registry=debug"));
        assert!(builder.settings.directory.is_none());
        assert!(!builder.settings.file.json);
    }

    #[test]
    fn test_apply_logging_section() {
        let config = LoggingConfig {
            level: "Debug".into(),
            directory: Some(PathBuf::from("logs")),
            json: true,
        };
        let builder = Logger::builder().name("boxdraft").max_files(3).apply(&config).unwrap();

        assert_eq!(builder.settings.level, LevelFilter::DEBUG);
        assert_eq!(builder.settings.directory.as_deref(), Some(std::path::Path::new("logs")));
        assert_eq!(builder.settings.file.max_files, 3);
        assert!(builder.settings.file.json);
    }

    #[test]
    fn test_unknown_level_rejected() {
        let config = LoggingConfig { level: "chatty".into(), ..LoggingConfig::default() };
        let err = Logger::builder().name("boxdraft").apply(&config).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    #[serial]
    fn test_invalid_settings_rejected_before_install() {
        for builder in [
            Logger::builder().name("  "),
            Logger::builder().name("boxdraft").console(false),
            Logger::builder().name("boxdraft").max_files(0),
            Logger::builder().name("boxdraft").env_filter("boxdraft=???"),
        ] {
            let err = builder.init().unwrap_err();
            assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
        }
    }

    #[test]
    #[serial]
    fn test_file_logging_setup() -> Result<(), Box<dyn std::error::Error>> {
        let tmp_dir = tempdir()?;
        let log_dir = tmp_dir.path().join("logs");

        let logger = Logger::builder()
            .name("boxdraft-unit")
            .console(false)
            .directory(&log_dir)
            .json(true)
            .init()?;
        assert!(logger.writes_files());

        tracing::info!(box_id = "box-1", "player joined");
        std::thread::sleep(Duration::from_millis(20));
        drop(logger);

        let has_log = fs::read_dir(&log_dir)?
            .flatten()
            .any(|entry| entry.path().extension().and_then(|e| e.to_str()) == Some("log"));
        assert!(has_log, "at least one log file should be created");
        Ok(())
    }
}
