use crate::error::{LoggerError, LoggerErrorExt};
use std::fs;
use std::path::Path;
use tracing::Subscriber;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer};

pub(crate) type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

const LOG_FILE_SUFFIX: &str = "log";

/// Where and how rolling files are written.
#[derive(Debug, Clone)]
pub(crate) struct FileOutput {
    pub(crate) rotation: Rotation,
    pub(crate) max_files: usize,
    pub(crate) json: bool,
}

pub(crate) fn console<S>() -> BoxedLayer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer().compact().with_writer(std::io::stderr).with_ansi(true).boxed()
}

/// A layer writing `<name>.<date>.log` files into `directory`, created if missing.
pub(crate) fn rolling_file<S>(
    name: &str,
    directory: &Path,
    output: &FileOutput,
) -> Result<(BoxedLayer<S>, WorkerGuard), LoggerError>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fs::create_dir_all(directory)
        .context(format!("Cannot create log directory {}", directory.display()))?;

    let appender = RollingFileAppender::builder()
        .rotation(output.rotation.clone())
        .filename_prefix(name)
        .filename_suffix(LOG_FILE_SUFFIX)
        .max_log_files(output.max_files)
        .build(directory)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer = fmt::layer().with_writer(writer).with_ansi(false);
    let layer = if output.json { layer.json().boxed() } else { layer.boxed() };
    Ok((layer, guard))
}

/// The level becomes the default directive; explicit `directives` win over `RUST_LOG`.
pub(crate) fn filter(level: LevelFilter, directives: Option<&str>) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(level.into());
    match directives {
        None => Ok(builder.from_env_lossy()),
        Some(directives) => builder.parse(directives).map_err(|e| LoggerError::InvalidConfiguration {
            message: format!("Invalid filter '{directives}': {e}").into(),
            context: None,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directives() {
        assert!(filter(LevelFilter::INFO, Some("boxdraft_registry=debug,warn")).is_ok());
        assert!(matches!(
            filter(LevelFilter::INFO, Some("boxdraft_registry=loud")),
            Err(LoggerError::InvalidConfiguration { .. })
        ));
    }
}
