//! Logger setup on top of `tracing-subscriber`.
//!
//! - Console output with color control and a choice of format
//! - Optional append-mode file output (Full, Compact, JSON)
//! - Runtime level changes through [`LogLevelHandle`]

pub mod config;
pub mod error;

pub use config::*;
pub use error::LoggerError;

use std::fs::{File, OpenOptions};
use std::io::IsTerminal;
use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::{Layered, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, reload};

type FilteredRegistry = Layered<reload::Layer<EnvFilter, Registry>, Registry>;
type BoxedLayer = Box<dyn Layer<FilteredRegistry> + Send + Sync>;

/// Handle for changing the active log level after initialization.
#[derive(Clone)]
pub struct LogLevelHandle {
    pub(crate) inner: Arc<reload::Handle<EnvFilter, Registry>>,
}

impl LogLevelHandle {
    /// Replace the filter with a new level directive, e.g. "debug".
    pub fn set_level(&self, level: &str) -> Result<(), LoggerError> {
        let filter = EnvFilter::try_new(level)
            .map_err(|e| LoggerError::config(format!("Invalid log level '{}': {}", level, e)))?;
        self.inner
            .reload(filter)
            .map_err(|e| LoggerError::subscriber(e.to_string()))
    }

    /// The active filter directive, if the subscriber is still alive.
    pub fn current_level(&self) -> Option<String> {
        self.inner.with_current(|filter| filter.to_string()).ok()
    }
}

impl std::fmt::Debug for LogLevelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogLevelHandle")
            .field("level", &self.current_level())
            .finish()
    }
}

/// Install the global subscriber described by `config`.
pub fn init_logger(config: LoggerConfig) -> Result<LogLevelHandle, LoggerError> {
    config.validate()?;

    let filter = EnvFilter::try_new(&config.level)
        .map_err(|e| LoggerError::config(format!("Invalid log level '{}': {}", config.level, e)))?;
    let (filter_layer, handle) = reload::Layer::new(filter);

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(build_layers(&config)?)
        .try_init()
        .map_err(|e| LoggerError::subscriber(e.to_string()))?;

    Ok(LogLevelHandle {
        inner: Arc::new(handle),
    })
}

/// Output layers for the enabled sinks.
///
/// The file layer goes first so console ANSI settings never leak into it.
fn build_layers(config: &LoggerConfig) -> Result<Vec<BoxedLayer>, LoggerError> {
    let mut layers = Vec::with_capacity(2);

    if config.file.enabled {
        let file = open_log_file(&config.file.path)?;
        layers.push(format_layer(config.file.format, false, file));
    }

    if config.console.enabled {
        let ansi = config.console.colored && std::io::stdout().is_terminal();
        layers.push(format_layer(config.console.format, ansi, std::io::stdout));
    }

    Ok(layers)
}

fn format_layer<W>(format: LogFormat, ansi: bool, writer: W) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_ansi(ansi)
        .with_target(true)
        .with_level(true)
        .with_writer(writer);

    match format {
        LogFormat::Full => layer.boxed(),
        LogFormat::Compact => layer.compact().boxed(),
        LogFormat::Json => layer.json().boxed(),
    }
}

fn open_log_file(path: &Path) -> Result<Mutex<File>, LoggerError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(Mutex::new(file))
}
