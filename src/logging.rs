//! Structured logging initialization
//!
//! Sets up a `tracing` subscriber for hosts that embed the dispatcher:
//! - Level filtering (`GOF_LOG_LEVEL`, overridable with `RUST_LOG`)
//! - Compact, pretty or JSON output
//! - Optional ANSI colour and caller location (file:line)
//! - Optional append-only log file, written through a non-blocking worker

use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::{Layered, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Log format: compact single lines, multi-line pretty, or JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            "json" => LogFormat::Json,
            _ => LogFormat::Compact,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level: trace/debug/info/warn/error
    pub log_level: String,
    pub format: LogFormat,
    /// ANSI colours on console output (never used for the file)
    pub color: bool,
    /// Include file:line location
    pub include_location: bool,
    /// Append log lines to this file instead of stderr
    pub file: Option<PathBuf>,
    /// Extra filter directives (comma-separated)
    pub target_filter: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            format: LogFormat::Compact,
            color: true,
            include_location: false,
            file: None,
            target_filter: None,
        }
    }
}

impl LogConfig {
    /// Parse configuration from environment variables with defaults
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            log_level: env::var("GOF_LOG_LEVEL").unwrap_or(defaults.log_level),
            format: env::var("GOF_LOG_FORMAT")
                .map(|s| LogFormat::parse(&s))
                .unwrap_or(defaults.format),
            color: crate::runtime_config::env_flag("GOF_LOG_COLOR", defaults.color),
            include_location: crate::runtime_config::env_flag(
                "GOF_LOG_INCLUDE_LOCATION",
                defaults.include_location,
            ),
            file: env::var_os("GOF_LOG_FILE").map(PathBuf::from),
            target_filter: env::var("GOF_LOG_TARGET_FILTER").ok(),
        }
    }

    /// Verbose configuration for local development
    #[must_use]
    pub fn default_dev() -> Self {
        Self {
            log_level: "debug".to_string(),
            format: LogFormat::Pretty,
            color: true,
            include_location: true,
            ..Self::default()
        }
    }

    fn level(&self) -> Level {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" | "warning" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }

    fn env_filter(&self) -> EnvFilter {
        let mut filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.level().as_str()));

        if let Some(target_filter) = &self.target_filter {
            for directive in target_filter.split(',').map(str::trim) {
                if directive.is_empty() {
                    continue;
                }
                match directive.parse() {
                    Ok(d) => filter = filter.add_directive(d),
                    Err(_) => eprintln!("Warning: Invalid log filter directive: {directive}"),
                }
            }
        }
        filter
    }
}

/// Keeps the log file writer alive; pending lines are flushed on drop.
#[must_use = "dropping the guard stops file logging"]
#[derive(Debug)]
pub struct LogGuard {
    _worker: Option<WorkerGuard>,
}

/// Initialize logging from `GOF_LOG_*` environment variables.
pub fn init_logging() -> Result<LogGuard> {
    init_logging_with_config(&LogConfig::from_env())
}

/// Initialize logging with an explicit configuration.
///
/// Fails if a global subscriber is already installed or the log file cannot
/// be opened.
///
/// # Example
///
/// ```no_run
/// use gof::logging::{init_logging_with_config, LogConfig};
///
/// let _guard = init_logging_with_config(&LogConfig::default_dev())
///     .expect("Failed to initialize logging");
/// ```
pub fn init_logging_with_config(config: &LogConfig) -> Result<LogGuard> {
    let (layer, worker) = match &config.file {
        Some(path) => {
            let (writer, guard) = tracing_appender::non_blocking(open_log_file(path)?);
            (fmt_layer(config, false, writer), Some(guard))
        }
        None => (fmt_layer(config, config.color, std::io::stderr), None),
    };

    tracing_subscriber::registry()
        .with(config.env_filter())
        .with(layer)
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(LogGuard { _worker: worker })
}

type Filtered = Layered<EnvFilter, Registry>;
type BoxedLayer = Box<dyn Layer<Filtered> + Send + Sync>;

fn fmt_layer<W>(config: &LogConfig, ansi: bool, writer: W) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = tracing_subscriber::fmt::layer()
        .with_ansi(ansi)
        .with_target(true)
        .with_file(config.include_location)
        .with_line_number(config.include_location)
        .with_writer(writer);

    match config.format {
        LogFormat::Compact => layer.compact().boxed(),
        LogFormat::Pretty => layer.pretty().boxed(),
        LogFormat::Json => layer
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .boxed(),
    }
}

/// Open `path` for appending, creating missing parent directories.
fn open_log_file(path: &Path) -> Result<fs::File> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    }
    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}
