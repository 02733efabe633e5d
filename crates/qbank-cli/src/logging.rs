//! Subscriber setup for the `qbank` binary.
//!
//! Library crates only emit `tracing` events. Levels used across the workspace:
//!
//! - `error`: fatal import failures
//! - `warn`: rejected headers, malformed rows, skipped rows
//! - `info`: intake, batch and commit summaries
//! - `debug`: per-field resolution and per-row outcomes
//! - `trace`: question text, shown only with `--log-data`

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

static QUESTION_TEXT_VISIBLE: AtomicBool = AtomicBool::new(false);

/// Stands in for question text while `--log-data` is off.
pub const REDACTED_VALUE: &str = "[REDACTED]";

const WORKSPACE_TARGETS: [&str; 7] = [
    "qbank_cli",
    "qbank_common",
    "qbank_ingest",
    "qbank_map",
    "qbank_model",
    "qbank_output",
    "qbank_validate",
];

type OutputLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Question text as it may appear in a log event.
pub fn redact_value(question: &str) -> &str {
    if QUESTION_TEXT_VISIBLE.load(Ordering::Relaxed) {
        question
    } else {
        REDACTED_VALUE
    }
}

/// Subscriber settings derived from the command line.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Level applied to the `qbank_*` targets.
    pub level_filter: LevelFilter,
    /// Lets `RUST_LOG` override the computed directive.
    pub use_env_filter: bool,
    pub with_timestamps: bool,
    pub with_target: bool,
    pub with_ansi: bool,
    pub format: LogFormat,
    /// Append to this file instead of writing to stderr.
    pub log_file: Option<PathBuf>,
    pub log_data: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    /// One JSON object per event, span closings included.
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            use_env_filter: true,
            with_timestamps: false,
            with_target: false,
            with_ansi: true,
            format: LogFormat::Pretty,
            log_file: None,
            log_data: false,
        }
    }
}

/// Installs the global subscriber. Call once, before any command runs.
///
/// # Errors
///
/// Fails when the log file cannot be opened for appending.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    QUESTION_TEXT_VISIBLE.store(config.log_data, Ordering::Relaxed);
    let layer = match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            output_layer(config, AppendFile(Arc::new(Mutex::new(file))))
        }
        None => output_layer(config, io::stderr),
    };
    tracing_subscriber::registry()
        .with(layer)
        .with(build_env_filter(config))
        .init();
    Ok(())
}

fn output_layer<W>(config: &LogConfig, writer: W) -> OutputLayer
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_writer(writer)
        .with_target(config.with_target);
    match (config.format, config.with_timestamps) {
        (LogFormat::Json, _) => layer.json().with_span_events(FmtSpan::CLOSE).boxed(),
        (LogFormat::Compact, true) => layer.compact().with_ansi(config.with_ansi).boxed(),
        (LogFormat::Compact, false) => layer
            .compact()
            .with_ansi(config.with_ansi)
            .without_time()
            .boxed(),
        (LogFormat::Pretty, true) => layer.with_ansi(config.with_ansi).boxed(),
        (LogFormat::Pretty, false) => layer.with_ansi(config.with_ansi).without_time().boxed(),
    }
}

/// Log file shared by every event writer.
#[derive(Clone)]
struct AppendFile(Arc<Mutex<File>>);

impl AppendFile {
    fn with_file<T>(&self, action: impl FnOnce(&mut File) -> io::Result<T>) -> io::Result<T> {
        let mut file = self
            .0
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        action(&mut *file)
    }
}

impl Write for AppendFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.with_file(|file| file.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.with_file(|file| file.flush())
    }
}

impl<'a> MakeWriter<'a> for AppendFile {
    type Writer = AppendFile;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// `warn` for dependencies, `level` for every workspace crate.
pub fn filter_directive(level: LevelFilter) -> String {
    let level = level.to_string().to_lowercase();
    WORKSPACE_TARGETS
        .iter()
        .fold(String::from("warn"), |directive, target| {
            format!("{directive},{target}={level}")
        })
}

fn build_env_filter(config: &LogConfig) -> EnvFilter {
    let computed = || EnvFilter::new(filter_directive(config.level_filter));
    if config.use_env_filter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| computed())
    } else {
        computed()
    }
}
