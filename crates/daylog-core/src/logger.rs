//! Named logger instances.
//!
//! A [`Logger`] holds its threshold, color flag, directory, template and
//! sink behind one lock. Configuration changes and emitted lines are
//! serialized by that lock, so every line is composed and written against a
//! single consistent snapshot and lines never interleave in the day file.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use chrono::NaiveDate;
use parking_lot::Mutex;

use crate::clock::{Clock, SystemClock};
use crate::error::{LogError, LogResult};
use crate::format::{scheme, FieldContext, FormatTemplate};
use crate::severity::{Color, Severity};
use crate::sink::Sink;
use crate::timestamp::Timestamps;

/// Thread name used when the calling thread has none.
pub const UNNAMED_THREAD: &str = "unnamed";

/// How the day file of a logger is named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamingScheme {
    /// `<directory>/<logger name> - <date>.log`
    Logger,
    /// `<directory>/<custom name> - <date>.log`
    Custom(String),
}

/// Configuration applied to a logger when it is first created.
#[derive(Debug, Clone)]
pub struct LoggerDefaults {
    pub threshold: Severity,
    pub ansi: bool,
    pub use_file: bool,
    pub directory: PathBuf,
    pub naming: NamingScheme,
    pub template: FormatTemplate,
}

impl Default for LoggerDefaults {
    fn default() -> Self {
        Self {
            threshold: Severity::Info,
            ansi: true,
            use_file: true,
            directory: PathBuf::from("logs"),
            naming: NamingScheme::Logger,
            template: scheme::default_scheme(),
        }
    }
}

struct LoggerState {
    threshold: Severity,
    ansi: bool,
    use_file: bool,
    directory: PathBuf,
    file_stem: String,
    template: FormatTemplate,
    sink: Sink,
}

/// A named logger.
pub struct Logger {
    name: String,
    clock: Arc<dyn Clock>,
    timestamps: Arc<Timestamps>,
    state: Mutex<LoggerState>,
}

/// Path of the file holding `stem`'s lines for `date`.
pub fn log_file_path(directory: &Path, stem: &str, date: NaiveDate) -> PathBuf {
    directory.join(format!("{} - {}.log", stem, date.format("%Y-%m-%d")))
}

impl Logger {
    /// Standalone logger on the system clock.
    pub fn new(name: impl Into<String>, defaults: &LoggerDefaults) -> Self {
        Self::with_clock(
            name,
            defaults,
            Arc::new(SystemClock),
            Arc::new(Timestamps::new()),
        )
    }

    pub fn with_clock(
        name: impl Into<String>,
        defaults: &LoggerDefaults,
        clock: Arc<dyn Clock>,
        timestamps: Arc<Timestamps>,
    ) -> Self {
        let name = name.into();
        let file_stem = match &defaults.naming {
            NamingScheme::Logger => name.clone(),
            NamingScheme::Custom(stem) => stem.clone(),
        };
        Self {
            clock,
            timestamps,
            state: Mutex::new(LoggerState {
                threshold: defaults.threshold,
                ansi: defaults.ansi,
                use_file: defaults.use_file,
                directory: defaults.directory.clone(),
                file_stem,
                template: defaults.template.clone(),
                sink: Sink::new(),
            }),
            name,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn timestamps(&self) -> &Arc<Timestamps> {
        &self.timestamps
    }

    pub fn threshold(&self) -> Severity {
        self.state.lock().threshold
    }

    pub fn set_threshold(&self, threshold: Severity) {
        self.state.lock().threshold = threshold;
    }

    pub fn ansi_enabled(&self) -> bool {
        self.state.lock().ansi
    }

    pub fn set_ansi_enabled(&self, enabled: bool) {
        self.state.lock().ansi = enabled;
    }

    pub fn use_file(&self) -> bool {
        self.state.lock().use_file
    }

    /// Turn the day-file half of emission on or off.
    pub fn set_use_file(&self, enabled: bool) {
        let mut state = self.state.lock();
        state.use_file = enabled;
        if !enabled {
            state.sink.close();
        }
    }

    /// Day file currently held open, if any.
    pub fn open_file(&self) -> Option<PathBuf> {
        self.state.lock().sink.current_path().map(Path::to_path_buf)
    }

    pub fn directory(&self) -> PathBuf {
        self.state.lock().directory.clone()
    }

    /// Point the logger at a new output directory, creating it if absent.
    ///
    /// Fails with [`LogError::Configuration`] when the path is occupied by
    /// something other than a directory; the previous directory is kept.
    pub fn set_directory(&self, path: impl AsRef<Path>) -> LogResult<()> {
        let path = path.as_ref();
        {
            let mut state = self.state.lock();
            prepare_directory(path)?;
            state.directory = path.to_path_buf();
            state.sink.close();
        }
        tracing::debug!(logger = %self.name, directory = %path.display(), "log directory changed");
        Ok(())
    }

    pub fn file_stem(&self) -> String {
        self.state.lock().file_stem.clone()
    }

    pub fn set_naming(&self, naming: NamingScheme) {
        let mut state = self.state.lock();
        state.file_stem = match naming {
            NamingScheme::Logger => self.name.clone(),
            NamingScheme::Custom(stem) => stem,
        };
        state.sink.close();
    }

    pub fn template(&self) -> FormatTemplate {
        self.state.lock().template.clone()
    }

    pub fn set_template(&self, template: FormatTemplate) {
        self.state.lock().template = template;
    }

    /// Replace the console writer (stdout by default).
    pub fn set_console(&self, console: Box<dyn Write + Send>) {
        self.state.lock().sink.set_console(console);
    }

    /// Replace the stream file failures are reported on (stderr by default).
    pub fn set_diagnostics(&self, diagnostics: Box<dyn Write + Send>) {
        self.state.lock().sink.set_diagnostics(diagnostics);
    }

    /// Day file this logger writes to on `date`.
    pub fn file_path_for(&self, date: NaiveDate) -> PathBuf {
        let state = self.state.lock();
        log_file_path(&state.directory, &state.file_stem, date)
    }

    /// Whether a message of `severity` would currently be emitted.
    pub fn is_enabled(&self, severity: Severity) -> bool {
        severity.enabled(self.state.lock().threshold)
    }

    /// Gate, compose and emit one line.
    ///
    /// Suppressed messages return before any formatting happens. File
    /// failures are reported on the diagnostic stream and never surface here.
    pub fn log(&self, message: &str, severity: Severity, color: Color) {
        let mut state = self.state.lock();
        if !severity.enabled(state.threshold) {
            return;
        }

        let now = self.clock.now();
        let current = thread::current();
        let ctx = FieldContext {
            severity: severity.name(),
            logger: &self.name,
            thread: current.name().unwrap_or(UNNAMED_THREAD),
            now,
            timestamps: &self.timestamps,
        };
        let line = state.template.line(&ctx, message);
        let path = state
            .use_file
            .then(|| log_file_path(&state.directory, &state.file_stem, now.date_naive()));
        let ansi = state.ansi;

        state.sink.emit(&line, color, ansi, path.as_deref());
    }

    pub fn fatal(&self, message: &str) {
        self.log(message, Severity::Fatal, Severity::Fatal.color());
    }

    pub fn error(&self, message: &str) {
        self.log(message, Severity::Error, Severity::Error.color());
    }

    pub fn warning(&self, message: &str) {
        self.log(message, Severity::Warning, Severity::Warning.color());
    }

    pub fn success(&self, message: &str) {
        self.log(message, Severity::Success, Severity::Success.color());
    }

    pub fn info(&self, message: &str) {
        self.log(message, Severity::Info, Severity::Info.color());
    }

    pub fn debug(&self, message: &str) {
        self.log(message, Severity::Debug, Severity::Debug.color());
    }

    pub fn trace(&self, message: &str) {
        self.log(message, Severity::Trace, Severity::Trace.color());
    }

    /// Release the open day file. The next line reopens it.
    pub fn close(&self) {
        self.state.lock().sink.close();
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("threshold", &state.threshold)
            .field("ansi", &state.ansi)
            .field("use_file", &state.use_file)
            .field("directory", &state.directory)
            .finish()
    }
}

fn prepare_directory(path: &Path) -> LogResult<()> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(LogError::Configuration {
            path: path.to_path_buf(),
            reason: "path exists and is not a directory".to_string(),
        }),
        Err(_) => fs::create_dir_all(path).map_err(|e| LogError::Configuration {
            path: path.to_path_buf(),
            reason: format!("cannot create directory: {}", e),
        }),
    }
}
