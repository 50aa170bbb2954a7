//! Console and day-file output for formatted lines.
//!
//! The sink keeps at most one file open. The target path is passed in on
//! every call, so a new calendar date (or directory) simply yields a new
//! path and the previous handle is dropped; a line is never appended to a
//! file other than the one named for its own date.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::severity::Color;

struct OpenFile {
    path: PathBuf,
    file: File,
}

/// Writes one line to the console and, optionally, appends it to a file.
///
/// Not shareable on its own: a [`Logger`](crate::Logger) owns its sink
/// behind the same lock that guards its configuration.
pub struct Sink {
    console: Box<dyn Write + Send>,
    diagnostics: Box<dyn Write + Send>,
    open: Option<OpenFile>,
}

impl Sink {
    /// Console on stdout, diagnostics on stderr.
    pub fn new() -> Self {
        Self::with_writers(Box::new(io::stdout()), Box::new(io::stderr()))
    }

    pub fn with_writers(console: Box<dyn Write + Send>, diagnostics: Box<dyn Write + Send>) -> Self {
        Self {
            console,
            diagnostics,
            open: None,
        }
    }

    pub fn set_console(&mut self, console: Box<dyn Write + Send>) {
        self.console = console;
    }

    pub fn set_diagnostics(&mut self, diagnostics: Box<dyn Write + Send>) {
        self.diagnostics = diagnostics;
    }

    /// Path of the currently open file, if any.
    pub fn current_path(&self) -> Option<&Path> {
        self.open.as_ref().map(|open| open.path.as_path())
    }

    /// Emit `line` to the console and append it to `file`.
    ///
    /// Failures are reported on the diagnostic stream and never returned;
    /// a file failure does not suppress the console write.
    pub fn emit(&mut self, line: &str, color: Color, ansi: bool, file: Option<&Path>) {
        let mut console_line = if ansi { color.paint(line) } else { line.to_string() };
        console_line.push('\n');
        if let Err(e) = self
            .console
            .write_all(console_line.as_bytes())
            .and_then(|_| self.console.flush())
        {
            self.report(format_args!("console write failed: {}", e));
        }

        if let Some(path) = file {
            if let Err(e) = self.append(path, line) {
                self.report(format_args!("failed to append to {}: {}", path.display(), e));
                // Retry opening on the next line rather than keep a broken handle.
                self.open = None;
            }
        }
    }

    /// Drop the open file handle; the next append reopens lazily.
    pub fn close(&mut self) {
        if let Some(mut open) = self.open.take() {
            let _ = open.file.flush();
        }
    }

    fn append(&mut self, path: &Path, line: &str) -> io::Result<()> {
        let reuse = matches!(&self.open, Some(open) if open.path == path);
        if !reuse {
            self.close();
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            self.open = Some(OpenFile {
                path: path.to_path_buf(),
                file,
            });
        }

        let mut record = String::with_capacity(line.len() + 1);
        record.push_str(line);
        record.push('\n');

        match self.open.as_mut() {
            // One write per line keeps O_APPEND writes whole.
            Some(open) => open.file.write_all(record.as_bytes()),
            None => Ok(()),
        }
    }

    fn report(&mut self, msg: std::fmt::Arguments<'_>) {
        let _ = writeln!(self.diagnostics, "daylog: {}", msg);
        let _ = self.diagnostics.flush();
    }
}

impl Default for Sink {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Sink {
    fn drop(&mut self) {
        self.close();
    }
}

/// In-memory writer whose clones share one buffer.
///
/// Handy as a console or diagnostic target when the output needs inspecting.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.inner.lock()).into_owned()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
