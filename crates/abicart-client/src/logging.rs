//! Request/response log sinks
//!
//! The client emits one formatted line per request and per response. Sinks
//! accept a line and never report failure; whatever goes wrong while writing
//! is swallowed so that logging cannot fail a call.

use std::fmt;
use std::io::Write;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

/// Line-oriented log sink
pub trait Logger: Send + Sync {
    fn log(&self, line: &str);
}

/// Discards every line
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn log(&self, _line: &str) {}
}

/// Forwards lines to `tracing` at INFO level under the `abicart::http` target
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, line: &str) {
        tracing::info!(target: "abicart::http", "{}", line);
    }
}

/// Writes one line per event to any `io::Write`, ignoring I/O errors
pub struct WriterLogger<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterLogger<W> {
    /// Wrap a writer
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl WriterLogger<std::io::Stderr> {
    /// Logger writing to standard error
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

impl<W: Write + Send> Logger for WriterLogger<W> {
    fn log(&self, line: &str) {
        let mut writer = self.writer.lock();
        let _ = writeln!(writer, "{line}");
        let _ = writer.flush();
    }
}

/// Swappable logger handle shared by the client and its logging interceptors
#[derive(Clone)]
pub struct SharedLogger {
    inner: Arc<RwLock<Arc<dyn Logger>>>,
}

impl SharedLogger {
    /// Handle starting with `logger` as its sink
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(logger)),
        }
    }

    /// Install a new sink; calls already logging keep the previous one
    pub fn replace(&self, logger: Arc<dyn Logger>) {
        *self.inner.write() = logger;
    }

    /// Current sink
    pub fn current(&self) -> Arc<dyn Logger> {
        self.inner.read().clone()
    }
}

impl Default for SharedLogger {
    fn default() -> Self {
        Self::new(Arc::new(NullLogger))
    }
}

impl Logger for SharedLogger {
    fn log(&self, line: &str) {
        // Release the lock before handing off to a possibly slow sink
        let logger = self.current();
        logger.log(line);
    }
}

impl fmt::Debug for SharedLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedLogger").finish_non_exhaustive()
    }
}
