//! Append-only text sinks.
//!
//! - [`FileSink`] - the log file, opened create + append with no
//!   user-space buffering, so each record reaches the OS before the call
//!   returns
//! - [`MemorySink`] - shared in-memory buffer for tests and embedding
//!
//! The file is opened without exclusive locks. Other processes may
//! append to it at the same time; each record is handed to the OS in a
//! single write.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use bytes::{Bytes, BytesMut};
use parking_lot::Mutex;

use crate::error::Result;

/// Destination for log text.
pub trait LogSink: Send {
    /// Append `text` in full.
    fn append(&mut self, text: &str) -> io::Result<()>;
}

/// Where a session writes when it is initialized.
#[derive(Debug, Clone)]
pub enum SinkTarget {
    /// Append to a file, creating it if absent.
    File(PathBuf),
    /// Append to a shared in-memory buffer.
    Memory(MemorySink),
}

impl SinkTarget {
    /// Open the target, returning the sink and the path shown in the log.
    pub fn open(&self) -> Result<(Box<dyn LogSink>, String)> {
        match self {
            SinkTarget::File(path) => {
                let sink = FileSink::open(path)?;
                let shown = sink.path().display().to_string();
                Ok((Box::new(sink), shown))
            }
            SinkTarget::Memory(sink) => {
                sink.check_writable()?;
                Ok((Box::new(sink.clone()), "<memory>".to_string()))
            }
        }
    }
}

/// Log file opened in append mode.
#[derive(Debug)]
pub struct FileSink {
    file: File,
    path: PathBuf,
}

impl FileSink {
    /// Open `path` for appending, creating it if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file,
            path: resolve(path),
        })
    }

    /// Absolute path of the open file, when it could be resolved.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogSink for FileSink {
    fn append(&mut self, text: &str) -> io::Result<()> {
        self.file.write_all(text.as_bytes())
    }
}

fn resolve(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|dir| dir.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Cloneable handle to a shared in-memory log.
///
/// All clones see the same bytes. Writes can be made to fail on demand,
/// which is how tests exercise the sink-failure paths.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    buffer: Arc<Mutex<BytesMut>>,
    failing: Arc<AtomicBool>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, as text.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock()).into_owned()
    }

    /// Everything written so far, as bytes.
    pub fn snapshot(&self) -> Bytes {
        Bytes::copy_from_slice(&self.buffer.lock())
    }

    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.buffer.lock().len()
    }

    /// Whether nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buffer.lock().is_empty()
    }

    /// Discard the buffered text.
    pub fn clear(&self) {
        self.buffer.lock().clear();
    }

    /// Make subsequent opens and writes fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check_writable(&self) -> io::Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(io::Error::new(io::ErrorKind::Other, "memory sink is failing"));
        }
        Ok(())
    }
}

impl LogSink for MemorySink {
    fn append(&mut self, text: &str) -> io::Result<()> {
        self.check_writable()?;
        self.buffer.lock().extend_from_slice(text.as_bytes());
        Ok(())
    }
}
