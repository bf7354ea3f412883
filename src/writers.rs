//! Swappable output destinations.
//!
//! [`SetWriters`] is the capability the pager needs from a caller: read and
//! replace a standard and an error destination. [`Writers`] is the stock
//! implementation; host types usually hold one and delegate to it.

use std::fmt;
use std::fs::File;
use std::io::{self, Write};
use std::process::Stdio;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::pager::PipeWriter;

/// A destination for output bytes.
///
/// Cloning is cheap: file handles, pipes and shared writers are reference
/// counted, so a clone writes to the same place as the original.
#[derive(Clone)]
pub enum Sink {
    /// The process's inherited standard output.
    Stdout,
    /// The process's inherited standard error.
    Stderr,
    /// An OS file handle (regular file, device, terminal).
    File(Arc<File>),
    /// The write end of a pager's input pipe.
    Pipe(PipeWriter),
    /// Anything else that accepts bytes.
    Writer(Arc<Mutex<dyn Write + Send>>),
}

impl Sink {
    pub fn file(file: File) -> Self {
        Sink::File(Arc::new(file))
    }

    /// Wrap a shared writer. The caller keeps its `Arc` and can inspect the
    /// writer (e.g. a `Vec<u8>`) after output is done.
    pub fn shared<W>(writer: Arc<Mutex<W>>) -> Self
    where
        W: Write + Send + 'static,
    {
        Sink::Writer(writer)
    }

    /// Whether this sink is an OS file handle connected to a terminal.
    ///
    /// Pipes and in-memory writers are never terminals, whatever they
    /// eventually write to.
    pub fn is_terminal(&self) -> bool {
        match self {
            Sink::Stdout => tty::stdout_is_terminal(),
            Sink::Stderr => tty::stderr_is_terminal(),
            Sink::File(file) => tty::file_is_terminal(file),
            Sink::Pipe(_) | Sink::Writer(_) => false,
        }
    }

    /// True when both sinks write to the same underlying resource.
    pub fn same_as(&self, other: &Sink) -> bool {
        match (self, other) {
            (Sink::Stdout, Sink::Stdout) | (Sink::Stderr, Sink::Stderr) => true,
            (Sink::File(a), Sink::File(b)) => Arc::ptr_eq(a, b),
            (Sink::Pipe(a), Sink::Pipe(b)) => a.ptr_eq(b),
            (Sink::Writer(a), Sink::Writer(b)) => {
                Arc::as_ptr(a).cast::<()>() == Arc::as_ptr(b).cast::<()>()
            }
            _ => false,
        }
    }

    /// A `Stdio` a child process can write to directly, or `None` when the
    /// sink has no OS handle and output has to be copied in-process.
    ///
    /// The stream follows the sink, whichever child slot it ends up in:
    /// `Stdout` given as a child's stderr still writes to our fd 1.
    pub(crate) fn child_stdio(&self) -> io::Result<Option<Stdio>> {
        match self {
            Sink::Stdout => Ok(Some(Stdio::from(io::stdout()))),
            Sink::Stderr => Ok(Some(Stdio::from(io::stderr()))),
            Sink::File(file) => Ok(Some(Stdio::from(file.try_clone()?))),
            Sink::Pipe(_) | Sink::Writer(_) => Ok(None),
        }
    }
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Sink::Stdout => io::stdout().write(buf),
            Sink::Stderr => io::stderr().write(buf),
            Sink::File(file) => (&**file).write(buf),
            Sink::Pipe(pipe) => pipe.write(buf),
            Sink::Writer(writer) => writer.lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Sink::Stdout => io::stdout().flush(),
            Sink::Stderr => io::stderr().flush(),
            Sink::File(file) => (&**file).flush(),
            Sink::Pipe(pipe) => pipe.flush(),
            Sink::Writer(writer) => writer.lock().flush(),
        }
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sink::Stdout => f.write_str("Stdout"),
            Sink::Stderr => f.write_str("Stderr"),
            Sink::File(file) => f.debug_tuple("File").field(file).finish(),
            Sink::Pipe(pipe) => f.debug_tuple("Pipe").field(pipe).finish(),
            Sink::Writer(_) => f.write_str("Writer(..)"),
        }
    }
}

/// Get and replace a pair of output destinations.
///
/// Implement this on any type whose output should be pageable. Getters
/// return clones; setters perform no validation.
pub trait SetWriters {
    fn std_writer(&self) -> Sink;
    fn err_writer(&self) -> Sink;
    fn set_std_writer(&mut self, writer: Sink);
    fn set_err_writer(&mut self, writer: Sink);
}

/// Default [`SetWriters`] implementation, starting out on the process's
/// standard output and standard error.
#[derive(Debug, Clone)]
pub struct Writers {
    std_w: Sink,
    err_w: Sink,
}

impl Writers {
    pub fn new() -> Self {
        Self::with(Sink::Stdout, Sink::Stderr)
    }

    pub fn with(std_w: Sink, err_w: Sink) -> Self {
        Self { std_w, err_w }
    }
}

impl Default for Writers {
    fn default() -> Self {
        Self::new()
    }
}

impl SetWriters for Writers {
    fn std_writer(&self) -> Sink {
        self.std_w.clone()
    }

    fn err_writer(&self) -> Sink {
        self.err_w.clone()
    }

    fn set_std_writer(&mut self, writer: Sink) {
        self.std_w = writer;
    }

    fn set_err_writer(&mut self, writer: Sink) {
        self.err_w = writer;
    }
}

#[cfg(unix)]
mod tty {
    use std::fs::File;
    use std::os::unix::io::{AsRawFd, RawFd};

    fn is_tty(fd: RawFd) -> bool {
        unsafe { libc::isatty(fd) == 1 }
    }

    pub fn stdout_is_terminal() -> bool {
        is_tty(libc::STDOUT_FILENO)
    }

    pub fn stderr_is_terminal() -> bool {
        is_tty(libc::STDERR_FILENO)
    }

    pub fn file_is_terminal(file: &File) -> bool {
        is_tty(file.as_raw_fd())
    }
}

#[cfg(not(unix))]
mod tty {
    use std::fs::File;
    use std::io::{self, IsTerminal};

    pub fn stdout_is_terminal() -> bool {
        io::stdout().is_terminal()
    }

    pub fn stderr_is_terminal() -> bool {
        io::stderr().is_terminal()
    }

    pub fn file_is_terminal(file: &File) -> bool {
        file.is_terminal()
    }
}
