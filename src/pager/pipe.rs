use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;

/// Write end of the pipe feeding a pager's standard input.
///
/// All clones share one handle, so [`PipeWriter::close`] closes the pipe for
/// every holder at once. Writes after close fail with `BrokenPipe`.
#[derive(Clone)]
pub struct PipeWriter {
    writer: Arc<Mutex<Option<Box<dyn Write + Send>>>>,
}

impl PipeWriter {
    pub(crate) fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Arc::new(Mutex::new(Some(writer))),
        }
    }

    /// Drop the write end, signalling end-of-input to the reader.
    pub fn close(&self) {
        let writer = self.writer.lock().take();
        drop(writer);
    }

    pub fn is_closed(&self) -> bool {
        self.writer.lock().is_none()
    }

    pub(crate) fn ptr_eq(&self, other: &PipeWriter) -> bool {
        Arc::ptr_eq(&self.writer, &other.writer)
    }
}

impl Write for PipeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut writer = self.writer.lock();
        let Some(writer) = writer.as_mut() else {
            return Err(closed());
        };
        writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut writer = self.writer.lock();
        match writer.as_mut() {
            Some(writer) => writer.flush(),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for PipeWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipeWriter")
            .field("closed", &self.is_closed())
            .finish()
    }
}

fn closed() -> io::Error {
    io::Error::new(io::ErrorKind::BrokenPipe, "pager input is closed")
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Recorder(Arc<Mutex<Vec<u8>>>);

    impl Write for Recorder {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn pipe() -> (PipeWriter, Arc<Mutex<Vec<u8>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        (PipeWriter::new(Box::new(Recorder(Arc::clone(&seen)))), seen)
    }

    #[test]
    fn clones_write_to_the_same_pipe() {
        let (mut a, seen) = pipe();
        let mut b = a.clone();
        a.write_all(b"one ").unwrap();
        b.write_all(b"two").unwrap();
        assert_eq!(&*seen.lock(), b"one two");
        assert!(a.ptr_eq(&b));
    }

    #[test]
    fn close_is_shared_and_idempotent() {
        let (a, _) = pipe();
        let mut b = a.clone();
        a.close();
        a.close();
        assert!(b.is_closed());
        let err = b.write(b"late").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert!(b.flush().is_ok());
    }

    #[test]
    fn separate_pipes_are_distinct() {
        let (a, _) = pipe();
        let (b, _) = pipe();
        assert!(!a.ptr_eq(&b));
    }
}
