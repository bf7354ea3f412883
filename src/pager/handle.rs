use std::process::Child;
use std::thread::JoinHandle;

use super::pipe::PipeWriter;
use super::resolve::PagerCommand;
use crate::writers::Sink;

/// A running pager.
///
/// Returned by a successful start. Call [`PagerHandle::done`] once all
/// output has been written; dropping the handle does the same.
#[derive(Debug)]
pub struct PagerHandle {
    pipe: PipeWriter,
    child: Option<Child>,
    copiers: Vec<JoinHandle<()>>,
    command: PagerCommand,
}

impl PagerHandle {
    pub(crate) fn new(
        pipe: PipeWriter,
        child: Child,
        copiers: Vec<JoinHandle<()>>,
        command: PagerCommand,
    ) -> Self {
        Self {
            pipe,
            child: Some(child),
            copiers,
            command,
        }
    }

    /// The write end of the pager's input, as placed into the holder.
    pub fn pipe(&self) -> Sink {
        Sink::Pipe(self.pipe.clone())
    }

    pub fn command(&self) -> &PagerCommand {
        &self.command
    }

    /// Close the pager's input and wait for it to exit.
    ///
    /// The pager's exit status is ignored.
    pub fn done(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.pipe.close();
        if let Some(mut child) = self.child.take() {
            let status = child.wait();
            tracing::debug!(?status, "pager exited");
        }
        for copier in self.copiers.drain(..) {
            let _ = copier.join();
        }
    }
}

impl Drop for PagerHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Finish a paging session that may not have started.
///
/// Implemented for `Option<PagerHandle>` so callers can finish
/// unconditionally: `None.done()` returns immediately.
pub trait Done {
    fn done(self);
}

impl Done for Option<PagerHandle> {
    fn done(self) {
        if let Some(handle) = self {
            handle.done();
        }
    }
}
