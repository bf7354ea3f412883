//! Run output through an external pager when it is headed for a terminal.
//!
//! [`Launcher::start`] looks at the writers a [`SetWriters`] value holds. If
//! either is a terminal it resolves a pager (the preference variable first,
//! then the fallbacks), starts it with its output on the original writers,
//! and points the terminal writers at the pager's input. Every failure along
//! the way means "no pager": the holder is left untouched and `None` is
//! returned.

mod handle;
mod pipe;
mod resolve;

use std::ffi::OsString;
use std::io::{self, Read};
use std::process::{Child, ChildStderr, ChildStdout, Command, Stdio};
use std::thread::{self, JoinHandle};

pub use handle::{Done, PagerHandle};
pub use pipe::PipeWriter;
pub use resolve::{split_command, PagerCommand};

use crate::config::PagerConfig;
use crate::error::PagerError;
use crate::writers::{SetWriters, Sink};

/// Start a pager with the default configuration.
pub fn start<H>(holder: &mut H) -> Option<PagerHandle>
where
    H: SetWriters + ?Sized,
{
    Launcher::default().start(holder)
}

/// Resolves and starts pagers.
#[derive(Debug, Clone, Default)]
pub struct Launcher {
    config: PagerConfig,
    preference: Option<String>,
    search_path: Option<OsString>,
}

impl Launcher {
    pub fn new(config: PagerConfig) -> Self {
        Self {
            config,
            preference: None,
            search_path: None,
        }
    }

    /// Use this command line instead of reading the preference variable.
    pub fn with_preference(mut self, command_line: impl Into<String>) -> Self {
        self.preference = Some(command_line.into());
        self
    }

    /// Search these directories instead of `PATH`.
    pub fn with_search_path(mut self, search_path: impl Into<OsString>) -> Self {
        self.search_path = Some(search_path.into());
        self
    }

    pub fn config(&self) -> &PagerConfig {
        &self.config
    }

    /// Candidate command lines in the order they are tried.
    ///
    /// The preference variable is read on every call.
    pub fn candidates(&self) -> Vec<String> {
        let preference = match &self.preference {
            Some(p) => Some(p.clone()),
            None => std::env::var(&self.config.env_var).ok(),
        };

        preference
            .filter(|p| !p.is_empty())
            .into_iter()
            .chain(self.config.fallbacks.iter().cloned())
            .collect()
    }

    /// The first candidate found on the search path.
    pub fn resolve(&self) -> Option<PagerCommand> {
        resolve::first_resolvable(self.candidates(), self.search_path.as_deref())
    }

    /// Start a pager if either writer is a terminal.
    ///
    /// Returns `None`, leaving `holder` unchanged, when neither writer is a
    /// terminal, no pager can be found, or the pager fails to launch.
    pub fn start<H>(&self, holder: &mut H) -> Option<PagerHandle>
    where
        H: SetWriters + ?Sized,
    {
        match self.try_start(holder) {
            Ok(handle) => handle,
            Err(e) => {
                tracing::debug!(error = %e, "paging disabled");
                None
            }
        }
    }

    /// Like [`Launcher::start`], but reports why no pager was started.
    ///
    /// `Ok(None)` means neither writer is a terminal.
    pub fn try_start<H>(&self, holder: &mut H) -> Result<Option<PagerHandle>, PagerError>
    where
        H: SetWriters + ?Sized,
    {
        let std_w = holder.std_writer();
        let err_w = holder.err_writer();
        let std_is_tty = std_w.is_terminal();
        let err_is_tty = err_w.is_terminal();

        if !std_is_tty && !err_is_tty {
            tracing::debug!("no terminal writers, not paging");
            return Ok(None);
        }

        let candidates = self.candidates();
        let command = resolve::first_resolvable(&candidates, self.search_path.as_deref())
            .ok_or_else(|| PagerError::NotFound {
                tried: candidates.clone(),
            })?;

        let (child, pipe, copiers) = spawn(&command, &std_w, &err_w)?;
        tracing::debug!(
            program = %command.program.display(),
            args = ?command.args,
            std_is_tty,
            err_is_tty,
            "pager started"
        );

        if std_is_tty {
            holder.set_std_writer(Sink::Pipe(pipe.clone()));
        }
        if err_is_tty {
            holder.set_err_writer(Sink::Pipe(pipe.clone()));
        }

        Ok(Some(PagerHandle::new(pipe, child, copiers, command)))
    }
}

fn spawn(
    command: &PagerCommand,
    std_w: &Sink,
    err_w: &Sink,
) -> Result<(Child, PipeWriter, Vec<JoinHandle<()>>), PagerError> {
    let std_stdio = std_w.child_stdio()?;
    let err_stdio = err_w.child_stdio()?;
    let copy_std = std_stdio.is_none();
    let copy_err = err_stdio.is_none();

    let mut cmd = Command::new(&command.program);
    cmd.args(&command.args)
        .stdin(Stdio::piped())
        .stdout(std_stdio.unwrap_or_else(Stdio::piped))
        .stderr(err_stdio.unwrap_or_else(Stdio::piped));

    let mut child = cmd.spawn().map_err(|source| PagerError::Spawn {
        program: command.program.clone(),
        source,
    })?;

    match wire(&mut child, copy_std, copy_err, std_w, err_w) {
        Ok((pipe, copiers)) => Ok((child, pipe, copiers)),
        Err(e) => {
            let _ = child.kill();
            let _ = child.wait();
            Err(e)
        }
    }
}

/// Take the child's pipes: stdin becomes the pager input, piped
/// stdout/stderr get drained into their original sinks.
fn wire(
    child: &mut Child,
    copy_std: bool,
    copy_err: bool,
    std_w: &Sink,
    err_w: &Sink,
) -> Result<(PipeWriter, Vec<JoinHandle<()>>), PagerError> {
    let stdin = child.stdin.take().ok_or_else(|| missing("stdin"))?;
    let mut copiers = Vec::new();

    if copy_std {
        let out: ChildStdout = child.stdout.take().ok_or_else(|| missing("stdout"))?;
        copiers.push(copier("pager-stdout", out, std_w.clone())?);
    }
    if copy_err {
        let err: ChildStderr = child.stderr.take().ok_or_else(|| missing("stderr"))?;
        copiers.push(copier("pager-stderr", err, err_w.clone())?);
    }

    Ok((PipeWriter::new(Box::new(stdin)), copiers))
}

fn copier<R>(name: &str, mut from: R, mut to: Sink) -> io::Result<JoinHandle<()>>
where
    R: Read + Send + 'static,
{
    thread::Builder::new().name(name.to_string()).spawn(move || {
        if let Err(e) = io::copy(&mut from, &mut to) {
            tracing::debug!(error = %e, "pager output copy stopped");
        }
    })
}

fn missing(stream: &str) -> PagerError {
    PagerError::Io(io::Error::other(format!("pager {stream} was not piped")))
}
