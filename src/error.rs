use std::path::PathBuf;

use thiserror::Error;

/// Reasons a pager did not start.
///
/// None of these are fatal: [`Launcher::start`](crate::Launcher::start)
/// turns every one of them into "no pager".
#[derive(Debug, Error)]
pub enum PagerError {
    /// No candidate resolved to an executable.
    #[error("no pager found (tried: {})", tried.join(", "))]
    NotFound { tried: Vec<String> },

    /// The resolved program could not be launched.
    #[error("failed to start pager '{}': {source}", program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Preparing the pager's streams failed.
    #[error("pager I/O setup failed: {0}")]
    Io(#[from] std::io::Error),
}
