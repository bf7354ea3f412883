use std::ffi::OsStr;
use std::path::PathBuf;

/// A pager program resolved to an executable path, plus its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
}

/// Split a command line on runs of whitespace into program and arguments.
///
/// Returns `None` for a blank line. No quoting rules apply. Leading and
/// trailing whitespace is dropped rather than producing empty words.
pub fn split_command(line: &str) -> Option<(String, Vec<String>)> {
    let mut parts = line.split_whitespace().map(str::to_string);
    let program = parts.next()?;
    Some((program, parts.collect()))
}

/// Resolve the first candidate whose program is found on the search path.
///
/// `search_path` replaces `PATH` when given.
pub(crate) fn first_resolvable<I, S>(
    candidates: I,
    search_path: Option<&OsStr>,
) -> Option<PagerCommand>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    candidates.into_iter().find_map(|candidate| {
        let (program, args) = split_command(candidate.as_ref())?;
        match lookup(&program, search_path) {
            Ok(path) => Some(PagerCommand {
                program: path,
                args,
            }),
            Err(e) => {
                tracing::debug!(program = %program, error = %e, "pager candidate not found");
                None
            }
        }
    })
}

fn lookup(program: &str, search_path: Option<&OsStr>) -> which::Result<PathBuf> {
    match search_path {
        None => which::which(program),
        Some(paths) => {
            let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            which::which_in(program, Some(paths), cwd)
        }
    }
}
