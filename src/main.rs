mod cli;

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use pagewire::{Done, Launcher, PagerConfig, SetWriters, Sink, Writers};

use crate::cli::Args;

fn main() -> ExitCode {
    let args = Args::parse();
    pagewire::logging::init_tracing(args.verbose);

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Returns `Ok(false)` if any input could not be printed.
fn run(args: Args) -> anyhow::Result<bool> {
    let config = match &args.config {
        Some(path) => PagerConfig::load(path)
            .with_context(|| format!("couldn't load pager config {}", path.display()))?,
        None => PagerConfig::default(),
    };

    let mut launcher = Launcher::new(config);
    if let Some(command_line) = args.pager {
        launcher = launcher.with_preference(command_line);
    }

    let mut printer = Printer::new();
    let pager = if args.no_pager {
        None
    } else {
        launcher.start(&mut printer)
    };

    printer.print_all(&args.files);
    pager.done();

    Ok(printer.failures == 0)
}

/// Copies inputs to its standard writer, reporting failures on its error
/// writer.
struct Printer {
    writers: Writers,
    failures: usize,
}

impl Printer {
    fn new() -> Self {
        Self {
            writers: Writers::default(),
            failures: 0,
        }
    }

    fn print_all(&mut self, files: &[PathBuf]) {
        let mut out = self.writers.std_writer();
        for path in files {
            match print_one(path, &mut out) {
                Ok(()) => {}
                // The pager quit before reading everything.
                Err(e) if is_broken_pipe(&e) => return,
                Err(e) => self.report(&e),
            }
        }
        let _ = out.flush();
    }

    fn report(&mut self, error: &anyhow::Error) {
        self.failures += 1;
        let mut err = self.writers.err_writer();
        let _ = writeln!(err, "pagewire: {error:#}");
    }
}

impl SetWriters for Printer {
    fn std_writer(&self) -> Sink {
        self.writers.std_writer()
    }

    fn err_writer(&self) -> Sink {
        self.writers.err_writer()
    }

    fn set_std_writer(&mut self, writer: Sink) {
        self.writers.set_std_writer(writer);
    }

    fn set_err_writer(&mut self, writer: Sink) {
        self.writers.set_err_writer(writer);
    }
}

fn print_one(path: &Path, out: &mut Sink) -> anyhow::Result<()> {
    if path.as_os_str() == "-" {
        io::copy(&mut io::stdin().lock(), out).context("couldn't copy standard input")?;
        return Ok(());
    }

    let mut file =
        File::open(path).with_context(|| format!("couldn't open {}", path.display()))?;
    io::copy(&mut file, out).with_context(|| format!("couldn't print {}", path.display()))?;
    Ok(())
}

fn is_broken_pipe(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<io::Error>()
        .is_some_and(|e| e.kind() == io::ErrorKind::BrokenPipe)
}
