use std::path::PathBuf;

use clap::Parser;

/// Concatenate files to standard output, through a pager when it is a
/// terminal
#[derive(Parser, Debug)]
#[command(name = "pagewire", version)]
pub struct Args {
    /// Files to print; `-` reads standard input
    #[arg(value_name = "FILE", default_value = "-")]
    pub files: Vec<PathBuf>,

    /// Pager command line to try before the fallbacks (overrides $PAGER)
    #[arg(long, value_name = "CMD")]
    pub pager: Option<String>,

    /// Never start a pager
    #[arg(long, conflicts_with = "pager")]
    pub no_pager: bool,

    /// TOML file with pager settings (env_var, fallbacks)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log pager selection to standard error
    #[arg(short, long)]
    pub verbose: bool,
}
