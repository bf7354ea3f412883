//! Page a program's output when it is written to a terminal.
//!
//! ```no_run
//! use std::io::Write;
//! use pagewire::{Done, SetWriters, Writers};
//!
//! let mut writers = Writers::default();
//! let pager = pagewire::start(&mut writers);
//! let mut out = writers.std_writer();
//! let _ = writeln!(out, "a lot of text");
//! pager.done();
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod pager;
pub mod writers;

pub use config::{ConfigError, PagerConfig};
pub use error::PagerError;
pub use pager::{start, Done, Launcher, PagerCommand, PagerHandle};
pub use writers::{SetWriters, Sink, Writers};
