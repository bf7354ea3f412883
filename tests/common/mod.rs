//! Shared test utilities: terminals, stub pagers, in-memory sinks.

#![allow(dead_code, unused_imports)]

use std::fs::File;
use std::io::Read;
use std::os::unix::io::FromRawFd;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use pagewire::{Launcher, PagerConfig, Sink};
use parking_lot::Mutex;
use tempfile::TempDir;

pub type SpyBuffer = Arc<Mutex<Vec<u8>>>;

/// An in-memory sink and a handle to read what it received.
pub fn buffer() -> (Sink, SpyBuffer) {
    let buf = Arc::new(Mutex::new(Vec::new()));
    (Sink::shared(Arc::clone(&buf)), buf)
}

pub fn contents(buf: &SpyBuffer) -> String {
    String::from_utf8_lossy(&buf.lock()).into_owned()
}

/// A launcher whose preference variable is never set, so the real
/// environment cannot leak into the test.
pub fn launcher() -> Launcher {
    Launcher::new(PagerConfig {
        env_var: "PAGEWIRE_TEST_PAGER_NEVER_SET".to_string(),
        ..PagerConfig::default()
    })
}

/// A directory holding stub pagers named `names`, each a symlink to `cat`.
pub fn stub_dir(names: &[&str]) -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let cat = which::which("cat").expect("cat must be installed");
    for name in names {
        std::os::unix::fs::symlink(&cat, dir.path().join(name)).expect("Failed to link stub");
    }
    dir
}

/// Write an executable shell script into `dir`.
pub fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
    executable(dir, name, &format!("#!/bin/sh\n{body}\n"))
}

/// Write `content` to `dir/name` and mark it executable.
pub fn executable(dir: &Path, name: &str, content: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, content).expect("Failed to write executable");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
        .expect("Failed to make file executable");
    path
}

/// A pseudo-terminal pair. The slave side is a real terminal device.
pub struct Terminal {
    master: File,
    slave: File,
}

impl Terminal {
    pub fn open() -> Self {
        let mut master: libc::c_int = -1;
        let mut slave: libc::c_int = -1;
        let rc = unsafe {
            libc::openpty(
                &mut master,
                &mut slave,
                std::ptr::null_mut(),
                std::ptr::null_mut(),
                std::ptr::null_mut(),
            )
        };
        assert_eq!(rc, 0, "openpty failed: {}", std::io::Error::last_os_error());

        unsafe {
            Self {
                master: File::from_raw_fd(master),
                slave: File::from_raw_fd(slave),
            }
        }
    }

    /// A sink writing to the terminal device.
    pub fn sink(&self) -> Sink {
        Sink::file(self.slave.try_clone().expect("Failed to clone tty"))
    }

    /// Start collecting everything written to the terminal.
    pub fn capture(&self) -> Capture {
        let mut reader = self.master.try_clone().expect("Failed to clone pty master");
        let output = Arc::new(Mutex::new(Vec::new()));
        let output_clone = Arc::clone(&output);
        thread::spawn(move || {
            let mut buffer = [0u8; 1024];
            loop {
                match reader.read(&mut buffer) {
                    Ok(0) => break,
                    Ok(count) => output_clone.lock().extend_from_slice(&buffer[..count]),
                    Err(_) => break,
                }
            }
        });
        Capture { output }
    }
}

pub struct Capture {
    output: SpyBuffer,
}

impl Capture {
    /// Wait until `needle` shows up on the terminal, returning everything
    /// captured so far. Panics after a few seconds.
    pub fn wait_for(&self, needle: &str) -> String {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let text = contents(&self.output);
            if text.contains(needle) {
                return text;
            }
            assert!(
                Instant::now() < deadline,
                "timed out waiting for {needle:?}, terminal shows {text:?}"
            );
            thread::sleep(Duration::from_millis(10));
        }
    }
}
