//! Shared test utilities for integration tests
//!
//! Isolated XDG directories for configuration tests, track fixtures, and fake
//! process runners standing in for the viewer.

#![allow(dead_code)]

use igver::config::IgverConfig;
use igver::orchestrator::{ProcessOutput, ProcessRunner};
use igver::runtime::{RuntimeMode, WrappedCommand};
use std::cell::{Cell, RefCell};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

/// Global mutex to serialize XDG environment variable access across all tests
static XDG_ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Environment variable state to restore after test
struct EnvState {
    home: Option<String>,
    xdg_config_home: Option<String>,
}

impl EnvState {
    fn capture() -> Self {
        Self {
            home: std::env::var("HOME").ok(),
            xdg_config_home: std::env::var("XDG_CONFIG_HOME").ok(),
        }
    }

    fn restore(self) {
        match self.home {
            Some(orig) => std::env::set_var("HOME", orig),
            None => std::env::remove_var("HOME"),
        }
        match self.xdg_config_home {
            Some(orig) => std::env::set_var("XDG_CONFIG_HOME", orig),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
    }
}

/// Run `f` with HOME and XDG_CONFIG_HOME pointing inside `test_dir`.
pub fn with_xdg_env<F, R>(test_dir: &TempDir, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = XDG_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let env_state = EnvState::capture();

    let test_config_home = test_dir.path().join("config");
    let test_home = test_dir.path().join("home");
    fs::create_dir_all(&test_config_home).unwrap();
    fs::create_dir_all(&test_home).unwrap();

    std::env::set_var("HOME", test_home.to_str().unwrap());
    std::env::set_var("XDG_CONFIG_HOME", test_config_home.to_str().unwrap());

    let result = f();

    env_state.restore();

    result
}

/// Create an empty track file.
pub fn write_track(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"").unwrap();
    path
}

/// Default configuration pinned to the native runtime without a virtual display.
pub fn native_config() -> IgverConfig {
    let mut config = IgverConfig::default();
    config.runtime.mode = RuntimeMode::Native;
    config.viewer.virtual_display = false;
    config
}

/// Batch script path handed to the viewer (`-b <path>`).
pub fn batch_path(command: &WrappedCommand) -> PathBuf {
    let position = command
        .args
        .iter()
        .position(|a| a == "-b")
        .expect("viewer command carries -b");
    PathBuf::from(&command.args[position + 1])
}

/// Snapshot paths named by a batch script, in order.
pub fn snapshots_in(script: &str) -> Vec<PathBuf> {
    let mut dir = PathBuf::new();
    let mut snapshots = Vec::new();
    for line in script.lines() {
        if let Some(d) = line.strip_prefix("snapshotDirectory ") {
            dir = PathBuf::from(d);
        } else if let Some(name) = line.strip_prefix("snapshot ") {
            snapshots.push(dir.join(name));
        }
    }
    snapshots
}

/// Fake viewer that writes the first `per_call` missing snapshots on each call and
/// records every script it saw.
pub struct ScriptedViewer {
    per_call: usize,
    pub calls: Cell<usize>,
    pub scripts: RefCell<Vec<String>>,
}

impl ScriptedViewer {
    pub fn writing_all() -> Self {
        Self::writing(usize::MAX)
    }

    pub fn writing(per_call: usize) -> Self {
        Self {
            per_call,
            calls: Cell::new(0),
            scripts: RefCell::new(Vec::new()),
        }
    }
}

impl ProcessRunner for ScriptedViewer {
    fn run(&self, command: &WrappedCommand) -> io::Result<ProcessOutput> {
        self.calls.set(self.calls.get() + 1);
        let script = fs::read_to_string(batch_path(command))?;
        for snapshot in snapshots_in(&script)
            .into_iter()
            .filter(|p| !p.exists())
            .take(self.per_call)
        {
            fs::write(snapshot, b"image")?;
        }
        self.scripts.borrow_mut().push(script);
        Ok(ProcessOutput {
            code: Some(0),
            stdout: "INFO [Batch] Executing batch script".to_string(),
            ..Default::default()
        })
    }
}
