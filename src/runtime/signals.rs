//! Environment probing for runtime selection. Probing happens once, at the edge;
//! everything downstream works on the collected [`EnvironmentSignals`].

use serde::Serialize;
use std::path::Path;

/// Substrings in `/proc/1/cgroup` that indicate a container.
const CGROUP_HINTS: &[&str] = &["docker", "lxc", "kubepods", "containerd"];

/// Observed facts about the host used to pick a runtime.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnvironmentSignals {
    /// `IGVER_IN_CONTAINER=1` or `IGVER_NO_SINGULARITY=1`.
    pub force_native: bool,
    /// `/.dockerenv` exists.
    pub docker_marker: bool,
    /// `SINGULARITY_CONTAINER` (or `APPTAINER_CONTAINER`) is set.
    pub singularity_env: bool,
    /// Container technology named in `/proc/1/cgroup`.
    pub cgroup_hint: Option<String>,
    pub singularity_on_path: bool,
    pub docker_on_path: bool,
}

impl EnvironmentSignals {
    /// Probe the current process environment.
    pub fn probe() -> Self {
        let signals = Self {
            force_native: env_flag("IGVER_IN_CONTAINER") || env_flag("IGVER_NO_SINGULARITY"),
            docker_marker: Path::new("/.dockerenv").exists(),
            singularity_env: env_present("SINGULARITY_CONTAINER")
                || env_present("APPTAINER_CONTAINER"),
            cgroup_hint: std::fs::read_to_string("/proc/1/cgroup")
                .ok()
                .and_then(|content| cgroup_hint(&content)),
            singularity_on_path: on_path("singularity"),
            docker_on_path: on_path("docker"),
        };
        tracing::debug!(?signals, "Probed runtime environment");
        signals
    }

    /// Already inside a container: marker file, container env var, or cgroup hint.
    pub fn sandboxed(&self) -> bool {
        self.docker_marker || self.singularity_env || self.cgroup_hint.is_some()
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| v.trim() == "1")
        .unwrap_or(false)
}

fn env_present(name: &str) -> bool {
    std::env::var_os(name)
        .map(|v| !v.is_empty())
        .unwrap_or(false)
}

/// First known container technology mentioned in cgroup content.
pub fn cgroup_hint(content: &str) -> Option<String> {
    CGROUP_HINTS
        .iter()
        .find(|hint| content.contains(*hint))
        .map(|hint| hint.to_string())
}

/// True when an executable named `program` is in one of the `PATH` directories.
pub fn on_path(program: &str) -> bool {
    let Some(path) = std::env::var_os("PATH") else {
        return false;
    };
    std::env::split_paths(&path).any(|dir| is_executable(&dir.join(program)))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file() || path.with_extension("exe").is_file()
}
