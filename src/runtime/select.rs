//! Runtime selection: native, Singularity (bind mounts) or Docker (volume mounts).

use crate::error::IgverError;
use crate::runtime::mounts::MountSet;
use crate::runtime::signals::EnvironmentSignals;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_IMAGE: &str = "docker://sahuno/igver:latest";

/// Requested runtime. `Auto` defers to environment probing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeMode {
    #[default]
    Auto,
    Native,
    Singularity,
    Docker,
}

impl FromStr for RuntimeMode {
    type Err = IgverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(RuntimeMode::Auto),
            "native" => Ok(RuntimeMode::Native),
            "singularity" | "apptainer" => Ok(RuntimeMode::Singularity),
            "docker" => Ok(RuntimeMode::Docker),
            other => Err(IgverError::invalid_configuration(format!(
                "unknown runtime '{}' (expected auto, native, singularity or docker)",
                other
            ))),
        }
    }
}

/// `[runtime]` configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default)]
    pub mode: RuntimeMode,

    /// Container image reference; `docker://` is stripped for Docker.
    #[serde(default = "default_image")]
    pub image: String,

    /// Directories always mounted into the container.
    #[serde(default = "default_extra_binds")]
    pub extra_binds: Vec<PathBuf>,

    /// Where batch scripts are written. Defaults to the output directory.
    #[serde(default)]
    pub scratch_dir: Option<PathBuf>,
}

fn default_image() -> String {
    DEFAULT_IMAGE.to_string()
}

fn default_extra_binds() -> Vec<PathBuf> {
    vec![PathBuf::from("/home")]
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            mode: RuntimeMode::Auto,
            image: default_image(),
            extra_binds: default_extra_binds(),
            scratch_dir: None,
        }
    }
}

/// Which wrapper was chosen, without mounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeKind {
    Native,
    Singularity,
    Docker,
}

impl fmt::Display for RuntimeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RuntimeKind::Native => "native",
            RuntimeKind::Singularity => "singularity",
            RuntimeKind::Docker => "docker",
        })
    }
}

/// Fully specified process-isolation wrapper for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    Native,
    Singularity { image: String, binds: Vec<PathBuf> },
    Docker { image: String, volumes: Vec<PathBuf> },
}

impl RuntimeEnvironment {
    pub fn kind(&self) -> RuntimeKind {
        match self {
            RuntimeEnvironment::Native => RuntimeKind::Native,
            RuntimeEnvironment::Singularity { .. } => RuntimeKind::Singularity,
            RuntimeEnvironment::Docker { .. } => RuntimeKind::Docker,
        }
    }
}

/// First match wins: force-native signal, explicit mode, already sandboxed (native),
/// Singularity on `PATH`, Docker on `PATH`, native.
pub fn select_runtime(mode: RuntimeMode, signals: &EnvironmentSignals) -> RuntimeKind {
    if signals.force_native {
        return RuntimeKind::Native;
    }
    match mode {
        RuntimeMode::Native => return RuntimeKind::Native,
        RuntimeMode::Singularity => return RuntimeKind::Singularity,
        RuntimeMode::Docker => return RuntimeKind::Docker,
        RuntimeMode::Auto => {}
    }
    if signals.sandboxed() {
        RuntimeKind::Native
    } else if signals.singularity_on_path {
        RuntimeKind::Singularity
    } else if signals.docker_on_path {
        RuntimeKind::Docker
    } else {
        RuntimeKind::Native
    }
}

/// Combines configuration and probed signals into a [`RuntimeEnvironment`].
#[derive(Debug, Clone)]
pub struct RuntimeSelector {
    config: RuntimeConfig,
    signals: EnvironmentSignals,
}

impl RuntimeSelector {
    pub fn new(config: RuntimeConfig, signals: EnvironmentSignals) -> Self {
        Self { config, signals }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn signals(&self) -> &EnvironmentSignals {
        &self.signals
    }

    pub fn kind(&self) -> RuntimeKind {
        select_runtime(self.config.mode, &self.signals)
    }

    /// Build the environment with the given mounts. Native ignores mounts.
    pub fn environment(&self, mounts: &MountSet) -> RuntimeEnvironment {
        let environment = match self.kind() {
            RuntimeKind::Native => RuntimeEnvironment::Native,
            RuntimeKind::Singularity => RuntimeEnvironment::Singularity {
                image: self.config.image.clone(),
                binds: mounts.to_vec(),
            },
            RuntimeKind::Docker => RuntimeEnvironment::Docker {
                image: docker_image(&self.config.image),
                volumes: mounts.to_vec(),
            },
        };
        tracing::debug!(runtime = %environment.kind(), mounts = mounts.len(), "Selected runtime");
        environment
    }
}

fn docker_image(image: &str) -> String {
    image.strip_prefix("docker://").unwrap_or(image).to_string()
}
