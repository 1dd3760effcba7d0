//! Structured argv construction for the viewer and its container wrapper. Nothing
//! here goes through a shell.

use crate::runtime::select::RuntimeEnvironment;
use serde::{Deserialize, Serialize};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Command;

/// `[viewer]` configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Viewer installation directory (as seen inside the container, if any).
    #[serde(default = "default_igv_dir")]
    pub igv_dir: PathBuf,

    /// Launcher script name inside `igv_dir`.
    #[serde(default = "default_launcher")]
    pub launcher: String,

    /// Run under `xvfb-run` with a virtual screen.
    #[serde(default = "default_true")]
    pub virtual_display: bool,

    #[serde(default = "default_screen")]
    pub screen: String,

    /// Upper bound on viewer invocations per run.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// Per-attempt timeout; unset waits for the viewer to exit.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_igv_dir() -> PathBuf {
    PathBuf::from("/opt/IGV_2.19.5")
}

fn default_launcher() -> String {
    "igv.sh".to_string()
}

fn default_true() -> bool {
    true
}

fn default_screen() -> String {
    "1920x1080x24".to_string()
}

fn default_max_iterations() -> usize {
    2
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            igv_dir: default_igv_dir(),
            launcher: default_launcher(),
            virtual_display: default_true(),
            screen: default_screen(),
            max_iterations: default_max_iterations(),
            timeout_secs: None,
        }
    }
}

/// Program plus arguments, ready to spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrappedCommand {
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl WrappedCommand {
    fn from_argv(mut argv: Vec<OsString>) -> Self {
        let program = if argv.is_empty() {
            OsString::new()
        } else {
            argv.remove(0)
        };
        Self {
            program,
            args: argv,
        }
    }

    pub fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        command
    }

    /// Whitespace-joined argv for logs and dry runs.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_os_str())
            .chain(self.args.iter().map(OsString::as_os_str))
            .map(OsStr::to_string_lossy)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Builds the viewer command for a batch file inside the chosen runtime.
#[derive(Debug, Clone)]
pub struct Launcher {
    environment: RuntimeEnvironment,
    viewer: ViewerConfig,
}

impl Launcher {
    pub fn new(environment: RuntimeEnvironment, viewer: ViewerConfig) -> Self {
        Self {
            environment,
            viewer,
        }
    }

    pub fn environment(&self) -> &RuntimeEnvironment {
        &self.environment
    }

    /// `[xvfb-run --auto-display --server-args=-screen 0 <screen>] <igv_dir>/<launcher>
    /// -b <batch> --igvDirectory <igv_dir>`
    pub fn viewer_argv(&self, batch_path: &Path) -> Vec<OsString> {
        let mut argv: Vec<OsString> = Vec::new();
        if self.viewer.virtual_display {
            argv.push("xvfb-run".into());
            argv.push("--auto-display".into());
            argv.push(format!("--server-args=-screen 0 {}", self.viewer.screen).into());
        }
        argv.push(self.viewer.igv_dir.join(&self.viewer.launcher).into());
        argv.push("-b".into());
        argv.push(batch_path.into());
        argv.push("--igvDirectory".into());
        argv.push(self.viewer.igv_dir.clone().into());
        argv
    }

    pub fn command_for(&self, batch_path: &Path) -> WrappedCommand {
        let viewer = self.viewer_argv(batch_path);
        let argv = match &self.environment {
            RuntimeEnvironment::Native => viewer,
            RuntimeEnvironment::Singularity { image, binds } => {
                let mut argv: Vec<OsString> = vec!["singularity".into(), "run".into()];
                for bind in binds {
                    argv.push("-B".into());
                    argv.push(bind.clone().into());
                }
                argv.push(image.into());
                argv.extend(viewer);
                argv
            }
            RuntimeEnvironment::Docker { image, volumes } => {
                let mut argv: Vec<OsString> = vec!["docker".into(), "run".into(), "--rm".into()];
                for volume in volumes {
                    let mut mapping = volume.clone().into_os_string();
                    mapping.push(":");
                    mapping.push(volume);
                    argv.push("-v".into());
                    argv.push(mapping);
                }
                argv.push(image.into());
                argv.extend(viewer);
                argv
            }
        };
        WrappedCommand::from_argv(argv)
    }
}
