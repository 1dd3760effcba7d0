//! Execution orchestrator: writes the batch script, runs the viewer with bounded
//! retry, and verifies that every expected snapshot exists.
//!
//! Phases: `Compiling -> Written -> Executing -> Verifying -> {Succeeded, Exhausted}`.
//! The scratch script is removed on success and kept on exhaustion.

pub mod convert;
pub mod runner;

pub use convert::{ConvertConfig, PdfConverter};
pub use runner::{ProcessOutput, ProcessRunner, SystemRunner};

use crate::batch::BatchDocument;
use crate::error::IgverError;
use crate::naming::ExpectedOutputSet;
use crate::runtime::Launcher;
use serde::Serialize;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Orchestration state, logged on every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunPhase {
    Compiling,
    Written,
    Executing,
    Verifying,
    Succeeded,
    Exhausted,
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RunPhase::Compiling => "compiling",
            RunPhase::Written => "written",
            RunPhase::Executing => "executing",
            RunPhase::Verifying => "verifying",
            RunPhase::Succeeded => "succeeded",
            RunPhase::Exhausted => "exhausted",
        })
    }
}

#[derive(Debug, Clone)]
pub struct OrchestratorOptions {
    /// Upper bound on viewer invocations.
    pub max_iterations: usize,
    /// Delete existing snapshots before running.
    pub overwrite: bool,
    /// Directory for the batch script.
    pub scratch_dir: PathBuf,
}

/// Result of a successful orchestration.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionOutcome {
    pub outputs: ExpectedOutputSet,
    /// Viewer invocations made; 0 when every snapshot already existed.
    pub attempts: usize,
    pub reused_existing: bool,
}

/// Drives one batch document to completion.
pub struct Orchestrator<'a, R: ProcessRunner> {
    runner: &'a R,
    launcher: &'a Launcher,
    options: OrchestratorOptions,
}

impl<'a, R: ProcessRunner> Orchestrator<'a, R> {
    pub fn new(runner: &'a R, launcher: &'a Launcher, options: OrchestratorOptions) -> Self {
        Self {
            runner,
            launcher,
            options,
        }
    }

    pub fn execute(
        &self,
        document: &BatchDocument,
        expected: &ExpectedOutputSet,
    ) -> Result<ExecutionOutcome, IgverError> {
        if self.options.max_iterations == 0 {
            return Err(IgverError::invalid_configuration(
                "max_iterations must be at least 1",
            ));
        }

        if self.options.overwrite {
            remove_existing(expected)?;
        } else if expected.all_exist() {
            tracing::info!(
                outputs = expected.len(),
                "All snapshots already exist, skipping viewer"
            );
            return Ok(ExecutionOutcome {
                outputs: expected.clone(),
                attempts: 0,
                reused_existing: true,
            });
        }

        tracing::debug!(phase = %RunPhase::Compiling, snapshots = document.snapshot_count());
        let text = document.render();
        let batch_path = write_scratch(&self.options.scratch_dir, &text)?;
        tracing::info!(phase = %RunPhase::Written, batch = %batch_path.display(), "Batch script written");

        let command = self.launcher.command_for(&batch_path);
        tracing::debug!(command = %command.display(), "Viewer command");

        let mut last_output = String::new();
        for iteration in 1..=self.options.max_iterations {
            tracing::info!(
                phase = %RunPhase::Executing,
                iteration,
                max_iterations = self.options.max_iterations,
                "Running viewer"
            );
            match self.runner.run(&command) {
                Ok(output) => {
                    tracing::debug!(
                        code = ?output.code,
                        timed_out = output.timed_out,
                        stdout = %output.stdout,
                        stderr = %output.stderr,
                        "Viewer exited"
                    );
                    last_output = output.combined();
                }
                Err(e) => {
                    tracing::warn!(
                        iteration,
                        program = %command.program.to_string_lossy(),
                        error = %e,
                        "Viewer failed to start"
                    );
                    last_output = format!(
                        "failed to start {}: {}",
                        command.program.to_string_lossy(),
                        e
                    );
                }
            }

            let missing = expected.missing();
            tracing::debug!(phase = %RunPhase::Verifying, iteration, missing = missing.len());
            if missing.is_empty() {
                if let Err(e) = std::fs::remove_file(&batch_path) {
                    tracing::warn!(batch = %batch_path.display(), error = %e, "Failed to remove batch script");
                }
                tracing::info!(
                    phase = %RunPhase::Succeeded,
                    attempts = iteration,
                    outputs = expected.len(),
                    "All snapshots written"
                );
                return Ok(ExecutionOutcome {
                    outputs: expected.clone(),
                    attempts: iteration,
                    reused_existing: false,
                });
            }
        }

        let missing = expected.missing();
        tracing::error!(
            phase = %RunPhase::Exhausted,
            missing = missing.len(),
            batch = %batch_path.display(),
            "Snapshots still missing after retry budget"
        );
        Err(IgverError::ExecutionExhausted {
            iterations: self.options.max_iterations,
            missing,
            batch_script: batch_path,
            last_output,
        })
    }
}

fn remove_existing(expected: &ExpectedOutputSet) -> Result<(), IgverError> {
    for path in expected.paths().iter().filter(|p| p.exists()) {
        tracing::debug!(path = %path.display(), "Removing previous snapshot");
        std::fs::remove_file(path)?;
    }
    Ok(())
}

/// Write `text` to a uniquely named `.batch` file in `dir` and keep it on disk.
fn write_scratch(dir: &Path, text: &str) -> Result<PathBuf, IgverError> {
    std::fs::create_dir_all(dir)?;
    let mut file = tempfile::Builder::new()
        .prefix("igver-")
        .suffix(".batch")
        .tempfile_in(dir)?;
    file.write_all(text.as_bytes())?;
    file.flush()?;
    let (_, path) = file.keep().map_err(|e| IgverError::Io(e.error))?;
    Ok(path)
}
