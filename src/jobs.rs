//! Job files: several screenshot runs described in one TOML or JSON document.
//!
//! ```toml
//! [[jobs]]
//! name = "tumor_sv"
//! regions = ["sv_regions.txt"]
//! tracks = ["tumor.bam", "normal.bam"]
//! genome = "hg38"
//! format = "pdf"
//! ```
//!
//! Jobs run one after another, each into `<output_base>/<name>`. A failing job is
//! recorded and the remaining jobs still run.

use crate::config::IgverConfig;
use crate::error::IgverError;
use crate::orchestrator::{ProcessRunner, SystemRunner};
use crate::runtime::EnvironmentSignals;
use crate::screenshot::{ScreenshotRequest, ScreenshotService};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;
use tracing::{error, info};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobsFile {
    #[serde(default)]
    pub jobs: Vec<JobSpec>,
}

/// One named run. Unset fields fall back to the loaded configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobSpec {
    pub name: String,
    pub regions: Vec<String>,
    pub tracks: Vec<PathBuf>,
    #[serde(default)]
    pub genome: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub dpi: Option<u32>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub overlap_display: Option<String>,
    #[serde(default)]
    pub max_panel_height: Option<u32>,
    #[serde(default)]
    pub preferences: Option<PathBuf>,
}

impl JobSpec {
    /// The base configuration with this job's render overrides applied.
    pub fn apply_to(&self, base: &IgverConfig) -> IgverConfig {
        let mut config = base.clone();
        let render = &mut config.render;
        if let Some(genome) = &self.genome {
            render.genome = genome.clone();
        }
        if let Some(format) = &self.format {
            render.format = format.clone();
        }
        if let Some(dpi) = self.dpi {
            render.dpi = dpi;
        }
        if let Some(mode) = &self.overlap_display {
            render.overlap_display = mode.clone();
        }
        if let Some(height) = self.max_panel_height {
            render.max_panel_height = height;
        }
        if let Some(prefs) = &self.preferences {
            render.preferences = Some(prefs.clone());
        }
        config
    }

    /// The job's name with surrounding whitespace removed; used for validation, the
    /// output directory and reporting.
    pub fn dir_name(&self) -> &str {
        self.name.trim()
    }

    pub fn request(&self, output_base: &Path, overwrite: bool) -> ScreenshotRequest {
        ScreenshotRequest {
            tracks: self.tracks.clone(),
            regions: self.regions.clone(),
            output_dir: output_base.join(self.dir_name()),
            tag: self.tag.clone(),
            overwrite,
        }
    }
}

impl JobsFile {
    /// Parse by extension: `.json` as JSON, anything else as TOML.
    pub fn load(path: &Path) -> Result<Self, IgverError> {
        if !path.is_file() {
            return Err(IgverError::input_not_found("jobs file", path));
        }
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        let file: JobsFile = if is_json {
            serde_json::from_str(&content).map_err(|e| {
                IgverError::invalid_configuration(format!("{}: {}", path.display(), e))
            })?
        } else {
            toml::from_str(&content).map_err(|e| {
                IgverError::invalid_configuration(format!("{}: {}", path.display(), e))
            })?
        };
        file.validate()?;
        Ok(file)
    }

    /// Names must be non-empty, unique and usable as a single directory name.
    pub fn validate(&self) -> Result<(), IgverError> {
        if self.jobs.is_empty() {
            return Err(IgverError::invalid_configuration("jobs file defines no jobs"));
        }
        let mut seen = HashSet::new();
        for job in &self.jobs {
            let name = job.dir_name();
            if name.is_empty() {
                return Err(IgverError::invalid_configuration("job name cannot be empty"));
            }
            let mut components = Path::new(name).components();
            let single_normal = matches!(
                (components.next(), components.next()),
                (Some(Component::Normal(_)), None)
            );
            if !single_normal {
                return Err(IgverError::invalid_configuration(format!(
                    "job name '{}' must be a plain directory name",
                    name
                )));
            }
            if !seen.insert(name) {
                return Err(IgverError::invalid_configuration(format!(
                    "duplicate job name '{}'",
                    name
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct JobOutcome {
    pub name: String,
    pub success: bool,
    pub outputs: Vec<PathBuf>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct JobsSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub results: Vec<JobOutcome>,
}

impl JobsSummary {
    fn record(&mut self, outcome: JobOutcome) {
        self.total += 1;
        if outcome.success {
            self.successful += 1;
        } else {
            self.failed += 1;
        }
        self.results.push(outcome);
    }
}

/// Runs every job in a [`JobsFile`] against one base configuration.
pub struct JobRunner {
    config: IgverConfig,
    signals: EnvironmentSignals,
    overwrite: bool,
}

impl JobRunner {
    pub fn new(config: IgverConfig, signals: EnvironmentSignals, overwrite: bool) -> Self {
        Self {
            config,
            signals,
            overwrite,
        }
    }

    pub fn run(&self, file: &JobsFile, output_base: &Path) -> JobsSummary {
        let runner = SystemRunner::new(self.config.viewer.timeout_secs.map(Duration::from_secs));
        self.run_with(file, output_base, &runner)
    }

    pub fn run_with<R: ProcessRunner>(
        &self,
        file: &JobsFile,
        output_base: &Path,
        runner: &R,
    ) -> JobsSummary {
        let mut summary = JobsSummary::default();
        for job in &file.jobs {
            let name = job.dir_name();
            info!(job = %name, "Starting job");
            let service = ScreenshotService::new(job.apply_to(&self.config), self.signals.clone());
            let request = job.request(output_base, self.overwrite);
            let outcome = match service.run_with(&request, runner) {
                Ok(report) => JobOutcome {
                    name: name.to_string(),
                    success: true,
                    outputs: report.outputs,
                    error: None,
                },
                Err(e) => {
                    error!(job = %name, error = %e, "Job failed");
                    JobOutcome {
                        name: name.to_string(),
                        success: false,
                        outputs: Vec::new(),
                        error: Some(e.to_string()),
                    }
                }
            };
            summary.record(outcome);
        }
        info!(
            total = summary.total,
            successful = summary.successful,
            failed = summary.failed,
            "Jobs finished"
        );
        summary
    }
}
