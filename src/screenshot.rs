//! Screenshot service: the library entry point tying resolution, naming, compilation,
//! runtime selection and orchestration together.
//!
//! Every input and configuration check happens in [`ScreenshotService::plan`], before
//! any file is written or process spawned.

use crate::batch::{compile, BatchDocument, RenderJob};
use crate::config::IgverConfig;
use crate::error::{IgverError, RegionError};
use crate::genome::Genome;
use crate::naming::{ExpectedOutputSet, OutputFormat, OutputNaming, PostProcess};
use crate::orchestrator::{
    Orchestrator, OrchestratorOptions, PdfConverter, ProcessRunner, SystemRunner,
};
use crate::paths::absolute;
use crate::region::{RegionResolver, SourceSummary};
use crate::runtime::{EnvironmentSignals, Launcher, MountSet, RuntimeEnvironment, RuntimeSelector};
use crate::tracks::TrackSet;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// What to render in one run. Rendering settings come from [`IgverConfig`].
#[derive(Debug, Clone, Default)]
pub struct ScreenshotRequest {
    /// Track files, or a single `.txt` track list.
    pub tracks: Vec<PathBuf>,
    /// Literal regions or region files.
    pub regions: Vec<String>,
    pub output_dir: PathBuf,
    /// Suffix appended to every output name.
    pub tag: Option<String>,
    /// Remove existing snapshots and render again.
    pub overwrite: bool,
}

/// Everything a run would do, computed without side effects.
#[derive(Debug, Clone, Serialize)]
pub struct RunPlan {
    pub genome: Genome,
    pub format: OutputFormat,
    pub post_process: PostProcess,
    pub output_dir: PathBuf,
    pub scratch_dir: PathBuf,
    pub tracks: TrackSet,
    pub jobs: Vec<RenderJob>,
    pub expected: ExpectedOutputSet,
    pub sources: Vec<SourceSummary>,
    pub runtime: RuntimeEnvironment,
    /// Viewer command with a placeholder batch path.
    pub command: String,
    /// Batch script text.
    pub batch: String,
    #[serde(skip)]
    pub document: BatchDocument,
}

impl RunPlan {
    /// Final artifact paths after post-processing.
    pub fn final_outputs(&self) -> Vec<PathBuf> {
        match self.post_process {
            PostProcess::None => self.expected.paths().to_vec(),
            PostProcess::SvgToPdf => self
                .expected
                .paths()
                .iter()
                .map(|p| p.with_extension("pdf"))
                .collect(),
        }
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct ScreenshotReport {
    pub outputs: Vec<PathBuf>,
    pub attempts: usize,
    pub reused_existing: bool,
    pub runtime: crate::runtime::RuntimeKind,
    pub groups: usize,
    pub malformed_lines: usize,
}

pub struct ScreenshotService {
    config: IgverConfig,
    signals: EnvironmentSignals,
}

impl ScreenshotService {
    pub fn new(config: IgverConfig, signals: EnvironmentSignals) -> Self {
        Self { config, signals }
    }

    pub fn config(&self) -> &IgverConfig {
        &self.config
    }

    /// Resolve, name, compile and select a runtime. Reads inputs only.
    pub fn plan(&self, request: &ScreenshotRequest) -> Result<RunPlan, IgverError> {
        self.config.ensure_valid()?;
        let render = &self.config.render;
        let format = render.output_format()?;
        let options = render.render_options()?;

        if request.tracks.is_empty() {
            return Err(IgverError::invalid_configuration("no track files given"));
        }
        let tracks = TrackSet::from_inputs(&request.tracks)?.into_absolute();
        tracks.verify_exists()?;

        if request.regions.is_empty() {
            return Err(IgverError::invalid_configuration("no regions given"));
        }
        let report = RegionResolver::new()
            .with_tag(request.tag.clone())
            .resolve(&request.regions)?;
        if report.groups.is_empty() {
            return Err(RegionError::invalid(
                request.regions.join(" "),
                "no regions found in the given inputs",
            )
            .into());
        }

        let genome = self.config.genomes.alias_table().resolve(&render.genome);
        let output_dir = absolute(&request.output_dir);
        let scratch_dir = self
            .config
            .runtime
            .scratch_dir
            .as_deref()
            .map(absolute)
            .unwrap_or_else(|| output_dir.clone());

        let naming = OutputNaming::new(&output_dir, format);
        let expected = naming.expected_outputs(&report.groups);
        let jobs: Vec<RenderJob> = report
            .groups
            .iter()
            .cloned()
            .zip(expected.paths().iter().cloned())
            .map(|(group, output_path)| RenderJob { group, output_path })
            .collect();
        let document = compile(&tracks, &genome, &output_dir, &jobs, &options);

        let mounts = MountSet::for_run(
            &self.config.runtime.extra_binds,
            &tracks,
            &report.region_files,
            &output_dir,
            &scratch_dir,
        );
        let selector = RuntimeSelector::new(self.config.runtime.clone(), self.signals.clone());
        let runtime = selector.environment(&mounts);
        let command = Launcher::new(runtime.clone(), self.config.viewer.clone())
            .command_for(&scratch_dir.join("igver-XXXXXX.batch"))
            .display();

        info!(
            groups = jobs.len(),
            tracks = tracks.len(),
            genome = %genome,
            format = %format,
            runtime = %runtime.kind(),
            "Planned screenshot run"
        );

        Ok(RunPlan {
            genome,
            format,
            post_process: format.post_process(),
            output_dir,
            scratch_dir,
            tracks,
            jobs,
            expected,
            sources: report.sources,
            runtime,
            command,
            batch: document.render(),
            document,
        })
    }

    /// Run with real processes.
    pub fn run(&self, request: &ScreenshotRequest) -> Result<ScreenshotReport, IgverError> {
        let runner = SystemRunner::new(self.config.viewer.timeout_secs.map(Duration::from_secs));
        self.run_with(request, &runner)
    }

    pub fn run_with<R: ProcessRunner>(
        &self,
        request: &ScreenshotRequest,
        runner: &R,
    ) -> Result<ScreenshotReport, IgverError> {
        let plan = self.plan(request)?;
        std::fs::create_dir_all(&plan.output_dir)?;

        let launcher = Launcher::new(plan.runtime.clone(), self.config.viewer.clone());
        let orchestrator = Orchestrator::new(
            runner,
            &launcher,
            OrchestratorOptions {
                max_iterations: self.config.viewer.max_iterations,
                overwrite: request.overwrite,
                scratch_dir: plan.scratch_dir.clone(),
            },
        );
        let outcome = orchestrator.execute(&plan.document, &plan.expected)?;

        let outputs = match plan.post_process {
            PostProcess::None => outcome.outputs.into_paths(),
            PostProcess::SvgToPdf => PdfConverter::new(&self.config.convert, self.config.render.dpi)
                .convert_all(outcome.outputs.paths(), self.config.render.keep_intermediate)?,
        };

        info!(outputs = outputs.len(), attempts = outcome.attempts, "Screenshots ready");
        Ok(ScreenshotReport {
            outputs,
            attempts: outcome.attempts,
            reused_existing: outcome.reused_existing,
            runtime: plan.runtime.kind(),
            groups: plan.jobs.len(),
            malformed_lines: plan.sources.iter().map(|s| s.malformed).sum(),
        })
    }
}
