//! CLI route: single route table and run context. Dispatches to domain services and presentation.

use crate::config::{ConfigLoader, IgverConfig};
use crate::error::IgverError;
use crate::jobs::{JobRunner, JobsFile};
use crate::region::validate_descriptors;
use crate::runtime::{select_runtime, EnvironmentSignals, RuntimeMode};
use crate::screenshot::{ScreenshotRequest, ScreenshotService};
use std::path::PathBuf;

use crate::cli::parse::{Commands, ScreenshotArgs};
use crate::cli::presentation::{
    format_genomes_json, format_genomes_text, format_jobs_summary_json,
    format_jobs_summary_text, format_plan_json, format_plan_text, format_report_json,
    format_report_text, format_runtime_json, format_runtime_text, format_validation_json,
    format_validation_text,
};

/// Runtime context for CLI execution: loaded configuration and probed environment.
/// Built from an optional config path using ConfigLoader only.
pub struct RunContext {
    config: IgverConfig,
    signals: EnvironmentSignals,
}

impl RunContext {
    /// Create run context from an optional config path. Uses ConfigLoader only.
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, IgverError> {
        let config = match config_path {
            Some(ref path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };
        Ok(Self::with_parts(config, EnvironmentSignals::probe()))
    }

    /// Context over an already loaded configuration and fixed signals.
    pub fn with_parts(config: IgverConfig, signals: EnvironmentSignals) -> Self {
        Self { config, signals }
    }

    pub fn config(&self) -> &IgverConfig {
        &self.config
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, IgverError> {
        match command {
            Commands::Shoot(args) => {
                let (service, request) = self.screenshot_service(args)?;
                let report = service.run(&request)?;
                Ok(match args.output_format.as_str() {
                    "json" => format_report_json(&report),
                    _ => format_report_text(&report),
                })
            }
            Commands::Plan(args) => {
                let (service, request) = self.screenshot_service(args)?;
                let plan = service.plan(&request)?;
                Ok(match args.output_format.as_str() {
                    "json" => format_plan_json(&plan),
                    _ => format_plan_text(&plan),
                })
            }
            Commands::Validate {
                regions,
                genome,
                output_format,
            } => {
                let name = genome.as_deref().unwrap_or(&self.config.render.genome);
                let genome = self.config.genomes.alias_table().resolve(name);
                let results = validate_descriptors(regions, Some(&genome))?;
                Ok(match output_format.as_str() {
                    "json" => format_validation_json(&results),
                    _ => format_validation_text(&results),
                })
            }
            Commands::Genomes { output_format } => {
                let entries = self.config.genomes.alias_table().listing();
                Ok(match output_format.as_str() {
                    "json" => format_genomes_json(&entries),
                    _ => format_genomes_text(&entries),
                })
            }
            Commands::Runtime {
                runtime,
                output_format,
            } => {
                let mode = match runtime {
                    Some(raw) => raw.parse::<RuntimeMode>()?,
                    None => self.config.runtime.mode,
                };
                let selected = select_runtime(mode, &self.signals);
                let image = self.config.runtime.image.as_str();
                Ok(match output_format.as_str() {
                    "json" => format_runtime_json(&self.signals, selected, image),
                    _ => format_runtime_text(&self.signals, selected, image),
                })
            }
            Commands::Jobs {
                file,
                output_base,
                no_overwrite,
                output_format,
            } => {
                let jobs = JobsFile::load(file)?;
                let summary = JobRunner::new(self.config.clone(), self.signals.clone(), !no_overwrite)
                    .run(&jobs, output_base);
                Ok(match output_format.as_str() {
                    "json" => format_jobs_summary_json(&summary),
                    _ => format_jobs_summary_text(&summary),
                })
            }
        }
    }

    /// Fold `shoot`/`plan` flags over the loaded configuration.
    fn screenshot_service(
        &self,
        args: &ScreenshotArgs,
    ) -> Result<(ScreenshotService, ScreenshotRequest), IgverError> {
        let config = apply_screenshot_args(self.config.clone(), args)?;
        let request = ScreenshotRequest {
            tracks: args.input.clone(),
            regions: args.regions.clone(),
            output_dir: args.output.clone(),
            tag: args.tag.clone(),
            overwrite: !args.no_overwrite,
        };
        Ok((ScreenshotService::new(config, self.signals.clone()), request))
    }
}

/// CLI flags override configuration values.
pub(crate) fn apply_screenshot_args(
    mut config: IgverConfig,
    args: &ScreenshotArgs,
) -> Result<IgverConfig, IgverError> {
    if let Some(genome) = &args.genome {
        config.render.genome = genome.clone();
    }
    if let Some(format) = &args.format {
        config.render.format = format.clone();
    }
    if let Some(dpi) = args.dpi {
        config.render.dpi = dpi;
    }
    if let Some(height) = args.max_panel_height {
        config.render.max_panel_height = height;
    }
    if let Some(mode) = &args.overlap_display {
        config.render.overlap_display = mode.clone();
    }
    if let Some(prefs) = &args.igv_config {
        config.render.preferences = Some(prefs.clone());
    }
    if args.keep_intermediate {
        config.render.keep_intermediate = true;
    }
    if let Some(dir) = &args.igv_dir {
        config.viewer.igv_dir = dir.clone();
    }
    if let Some(max) = args.max_iterations {
        config.viewer.max_iterations = max;
    }
    if let Some(runtime) = &args.runtime {
        config.runtime.mode = runtime.parse()?;
    }
    if args.no_singularity {
        config.runtime.mode = RuntimeMode::Native;
    }
    if let Some(image) = &args.image {
        config.runtime.image = image.clone();
    }
    config.runtime.extra_binds.extend(args.bind.iter().cloned());
    Ok(config)
}
