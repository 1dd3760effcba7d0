//! Configuration System
//!
//! Layered configuration for the screenshot engine: built-in defaults, the global
//! config file, an explicit `--config` file and `IGVER__SECTION__KEY` environment
//! variables, in that order. Values are validated eagerly so a bad overlap mode or
//! output format fails before anything is written or spawned.

use crate::batch::{OverlapDisplay, RenderOptions};
use crate::error::IgverError;
use crate::genome::GenomeAliases;
use crate::logging::LoggingConfig;
use crate::naming::OutputFormat;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

mod merge;
mod sources;

pub use crate::orchestrator::ConvertConfig;
pub use crate::runtime::{RuntimeConfig, ViewerConfig};
pub use sources::global_file::global_config_path;

/// Environment variable overriding `runtime.image`.
pub const IMAGE_ENV: &str = "IGVER_IMAGE";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IgverConfig {
    #[serde(default)]
    pub viewer: ViewerConfig,

    #[serde(default)]
    pub runtime: RuntimeConfig,

    #[serde(default)]
    pub render: RenderConfig,

    #[serde(default)]
    pub convert: ConvertConfig,

    #[serde(default)]
    pub genomes: GenomesConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Rendering defaults, overridable per run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_genome")]
    pub genome: String,

    /// expand, collapse or squish
    #[serde(default = "default_overlap_display")]
    pub overlap_display: String,

    #[serde(default = "default_max_panel_height")]
    pub max_panel_height: u32,

    /// png, svg or pdf
    #[serde(default = "default_format")]
    pub format: String,

    /// Resolution used for PDF conversion
    #[serde(default = "default_dpi")]
    pub dpi: u32,

    /// File of raw viewer preference lines appended to every snapshot block
    #[serde(default)]
    pub preferences: Option<PathBuf>,

    /// Keep intermediate SVGs after PDF conversion
    #[serde(default)]
    pub keep_intermediate: bool,
}

fn default_genome() -> String {
    "hg19".to_string()
}

fn default_overlap_display() -> String {
    "squish".to_string()
}

fn default_max_panel_height() -> u32 {
    200
}

fn default_format() -> String {
    "png".to_string()
}

fn default_dpi() -> u32 {
    300
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            genome: default_genome(),
            overlap_display: default_overlap_display(),
            max_panel_height: default_max_panel_height(),
            format: default_format(),
            dpi: default_dpi(),
            preferences: None,
            keep_intermediate: false,
        }
    }
}

impl RenderConfig {
    pub fn output_format(&self) -> Result<OutputFormat, IgverError> {
        self.format.parse()
    }

    pub fn overlap(&self) -> Result<OverlapDisplay, IgverError> {
        self.overlap_display.parse()
    }

    /// Checked render options, with preference lines read from the configured file.
    pub fn render_options(&self) -> Result<RenderOptions, IgverError> {
        RenderOptions::from_raw(&self.overlap_display, self.max_panel_height, None)?
            .with_preferences_file(self.preferences.as_deref())
    }
}

/// Extra genome aliases merged over the built-in table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenomesConfig {
    #[serde(default)]
    pub aliases: HashMap<String, String>,
}

impl GenomesConfig {
    pub fn alias_table(&self) -> GenomeAliases {
        GenomeAliases::with_overrides(&self.aliases)
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Viewer(String),
    Render(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Viewer(msg) => write!(f, "viewer: {}", msg),
            ValidationError::Render(msg) => write!(f, "render: {}", msg),
            ValidationError::Logging(msg) => write!(f, "logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl IgverConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.viewer.max_iterations == 0 {
            errors.push(ValidationError::Viewer(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        if self.viewer.launcher.trim().is_empty() {
            errors.push(ValidationError::Viewer("launcher cannot be empty".to_string()));
        }
        if let Err(e) = self.render.overlap() {
            errors.push(ValidationError::Render(e.to_string()));
        }
        if let Err(e) = self.render.output_format() {
            errors.push(ValidationError::Render(e.to_string()));
        }
        if self.render.max_panel_height == 0 {
            errors.push(ValidationError::Render(
                "max_panel_height must be greater than 0".to_string(),
            ));
        }
        if self.render.dpi == 0 {
            errors.push(ValidationError::Render("dpi must be greater than 0".to_string()));
        }
        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// [`validate`](Self::validate) folded into one configuration error.
    pub fn ensure_valid(&self) -> Result<(), IgverError> {
        self.validate().map_err(|errors| {
            let msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            IgverError::invalid_configuration(msgs.join("; "))
        })
    }
}

/// Builds an [`IgverConfig`] from the configured sources.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    global_path: Option<PathBuf>,
    explicit_path: Option<PathBuf>,
    environment: Option<HashMap<String, String>>,
    read_process_env: bool,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self {
            global_path: global_config_path(),
            explicit_path: None,
            environment: None,
            read_process_env: true,
        }
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from defaults, the global file and the environment.
    pub fn load() -> Result<IgverConfig, IgverError> {
        Self::new().build()
    }

    /// Load with an explicit config file layered over the global one.
    pub fn load_from_file(path: &Path) -> Result<IgverConfig, IgverError> {
        Self::new().with_file(path).build()
    }

    /// Replace the global file location (`None` skips it).
    pub fn with_global_path(mut self, path: Option<PathBuf>) -> Self {
        self.global_path = path;
        self
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit_path = Some(path.into());
        self
    }

    /// Use `vars` instead of the process environment.
    pub fn with_environment(mut self, vars: HashMap<String, String>) -> Self {
        self.environment = Some(vars);
        self.read_process_env = false;
        self
    }

    pub fn build(&self) -> Result<IgverConfig, IgverError> {
        let mut builder = merge::merge_policy::builder_with_defaults()?;
        builder = sources::global_file::add_to_builder(builder, self.global_path.as_deref())?;

        if let Some(path) = &self.explicit_path {
            if !path.is_file() {
                return Err(IgverError::input_not_found("config file", path));
            }
            builder = builder.add_source(config::File::from(path.as_path()).required(true));
        }

        builder = sources::environment::add_to_builder(builder, self.environment.clone())?;

        let mut config: IgverConfig = builder.build()?.try_deserialize()?;

        let image_override = match &self.environment {
            Some(vars) => vars.get(IMAGE_ENV).cloned(),
            None if self.read_process_env => std::env::var(IMAGE_ENV).ok(),
            None => None,
        };
        if let Some(image) = image_override.filter(|i| !i.trim().is_empty()) {
            tracing::debug!(image = %image, "Container image overridden from environment");
            config.runtime.image = image;
        }

        config.ensure_valid()?;
        Ok(config)
    }
}
