//! Error types for the IGVer screenshot engine.

use std::path::PathBuf;
use thiserror::Error;

/// Region resolution errors
#[derive(Debug, Error)]
pub enum RegionError {
    #[error("Region input not found: {descriptor} (not an existing file and not a chrom:start-end region)")]
    NotFound { descriptor: String },

    #[error("Invalid region '{region}': {reason}")]
    Invalid { region: String, reason: String },

    #[error("Invalid region at {}:{line}: {reason}", source_path.display())]
    InvalidLine {
        source_path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error(
        "Ambiguous event tag at {}:{line}: more than one non-region token ({})",
        source_path.display(),
        tokens.join(", ")
    )]
    AmbiguousEventTag {
        source_path: PathBuf,
        line: usize,
        tokens: Vec<String>,
    },

    #[error("Failed to read region file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RegionError {
    pub fn invalid(region: impl Into<String>, reason: impl Into<String>) -> Self {
        RegionError::Invalid {
            region: region.into(),
            reason: reason.into(),
        }
    }
}

/// Engine-level errors surfaced to the CLI and library callers
#[derive(Debug, Error)]
pub enum IgverError {
    #[error("{what} not found: {}", path.display())]
    InputNotFound { what: String, path: PathBuf },

    #[error(transparent)]
    Region(#[from] RegionError),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error(
        "Screenshots still missing after {iterations} attempt(s): {}. Batch script kept at {}{}",
        display_paths(missing),
        batch_script.display(),
        last_output_suffix(last_output)
    )]
    ExecutionExhausted {
        iterations: usize,
        missing: Vec<PathBuf>,
        batch_script: PathBuf,
        last_output: String,
    },

    #[error("PDF conversion unavailable: '{program}' could not be run (install librsvg or set [convert] program)")]
    ConversionUnavailable { program: String },

    #[error("PDF conversion failed for {}: {message}", path.display())]
    ConversionFailed { path: PathBuf, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IgverError {
    pub fn input_not_found(what: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        IgverError::InputNotFound {
            what: what.into(),
            path: path.into(),
        }
    }

    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        IgverError::InvalidConfiguration(msg.into())
    }
}

impl From<config::ConfigError> for IgverError {
    fn from(err: config::ConfigError) -> Self {
        IgverError::Config(err.to_string())
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn last_output_suffix(last_output: &str) -> String {
    let trimmed = last_output.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(". Last viewer output: {}", trimmed)
    }
}
