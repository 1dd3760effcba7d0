//! SVG to PDF conversion after a successful run.

use crate::error::IgverError;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// `[convert]` configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertConfig {
    /// Converter executable; invoked as `<program> -f pdf --dpi-x D --dpi-y D -o out in`.
    #[serde(default = "default_program")]
    pub program: String,
}

fn default_program() -> String {
    "rsvg-convert".to_string()
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
        }
    }
}

/// Shells out to an rsvg-convert compatible tool.
#[derive(Debug, Clone)]
pub struct PdfConverter {
    program: String,
    dpi: u32,
}

impl PdfConverter {
    pub fn new(config: &ConvertConfig, dpi: u32) -> Self {
        Self {
            program: config.program.clone(),
            dpi,
        }
    }

    /// True when `<program> --version` runs successfully.
    pub fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    pub fn args_for(&self, svg: &Path, pdf: &Path) -> Vec<OsString> {
        let dpi = self.dpi.to_string();
        vec![
            "-f".into(),
            "pdf".into(),
            "--dpi-x".into(),
            dpi.clone().into(),
            "--dpi-y".into(),
            dpi.into(),
            "-o".into(),
            pdf.into(),
            svg.into(),
        ]
    }

    /// Convert one SVG, writing the PDF next to it.
    pub fn convert(&self, svg: &Path) -> Result<PathBuf, IgverError> {
        let pdf = svg.with_extension("pdf");
        let output = Command::new(&self.program)
            .args(self.args_for(svg, &pdf))
            .stdin(Stdio::null())
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound | ErrorKind::PermissionDenied => {
                    IgverError::ConversionUnavailable {
                        program: self.program.clone(),
                    }
                }
                _ => IgverError::ConversionFailed {
                    path: svg.to_path_buf(),
                    message: e.to_string(),
                },
            })?;

        if !output.status.success() || !pdf.exists() {
            return Err(IgverError::ConversionFailed {
                path: svg.to_path_buf(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        tracing::debug!(svg = %svg.display(), pdf = %pdf.display(), "Converted snapshot to PDF");
        Ok(pdf)
    }

    /// Convert every SVG in order; the converter is probed once up front. Intermediate
    /// SVGs are removed unless `keep_intermediate`.
    pub fn convert_all(
        &self,
        svgs: &[PathBuf],
        keep_intermediate: bool,
    ) -> Result<Vec<PathBuf>, IgverError> {
        if !self.is_available() {
            return Err(IgverError::ConversionUnavailable {
                program: self.program.clone(),
            });
        }
        let mut pdfs = Vec::with_capacity(svgs.len());
        for svg in svgs {
            let pdf = self.convert(svg)?;
            if !keep_intermediate {
                std::fs::remove_file(svg)?;
            }
            pdfs.push(pdf);
        }
        tracing::info!(converted = pdfs.len(), "PDF conversion finished");
        Ok(pdfs)
    }
}
