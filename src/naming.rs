//! Output formats and deterministic snapshot file names.

use crate::error::IgverError;
use crate::region::{RegionGroup, RegionToken};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Final artifact format requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Svg,
    Pdf,
}

/// Work done on a snapshot after the viewer has written it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PostProcess {
    None,
    SvgToPdf,
}

/// format -> (snapshot extension, post-processing step)
const FORMAT_TABLE: &[(OutputFormat, &str, PostProcess)] = &[
    (OutputFormat::Png, "png", PostProcess::None),
    (OutputFormat::Svg, "svg", PostProcess::None),
    (OutputFormat::Pdf, "svg", PostProcess::SvgToPdf),
];

impl OutputFormat {
    fn row(self) -> (&'static str, PostProcess) {
        FORMAT_TABLE
            .iter()
            .find(|(format, _, _)| *format == self)
            .map(|(_, ext, post)| (*ext, *post))
            .unwrap_or(("png", PostProcess::None))
    }

    /// Extension of the file the viewer writes.
    pub fn snapshot_extension(self) -> &'static str {
        self.row().0
    }

    pub fn post_process(self) -> PostProcess {
        self.row().1
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
            OutputFormat::Pdf => "pdf",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = IgverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "svg" => Ok(OutputFormat::Svg),
            "pdf" => Ok(OutputFormat::Pdf),
            other => Err(IgverError::invalid_configuration(format!(
                "unsupported output format '{}' (expected png, svg or pdf)",
                other
            ))),
        }
    }
}

/// Pure mapping from a group to its snapshot file name.
#[derive(Debug, Clone)]
pub struct OutputNaming {
    output_dir: PathBuf,
    format: OutputFormat,
}

impl OutputNaming {
    pub fn new(output_dir: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self {
            output_dir: output_dir.into(),
            format,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// `<loci joined by '.'>[.<name>|.<event tag>][.<tag>].<ext>`, with `:` in each
    /// locus replaced by `-`. Labels have path separators and whitespace mapped to
    /// `_`, so the name is one path component and one `snapshot` argument.
    pub fn file_name(&self, group: &RegionGroup) -> String {
        let mut parts: Vec<String> = group.tokens().iter().map(RegionToken::file_stem).collect();
        if let Some(label) = group.name().or(group.event_tag()) {
            parts.push(file_safe_label(label));
        }
        if let Some(tag) = group.tag() {
            parts.push(file_safe_label(tag));
        }
        parts.push(self.format.snapshot_extension().to_string());
        parts.join(".")
    }

    pub fn path(&self, group: &RegionGroup) -> PathBuf {
        self.output_dir.join(self.file_name(group))
    }

    pub fn expected_outputs(&self, groups: &[RegionGroup]) -> ExpectedOutputSet {
        ExpectedOutputSet::new(groups.iter().map(|g| self.path(g)).collect())
    }
}

fn file_safe_label(label: &str) -> String {
    label
        .chars()
        .map(|c| {
            if c == '/' || c == '\\' || c.is_whitespace() || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect()
}

/// Output paths index-aligned with the groups and with the snapshot commands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExpectedOutputSet {
    paths: Vec<PathBuf>,
}

impl ExpectedOutputSet {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn all_exist(&self) -> bool {
        self.paths.iter().all(|p| p.exists())
    }

    pub fn any_exist(&self) -> bool {
        self.paths.iter().any(|p| p.exists())
    }

    /// Paths not yet on disk, in order.
    pub fn missing(&self) -> Vec<PathBuf> {
        self.paths.iter().filter(|p| !p.exists()).cloned().collect()
    }

    pub fn into_paths(self) -> Vec<PathBuf> {
        self.paths
    }
}
