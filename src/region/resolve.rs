//! Region descriptor classification and resolution into ordered groups.

use crate::error::RegionError;
use crate::region::bed::{is_bed_path, parse_bed_file};
use crate::region::group::RegionGroup;
use crate::region::legacy::{parse_group_line, parse_legacy_file, LineError};
use crate::region::ParsedSource;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// How a raw descriptor is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionDescriptor {
    /// Inline `chrom:start-end` tokens, optionally with one event tag.
    Literal(String),
    /// Existing file parsed as whitespace-delimited legacy text.
    LegacyFile(PathBuf),
    /// Existing file with a BED extension.
    BedFile(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DescriptorKind {
    Literal,
    LegacyFile,
    BedFile,
}

impl RegionDescriptor {
    /// An existing path is a file (BED by extension, legacy text otherwise); anything
    /// else is a literal.
    pub fn classify(raw: &str) -> Self {
        let path = Path::new(raw);
        if path.is_file() {
            if is_bed_path(path) {
                RegionDescriptor::BedFile(path.to_path_buf())
            } else {
                RegionDescriptor::LegacyFile(path.to_path_buf())
            }
        } else {
            RegionDescriptor::Literal(raw.to_string())
        }
    }

    pub fn kind(&self) -> DescriptorKind {
        match self {
            RegionDescriptor::Literal(_) => DescriptorKind::Literal,
            RegionDescriptor::LegacyFile(_) => DescriptorKind::LegacyFile,
            RegionDescriptor::BedFile(_) => DescriptorKind::BedFile,
        }
    }

    /// The backing file, for descriptors that are files.
    pub fn file_path(&self) -> Option<&Path> {
        match self {
            RegionDescriptor::Literal(_) => None,
            RegionDescriptor::LegacyFile(p) | RegionDescriptor::BedFile(p) => Some(p),
        }
    }
}

/// Per-descriptor resolution counts.
#[derive(Debug, Clone, Serialize)]
pub struct SourceSummary {
    pub descriptor: String,
    pub kind: DescriptorKind,
    pub groups: usize,
    pub skipped: usize,
    pub malformed: usize,
}

/// Resolution result: groups in input order plus what was dropped along the way.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResolveReport {
    pub groups: Vec<RegionGroup>,
    pub sources: Vec<SourceSummary>,
    /// Files among the descriptors, in descriptor order.
    #[serde(skip)]
    pub region_files: Vec<PathBuf>,
}

impl ResolveReport {
    pub fn malformed_lines(&self) -> usize {
        self.sources.iter().map(|s| s.malformed).sum()
    }
}

/// Turns heterogeneous region descriptors into an ordered list of [`RegionGroup`]s.
#[derive(Debug, Clone, Default)]
pub struct RegionResolver {
    tag: Option<String>,
}

impl RegionResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suffix stamped on every resolved group.
    pub fn with_tag(mut self, tag: Option<String>) -> Self {
        self.tag = tag.filter(|t| !t.is_empty());
        self
    }

    /// Resolve descriptors in order; the output concatenates each descriptor's groups.
    pub fn resolve<S: AsRef<str>>(&self, descriptors: &[S]) -> Result<ResolveReport, RegionError> {
        let mut report = ResolveReport::default();

        for raw in descriptors {
            let raw = raw.as_ref();
            let descriptor = RegionDescriptor::classify(raw);
            let parsed = match &descriptor {
                RegionDescriptor::Literal(text) => parse_literal(text)?,
                RegionDescriptor::LegacyFile(path) => parse_legacy_file(path)?,
                RegionDescriptor::BedFile(path) => parse_bed_file(path)?,
            };

            if parsed.malformed > 0 {
                tracing::warn!(
                    descriptor = raw,
                    malformed = parsed.malformed,
                    "Skipped malformed region lines"
                );
            }
            if let Some(path) = descriptor.file_path() {
                report.region_files.push(path.to_path_buf());
            }
            report.sources.push(SourceSummary {
                descriptor: raw.to_string(),
                kind: descriptor.kind(),
                groups: parsed.groups.len(),
                skipped: parsed.skipped,
                malformed: parsed.malformed,
            });
            report.groups.extend(
                parsed
                    .groups
                    .into_iter()
                    .map(|g| g.with_tag(self.tag.clone())),
            );
        }

        tracing::debug!(
            groups = report.groups.len(),
            descriptors = descriptors.len(),
            "Resolved region descriptors"
        );
        Ok(report)
    }
}

/// A literal is parsed like one legacy line. A literal without coordinates is an
/// error right away: `NotFound` when it looks like a path, `Invalid` otherwise.
fn parse_literal(text: &str) -> Result<ParsedSource, RegionError> {
    match parse_group_line(text) {
        Ok(Some(group)) => Ok(ParsedSource {
            groups: vec![group],
            skipped: 0,
            malformed: 0,
        }),
        Ok(None) if looks_like_path(text) => Err(RegionError::NotFound {
            descriptor: text.to_string(),
        }),
        Ok(None) => Err(RegionError::invalid(
            text,
            "expected chrom:start-end or an existing region file",
        )),
        Err(LineError::AmbiguousTag(tokens)) => Err(RegionError::invalid(
            text,
            format!(
                "more than one non-region token ({}); only one event tag is allowed",
                tokens.join(", ")
            ),
        )),
        Err(LineError::Invalid { region, reason }) => Err(RegionError::Invalid { region, reason }),
    }
}

fn looks_like_path(text: &str) -> bool {
    let text = text.trim();
    if text.contains('/') || text.contains('\\') {
        return true;
    }
    !text.contains(':') && Path::new(text).extension().is_some()
}
