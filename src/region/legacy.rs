//! Legacy whitespace-delimited region lines.
//!
//! Each line holds one or more `chrom:start-end` tokens plus at most one free-text event
//! tag, e.g. `8:32534767-32536767 19:11137898-11139898 translocation`. All coordinate
//! tokens on a line form one multi-locus group.

use crate::error::RegionError;
use crate::region::group::RegionGroup;
use crate::region::token::{looks_like_region, RegionToken};
use crate::region::ParsedSource;
use std::path::Path;

/// Why a single line could not become a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LineError {
    /// More than one non-coordinate token; the intended event tag is unclear.
    AmbiguousTag(Vec<String>),
    /// A coordinate-shaped token failed to parse.
    Invalid { region: String, reason: String },
}

/// Parse one line. `Ok(None)` means the line carries no coordinate tokens.
pub(crate) fn parse_group_line(line: &str) -> Result<Option<RegionGroup>, LineError> {
    let mut tokens = Vec::new();
    let mut others = Vec::new();

    for field in line.split_whitespace() {
        if looks_like_region(field) {
            let token = RegionToken::parse(field).map_err(|e| match e {
                RegionError::Invalid { region, reason } => LineError::Invalid { region, reason },
                other => LineError::Invalid {
                    region: field.to_string(),
                    reason: other.to_string(),
                },
            })?;
            tokens.push(token);
        } else {
            others.push(field.to_string());
        }
    }

    if tokens.is_empty() {
        return Ok(None);
    }
    if others.len() > 1 {
        return Err(LineError::AmbiguousTag(others));
    }

    let group = RegionGroup::new(tokens)
        .map_err(|e| LineError::Invalid {
            region: line.trim().to_string(),
            reason: e.to_string(),
        })?
        .with_event_tag(others.pop());
    Ok(Some(group))
}

/// Parse legacy text content. Blank and `#` lines are skipped; lines without any
/// coordinate token are counted as malformed and skipped.
pub fn parse_legacy_str(content: &str, source_path: &Path) -> Result<ParsedSource, RegionError> {
    let mut parsed = ParsedSource::default();

    for (index, raw) in content.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            parsed.skipped += 1;
            continue;
        }

        match parse_group_line(line) {
            Ok(Some(group)) => parsed.groups.push(group),
            Ok(None) => {
                tracing::debug!(
                    path = %source_path.display(),
                    line = line_no,
                    "Skipping region line without coordinates"
                );
                parsed.malformed += 1;
            }
            Err(LineError::AmbiguousTag(tokens)) => {
                return Err(RegionError::AmbiguousEventTag {
                    source_path: source_path.to_path_buf(),
                    line: line_no,
                    tokens,
                });
            }
            Err(LineError::Invalid { region, reason }) => {
                return Err(RegionError::InvalidLine {
                    source_path: source_path.to_path_buf(),
                    line: line_no,
                    reason: format!("'{}': {}", region, reason),
                });
            }
        }
    }

    Ok(parsed)
}

/// Read and parse a legacy region file.
pub fn parse_legacy_file(path: &Path) -> Result<ParsedSource, RegionError> {
    let content = std::fs::read_to_string(path).map_err(|source| RegionError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_legacy_str(&content, path)
}
