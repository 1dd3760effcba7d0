//! BED3/BED6 region files.

use crate::error::RegionError;
use crate::region::group::RegionGroup;
use crate::region::token::RegionToken;
use crate::region::ParsedSource;
use std::path::Path;

/// File extensions parsed as BED.
pub const BED_EXTENSIONS: &[&str] = &["bed", "bed3", "bed6"];

/// True when `path` carries a recognized BED extension (case-insensitive).
pub fn is_bed_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            BED_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

fn is_header(line: &str) -> bool {
    line.starts_with('#') || line.starts_with("track") || line.starts_with("browser")
}

/// Parse BED content. Columns 1-3 are chromosome/start/end, column 4 (if non-empty)
/// becomes the group name. Lines with fewer than three tab-separated fields are skipped.
pub fn parse_bed_str(content: &str, source_path: &Path) -> Result<ParsedSource, RegionError> {
    let mut parsed = ParsedSource::default();

    for (index, raw) in content.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() || is_header(line) {
            parsed.skipped += 1;
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 3 {
            tracing::debug!(
                path = %source_path.display(),
                line = line_no,
                fields = fields.len(),
                "Skipping BED line with fewer than 3 fields"
            );
            parsed.malformed += 1;
            continue;
        }

        let token = RegionToken::from_bed_fields(fields[0], fields[1], fields[2]).map_err(|e| {
            RegionError::InvalidLine {
                source_path: source_path.to_path_buf(),
                line: line_no,
                reason: e.to_string(),
            }
        })?;
        let name = fields
            .get(3)
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        parsed.groups.push(RegionGroup::single(token).with_name(name));
    }

    Ok(parsed)
}

/// Read and parse a BED file.
pub fn parse_bed_file(path: &Path) -> Result<ParsedSource, RegionError> {
    let content = std::fs::read_to_string(path).map_err(|source| RegionError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_bed_str(&content, path)
}
