//! Strict region validation for reporting (`igver validate`).

use crate::error::RegionError;
use crate::genome::{chromosome_sizes, Genome};
use crate::region::resolve::RegionResolver;
use crate::region::token::looks_like_region;
use regex::Regex;
use serde::Serialize;
use std::path::Path;
use std::sync::OnceLock;

const REGION_SHAPE: &str = r"^(chr)?([0-9XYM]+):(\d+)-(\d+)$";

fn region_shape() -> &'static Regex {
    static SHAPE: OnceLock<Regex> = OnceLock::new();
    SHAPE.get_or_init(|| Regex::new(REGION_SHAPE).expect("region shape pattern compiles"))
}

/// Outcome of validating one region string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionValidation {
    pub region: String,
    pub valid: bool,
    pub reason: String,
}

impl RegionValidation {
    fn ok(region: &str) -> Self {
        Self {
            region: region.to_string(),
            valid: true,
            reason: "valid region".to_string(),
        }
    }

    fn invalid(region: &str, reason: impl Into<String>) -> Self {
        Self {
            region: region.to_string(),
            valid: false,
            reason: reason.into(),
        }
    }
}

/// Validate one `chrom:start-end` string: shape, `start > 0`, `end > start`, and when
/// the genome has known chromosome sizes, `end <= size`.
pub fn validate_region(region: &str, genome: Option<&Genome>) -> RegionValidation {
    let cleaned: String = region.trim().chars().filter(|c| *c != ',').collect();
    let Some(caps) = region_shape().captures(&cleaned) else {
        return RegionValidation::invalid(
            region,
            format!("invalid region format (expected chrom:start-end): {}", cleaned),
        );
    };

    let chrom = &caps[2];
    let (Ok(start), Ok(end)) = (caps[3].parse::<u64>(), caps[4].parse::<u64>()) else {
        return RegionValidation::invalid(region, "position does not fit in 64 bits");
    };

    if start == 0 {
        return RegionValidation::invalid(region, "start position must be greater than 0");
    }
    if end <= start {
        return RegionValidation::invalid(
            region,
            "end position must be greater than start position",
        );
    }
    if let Some(sizes) = genome.and_then(chromosome_sizes) {
        if let Some(max) = sizes.get(chrom) {
            if end > max {
                return RegionValidation::invalid(
                    region,
                    format!("end position exceeds chromosome {} size ({})", chrom, max),
                );
            }
        }
    }
    RegionValidation::ok(region)
}

/// Validate descriptors the way [`RegionResolver`] reads them: files are expanded and
/// every locus checked; literals have each coordinate token checked.
pub fn validate_descriptors<S: AsRef<str>>(
    descriptors: &[S],
    genome: Option<&Genome>,
) -> Result<Vec<RegionValidation>, RegionError> {
    let mut results = Vec::new();
    for raw in descriptors {
        let raw = raw.as_ref();
        if Path::new(raw).is_file() {
            let report = RegionResolver::new().resolve(&[raw])?;
            for group in &report.groups {
                for token in group.tokens() {
                    results.push(validate_region(&token.locus(), genome));
                }
            }
            continue;
        }

        let coordinates: Vec<&str> = raw
            .split_whitespace()
            .filter(|t| looks_like_region(t))
            .collect();
        if coordinates.is_empty() {
            results.push(validate_region(raw, genome));
        } else {
            results.extend(coordinates.into_iter().map(|t| validate_region(t, genome)));
        }
    }
    Ok(results)
}
