//! Single coordinate ranges (`chrom:start-end`).

use crate::error::RegionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One genomic coordinate range.
///
/// Constructed either from a `chrom:start-end` string ([`RegionToken::parse`]) or from
/// BED columns ([`RegionToken::from_bed_fields`]). `end` is always greater than `start`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegionToken {
    chrom: String,
    start: u64,
    end: u64,
}

/// True when `token` has the coordinate shape used to classify whitespace-delimited
/// fields: exactly one `:` and exactly one `-`.
pub fn looks_like_region(token: &str) -> bool {
    token.matches(':').count() == 1 && token.matches('-').count() == 1
}

impl RegionToken {
    /// Parse a `chrom:start-end` string. Commas in the numbers are stripped.
    /// Requires `start > 0` and `end > start`.
    pub fn parse(text: &str) -> Result<Self, RegionError> {
        let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
        let (chrom, range) = cleaned
            .split_once(':')
            .ok_or_else(|| RegionError::invalid(text, "missing ':' between chromosome and range"))?;
        let (start, end) = range
            .split_once('-')
            .ok_or_else(|| RegionError::invalid(text, "missing '-' between start and end"))?;

        let start = parse_position(text, start, "start")?;
        let end = parse_position(text, end, "end")?;
        if start == 0 {
            return Err(RegionError::invalid(
                text,
                "start position must be greater than 0",
            ));
        }
        Self::new(chrom, start, end).map_err(|e| match e {
            RegionError::Invalid { reason, .. } => RegionError::invalid(text, reason),
            other => other,
        })
    }

    /// Build a token from BED columns. The start column is kept as-is (no 0-based to
    /// 1-based shift), so a start of 0 is accepted here.
    pub fn from_bed_fields(chrom: &str, start: &str, end: &str) -> Result<Self, RegionError> {
        let label = format!("{}:{}-{}", chrom, start, end);
        let start = parse_position(&label, start, "start")?;
        let end = parse_position(&label, end, "end")?;
        Self::new(chrom, start, end)
    }

    /// Build a token from already-parsed parts.
    pub fn new(chrom: &str, start: u64, end: u64) -> Result<Self, RegionError> {
        let chrom = chrom.trim();
        let label = format!("{}:{}-{}", chrom, start, end);
        if chrom.is_empty() {
            return Err(RegionError::invalid(label, "chromosome name is empty"));
        }
        if chrom.chars().any(char::is_whitespace) {
            return Err(RegionError::invalid(
                label,
                "chromosome name contains whitespace",
            ));
        }
        if end <= start {
            return Err(RegionError::invalid(
                label,
                "end position must be greater than start position",
            ));
        }
        Ok(Self {
            chrom: chrom.to_string(),
            start,
            end,
        })
    }

    pub fn chrom(&self) -> &str {
        &self.chrom
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    /// Locus as the viewer's `goto` command expects it: `chrom:start-end`.
    pub fn locus(&self) -> String {
        format!("{}:{}-{}", self.chrom, self.start, self.end)
    }

    /// File-name fragment: the locus with `:` replaced by `-`.
    pub fn file_stem(&self) -> String {
        self.locus().replace(':', "-")
    }
}

fn parse_position(region: &str, value: &str, which: &str) -> Result<u64, RegionError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(RegionError::invalid(
            region,
            format!("{} position is missing", which),
        ));
    }
    value.parse::<u64>().map_err(|_| {
        RegionError::invalid(
            region,
            format!("{} position '{}' is not a non-negative integer", which, value),
        )
    })
}

impl fmt::Display for RegionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.chrom, self.start, self.end)
    }
}

impl FromStr for RegionToken {
    type Err = RegionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
