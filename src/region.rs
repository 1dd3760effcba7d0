//! Region resolution: literal coordinates, legacy text files and BED files into an
//! ordered list of [`RegionGroup`]s.

pub mod bed;
pub mod group;
pub mod legacy;
pub mod resolve;
pub mod token;
pub mod validate;

pub use group::RegionGroup;
pub use resolve::{DescriptorKind, RegionDescriptor, RegionResolver, ResolveReport, SourceSummary};
pub use token::RegionToken;
pub use validate::{validate_descriptors, validate_region, RegionValidation};

/// Groups parsed from one source, with counts of the lines that were passed over.
#[derive(Debug, Default)]
pub struct ParsedSource {
    pub groups: Vec<RegionGroup>,
    /// Blank, comment and header lines.
    pub skipped: usize,
    /// Lines dropped because they did not carry a usable region.
    pub malformed: usize,
}
