//! Renderable units: one or more loci shown side by side in a single snapshot.

use crate::error::RegionError;
use crate::region::token::RegionToken;
use serde::Serialize;

/// One renderable unit mapping to exactly one output artifact.
///
/// Several tokens produce a split-screen multi-locus view (e.g. both breakpoints of a
/// translocation). Immutable once resolution has finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionGroup {
    tokens: Vec<RegionToken>,
    #[serde(skip_serializing_if = "Option::is_none")]
    event_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tag: Option<String>,
}

impl RegionGroup {
    pub fn new(tokens: Vec<RegionToken>) -> Result<Self, RegionError> {
        if tokens.is_empty() {
            return Err(RegionError::invalid("", "region group has no coordinates"));
        }
        Ok(Self {
            tokens,
            event_tag: None,
            name: None,
            tag: None,
        })
    }

    pub fn single(token: RegionToken) -> Self {
        Self {
            tokens: vec![token],
            event_tag: None,
            name: None,
            tag: None,
        }
    }

    /// Free-text event label from a legacy text line (e.g. `deletion`).
    pub fn with_event_tag(mut self, event_tag: Option<String>) -> Self {
        self.event_tag = event_tag.filter(|t| !t.is_empty());
        self
    }

    /// BED column 4.
    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name.filter(|n| !n.is_empty());
        self
    }

    /// Caller-supplied suffix appended to every output name.
    pub fn with_tag(mut self, tag: Option<String>) -> Self {
        self.tag = tag.filter(|t| !t.is_empty());
        self
    }

    pub fn tokens(&self) -> &[RegionToken] {
        &self.tokens
    }

    pub fn event_tag(&self) -> Option<&str> {
        self.event_tag.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Space-separated loci for the `goto` command.
    pub fn goto_target(&self) -> String {
        self.tokens
            .iter()
            .map(RegionToken::locus)
            .collect::<Vec<_>>()
            .join(" ")
    }
}
