//! Viewer batch protocol: one command per line.

use crate::error::IgverError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// How overlapping features are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OverlapDisplay {
    Expand,
    Collapse,
    #[default]
    Squish,
}

impl OverlapDisplay {
    pub fn as_str(self) -> &'static str {
        match self {
            OverlapDisplay::Expand => "expand",
            OverlapDisplay::Collapse => "collapse",
            OverlapDisplay::Squish => "squish",
        }
    }

    /// `expand` is the viewer default and needs no command.
    pub fn directive(self) -> Option<BatchCommand> {
        match self {
            OverlapDisplay::Expand => None,
            other => Some(BatchCommand::Overlap(other)),
        }
    }
}

impl fmt::Display for OverlapDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OverlapDisplay {
    type Err = IgverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "expand" => Ok(OverlapDisplay::Expand),
            "collapse" => Ok(OverlapDisplay::Collapse),
            "squish" => Ok(OverlapDisplay::Squish),
            other => Err(IgverError::invalid_configuration(format!(
                "invalid overlap display '{}' (expected expand, collapse or squish)",
                other
            ))),
        }
    }
}

/// One line of a batch document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchCommand {
    New,
    SnapshotDirectory(PathBuf),
    Genome(String),
    Load(PathBuf),
    Goto(String),
    Overlap(OverlapDisplay),
    MaxPanelHeight(u32),
    /// Preference text passed through verbatim.
    Raw(String),
    Snapshot(String),
    Exit,
}

impl fmt::Display for BatchCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchCommand::New => f.write_str("new"),
            BatchCommand::SnapshotDirectory(dir) => {
                write!(f, "snapshotDirectory {}", dir.display())
            }
            BatchCommand::Genome(genome) => write!(f, "genome {}", genome),
            BatchCommand::Load(path) => write!(f, "load {}", path.display()),
            BatchCommand::Goto(target) => write!(f, "goto {}", target),
            BatchCommand::Overlap(mode) => f.write_str(mode.as_str()),
            BatchCommand::MaxPanelHeight(height) => write!(f, "maxPanelHeight {}", height),
            BatchCommand::Raw(text) => f.write_str(text),
            BatchCommand::Snapshot(name) => write!(f, "snapshot {}", name),
            BatchCommand::Exit => f.write_str("exit"),
        }
    }
}

/// Compiled command sequence handed to the viewer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchDocument {
    commands: Vec<BatchCommand>,
}

impl BatchDocument {
    pub(crate) fn from_commands(commands: Vec<BatchCommand>) -> Self {
        Self { commands }
    }

    pub fn commands(&self) -> &[BatchCommand] {
        &self.commands
    }

    pub fn snapshot_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, BatchCommand::Snapshot(_)))
            .count()
    }

    /// Newline-joined text, no trailing newline.
    pub fn render(&self) -> String {
        self.commands
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
