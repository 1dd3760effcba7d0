//! Batch document compilation. Pure: nothing is written here.

use crate::batch::command::{BatchCommand, BatchDocument, OverlapDisplay};
use crate::error::IgverError;
use crate::genome::Genome;
use crate::region::RegionGroup;
use crate::tracks::TrackSet;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Per-snapshot rendering settings shared by every group in one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderOptions {
    pub overlap_display: OverlapDisplay,
    pub max_panel_height: u32,
    /// Raw preference lines, trimmed, emitted after the panel height.
    pub preferences: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            overlap_display: OverlapDisplay::default(),
            max_panel_height: 200,
            preferences: None,
        }
    }
}

impl RenderOptions {
    /// Build from unchecked values. The overlap mode is checked here so a bad value
    /// fails before anything is compiled.
    pub fn from_raw(
        overlap_display: &str,
        max_panel_height: u32,
        preferences: Option<String>,
    ) -> Result<Self, IgverError> {
        Ok(Self {
            overlap_display: overlap_display.parse()?,
            max_panel_height,
            preferences: preferences
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty()),
        })
    }

    /// Read preference lines from a file.
    pub fn with_preferences_file(mut self, path: Option<&Path>) -> Result<Self, IgverError> {
        if let Some(path) = path {
            if !path.is_file() {
                return Err(IgverError::input_not_found("preferences file", path));
            }
            let text = std::fs::read_to_string(path)?;
            let trimmed = text.trim();
            self.preferences = (!trimmed.is_empty()).then(|| trimmed.to_string());
        }
        Ok(self)
    }
}

/// A group paired with the snapshot file it renders to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderJob {
    pub group: RegionGroup,
    pub output_path: PathBuf,
}

impl RenderJob {
    /// File name written into the `snapshot` command.
    pub fn snapshot_name(&self) -> String {
        self.output_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Compile the full document: session header, one load per track, one block per job,
/// then `exit`.
pub fn compile(
    tracks: &TrackSet,
    genome: &Genome,
    snapshot_dir: &Path,
    jobs: &[RenderJob],
    options: &RenderOptions,
) -> BatchDocument {
    let mut commands = Vec::with_capacity(4 + tracks.len() + jobs.len() * 5);
    commands.push(BatchCommand::New);
    commands.push(BatchCommand::SnapshotDirectory(snapshot_dir.to_path_buf()));
    commands.push(BatchCommand::Genome(genome.as_str().to_string()));
    commands.extend(tracks.iter().map(|t| BatchCommand::Load(t.to_path_buf())));

    for job in jobs {
        commands.push(BatchCommand::Goto(job.group.goto_target()));
        if let Some(directive) = options.overlap_display.directive() {
            commands.push(directive);
        }
        commands.push(BatchCommand::MaxPanelHeight(options.max_panel_height));
        if let Some(prefs) = &options.preferences {
            commands.push(BatchCommand::Raw(prefs.clone()));
        }
        commands.push(BatchCommand::Snapshot(job.snapshot_name()));
    }
    commands.push(BatchCommand::Exit);

    BatchDocument::from_commands(commands)
}
