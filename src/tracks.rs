//! Track inputs: the ordered files loaded into the viewer.

use crate::error::IgverError;
use crate::paths::{absolute, expand_home};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Ordered track paths. Order is the stacking order in the rendered view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TrackSet {
    paths: Vec<PathBuf>,
}

impl TrackSet {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    /// Build from CLI-style inputs. A single `.txt` input is read as a track list.
    pub fn from_inputs<P: AsRef<Path>>(inputs: &[P]) -> Result<Self, IgverError> {
        if let [only] = inputs {
            let only = only.as_ref();
            if is_track_list(only) {
                return Self::from_list_file(only);
            }
        }
        Ok(Self::new(
            inputs.iter().map(|p| expand_home(p.as_ref())).collect(),
        ))
    }

    /// Read a track list: one path per line, blank lines and `#` comments ignored.
    pub fn from_list_file(path: &Path) -> Result<Self, IgverError> {
        if !path.is_file() {
            return Err(IgverError::input_not_found("track list", path));
        }
        let content = std::fs::read_to_string(path)?;
        let paths: Vec<PathBuf> = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(|line| expand_home(Path::new(line)))
            .collect();
        if paths.is_empty() {
            return Err(IgverError::invalid_configuration(format!(
                "no track paths found in {}",
                path.display()
            )));
        }
        tracing::debug!(list = %path.display(), tracks = paths.len(), "Read track list");
        Ok(Self::new(paths))
    }

    /// Fails on the first track that does not exist.
    pub fn verify_exists(&self) -> Result<(), IgverError> {
        match self.paths.iter().find(|p| !p.exists()) {
            Some(missing) => Err(IgverError::input_not_found("track", missing)),
            None => Ok(()),
        }
    }

    /// Anchor relative tracks at the current directory. Batch `load` lines are read
    /// from wherever the viewer starts, which inside a container is not our cwd.
    pub fn into_absolute(self) -> Self {
        Self::new(self.paths.iter().map(|p| absolute(p)).collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

fn is_track_list(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("txt"))
        .unwrap_or(false)
}
