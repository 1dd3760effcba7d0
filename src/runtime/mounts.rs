//! Container mount set: every directory the viewer must see.

use crate::paths::absolute;
use crate::tracks::TrackSet;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Ordered, deduplicated list of host directories to mount at the same path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MountSet {
    dirs: Vec<PathBuf>,
    seen: HashSet<PathBuf>,
}

impl MountSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extra binds first, then track directories, region file directories, the output
    /// directory and the scratch directory.
    pub fn for_run(
        extra_binds: &[PathBuf],
        tracks: &TrackSet,
        region_files: &[PathBuf],
        output_dir: &Path,
        scratch_dir: &Path,
    ) -> Self {
        let mut mounts = Self::new();
        for bind in extra_binds {
            mounts.push(bind.clone());
        }
        for track in tracks.iter() {
            mounts.add_parent_of(track);
        }
        for file in region_files {
            mounts.add_parent_of(file);
        }
        mounts.add_dir(output_dir);
        mounts.add_dir(scratch_dir);
        mounts
    }

    /// Mount the directory containing `path`.
    pub fn add_parent_of(&mut self, path: &Path) {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => self.add_dir(parent),
            _ => self.add_dir(Path::new(".")),
        }
    }

    /// Mount `dir` in literal (absolute) form, and also its symlink-resolved form when
    /// that differs.
    pub fn add_dir(&mut self, dir: &Path) {
        let literal = absolute(dir);
        self.push(literal.clone());
        if let Ok(resolved) = dunce::canonicalize(&literal) {
            if resolved != literal {
                self.push(resolved);
            }
        }
    }

    fn push(&mut self, dir: PathBuf) {
        if self.seen.insert(dir.clone()) {
            self.dirs.push(dir);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.dirs.iter().map(PathBuf::as_path)
    }

    pub fn to_vec(&self) -> Vec<PathBuf> {
        self.dirs.clone()
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }
}
