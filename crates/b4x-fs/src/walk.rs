//! Recursive file enumeration

use std::cmp::Ordering;
use std::path::Path;

use walkdir::{DirEntry, WalkDir};

use crate::{Error, NormalizedPath, Result};

/// Files of a directory come before its subdirectories, each group by name.
fn files_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

/// List every file under `root`, recursively, as paths relative to `root`.
///
/// Paths use `/` as separator. Within each directory files are listed before
/// the contents of subdirectories, so the order is stable across runs and
/// platforms. A symlink to a file is listed like a file; symlinked
/// directories are not descended into.
pub fn list_files(root: &Path) -> Result<Vec<NormalizedPath>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).min_depth(1).sort_by(files_first) {
        let entry = entry.map_err(|e| Error::Walk {
            path: e.path().unwrap_or(root).to_path_buf(),
            message: e.to_string(),
        })?;
        if !is_file(&entry) {
            continue;
        }
        let relative = entry.path().strip_prefix(root).map_err(|e| Error::Walk {
            path: entry.path().to_path_buf(),
            message: e.to_string(),
        })?;
        files.push(NormalizedPath::new(relative));
    }

    tracing::debug!(root = %root.display(), count = files.len(), "Enumerated files");
    Ok(files)
}

fn is_file(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_file() || (file_type.is_symlink() && entry.path().is_file())
}
