//! Moving IDE backup archives out of the project

use b4x_fs::{Error as FsError, NormalizedPath, io};

use crate::context::ActionContext;
use crate::{Error, Result};

/// What [`move_backups`] moved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupOutcome {
    pub source: NormalizedPath,
    pub destination: NormalizedPath,
    /// Destination paths of the moved archives, by name
    pub moved: Vec<NormalizedPath>,
}

/// Move every `*.zip` of the backup folder into `destination`.
///
/// The backup folder is `source` when given, else `<project>/AutoBackups`.
/// A missing default folder means there is nothing to move; a missing
/// explicit folder is an error. Archives already in `destination` are
/// replaced.
pub fn move_backups(
    ctx: &ActionContext,
    destination: &str,
    source: Option<&str>,
) -> Result<BackupOutcome> {
    let source_dir = match source {
        Some(raw) => ctx.resolve(raw)?,
        None => ctx.layout().auto_backups_dir(),
    };
    let destination = ctx.resolve(destination)?;

    if !source_dir.is_dir() {
        if source.is_some() {
            return Err(Error::SourceNotFound {
                path: source_dir.to_native(),
            });
        }
        tracing::info!(path = %source_dir, "No backup folder, nothing to move");
        return Ok(BackupOutcome {
            source: source_dir,
            destination,
            moved: Vec::new(),
        });
    }

    let native = source_dir.to_native();
    let mut archives: Vec<String> = std::fs::read_dir(&native)
        .map_err(|e| FsError::io(&native, e))?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .filter(|name| name.to_lowercase().ends_with(".zip"))
        .collect();
    archives.sort();

    let mut moved = Vec::with_capacity(archives.len());
    for name in archives {
        let from = source_dir.join(&name);
        let to = destination.join(&name);
        io::move_file(&from.to_native(), &to.to_native())?;
        tracing::info!(from = %from, to = %to, "Moved backup");
        moved.push(to);
    }

    Ok(BackupOutcome {
        source: source_dir,
        destination,
        moved,
    })
}
