//! File and directory copies

use b4x_fs::{NormalizedPath, io};

use crate::context::ActionContext;
use crate::{Error, Result};

/// What a copy did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyOutcome {
    pub source: NormalizedPath,
    pub destination: NormalizedPath,
    /// Number of files written
    pub files: usize,
}

/// Copy the first jar of the `Objects` folder into `directory`.
///
/// Returns `None` when the build produced no jar.
pub fn copy_jar(ctx: &ActionContext, directory: &str) -> Result<Option<CopyOutcome>> {
    let Some(jar) = ctx.layout().find_jar()? else {
        tracing::info!("No jar in Objects, nothing to copy");
        return Ok(None);
    };
    let source = ctx.layout().objects_dir().join(&jar);
    let destination = ctx.resolve(directory)?.join(&jar);

    io::copy_file(&source.to_native(), &destination.to_native())?;
    tracing::info!(source = %source, destination = %destination, "Copied jar");
    Ok(Some(CopyOutcome {
        source,
        destination,
        files: 1,
    }))
}

/// Copy a file or a directory tree.
///
/// When the destination does not already end with the source name, the
/// source name is appended, so `copy app.jar C:\out` writes
/// `C:\out\app.jar`. Existing files are overwritten.
pub fn copy_path(ctx: &ActionContext, source: &str, destination: &str) -> Result<CopyOutcome> {
    let source = ctx.resolve(source)?;
    if !source.exists() {
        return Err(Error::SourceNotFound {
            path: source.to_native(),
        });
    }

    let mut destination = ctx.resolve(destination)?;
    if let Some(name) = source.file_name()
        && destination.file_name() != Some(name)
    {
        destination = destination.join(name);
    }

    let files = if source.is_dir() {
        io::copy_dir(&source.to_native(), &destination.to_native())?
    } else {
        io::copy_file(&source.to_native(), &destination.to_native())?;
        1
    };

    tracing::info!(source = %source, destination = %destination, files, "Copied");
    Ok(CopyOutcome {
        source,
        destination,
        files,
    })
}
