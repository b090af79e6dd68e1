//! Zip archives of build output

use std::fs::File;

use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

use b4x_fs::{Error as FsError, NormalizedPath, list_files};

use crate::context::ActionContext;
use crate::{Error, Result};

/// What [`zip_path`] wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZipOutcome {
    pub source: NormalizedPath,
    pub archive: NormalizedPath,
    pub entries: usize,
}

/// Zip a file or a directory.
///
/// A destination ending in `.zip` names the archive; otherwise the archive is
/// `<destination>/<source name without extension>.zip`. An existing archive
/// is replaced. A single file is stored under its file name, a directory's
/// files under their paths relative to it.
pub fn zip_path(ctx: &ActionContext, source: &str, destination: &str) -> Result<ZipOutcome> {
    let source = ctx.resolve(source)?;
    if !source.exists() {
        return Err(Error::SourceNotFound {
            path: source.to_native(),
        });
    }

    let destination = ctx.resolve(destination)?;
    let archive = if destination.as_str().to_lowercase().ends_with(".zip") {
        destination
    } else {
        let stem = source.file_stem().unwrap_or("archive");
        destination.join(&format!("{stem}.zip"))
    };

    // (native path, name inside the archive)
    let entries: Vec<(std::path::PathBuf, String)> = if source.is_dir() {
        let root = source.to_native();
        list_files(&root)?
            .into_iter()
            .filter(|rel| source.join(rel.as_str()) != archive)
            .map(|rel| (root.join(rel.as_str()), rel.into_string()))
            .collect()
    } else {
        let name = source.file_name().unwrap_or("file").to_string();
        vec![(source.to_native(), name)]
    };

    let native_archive = archive.to_native();
    if let Some(parent) = native_archive.parent() {
        std::fs::create_dir_all(parent).map_err(|e| FsError::io(parent, e))?;
    }
    if native_archive.exists() {
        std::fs::remove_file(&native_archive).map_err(|e| FsError::io(&native_archive, e))?;
    }

    let file = File::create(&native_archive).map_err(|e| FsError::io(&native_archive, e))?;
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (path, name) in &entries {
        writer.start_file(name.as_str(), options)?;
        let mut input = File::open(path).map_err(|e| FsError::io(path, e))?;
        std::io::copy(&mut input, &mut writer).map_err(|e| FsError::io(path, e))?;
    }
    writer.finish()?;

    tracing::info!(source = %source, archive = %archive, entries = entries.len(), "Created archive");
    Ok(ZipOutcome {
        source,
        archive,
        entries: entries.len(),
    })
}
