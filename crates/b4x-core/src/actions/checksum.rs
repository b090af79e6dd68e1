//! SHA-256 checksums of release artifacts

use b4x_fs::{Error as FsError, NormalizedPath, compute_file_checksum, io};

use crate::context::ActionContext;
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumOutcome {
    pub source: NormalizedPath,
    /// Lowercase hex SHA-256
    pub hex: String,
    /// Checksum file written, if a destination was given
    pub written: Option<NormalizedPath>,
}

/// Hash `source`; with a destination, also write `<hex>  <file name>` there.
///
/// A destination that is an existing directory receives
/// `<file name>.sha256`.
pub fn checksum_file(
    ctx: &ActionContext,
    source: &str,
    destination: Option<&str>,
) -> Result<ChecksumOutcome> {
    let source = ctx.resolve(source)?;
    if !source.is_file() {
        return Err(Error::SourceNotFound {
            path: source.to_native(),
        });
    }

    let native = source.to_native();
    let hex = compute_file_checksum(&native).map_err(|e| FsError::io(&native, e))?;
    let name = source.file_name().unwrap_or_default().to_string();

    let written = match destination {
        Some(raw) => {
            let mut target = ctx.resolve(raw)?;
            if target.is_dir() {
                target = target.join(&format!("{name}.sha256"));
            }
            io::write_text(&target, &format!("{hex}  {name}\n"))?;
            Some(target)
        }
        None => None,
    };

    tracing::info!(source = %source, sha256 = %hex, "Computed checksum");
    Ok(ChecksumOutcome {
        source,
        hex,
        written,
    })
}
