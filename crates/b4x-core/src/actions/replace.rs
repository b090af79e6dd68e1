//! In-place text substitution

use b4x_fs::{NormalizedPath, io};

use crate::context::ActionContext;
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceOutcome {
    pub path: NormalizedPath,
    /// Whether the file content changed and was rewritten
    pub changed: bool,
}

/// Rewrite a text file with `search` replaced by `replace` and every
/// `%VARIABLE%` expanded.
///
/// The literal replacement runs first, so a replacement may itself contain
/// variables. A file whose content does not change is left untouched.
pub fn replace_in_file(
    ctx: &ActionContext,
    source: &str,
    search: Option<&str>,
    replace: Option<&str>,
) -> Result<ReplaceOutcome> {
    let path = ctx.resolve(source)?;
    if !path.is_file() {
        return Err(Error::SourceNotFound {
            path: path.to_native(),
        });
    }

    let original = io::read_text(&path)?;
    let mut content = original.clone();

    if let Some(search) = search {
        if search.is_empty() {
            return Err(Error::MissingSetting {
                name: "search".to_string(),
                hint: "The search text must not be empty.".to_string(),
            });
        }
        content = content.replace(search, replace.unwrap_or_default());
    }
    content = ctx.expand(&content)?;

    let changed = content != original;
    if changed {
        io::write_text(&path, &content)?;
        tracing::info!(path = %path, "Replaced text");
    } else {
        tracing::debug!(path = %path, "Nothing to replace");
    }
    Ok(ReplaceOutcome { path, changed })
}
