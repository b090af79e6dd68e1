//! `.gitattributes` defaults so the hosting service detects B4X sources

use b4x_fs::{NormalizedPath, ProjectPath, io};

use crate::Result;

pub const DEFAULT_ATTRIBUTES_FILE: &str = "# Auto detect text files and perform LF normalization
* text=auto

*.b4a linguist-language=B4X
*.b4i linguist-language=B4X
*.b4j linguist-language=B4X
*.bas linguist-language=B4X
*.b4a linguist-detectable=true
*.b4i linguist-detectable=true
*.b4j linguist-detectable=true
*.bas linguist-detectable=true
";

/// Write the default attributes file into `project_dir` unless one exists.
///
/// Returns `true` when the file was created.
pub fn ensure_attributes_file(project_dir: &NormalizedPath) -> Result<bool> {
    let path = project_dir.join(ProjectPath::AttributesFile.as_str());
    if path.exists() {
        return Ok(false);
    }
    tracing::info!(path = %path, "Creating attributes file");
    io::write_text(&path, DEFAULT_ATTRIBUTES_FILE)?;
    Ok(true)
}
