//! Well-known names inside a B4X project folder.

use std::path::Path;

/// Standard project folders and files touched by the build actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectPath {
    /// The `Objects` directory (build output, working directory of the IDE)
    ObjectsDir,
    /// The `Files` directory (assets shipped with the app)
    FilesDir,
    /// The `AutoBackups` directory (IDE backup archives)
    AutoBackupsDir,
    /// `Files/build.txt`
    BuildStamp,
    /// `Files/version.txt`
    VersionFile,
    /// `.gitignore` in the project folder
    IgnoreFile,
    /// `.gitattributes` in the project folder
    AttributesFile,
    /// `github_api_key.txt` next to the executable
    ApiKeyFile,
}

impl ProjectPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ObjectsDir => "Objects",
            Self::FilesDir => "Files",
            Self::AutoBackupsDir => "AutoBackups",
            Self::BuildStamp => "build.txt",
            Self::VersionFile => "version.txt",
            Self::IgnoreFile => ".gitignore",
            Self::AttributesFile => ".gitattributes",
            Self::ApiKeyFile => "github_api_key.txt",
        }
    }
}

impl AsRef<Path> for ProjectPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for ProjectPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for ProjectPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
