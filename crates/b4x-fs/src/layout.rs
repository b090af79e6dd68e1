//! Project layout detection
//!
//! The IDE runs build actions with the project's `Objects` folder as the
//! working directory. Every other location is derived from it:
//!
//! ```text
//! <project>/
//!     MyApp.b4j        project file
//!     Files/           assets, build.txt, version.txt
//!     Objects/         build output (working directory)
//!     AutoBackups/     IDE backup archives
//! ```

use std::path::{Path, PathBuf};

use crate::{Error, NormalizedPath, ProjectPath, Result};

/// Extensions of B4A, B4i and B4J project files.
const PROJECT_EXTENSIONS: &[&str] = &["b4a", "b4i", "b4j"];

/// Resolved locations of a B4X project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    objects: NormalizedPath,
    project: NormalizedPath,
    install: Option<NormalizedPath>,
}

impl ProjectLayout {
    /// Build a layout from the `Objects` folder.
    ///
    /// The folder must exist; it is canonicalized so relative paths and
    /// `.` work as expected.
    pub fn new(objects_dir: impl AsRef<Path>) -> Result<Self> {
        let objects_dir = objects_dir.as_ref();
        let canonical =
            dunce::canonicalize(objects_dir).map_err(|e| Error::io(objects_dir, e))?;
        let project = canonical
            .parent()
            .ok_or_else(|| Error::NoProjectFolder {
                path: canonical.clone(),
            })?
            .to_path_buf();

        Ok(Self {
            objects: NormalizedPath::new(&canonical),
            project: NormalizedPath::new(project),
            install: None,
        })
    }

    /// Set the install folder (where the executable and its key file live).
    pub fn with_install_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.install = Some(NormalizedPath::new(dir));
        self
    }

    /// Directory containing the running executable, if it can be determined.
    pub fn detect_install_dir() -> Option<PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
    }

    /// The `Objects` folder.
    pub fn objects_dir(&self) -> &NormalizedPath {
        &self.objects
    }

    /// The project folder (parent of `Objects`).
    pub fn project_dir(&self) -> &NormalizedPath {
        &self.project
    }

    /// The `Files` folder.
    pub fn files_dir(&self) -> NormalizedPath {
        self.project.join(ProjectPath::FilesDir.as_str())
    }

    /// The `AutoBackups` folder.
    pub fn auto_backups_dir(&self) -> NormalizedPath {
        self.project.join(ProjectPath::AutoBackupsDir.as_str())
    }

    /// The install folder, if one was configured.
    pub fn install_dir(&self) -> Option<&NormalizedPath> {
        self.install.as_ref()
    }

    /// `Files/version.txt`
    pub fn version_file(&self) -> NormalizedPath {
        self.files_dir().join(ProjectPath::VersionFile.as_str())
    }

    /// `Files/build.txt`
    pub fn build_stamp_file(&self) -> NormalizedPath {
        self.files_dir().join(ProjectPath::BuildStamp.as_str())
    }

    /// The first project file (`*.b4a`, `*.b4i`, `*.b4j`) in the project folder,
    /// by name.
    pub fn project_file(&self) -> Option<NormalizedPath> {
        let mut candidates: Vec<NormalizedPath> = std::fs::read_dir(self.project.to_native())
            .ok()?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .map(NormalizedPath::new)
            .filter(|path| {
                path.extension()
                    .is_some_and(|ext| PROJECT_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
            })
            .collect();
        candidates.sort();
        candidates.into_iter().next()
    }

    /// Project name: the project file name without extension, or `unknown`.
    pub fn project_name(&self) -> String {
        self.project_file()
            .and_then(|file| file.file_stem().map(str::to_string))
            .unwrap_or_else(|| "unknown".to_string())
    }

    /// Name of the first `.jar` file in the `Objects` folder, by name.
    pub fn find_jar(&self) -> Result<Option<String>> {
        let native = self.objects.to_native();
        let entries = std::fs::read_dir(&native).map_err(|e| Error::io(&native, e))?;

        let mut jars: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
            .filter(|name| name.to_lowercase().ends_with(".jar"))
            .collect();
        jars.sort();
        Ok(jars.into_iter().next())
    }

    /// Resolve a path argument given to a build action.
    ///
    /// - `Files...` resolves inside the `Files` folder
    /// - `Objects...` resolves inside the `Objects` folder
    /// - absolute paths (including `C:` style drive paths) are kept
    /// - anything else is relative to the `Objects` folder
    pub fn resolve(&self, raw: &str) -> NormalizedPath {
        let raw = raw.trim();
        if let Some(rest) = strip_folder_prefix(raw, ProjectPath::FilesDir.as_str()) {
            return self.files_dir().join(rest);
        }
        if let Some(rest) = strip_folder_prefix(raw, ProjectPath::ObjectsDir.as_str()) {
            return self.objects.join(rest);
        }
        if is_absolute(raw) {
            return NormalizedPath::new(raw);
        }
        self.objects.join(raw)
    }
}

/// Strip a leading folder name when it is followed by a separator or ends the
/// string.
fn strip_folder_prefix<'a>(raw: &'a str, folder: &str) -> Option<&'a str> {
    let rest = raw.strip_prefix(folder)?;
    if rest.is_empty() || rest.starts_with('/') || rest.starts_with('\\') {
        Some(rest)
    } else {
        None
    }
}

fn is_absolute(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    let has_drive = bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':';
    has_drive || raw.starts_with('/') || raw.starts_with('\\') || Path::new(raw).is_absolute()
}
