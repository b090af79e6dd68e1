//! Optional per-project settings
//!
//! Read from `b4x-actions.toml` (or `.json`, `.yaml`, `.yml`) in the project
//! folder. Every field has a default, so a missing file or a partial file is
//! fine. Command line flags take precedence over anything set here.

use serde::{Deserialize, Serialize};

use b4x_fs::{ConfigStore, NormalizedPath, ProjectPath};

use crate::Result;
use crate::sync::DEFAULT_PROTECTED;

/// File name of the settings file, without extension.
pub const CONFIG_FILE_STEM: &str = "b4x-actions";

const CONFIG_EXTENSIONS: &[&str] = &["toml", "json", "yaml", "yml"];

/// Settings for the build stamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSection {
    /// .NET style date format, e.g. `yyyy-MM-dd`
    pub date_format: String,
    /// .NET style time format, e.g. `HH:mm:ss`
    pub time_format: String,
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            date_format: "yyyy-MM-dd".to_string(),
            time_format: "HH:mm:ss".to_string(),
        }
    }
}

/// Settings for the repository sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubSection {
    pub owner: Option<String>,
    /// Repository name; the project name when unset
    pub repo: Option<String>,
    pub branch: String,
    /// Remote files that are never deleted
    pub protected: Vec<String>,
    /// Ignore file, relative to the project folder
    pub ignore_file: String,
}

impl Default for GitHubSection {
    fn default() -> Self {
        Self {
            owner: None,
            repo: None,
            branch: "main".to_string(),
            protected: vec![DEFAULT_PROTECTED.to_string()],
            ignore_file: ProjectPath::IgnoreFile.as_str().to_string(),
        }
    }
}

/// All settings of the settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionsConfig {
    pub build: BuildSection,
    pub github: GitHubSection,
}

impl ActionsConfig {
    /// The settings file in `project_dir`, if any. TOML is preferred when
    /// several formats exist.
    pub fn find(project_dir: &NormalizedPath) -> Option<NormalizedPath> {
        CONFIG_EXTENSIONS
            .iter()
            .map(|ext| project_dir.join(&format!("{CONFIG_FILE_STEM}.{ext}")))
            .find(|path| path.is_file())
    }

    /// Load settings from `project_dir`, or defaults when there is no file.
    pub fn load(project_dir: &NormalizedPath) -> Result<Self> {
        let path = Self::find(project_dir)
            .unwrap_or_else(|| project_dir.join(&format!("{CONFIG_FILE_STEM}.toml")));
        Ok(ConfigStore::new().load_or_default(&path)?)
    }
}
