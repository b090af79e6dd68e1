//! [`TestProject`] builder for build-action test scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary B4X project with `Objects` and `Files` folders.
///
/// # Example
///
/// ```rust,no_run
/// use b4x_test_utils::project::TestProject;
///
/// let project = TestProject::new("MyApp");
/// project.write_file("Files/version.txt", "1.2.3");
/// project.assert_file_exists("MyApp.b4j");
/// ```
pub struct TestProject {
    temp_dir: TempDir,
    root: PathBuf,
}

impl TestProject {
    /// Create a project named `name` with a `<name>.b4j` project file and
    /// empty `Objects` and `Files` folders.
    pub fn new(name: &str) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join(name);
        fs::create_dir_all(root.join("Objects")).unwrap();
        fs::create_dir_all(root.join("Files")).unwrap();
        fs::write(
            root.join(format!("{name}.b4j")),
            "Build1=Default,com.example\nVersion=10\n",
        )
        .unwrap();
        Self { temp_dir, root }
    }

    /// Create a bare project folder containing only `Objects`.
    pub fn bare() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("project");
        fs::create_dir_all(root.join("Objects")).unwrap();
        Self { temp_dir, root }
    }

    /// The project folder.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The `Objects` folder (the working directory of build actions).
    pub fn objects(&self) -> PathBuf {
        self.root.join("Objects")
    }

    /// The `Files` folder.
    pub fn files(&self) -> PathBuf {
        self.root.join("Files")
    }

    /// A scratch directory next to the project, outside of it.
    pub fn outside(&self, name: &str) -> PathBuf {
        let dir = self.temp_dir.path().join(name);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Write `content` to `path` (relative to the project folder), creating
    /// parent directories.
    pub fn write_file(&self, path: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let full_path = self.root.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content).unwrap();
        full_path
    }

    /// Read the file at `path` (relative to the project folder) as text.
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read_file(&self, path: &str) -> String {
        let full_path = self.root.join(path);
        fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()))
    }

    /// Assert that `path` (relative to the project folder) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.root.join(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `path` (relative to the project folder) does **not** exist.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_file_not_exists(&self, path: &str) {
        let full_path = self.root.join(path);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }
}
