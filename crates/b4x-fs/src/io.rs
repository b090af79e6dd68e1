//! Atomic I/O operations with file locking

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use backoff::ExponentialBackoff;
use fs2::FileExt;

use crate::{Error, NormalizedPath, Result};

/// Retry policy for filesystem operations that can fail transiently.
///
/// On Windows, virus scanners and the IDE itself briefly hold handles on
/// freshly written files, which makes the final rename fail.
#[derive(Debug, Clone, Copy)]
pub struct RobustnessConfig {
    /// Give up retrying after this much time.
    pub max_elapsed: Duration,
}

impl Default for RobustnessConfig {
    fn default() -> Self {
        Self {
            max_elapsed: Duration::from_secs(2),
        }
    }
}

impl RobustnessConfig {
    fn retry<T>(&self, mut op: impl FnMut() -> std::io::Result<T>) -> std::io::Result<T> {
        let policy = ExponentialBackoff {
            current_interval: Duration::from_millis(20),
            initial_interval: Duration::from_millis(20),
            max_elapsed_time: Some(self.max_elapsed),
            ..ExponentialBackoff::default()
        };
        backoff::retry(policy, || op().map_err(backoff::Error::transient)).map_err(|e| match e {
            backoff::Error::Permanent(err) => err,
            backoff::Error::Transient { err, .. } => err,
        })
    }
}

/// Write content atomically to a file with locking.
///
/// Uses write-to-temp-then-rename strategy to prevent partial writes.
/// Acquires an advisory lock to prevent concurrent access.
pub fn write_atomic(path: &NormalizedPath, content: &[u8], robustness: RobustnessConfig) -> Result<()> {
    write_atomic_with(path, content, robustness, false)
}

/// Write text atomically, readable by the owner only on Unix.
pub fn write_private(path: &NormalizedPath, content: &str) -> Result<()> {
    write_atomic_with(path, content.as_bytes(), RobustnessConfig::default(), true)
}

fn write_atomic_with(
    path: &NormalizedPath,
    content: &[u8],
    robustness: RobustnessConfig,
    private: bool,
) -> Result<()> {
    let native_path = path.to_native();

    // Ensure parent directory exists
    if let Some(parent) = native_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
    }

    // Temp file lives in the same directory so the rename stays on one filesystem
    let temp_name = format!(
        ".{}.{}.tmp",
        native_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = native_path.with_file_name(&temp_name);

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    // Restrict before any content is written
    #[cfg(unix)]
    if private {
        use std::os::unix::fs::PermissionsExt;
        temp_file
            .set_permissions(fs::Permissions::from_mode(0o600))
            .map_err(|e| Error::io(&temp_path, e))?;
    }
    #[cfg(not(unix))]
    let _ = private;

    temp_file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file.sync_all().map_err(|e| Error::io(&temp_path, e))?;

    temp_file.unlock().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;
    drop(temp_file);

    if let Err(e) = robustness.retry(|| fs::rename(&temp_path, &native_path)) {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::io(&native_path, e));
    }

    Ok(())
}

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Write text content to a file atomically.
pub fn write_text(path: &NormalizedPath, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes(), RobustnessConfig::default())
}

/// Copy a single file, creating the destination directory and overwriting
/// any existing file.
pub fn copy_file(source: &Path, destination: &Path) -> Result<u64> {
    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
    }
    fs::copy(source, destination).map_err(|e| Error::io(source, e))
}

/// Recursively copy a directory tree.
///
/// Returns the number of files copied. A destination inside the source is
/// refused, since the copy would keep descending into its own output.
pub fn copy_dir(source: &Path, destination: &Path) -> Result<usize> {
    let source_real = dunce::canonicalize(source).map_err(|e| Error::io(source, e))?;
    if resolve_existing_prefix(destination).starts_with(&source_real) {
        return Err(Error::CopyIntoSource {
            from: source.to_path_buf(),
            into: destination.to_path_buf(),
        });
    }
    copy_tree(source, destination)
}

fn copy_tree(source: &Path, destination: &Path) -> Result<usize> {
    fs::create_dir_all(destination).map_err(|e| Error::io(destination, e))?;

    let mut copied = 0;
    let entries = fs::read_dir(source).map_err(|e| Error::io(source, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(source, e))?;
        let file_type = entry.file_type().map_err(|e| Error::io(entry.path(), e))?;
        let target = destination.join(entry.file_name());
        if file_type.is_dir() {
            copied += copy_tree(&entry.path(), &target)?;
        } else {
            copy_file(&entry.path(), &target)?;
            copied += 1;
        }
    }
    tracing::debug!(source = %source.display(), copied, "Copied directory");
    Ok(copied)
}

/// Canonicalize the longest existing ancestor of `path` and re-append the
/// components that do not exist yet.
fn resolve_existing_prefix(path: &Path) -> PathBuf {
    let mut existing = path;
    let mut missing = Vec::new();
    while !existing.exists() {
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name);
                existing = parent;
            }
            _ => return path.to_path_buf(),
        }
    }
    let mut resolved = dunce::canonicalize(existing).unwrap_or_else(|_| existing.to_path_buf());
    resolved.extend(missing.iter().rev());
    resolved
}

/// Move a file, replacing the destination.
///
/// Falls back to copy-and-delete when a plain rename is not possible
/// (for example across drives).
pub fn move_file(source: &Path, destination: &Path) -> Result<()> {
    if destination.exists() {
        fs::remove_file(destination).map_err(|e| Error::io(destination, e))?;
    }
    if fs::rename(source, destination).is_ok() {
        return Ok(());
    }
    copy_file(source, destination)?;
    fs::remove_file(source).map_err(|e| Error::io(source, e))
}
