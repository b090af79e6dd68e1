//! Build-step actions
//!
//! Each action is a single function taking an [`ActionContext`] and the raw
//! path arguments from the command line. Arguments are expanded and resolved
//! through the context; results describe what was done so the CLI can
//! report it.
//!
//! [`ActionContext`]: crate::ActionContext

mod archive;
mod backup;
mod build;
mod checksum;
mod copy;
mod replace;

pub use archive::{ZipOutcome, zip_path};
pub use backup::{BackupOutcome, move_backups};
pub use build::{BuildStamp, VersionBump, update_version, write_build_stamp};
pub use checksum::{ChecksumOutcome, checksum_file};
pub use copy::{CopyOutcome, copy_jar, copy_path};
pub use replace::{ReplaceOutcome, replace_in_file};
