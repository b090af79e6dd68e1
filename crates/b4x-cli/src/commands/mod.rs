//! Command implementations for b4x-actions

pub mod build;
pub mod files;
pub mod github;
pub mod text;

pub use build::{run_build_time, run_compile_only, run_update_version};
pub use files::{run_backup, run_copy, run_copy_jar, run_zip};
pub use github::{GitHubArgs, run_github};
pub use text::{run_checksum, run_replace};
