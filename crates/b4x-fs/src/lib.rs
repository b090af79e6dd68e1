//! Filesystem abstraction for B4X build actions
//!
//! Provides project layout resolution, normalized paths, content hashing and
//! safe I/O operations.

pub mod checksum;
pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod layout;
pub mod path;
pub mod walk;

pub use checksum::{compute_blob_hash, compute_file_blob_hash, compute_file_checksum};
pub use config::ConfigStore;
pub use constants::ProjectPath;
pub use error::{Error, Result};
pub use io::RobustnessConfig;
pub use layout::ProjectLayout;
pub use path::NormalizedPath;
pub use walk::list_files;
