//! Build actions and repository sync for B4X projects
//!
//! This crate sits between the filesystem layer and the CLI:
//!
//! - **Actions**: copy, zip, backup, build stamp, version bump, text replace
//!   and checksum steps run from the IDE's build pipeline
//! - **Variables**: `%VERSION%`, `%DATE%` and friends expanded in arguments
//! - **Sync**: plans and executes the create/update/delete calls that make a
//!   remote repository mirror the project folder
//!
//! # Architecture
//!
//! ```text
//!                 b4x-cli
//!                    |
//!     +--------------+-------------+
//!     |                            |
//! b4x-core  <-- RemoteStore -- b4x-github
//!     |
//!  b4x-fs
//! ```
//!
//! The remote store is a trait so the sync algorithm can be driven against an
//! in-memory store in tests.

pub mod actions;
pub mod config;
pub mod context;
pub mod error;
pub mod sync;
pub mod timefmt;
pub mod variables;
pub mod version;

pub use config::{ActionsConfig, BuildSection, GitHubSection};
pub use context::ActionContext;
pub use error::{Error, Result};
pub use sync::{
    ActionOutcome, CredentialChain, CredentialProvider, IgnoreRules, RemoteListing,
    RemoteOperation, RemoteStore, RemoteTarget, SyncAction, SyncExecutor, SyncPlan, SyncPlanner,
    SyncReport,
};
pub use variables::VariableResolver;
pub use version::BuildVersion;
