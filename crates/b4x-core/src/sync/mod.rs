//! Repository sync
//!
//! Makes a remote repository mirror the project folder:
//!
//! - **ignore**: patterns from the project `.gitignore`
//! - **plan**: compare local blob hashes with one remote snapshot
//! - **executor**: issue the planned create/update/delete calls
//! - **remote**: the [`RemoteStore`] trait implemented by store clients
//! - **credentials**: API key lookup, resolved once before the run

mod attributes;
mod credentials;
mod executor;
mod ignore;
mod plan;
mod remote;
mod report;

pub use attributes::{DEFAULT_ATTRIBUTES_FILE, ensure_attributes_file};
pub use credentials::{
    ApiKey, CONFIG_DIR_NAME, CredentialChain, CredentialProvider, EnvCredential, FileCredential,
    TOKEN_ENV_VAR,
};
pub use executor::{CREATE_MESSAGE, DELETE_MESSAGE, SyncExecutor, UPDATE_MESSAGE};
pub use ignore::{DEFAULT_IGNORE_FILE, IgnoreRules};
pub use plan::{DEFAULT_PROTECTED, SyncAction, SyncPlan, SyncPlanner, UnreadableFile};
pub use remote::{RemoteListing, RemoteOperation, RemoteStore, RemoteTarget};
pub use report::{ActionOutcome, SyncReport};
