//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `LibraryUseCase` - Bootstraps a library directory
//! - `GenerateUseCase` - Composes and writes a project's context file and ledger
//! - `ProjectUseCase` - Drift report and ledger edits for one project
//! - `MirrorUseCase` - Project and global push/pull/diff against the library mirror
//! - `RemoteSyncUseCase` - Library remote sync through a `VcsClient`

pub mod generate;
pub mod library;
pub mod mirror;
pub mod project;
pub mod remote;

pub use generate::{
    GenerateUseCase, GenerationReport, ProjectUpdate, ProjectUpdateResult, UpdateOutcome,
};
pub use library::{InitLibraryOutcome, LibraryUseCase};
pub use mirror::{
    MirrorScope, MirrorSync, MirrorUseCase, ProjectSyncStatus, SyncResult, TrackedSet,
};
pub use project::{snippet_install_path, AddOutcome, ProjectDrift, ProjectUseCase, SnippetInstall};
pub use remote::{
    NotConfigured, PullOutcome, PushOutcome, RemoteStatus, RemoteSyncUseCase, SetupOutcome,
    DEFAULT_COMMIT_MESSAGE,
};
