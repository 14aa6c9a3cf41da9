//! # tagbump-gitlab
//!
//! GitLab REST API integration for tagbump: paged repository tree
//! listing, raw file retrieval, project lookup and atomic multi-file
//! commits.
//!
//! # Security
//!
//! The access token is held as a `SecretString`, which zeroizes memory
//! when dropped and is redacted from `Debug` output.

mod client;
mod error;
mod retry;
mod traits;
mod types;

pub use client::GitLabClient;
pub use error::{Error, Result};
pub use retry::RetryPolicy;
// Re-export SecretString for constructing a client token
pub use secrecy::SecretString;
pub use traits::GitLabApi;
pub use types::{CommitAction, CommitActionKind, CreateCommit, EntryKind, TreeEntry};
