//! # tagbump-core
//!
//! Core library for tagbump: finds Kubernetes workload manifests in a
//! GitLab repository, rewrites the container image tag of every workload,
//! and submits all rewritten files as one commit.
//!
//! The pipeline runs leaves first:
//!
//! 1. [`browser`] lists the repository tree and validates the scope.
//! 2. [`fetcher`] retrieves raw manifest text.
//! 3. [`manifest`] patches the image tag inside each workload document.
//! 4. [`aggregate`] fans the above out over every manifest in scope.
//! 5. [`submit`] turns the [`ChangeSet`] into a single commit.

pub mod aggregate;
pub mod browser;
pub mod changes;
pub mod config;
pub mod context;
pub mod error;
pub mod fetcher;
pub mod image;
pub mod manifest;
pub mod submit;
pub mod workload;

#[cfg(test)]
pub(crate) mod test_mocks;

pub use aggregate::collect_changes;
pub use changes::{ChangeSet, ProposedFileChange};
pub use config::Config;
pub use context::RepositoryContext;
pub use error::{Error, Result};
pub use image::ImageReference;
pub use manifest::{PatchOutcome, Retag, patch_manifest};
pub use submit::{CommitReceipt, submit_changes};
pub use workload::WorkloadKind;
