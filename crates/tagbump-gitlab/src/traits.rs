//! Trait abstractions for GitLab API operations.
//!
//! This module defines the `GitLabApi` trait which abstracts the handful of
//! GitLab calls the tag-update engine needs, enabling dependency injection
//! and testability.

use crate::{CreateCommit, Result, TreeEntry};

/// Trait for GitLab API operations.
///
/// This trait abstracts GitLab API calls, allowing for:
/// - Dependency injection in the core engine
/// - Mock implementations for testing
///
/// Repository-scoped methods take the numeric project id and the branch
/// so one client can serve any project on the instance.
pub trait GitLabApi: Send + Sync {
    /// List every entry of the repository tree at `branch`, following
    /// pagination to the end.
    ///
    /// `path` restricts the listing to entries below that directory.
    fn list_tree(
        &self,
        project_id: u64,
        branch: &str,
        path: Option<&str>,
    ) -> impl std::future::Future<Output = Result<Vec<TreeEntry>>> + Send;

    /// Fetch the raw content of a file at `branch`.
    fn get_raw_file(
        &self,
        project_id: u64,
        branch: &str,
        file_path: &str,
    ) -> impl std::future::Future<Output = Result<String>> + Send;

    /// Resolve a project path such as `group/project` to its numeric id.
    fn resolve_project_id(
        &self,
        name: &str,
    ) -> impl std::future::Future<Output = Result<u64>> + Send;

    /// Create one commit applying all actions atomically.
    ///
    /// Returns the raw response body.
    fn create_commit(
        &self,
        project_id: u64,
        commit: &CreateCommit,
    ) -> impl std::future::Future<Output = Result<serde_json::Value>> + Send;
}
