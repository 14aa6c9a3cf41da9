//! Repository tree listing and scope validation.

use tagbump_gitlab::{GitLabApi, TreeEntry};
use tracing::debug;

use crate::context::RepositoryContext;
use crate::error::{Error, Result};

/// List the full repository tree and check that `scope` exists in it.
///
/// The whole tree is always requested: GitLab's `path` filter returns only
/// the entries below a directory, never the directory entry itself, so it
/// cannot confirm that the scope exists. The existence check runs after
/// every page has been collected. A trailing `/` on the scope is ignored.
///
/// Entry order is whatever the server returned.
///
/// # Errors
/// Returns `Network` if a page cannot be fetched and `PathNotFound` if a
/// non-empty scope matches no entry.
pub async fn list_tree<A: GitLabApi>(
    api: &A,
    context: &RepositoryContext,
    scope: Option<&str>,
) -> Result<Vec<TreeEntry>> {
    let entries = api
        .list_tree(context.project_id(), context.branch(), None)
        .await
        .map_err(|source| Error::Network {
            path: format!("repository tree of {}", context.branch()),
            source,
        })?;
    debug!(count = entries.len(), "listed repository tree");

    if let Some(scope) = scope.map(normalize_scope).filter(|s| !s.is_empty()) {
        if find_entry(&entries, scope).is_none() {
            return Err(Error::PathNotFound(scope.to_string()));
        }
    }

    Ok(entries)
}

/// Find the entry whose path equals `path`.
#[must_use]
pub fn find_entry<'a>(entries: &'a [TreeEntry], path: &str) -> Option<&'a TreeEntry> {
    entries.iter().find(|entry| entry.path == path)
}

/// Strip trailing slashes from a scope path.
#[must_use]
pub fn normalize_scope(scope: &str) -> &str {
    scope.trim_end_matches('/')
}
