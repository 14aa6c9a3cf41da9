//! Fan-out of fetch and patch over every manifest in scope.

use tagbump_gitlab::{EntryKind, GitLabApi, TreeEntry};
use tracing::{debug, info};

use crate::browser::{self, find_entry, normalize_scope};
use crate::changes::{ChangeSet, ProposedFileChange};
use crate::context::RepositoryContext;
use crate::error::Result;
use crate::fetcher::fetch_manifest;
use crate::manifest::patch_manifest;

/// How tree entries are matched against the requested scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope<'a> {
    /// Only the file with exactly this path.
    File(&'a str),
    /// Every path containing this string.
    ///
    /// Matching is by substring, not by path segment: `services` also
    /// matches `other-services/api.yml`.
    Directory(&'a str),
}

impl<'a> Scope<'a> {
    /// Classify `scope` by the kind of the tree entry it names.
    ///
    /// A scope without a matching entry (only possible when empty) is
    /// treated as a directory scope covering the whole tree.
    #[must_use]
    pub fn resolve(entries: &[TreeEntry], scope: &'a str) -> Self {
        let scope = normalize_scope(scope);
        match find_entry(entries, scope).map(|entry| entry.kind) {
            Some(EntryKind::File) => Self::File(scope),
            Some(EntryKind::Directory) | None => Self::Directory(scope),
        }
    }

    /// Whether `entry` is a manifest file inside this scope.
    #[must_use]
    pub fn includes(&self, entry: &TreeEntry) -> bool {
        let in_scope = match self {
            Self::File(path) => entry.path == *path,
            Self::Directory(path) => entry.path.contains(path),
        };
        in_scope && entry.is_file() && is_manifest_path(&entry.path)
    }
}

/// Whether a path has a YAML extension.
#[must_use]
pub fn is_manifest_path(path: &str) -> bool {
    path.ends_with(".yml") || path.ends_with(".yaml")
}

/// Retag every workload manifest under `scope` to `target_tag`.
///
/// Files that need no change are skipped. An empty result is a valid
/// outcome and means the run has nothing to commit.
///
/// # Errors
/// Returns `PathNotFound` if `scope` is not in the tree, `Network` if the
/// tree or a file cannot be read, and any patch error of the first
/// malformed manifest.
pub async fn collect_changes<A: GitLabApi>(
    api: &A,
    context: &RepositoryContext,
    scope: &str,
    target_tag: &str,
) -> Result<ChangeSet> {
    let entries = browser::list_tree(api, context, Some(scope)).await?;
    let scope = Scope::resolve(&entries, scope);
    debug!(?scope, "collecting manifests");

    let mut changes = ChangeSet::default();
    for entry in entries.iter().filter(|entry| scope.includes(entry)) {
        let text = fetch_manifest(api, context, &entry.path).await?;
        let outcome = patch_manifest(&text, target_tag)?;

        if outcome.is_changed() {
            info!(
                file_path = %entry.path,
                replaced = ?outcome.replaced_tags,
                "image tag updated"
            );
            changes.push(
                ProposedFileChange::update(entry.path.clone(), outcome.content),
                outcome.replaced_tags,
            );
        } else {
            debug!(file_path = %entry.path, "already at target tag");
        }
    }

    Ok(changes)
}
