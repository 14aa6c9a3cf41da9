//! Aggregated per-file rewrites and the commit built from them.

use std::collections::BTreeSet;

use tagbump_gitlab::{CommitAction, CommitActionKind, CreateCommit};

use crate::error::{Error, Result};

/// A rewritten manifest waiting to be committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposedFileChange {
    /// Path of the manifest in the repository.
    pub file_path: String,
    /// Full new document stream.
    pub content: String,
    /// Commit action for the file.
    pub action: CommitActionKind,
}

impl ProposedFileChange {
    /// Propose replacing the content of an existing file.
    #[must_use]
    pub fn update(file_path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            content: content.into(),
            action: CommitActionKind::Update,
        }
    }
}

impl From<ProposedFileChange> for CommitAction {
    fn from(change: ProposedFileChange) -> Self {
        Self {
            action: change.action,
            file_path: change.file_path,
            content: change.content,
        }
    }
}

/// All rewrites of one run plus every tag they replace.
///
/// Built once by the aggregator and consumed once when committing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    /// Changed files, in tree order.
    pub files: Vec<ProposedFileChange>,
    /// Distinct tags replaced across all files.
    pub prior_tags: BTreeSet<String>,
}

impl ChangeSet {
    /// Add a changed file and the tags it replaced.
    pub fn push(&mut self, change: ProposedFileChange, replaced_tags: BTreeSet<String>) {
        self.files.push(change);
        self.prior_tags.extend(replaced_tags);
    }

    /// Check if there is nothing to commit.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Number of changed files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Commit message naming the target tag and every replaced tag.
    #[must_use]
    pub fn commit_message(&self, target_tag: &str) -> String {
        std::iter::once(format!("Bump docker tag to {target_tag}"))
            .chain(
                self.prior_tags
                    .iter()
                    .map(|prior| format!("Bump docker tag from {prior} to {target_tag}")),
            )
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Build the multi-file commit request for `branch`.
    ///
    /// # Errors
    /// Returns `VersionUnchanged` if there are no changed files.
    pub fn commit_request(&self, branch: &str, target_tag: &str) -> Result<CreateCommit> {
        if self.is_empty() {
            return Err(Error::VersionUnchanged);
        }

        Ok(CreateCommit {
            branch: branch.to_string(),
            commit_message: self.commit_message(target_tag),
            actions: self.files.iter().cloned().map(CommitAction::from).collect(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn tags(tags: &[&str]) -> BTreeSet<String> {
        tags.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_push_unions_tags() {
        let mut changes = ChangeSet::default();
        changes.push(
            ProposedFileChange::update("a.yml", "a"),
            tags(&["master-01"]),
        );
        changes.push(
            ProposedFileChange::update("b.yml", "b"),
            tags(&["master-01", "master-02"]),
        );

        assert_eq!(changes.len(), 2);
        assert_eq!(changes.prior_tags, tags(&["master-01", "master-02"]));
    }

    #[test]
    fn test_commit_message() {
        let mut changes = ChangeSet::default();
        changes.push(
            ProposedFileChange::update("a.yml", "a"),
            tags(&["master-02", "master-01"]),
        );

        assert_eq!(
            changes.commit_message("TAG-2"),
            "Bump docker tag to TAG-2\n\
             Bump docker tag from master-01 to TAG-2\n\
             Bump docker tag from master-02 to TAG-2"
        );
    }

    #[test]
    fn test_commit_request() {
        let mut changes = ChangeSet::default();
        changes.push(
            ProposedFileChange::update("services/a.yml", "content-a"),
            tags(&["master-9"]),
        );
        changes.push(
            ProposedFileChange::update("services/b.yml", "content-b"),
            tags(&["master-9"]),
        );

        let request = changes.commit_request("staging", "v2").unwrap();

        assert_eq!(request.branch, "staging");
        assert_eq!(
            request.commit_message,
            "Bump docker tag to v2\nBump docker tag from master-9 to v2"
        );
        let paths: Vec<_> = request.actions.iter().map(|a| a.file_path.as_str()).collect();
        assert_eq!(paths, vec!["services/a.yml", "services/b.yml"]);
        assert!(
            request
                .actions
                .iter()
                .all(|a| a.action == CommitActionKind::Update)
        );
    }

    #[test]
    fn test_empty_change_set_is_version_unchanged() {
        let result = ChangeSet::default().commit_request("staging", "v2");
        assert!(matches!(result, Err(Error::VersionUnchanged)));
    }
}
