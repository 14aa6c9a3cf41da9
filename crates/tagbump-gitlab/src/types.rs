//! GitLab API types.

use serde::Serialize;

/// An entry in a repository tree listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    /// Path relative to the repository root.
    pub path: String,

    /// Whether the entry is a file or a directory.
    pub kind: EntryKind,
}

impl TreeEntry {
    /// Create a file entry.
    #[must_use]
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::File,
        }
    }

    /// Create a directory entry.
    #[must_use]
    pub fn directory(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Directory,
        }
    }

    /// Check if this entry is a regular file.
    #[must_use]
    pub const fn is_file(&self) -> bool {
        matches!(self.kind, EntryKind::File)
    }
}

/// Kind of a tree entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A blob.
    File,
    /// A tree.
    Directory,
}

impl EntryKind {
    /// Map GitLab's object type to an entry kind.
    ///
    /// Returns `None` for objects that are neither blobs nor trees
    /// (submodule `commit` entries).
    #[must_use]
    pub fn from_object_type(object_type: &str) -> Option<Self> {
        match object_type {
            "blob" => Some(Self::File),
            "tree" => Some(Self::Directory),
            _ => None,
        }
    }
}

/// Request to create a commit touching several files at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateCommit {
    /// Branch the commit lands on.
    pub branch: String,

    /// Commit message.
    pub commit_message: String,

    /// File actions, applied in order.
    pub actions: Vec<CommitAction>,
}

/// One file action inside a commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitAction {
    /// What to do with the file.
    pub action: CommitActionKind,

    /// Path of the file.
    pub file_path: String,

    /// Full new content.
    pub content: String,
}

/// File action type understood by the commits endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitActionKind {
    /// Replace the content of an existing file.
    #[default]
    Update,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_kind_from_object_type() {
        assert_eq!(EntryKind::from_object_type("blob"), Some(EntryKind::File));
        assert_eq!(
            EntryKind::from_object_type("tree"),
            Some(EntryKind::Directory)
        );
        assert_eq!(EntryKind::from_object_type("commit"), None);
    }

    #[test]
    fn test_tree_entry_constructors() {
        assert!(TreeEntry::file("a.yml").is_file());
        assert!(!TreeEntry::directory("services").is_file());
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_create_commit_serialization() {
        let commit = CreateCommit {
            branch: "staging".into(),
            commit_message: "Bump docker tag to v2".into(),
            actions: vec![CommitAction {
                action: CommitActionKind::Update,
                file_path: "services/api.yml".into(),
                content: "kind: Deployment\n".into(),
            }],
        };

        let json = serde_json::to_value(&commit).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "branch": "staging",
                "commit_message": "Bump docker tag to v2",
                "actions": [{
                    "action": "update",
                    "file_path": "services/api.yml",
                    "content": "kind: Deployment\n"
                }]
            })
        );
    }
}
