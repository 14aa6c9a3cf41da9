//! Error types for tagbump-core.

use crate::workload::WorkloadKind;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while updating image tags.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Reading the repository tree or a file failed.
    #[error("unable to get contents of {path}")]
    Network {
        /// The path (or listing) being read.
        path: String,
        /// The underlying API failure.
        #[source]
        source: tagbump_gitlab::Error,
    },

    /// The requested scope does not exist in the repository tree.
    #[error("path not found in repository: {0}")]
    PathNotFound(String),

    /// An image reference is not of the form `name:tag`.
    #[error("invalid image format: {0}")]
    InvalidImageFormat(String),

    /// A workload declares more than one container.
    #[error("too many container templates in {kind}: found {count}")]
    TooManyContainers {
        /// Kind of the offending workload.
        kind: WorkloadKind,
        /// Number of containers found.
        count: usize,
    },

    /// A workload lacks the structure needed to locate its container.
    #[error("malformed {kind}: {reason}")]
    MalformedWorkload {
        /// Kind of the offending workload.
        kind: WorkloadKind,
        /// What is missing or mistyped.
        reason: String,
    },

    /// Nothing to do: every workload already carries the target tag.
    #[error("new image tag matches old, nothing to do")]
    VersionUnchanged,

    /// The commit was rejected or could not be delivered.
    #[error("commit failed: {0}")]
    CommitFailed(String),

    /// Manifest text is not valid YAML.
    #[error("invalid yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error.
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Whether this is the informational no-op signal rather than a failure.
    #[must_use]
    pub const fn is_version_unchanged(&self) -> bool {
        matches!(self, Self::VersionUnchanged)
    }
}
