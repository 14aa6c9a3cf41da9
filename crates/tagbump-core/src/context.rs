//! Per-invocation repository coordinates.

/// The project and branch every operation of one run targets.
///
/// The instance URL and access token live in the API client; together
/// they address exactly one branch of one repository. Built once after
/// the project name is resolved and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryContext {
    project_id: u64,
    branch: String,
}

impl RepositoryContext {
    /// Create a context for `branch` of the project with id `project_id`.
    #[must_use]
    pub fn new(project_id: u64, branch: impl Into<String>) -> Self {
        Self {
            project_id,
            branch: branch.into(),
        }
    }

    /// Numeric project id.
    #[must_use]
    pub const fn project_id(&self) -> u64 {
        self.project_id
    }

    /// Branch read from and committed to.
    #[must_use]
    pub fn branch(&self) -> &str {
        &self.branch
    }
}
