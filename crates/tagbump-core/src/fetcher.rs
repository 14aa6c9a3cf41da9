//! Manifest retrieval.

use tagbump_gitlab::GitLabApi;
use tracing::debug;

use crate::context::RepositoryContext;
use crate::error::{Error, Result};

/// Fetch the raw text of `file_path` at the context's branch.
///
/// # Errors
/// Returns `Network` carrying the path for any transport or HTTP failure,
/// including a missing file.
pub async fn fetch_manifest<A: GitLabApi>(
    api: &A,
    context: &RepositoryContext,
    file_path: &str,
) -> Result<String> {
    debug!(file_path, branch = context.branch(), "fetching manifest");
    api.get_raw_file(context.project_id(), context.branch(), file_path)
        .await
        .map_err(|source| Error::Network {
            path: file_path.to_string(),
            source,
        })
}
