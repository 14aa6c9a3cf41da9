//! Atomic commit submission with a bounded retry policy.

use serde_json::Value;
use tagbump_gitlab::{CreateCommit, GitLabApi, RetryPolicy};
use tracing::{info, warn};

use crate::changes::ChangeSet;
use crate::context::RepositoryContext;
use crate::error::{Error, Result};

/// What the server reported for an accepted commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitReceipt {
    /// Commit SHA, if the response carried one.
    pub id: Option<String>,
    /// Link to the commit in the web UI, if present.
    pub web_url: Option<String>,
    /// Number of files in the commit.
    pub files: usize,
}

impl CommitReceipt {
    fn from_response(response: &Value, files: usize) -> Self {
        let field = |name: &str| response.get(name).and_then(Value::as_str).map(str::to_string);
        Self {
            id: field("id"),
            web_url: field("web_url"),
            files,
        }
    }
}

/// Commit every change in `changes` to the context's branch as one commit.
///
/// Attempts that fail with a status listed in `policy` are retried after
/// an exponentially growing delay. A response whose `status` field is set
/// to anything but null counts as a rejected commit.
///
/// # Errors
/// Returns `VersionUnchanged` without contacting the server when
/// `changes` is empty, and `CommitFailed` when the commit is rejected or
/// every attempt fails.
pub async fn submit_changes<A: GitLabApi>(
    api: &A,
    context: &RepositoryContext,
    changes: &ChangeSet,
    target_tag: &str,
    policy: &RetryPolicy,
) -> Result<CommitReceipt> {
    let request = changes.commit_request(context.branch(), target_tag)?;

    let response = send_with_retry(api, context.project_id(), &request, policy).await?;

    if let Some(status) = response.get("status").filter(|status| !status.is_null()) {
        return Err(Error::CommitFailed(format!(
            "server reported status {status}: {response}"
        )));
    }

    let receipt = CommitReceipt::from_response(&response, request.actions.len());
    info!(
        id = receipt.id.as_deref().unwrap_or("unknown"),
        files = receipt.files,
        branch = context.branch(),
        "committed tag update"
    );
    Ok(receipt)
}

async fn send_with_retry<A: GitLabApi>(
    api: &A,
    project_id: u64,
    request: &CreateCommit,
    policy: &RetryPolicy,
) -> Result<Value> {
    let mut attempt = 1;
    loop {
        match api.create_commit(project_id, request).await {
            Ok(response) => return Ok(response),
            Err(e) if attempt < policy.max_attempts() && policy.is_retryable(&e) => {
                let delay = policy.delay_for(attempt);
                warn!(attempt, status = ?e.status(), ?delay, "commit attempt failed, retrying");
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => {
                return Err(Error::CommitFailed(format!(
                    "{e} (after {attempt} attempt(s))"
                )));
            }
        }
    }
}
