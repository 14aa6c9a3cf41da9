//! Default command - retag workloads under a target and commit the result.

use anyhow::{Context, Result};
use tagbump_core::{ChangeSet, Config, RepositoryContext, collect_changes, submit_changes};
use tagbump_gitlab::{GitLabClient, SecretString};

use crate::commands::Cli;
use crate::output;

/// Run the bump.
pub async fn run(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::default(),
    };

    let url = cli.gitlab_url.as_deref().unwrap_or(&config.gitlab.url);
    let branch = cli.branch.as_deref().unwrap_or(&config.gitlab.branch);

    let client = GitLabClient::new(url, SecretString::from(cli.api_token.clone()))
        .context("Failed to create GitLab client")?;

    let project_id = client
        .resolve_project_id(&cli.project)
        .await
        .with_context(|| format!("Failed to resolve project {}", cli.project))?;
    let context = RepositoryContext::new(project_id, branch);

    let changes = collect_changes(&client, &context, &cli.target, &cli.image_tag).await?;

    if cli.dry_run {
        return print_dry_run(&changes, &context, &cli.image_tag);
    }

    let receipt = submit_changes(
        &client,
        &context,
        &changes,
        &cli.image_tag,
        &config.retry_policy(),
    )
    .await?;

    output::success(&format!(
        "Committed {} file(s) to {}",
        receipt.files,
        context.branch()
    ));
    if let Some(web_url) = &receipt.web_url {
        output::detail(&format!("  {web_url}"));
    }
    if let Some(id) = &receipt.id {
        output::essential(id);
    }
    Ok(())
}

/// Print every proposed file and the commit message without submitting.
fn print_dry_run(changes: &ChangeSet, context: &RepositoryContext, image_tag: &str) -> Result<()> {
    let request = changes.commit_request(context.branch(), image_tag)?;

    for action in &request.actions {
        output::file_header(&action.file_path);
        output::essential(&action.content);
    }
    output::essential(&request.commit_message);

    output::info(&format!(
        "Dry run: {} file(s) would be committed to {}",
        request.actions.len(),
        context.branch()
    ));
    Ok(())
}
