//! Command-line interface definition.

use std::path::PathBuf;

use clap::Parser;

pub mod bump;

/// Bump the container image tag of Kubernetes workloads in a GitLab repository.
///
/// Every Deployment, StatefulSet, Job and CronJob found under TARGET gets
/// IMAGE_TAG, and all changed files are committed together.
#[derive(Debug, Parser)]
#[command(name = "tagbump", version, about, long_about = None)]
pub struct Cli {
    /// File or directory in the repository to update.
    pub target: String,

    /// GitLab access token with `api` scope.
    pub api_token: String,

    /// Project path (`group/project`) or numeric project id.
    pub project: String,

    /// Image tag to set.
    pub image_tag: String,

    /// Branch to read from and commit to [default: staging].
    #[arg(short, long)]
    pub branch: Option<String>,

    /// GitLab base URL [default: https://gitlab.com].
    #[arg(long, value_name = "URL")]
    pub gitlab_url: Option<String>,

    /// Print the changes instead of committing them.
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Path to a TOML config file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Only print essential output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Show debug logging.
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,
}
