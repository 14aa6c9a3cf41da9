//! tagbump CLI - bump container image tags in GitLab-hosted manifests.

use clap::Parser;

mod commands;
mod logging;
mod output;

use commands::Cli;

fn main() {
    let cli = Cli::parse();

    output::set_quiet(cli.quiet);
    logging::init_tracing(cli.verbose);

    let result = tokio::runtime::Runtime::new()
        .map_err(anyhow::Error::from)
        .and_then(|rt| rt.block_on(commands::bump::run(&cli)));

    if let Err(e) = result {
        if e
            .downcast_ref::<tagbump_core::Error>()
            .is_some_and(tagbump_core::Error::is_version_unchanged)
        {
            output::info(&e.to_string());
            return;
        }
        output::error(&format!("{e:#}"));
        std::process::exit(1);
    }
}
