// retailflow/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // 1. Setup Logging (Tracing)
    // RUST_LOG=debug retailflow run ... to see the per-stage details.
    // Logs go to stderr: stdout carries the command output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            project,
            skip_export,
        } => commands::run::execute(project, skip_export),
        Commands::Check { project } => commands::check::execute(project),
        Commands::Validate { store } => commands::validate::execute(store),
        Commands::Summary { store } => commands::summary::execute(store),
        Commands::Query { query, store } => commands::query::execute(query, store),
        Commands::Export {
            relation,
            destination,
            store,
        } => commands::export::execute(relation, destination, store),
    }
}
