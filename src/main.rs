mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Commands::Render {
            file,
            config,
            root,
            data,
            safe,
            output,
        } => commands::render::run(file, config, root, data, safe, output),
        Commands::Check { path } => commands::check::run(path),
    }
}
