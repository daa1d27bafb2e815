mod cli;
mod commands;
mod config;
mod error;
mod index;
mod mcp;
mod pdf;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            output,
            layout,
            pages,
        } => {
            commands::build::run(output.as_deref(), layout.as_deref(), &pages)?;
        }
        Commands::Links { path } => {
            commands::links::run(&path)?;
        }
        Commands::Mcp => {
            mcp::run_server().await?;
        }
    }

    Ok(())
}
