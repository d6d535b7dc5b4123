mod cli;
mod commands;
mod mcp;
mod pdf;
mod selection;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Mcp => {
            mcp::run_server().await?;
        }
        Commands::Info { path } => {
            commands::info::run(&path)?;
        }
        Commands::Merge { inputs, output } => {
            let input_refs: Vec<_> = inputs.iter().collect();
            commands::merge::run(&input_refs, &output)?;
        }
        Commands::Split {
            path,
            pages,
            output_dir,
            name,
        } => {
            commands::split::run(&path, pages.as_deref(), &output_dir, name.as_deref())?;
        }
        Commands::Compress { path, output } => {
            commands::compress::run(&path, &output)?;
        }
        Commands::Extract {
            path,
            pages,
            output,
        } => {
            commands::extract::run(&path, &pages, &output)?;
        }
        Commands::Text { path, pages } => {
            commands::text::run(&path, &pages)?;
        }
    }

    Ok(())
}
