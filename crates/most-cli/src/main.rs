mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "most")]
#[command(version, about = "MOST CLI - inspect and test route tables", long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(short, long, global = true, default_value = most::config::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List configured routes in match order
    Routes,

    /// Resolve a url against the route table and print its route data
    Match {
        /// Request url, e.g. /products/42?tab=reviews
        url: String,
    },
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Execute command
    match cli.command {
        Commands::Routes => {
            commands::routes::execute(&cli.config)?;
        }
        Commands::Match { url } => {
            commands::match_url::execute(&cli.config, &url)?;
        }
    }

    Ok(())
}
