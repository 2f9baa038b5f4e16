use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tourguide::{Orchestrator, TourGuideConfig, logging, web};

/// Ask about the weather and sights of a place in plain language
#[derive(Parser)]
#[command(name = "tourguide", version, about)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the HTTP API
    Serve,
    /// Answer a single query, e.g. `tourguide ask I'm going to Goa`
    Ask {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = TourGuideConfig::load_from_path(cli.config)?;
    logging::init(&config.logging);

    let orchestrator = Arc::new(
        Orchestrator::from_config(&config).context("Failed to create upstream clients")?,
    );

    match cli.command {
        Command::Serve => {
            web::run(&config.server, orchestrator).await?;
            Ok(ExitCode::SUCCESS)
        }
        // Unknown places are answered, not failed; only upstream errors exit non-zero
        Command::Ask { text } => match orchestrator.handle(&text.join(" ")).await {
            Ok(response) => {
                println!("{}", response.message());
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => {
                tracing::debug!("Query failed: {}", e);
                eprintln!("{}", e.user_message());
                Ok(ExitCode::FAILURE)
            }
        },
    }
}
