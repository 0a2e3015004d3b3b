// ABOUTME: Entry point for the retag-push CLI application.
// ABOUTME: Parses arguments and dispatches to appropriate command handlers.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use retag_push::config::{self, Config};
use retag_push::error::Result;
use retag_push::output::OutputMode;
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> Result<i32> {
    let cwd = env::current_dir()?;
    let mode = OutputMode::from(cli.output);

    match cli.command {
        Commands::Init { force } => {
            let path = config::init_config(&cwd, force)?;
            println!("Created {}", path.display());
            Ok(0)
        }
        Commands::Run(args) => {
            let config = Config::load_or_default(&cwd, cli.config.as_deref())?;
            commands::run(config, args.overrides(), mode).await
        }
        Commands::Plan(args) => {
            let config = Config::load_or_default(&cwd, cli.config.as_deref())?;
            commands::plan(config, args.overrides(), mode)
        }
        Commands::Cleanup(args) => {
            let config = Config::load_or_default(&cwd, cli.config.as_deref())?;
            commands::cleanup(config, args.overrides(), mode).await
        }
    }
}
