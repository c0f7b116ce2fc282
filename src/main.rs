use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use mail2org::cli::args::{Cli, Commands};
use mail2org::cli::commands;
use mail2org::config::Config;
use mail2org::error::Mail2OrgError;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Mail2OrgError> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    let format = cli.output;

    let output = match cli.command {
        Commands::Ingest(args) => commands::ingest(&args, &config)?,
        Commands::Resolve(args) => commands::resolve_token(&args, &config, format)?,
        Commands::Completions { shell } => {
            commands::completions(shell);
            String::new()
        }
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
