//! CLI command definitions and handlers.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use truthlens_core::AppConfig;

pub mod check;
pub mod serve;
pub mod summarize;

/// TruthLens - fact-check claims with remote language models
#[derive(Parser)]
#[command(name = "truthlens")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true, env = "TRUTHLENS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Serve(serve::ServeArgs),

    /// Analyze a single claim and print the verdict
    Check(check::CheckArgs),

    /// Summarize an article in a few sentences
    Summarize(summarize::SummarizeArgs),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = AppConfig::load(self.config.as_deref()).context("Failed to load configuration")?;

        match self.command {
            Commands::Serve(args) => serve::execute(args, config).await,
            Commands::Check(args) => check::execute(args, config).await,
            Commands::Summarize(args) => summarize::execute(args, config).await,
        }
    }
}
