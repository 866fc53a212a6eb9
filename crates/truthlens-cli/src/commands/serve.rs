//! Web server command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use truthlens_core::{AnalysisService, AppConfig};

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on (overrides configuration)
    #[arg(long, env = "TRUTHLENS_PORT")]
    pub port: Option<u16>,

    /// Host to bind to (overrides configuration)
    #[arg(long, env = "TRUTHLENS_HOST")]
    pub host: Option<String>,

    /// Also write logs to a file
    #[arg(long)]
    pub log: bool,

    /// Log file path (default: logs/truthlens.log)
    #[arg(long, requires = "log")]
    pub log_file: Option<PathBuf>,
}

pub async fn execute(args: ServeArgs, config: AppConfig) -> Result<()> {
    let host = args.host.unwrap_or_else(|| config.server.host.clone());
    let port = args.port.unwrap_or(config.server.port);

    if config.gemini.api_key.is_empty() {
        tracing::warn!("GOOGLE_GEMINI_API_KEY is not set; primary analysis will fail over");
    }
    if config.huggingface.api_token.is_empty() {
        tracing::warn!("HUGGINGFACE_API_TOKEN is not set; classifier fallback will fail");
    }

    let service = AnalysisService::from_config(&config);

    println!();
    println!("  {} {}", "TruthLens".cyan().bold(), "API Server".bold());
    println!();
    println!("  {}      http://{}:{}/api/analyze/", "Analyze".green(), host, port);
    println!("  {}       {} / {:?}", "Model".green(), config.gemini.model, config.verdict_format);
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    truthlens_web::run_server(service, &host, port).await?;

    Ok(())
}
