//! One-shot claim analysis.

use anyhow::{Context, Result};
use clap::Args;
use truthlens_core::{AnalysisRequest, AnalysisService, AppConfig};

use crate::output;

#[derive(Args)]
pub struct CheckArgs {
    /// Claim, headline or article text
    #[arg(required_unless_present = "url")]
    pub text: Option<String>,

    /// Article URL, used when no text is given
    #[arg(long)]
    pub url: Option<String>,

    /// Print the raw JSON response
    #[arg(long)]
    pub json: bool,
}

pub async fn execute(args: CheckArgs, config: AppConfig) -> Result<()> {
    let service = AnalysisService::from_config(&config);
    let request = AnalysisRequest {
        text: args.text,
        url: args.url,
        image: None,
    };

    let response = service.analyze(&request).await?;

    if args.json {
        let json = serde_json::to_string_pretty(&response).context("Failed to encode response")?;
        println!("{}", json);
    } else {
        output::print_analysis(&response);
    }

    Ok(())
}
