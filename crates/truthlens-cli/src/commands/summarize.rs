//! Article summary command.

use anyhow::Result;
use clap::Args;
use std::sync::Arc;
use truthlens_core::provider::GeminiClient;
use truthlens_core::{AppConfig, ArticleSummarizer, Summarizer};

#[derive(Args)]
pub struct SummarizeArgs {
    /// Article text
    pub text: String,
}

pub async fn execute(args: SummarizeArgs, config: AppConfig) -> Result<()> {
    let summarizer = ArticleSummarizer::new(Arc::new(GeminiClient::from_config(&config.gemini)));
    println!("{}", summarizer.summarize(&args.text).await);
    Ok(())
}
