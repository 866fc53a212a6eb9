//! Short article summaries from the text-generation provider.
//!
//! Independent of claim analysis: nothing in the analysis path calls it.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

use crate::analysis::prompt::build_summary_prompt;
use crate::provider::TextGenerator;

pub const SUMMARY_FAILED: &str = "Could not summarize the article.";

#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize `text`. Never fails; errors yield [`SUMMARY_FAILED`].
    async fn summarize(&self, text: &str) -> String;
}

/// Summarizer backed by a [`TextGenerator`].
#[derive(Clone)]
pub struct ArticleSummarizer {
    generator: Arc<dyn TextGenerator>,
}

impl ArticleSummarizer {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl Summarizer for ArticleSummarizer {
    async fn summarize(&self, text: &str) -> String {
        match self.generator.generate(&build_summary_prompt(text)).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!(provider = self.generator.provider(), error = %format!("{:#}", e), "Summarization failed");
                SUMMARY_FAILED.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    struct EchoGenerator {
        fail: bool,
    }

    #[async_trait]
    impl TextGenerator for EchoGenerator {
        fn provider(&self) -> &str {
            "echo"
        }

        fn model_name(&self) -> &str {
            "echo-1"
        }

        async fn generate(&self, prompt: &str) -> Result<String> {
            if self.fail {
                anyhow::bail!("quota exceeded");
            }
            Ok(format!("summary of [{}]", prompt))
        }
    }

    #[tokio::test]
    async fn test_summarize_returns_raw_text() {
        let summarizer = ArticleSummarizer::new(Arc::new(EchoGenerator { fail: false }));
        let summary = summarizer.summarize("Long article.").await;
        assert_eq!(
            summary,
            "summary of [Summarize this news article in 2-3 sentences: Long article.]"
        );
    }

    #[tokio::test]
    async fn test_summarize_failure_message() {
        let summarizer = ArticleSummarizer::new(Arc::new(EchoGenerator { fail: true }));
        assert_eq!(summarizer.summarize("x").await, SUMMARY_FAILED);
    }
}
