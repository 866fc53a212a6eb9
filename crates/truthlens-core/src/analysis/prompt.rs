//! Prompt construction.

/// Build the fact-check prompt for `claim`.
///
/// `format_instructions` comes from the active verdict parser.
pub fn build_fact_check_prompt(claim: &str, format_instructions: &str) -> String {
    format!(
        r#"Analyze this news/claim for factual accuracy: "{claim}"

Please:
1. Search your knowledge base to verify if this news/event actually happened
2. Provide a clear TRUE/FALSE assessment
3. Give a detailed explanation with specific facts
4. If it's about current events, mention when it happened
5. Rate your confidence (0-100%)

{format_instructions}
"#
    )
}

/// Build the article summary prompt.
pub fn build_summary_prompt(text: &str) -> String {
    format!("Summarize this news article in 2-3 sentences: {text}")
}
