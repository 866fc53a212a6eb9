//! Turning raw model text into a structured verdict.
//!
//! The analysis service only sees [`VerdictParser`]. Each parser also owns the
//! format instructions appended to the prompt, so the prompt and the parser
//! always describe the same output shape.

pub mod json;
pub mod labeled;

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::TruthLensResult;

pub use json::JsonParser;
pub use labeled::LabeledLineParser;

/// Confidence used when the model gives no confidence at all.
pub const DEFAULT_CONFIDENCE: u8 = 50;

/// Confidence used when the model gives a confidence that cannot be read.
pub const UNREADABLE_CONFIDENCE: u8 = 70;

/// Output format requested from the primary provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictFormat {
    /// `VERDICT:` / `CONFIDENCE:` / `EXPLANATION:` lines.
    #[default]
    Labeled,
    /// A single JSON object.
    Json,
}

impl VerdictFormat {
    /// Build the parser for this format.
    pub fn parser(self) -> Arc<dyn VerdictParser> {
        match self {
            Self::Labeled => Arc::new(LabeledLineParser),
            Self::Json => Arc::new(JsonParser),
        }
    }
}

/// TRUE/FALSE determination extracted from the model output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    True,
    False,
    /// The model output carried no verdict.
    Unknown,
}

impl Verdict {
    /// Classify a verdict fragment: anything mentioning TRUE is true, the rest false.
    pub fn from_fragment(fragment: &str) -> Self {
        if fragment.to_uppercase().contains("TRUE") {
            Self::True
        } else {
            Self::False
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::True => "TRUE",
            Self::False => "FALSE",
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// Structured result of parsing one model response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedVerdict {
    pub verdict: Verdict,
    /// Percentage in `0..=100`.
    pub confidence: u8,
    pub explanation: String,
}

impl ParsedVerdict {
    /// Only an explicit FALSE marks the claim as fake.
    pub fn is_fake(&self) -> bool {
        self.verdict == Verdict::False
    }

    /// Confidence as a ratio in `[0, 1]`.
    pub fn confidence_ratio(&self) -> f64 {
        f64::from(self.confidence) / 100.0
    }
}

/// Strategy for turning raw model text into a [`ParsedVerdict`].
pub trait VerdictParser: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Output-format block appended to the fact-check prompt.
    fn format_instructions(&self) -> &str;

    /// Parse a raw model response.
    fn parse(&self, raw: &str) -> TruthLensResult<ParsedVerdict>;
}

/// Read a confidence percentage out of free text.
///
/// Every non-digit character is dropped and the remaining digits are read as
/// one integer, so `"85%"` gives 85 and `"0.85"` also gives 85. No digits at
/// all yields [`UNREADABLE_CONFIDENCE`]. Values above 100 are clamped.
pub fn read_confidence(fragment: &str) -> u8 {
    let mut digits = fragment.chars().filter_map(decimal_digit).peekable();
    if digits.peek().is_none() {
        return UNREADABLE_CONFIDENCE;
    }
    let value = digits.fold(0u64, |acc, d| acc.saturating_mul(10).saturating_add(u64::from(d)));
    value.min(100) as u8
}

/// Decimal value of an ASCII, fullwidth, Arabic-Indic or Devanagari digit.
fn decimal_digit(c: char) -> Option<u32> {
    let zero = match c {
        '0'..='9' => '0',
        '\u{FF10}'..='\u{FF19}' => '\u{FF10}',
        '\u{0660}'..='\u{0669}' => '\u{0660}',
        '\u{06F0}'..='\u{06F9}' => '\u{06F0}',
        '\u{0966}'..='\u{096F}' => '\u{0966}',
        _ => return None,
    };
    Some(c as u32 - zero as u32)
}
