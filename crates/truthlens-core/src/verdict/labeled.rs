//! Parser for the `VERDICT:` / `CONFIDENCE:` / `EXPLANATION:` line format.

use super::{read_confidence, ParsedVerdict, Verdict, VerdictParser, DEFAULT_CONFIDENCE};
use crate::error::TruthLensResult;

const VERDICT_MARKER: &str = "VERDICT:";
const CONFIDENCE_MARKER: &str = "CONFIDENCE:";
const EXPLANATION_MARKER: &str = "EXPLANATION:";

const FORMAT_INSTRUCTIONS: &str = "Format your response as:
VERDICT: [TRUE/FALSE]
CONFIDENCE: [0-100]%
EXPLANATION: [Detailed explanation with facts and context]";

/// Literal substring parser for labeled lines. Never fails: missing markers
/// fall back to defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabeledLineParser;

impl VerdictParser for LabeledLineParser {
    fn name(&self) -> &str {
        "labeled"
    }

    fn format_instructions(&self) -> &str {
        FORMAT_INSTRUCTIONS
    }

    fn parse(&self, raw: &str) -> TruthLensResult<ParsedVerdict> {
        let verdict = segment_after(raw, VERDICT_MARKER)
            .map(|segment| Verdict::from_fragment(first_line(segment)))
            .unwrap_or(Verdict::Unknown);

        let confidence = segment_after(raw, CONFIDENCE_MARKER)
            .map(|segment| read_confidence(first_line(segment)))
            .unwrap_or(DEFAULT_CONFIDENCE);

        let explanation = segment_after(raw, EXPLANATION_MARKER)
            .map(|segment| segment.trim().to_string())
            .unwrap_or_else(|| raw.to_string());

        Ok(ParsedVerdict {
            verdict,
            confidence,
            explanation,
        })
    }
}

/// Text after the first occurrence of `marker`, up to its next occurrence.
fn segment_after<'a>(text: &'a str, marker: &str) -> Option<&'a str> {
    let start = text.find(marker)? + marker.len();
    let rest = &text[start..];
    let end = rest.find(marker).unwrap_or(rest.len());
    Some(&rest[..end])
}

fn first_line(segment: &str) -> &str {
    segment.split('\n').next().unwrap_or("").trim()
}
