//! Parser for structured JSON verdicts.
//!
//! Models often wrap JSON in markdown fences or add a sentence before it, so
//! the object is located before it is decoded.

use serde::Deserialize;
use serde_json::Value;

use super::{read_confidence, ParsedVerdict, Verdict, VerdictParser, DEFAULT_CONFIDENCE};
use crate::error::{TruthLensError, TruthLensResult};

const FORMAT_INSTRUCTIONS: &str = r#"Return ONLY a valid JSON object (no markdown, no extra text) matching this exact structure:
{"verdict": "TRUE or FALSE", "confidence": 0-100, "explanation": "Detailed explanation with facts and context"}"#;

#[derive(Deserialize)]
struct RawVerdict {
    verdict: Option<String>,
    confidence: Option<Value>,
    explanation: Option<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonParser;

impl VerdictParser for JsonParser {
    fn name(&self) -> &str {
        "json"
    }

    fn format_instructions(&self) -> &str {
        FORMAT_INSTRUCTIONS
    }

    fn parse(&self, raw: &str) -> TruthLensResult<ParsedVerdict> {
        let decoded: RawVerdict = serde_json::from_str(locate_object(raw))
            .map_err(|e| TruthLensError::malformed(format!("expected a JSON verdict object: {e}")))?;

        let verdict = decoded
            .verdict
            .as_deref()
            .map(Verdict::from_fragment)
            .unwrap_or(Verdict::Unknown);

        let confidence = match decoded.confidence {
            None | Some(Value::Null) => DEFAULT_CONFIDENCE,
            Some(Value::Number(n)) => match n.as_f64() {
                // A ratio like 0.85 is read as a percentage.
                Some(f) if f > 0.0 && f < 1.0 => (f * 100.0).round() as u8,
                Some(f) => f.round().clamp(0.0, 100.0) as u8,
                None => DEFAULT_CONFIDENCE,
            },
            Some(Value::String(s)) => read_confidence(&s),
            Some(_) => super::UNREADABLE_CONFIDENCE,
        };

        let explanation = decoded
            .explanation
            .map(|e| e.trim().to_string())
            .unwrap_or_else(|| raw.to_string());

        Ok(ParsedVerdict {
            verdict,
            confidence,
            explanation,
        })
    }
}

/// Slice out the verdict object: the body of the first markdown fence if there
/// is one, else the span from the first `{` to the last `}`.
fn locate_object(text: &str) -> &str {
    let text = text.trim();
    fenced_body(text).unwrap_or_else(|| braced_span(text).unwrap_or(text))
}

fn fenced_body(text: &str) -> Option<&str> {
    let (_, after_open) = text.split_once("```")?;
    let (body, _) = after_open.split_once("```")?;
    let body = body.strip_prefix("json").unwrap_or(body);
    Some(body.trim())
}

fn braced_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}
