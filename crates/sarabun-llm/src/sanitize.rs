//! Oracle reply sanitation.
//!
//! Models frequently wrap the requested JSON in a markdown code fence even
//! when told not to. The contract here: strip one leading/trailing fence
//! (three backticks, optional language tag), trim whitespace, then parse.
//! Anything that still fails to parse is a content failure, reported to the
//! caller and never retried.

use crate::OracleError;
use serde::de::DeserializeOwned;

/// Strip a single surrounding markdown code fence, if present.
///
/// Unbalanced or absent fences leave the (trimmed) text unchanged.
pub fn strip_markdown_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(rest) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // The opening fence may carry a language tag on its own line.
    let body = match rest.split_once('\n') {
        Some((first_line, remainder))
            if first_line.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            remainder
        }
        _ => rest,
    };
    body.trim()
}

/// Fence-strip and parse a reply into a typed record.
///
/// Both failure modes — not JSON at all, and JSON of the wrong shape — are
/// content failures; the transport already succeeded by the time this runs.
pub fn parse_oracle_json<T: DeserializeOwned>(raw: &str) -> Result<T, OracleError> {
    let body = strip_markdown_fence(raw);
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| OracleError::Content(format!("reply is not valid JSON: {e}")))?;
    serde_json::from_value(value)
        .map_err(|e| OracleError::Content(format!("reply shape mismatch: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Probe {
        value: i32,
    }

    #[test]
    fn strips_json_language_fence() {
        let raw = "```json\n{\"value\": 1}\n```";
        assert_eq!(strip_markdown_fence(raw), "{\"value\": 1}");
    }

    #[test]
    fn strips_bare_fence() {
        let raw = "```\n{\"value\": 2}\n```";
        assert_eq!(strip_markdown_fence(raw), "{\"value\": 2}");
    }

    #[test]
    fn strips_inline_fence_without_newline() {
        let raw = "```{\"value\": 3}```";
        assert_eq!(strip_markdown_fence(raw), "{\"value\": 3}");
    }

    #[test]
    fn unfenced_text_is_only_trimmed() {
        assert_eq!(strip_markdown_fence("  {\"value\": 4}\n"), "{\"value\": 4}");
    }

    #[test]
    fn unbalanced_fence_is_left_alone() {
        assert_eq!(strip_markdown_fence("```json\n{\"a\":1}"), "```json\n{\"a\":1}");
    }

    #[test]
    fn parses_fenced_record() {
        let probe: Probe = parse_oracle_json("```json\n{\"value\": 7}\n```").unwrap();
        assert_eq!(probe, Probe { value: 7 });
    }

    #[test]
    fn plain_text_reply_is_a_content_failure() {
        let result: Result<Probe, _> = parse_oracle_json("Sorry, I cannot read this receipt.");
        assert!(matches!(result, Err(OracleError::Content(_))));
    }

    #[test]
    fn wrong_shape_is_a_content_failure() {
        let result: Result<Probe, _> = parse_oracle_json("{\"value\": \"not a number\"}");
        assert!(matches!(result, Err(OracleError::Content(_))));
    }
}
