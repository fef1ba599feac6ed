//! Extracting JSON payloads from free-form completions.

use std::sync::OnceLock;
use regex::Regex;
use serde::de::DeserializeOwned;
use crate::Result;

fn fence_pattern() -> Option<&'static Regex> {
    static FENCE: OnceLock<Option<Regex>> = OnceLock::new();
    FENCE
        .get_or_init(|| Regex::new(r"(?s)```(?:json)?\s*(?P<body>\{.*?\})\s*```").ok())
        .as_ref()
}

/// The JSON object inside a completion.
///
/// Prefers a fenced code block; otherwise takes the span from the first `{`
/// to the last `}`; otherwise returns the trimmed text unchanged.
pub fn extract_json(text: &str) -> &str {
    if let Some(body) = fence_pattern()
        .and_then(|re| re.captures(text))
        .and_then(|c| c.name("body"))
    {
        return body.as_str();
    }
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text.trim(),
    }
}

/// Deserialize the JSON object inside a completion.
pub fn parse_completion<T: DeserializeOwned>(text: &str) -> Result<T> {
    Ok(serde_json::from_str(extract_json(text))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_json() {
        assert_eq!(extract_json(r#"  {"a":1} "#), r#"{"a":1}"#);
    }

    #[test]
    fn test_fenced_json() {
        let text = "Here is your quiz:\n```json\n{\"a\": {\"b\": 2}}\n```\nGood luck!";
        assert_eq!(extract_json(text), "{\"a\": {\"b\": 2}}");
    }

    #[test]
    fn test_prose_around_object() {
        let text = "Sure! {\"a\": 1} Let me know.";
        assert_eq!(extract_json(text), "{\"a\": 1}");
    }

    #[test]
    fn test_parse_completion_error() {
        let parsed: Result<serde_json::Value> = parse_completion("no json here");
        assert!(parsed.is_err());
    }
}
