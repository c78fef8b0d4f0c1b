use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{GatewayError, GatewayResult};

const FENCE: &str = "```";

/// Remove one surrounding ```` ``` ```` / ```` ```json ```` fence, if any
pub fn strip_code_fences(text: &str) -> &str {
    let mut body = text.trim();

    if let Some(rest) = body.strip_prefix(FENCE) {
        // optional language tag directly after the fence
        let tag_len = rest
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(rest.len());
        let after_tag = &rest[tag_len..];
        let next = after_tag.trim_start().chars().next();
        body = if tag_len > 0 && matches!(next, None | Some('[') | Some('{')) {
            after_tag
        } else {
            rest
        };
    }
    if let Some(rest) = body.trim_end().strip_suffix(FENCE) {
        body = rest;
    }

    body.trim()
}

/// Decode a JSON array of `T`, failing on anything that is not an array
pub fn parse_json_array<T: DeserializeOwned>(text: &str, what: &str) -> GatewayResult<Vec<T>> {
    let value = parse_value(text, what)?;
    if !value.is_array() {
        tracing::warn!(raw = text, "{} response is not a JSON array", what);
        return Err(GatewayError::Parse(format!(
            "response must be an array of {}",
            what
        )));
    }
    serde_json::from_value(value).map_err(|e| {
        tracing::warn!(raw = text, error = %e, "{} response has unexpected shape", what);
        GatewayError::Parse(format!("invalid {}: {}", what, e))
    })
}

/// Decode a single JSON object of `T`
pub fn parse_json_object<T: DeserializeOwned>(text: &str, what: &str) -> GatewayResult<T> {
    let value = parse_value(text, what)?;
    if !value.is_object() {
        tracing::warn!(raw = text, "{} response is not a JSON object", what);
        return Err(GatewayError::Parse(format!("response must be a {} object", what)));
    }
    serde_json::from_value(value).map_err(|e| {
        tracing::warn!(raw = text, error = %e, "{} response has unexpected shape", what);
        GatewayError::Parse(format!("invalid {}: {}", what, e))
    })
}

fn parse_value(text: &str, what: &str) -> GatewayResult<Value> {
    serde_json::from_str(strip_code_fences(text)).map_err(|e| {
        tracing::warn!(raw = text, error = %e, "{} response is not JSON", what);
        GatewayError::Parse(format!("{} response is not valid JSON", what))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fences_with_and_without_language_tag() {
        let bare = r#"[{"a":1}]"#;
        let tagged = "```json\n[{\"a\":1}]\n```";
        let untagged = "```\n[{\"a\":1}]\n```";
        let upper = "```JSON [{\"a\":1}]```";
        let glued_tag = "```json[{\"a\":1}]```";

        for text in [bare, tagged, untagged, upper, glued_tag] {
            assert_eq!(strip_code_fences(text), bare, "input: {text:?}");
        }
    }

    #[test]
    fn fence_glued_to_payload_keeps_payload() {
        assert_eq!(strip_code_fences("```[1,2]```"), "[1,2]");
        assert_eq!(strip_code_fences("```json{\"k\":1}```"), "{\"k\":1}");
        // a bare word right after the fence is payload, not a tag
        assert_eq!(strip_code_fences("```true```"), "true");
    }

    #[test]
    fn parses_fenced_and_plain_identically() {
        let plain: Vec<serde_json::Value> = parse_json_array("[1, 2, 3]", "numbers").unwrap();
        let fenced: Vec<serde_json::Value> =
            parse_json_array("```json\n[1, 2, 3]\n```", "numbers").unwrap();
        assert_eq!(plain, fenced);
    }

    #[test]
    fn apology_text_is_a_parse_error() {
        let result: GatewayResult<Vec<serde_json::Value>> =
            parse_json_array("I'm sorry, I can't help with that.", "content ideas");
        assert!(matches!(result, Err(GatewayError::Parse(_))));
    }

    #[test]
    fn object_where_array_expected_is_a_parse_error() {
        let result: GatewayResult<Vec<serde_json::Value>> = parse_json_array(r#"{"a":1}"#, "items");
        assert!(matches!(result, Err(GatewayError::Parse(msg)) if msg.contains("array")));
    }

    #[test]
    fn object_parse() {
        let value: serde_json::Map<String, serde_json::Value> =
            parse_json_object("```json\n{\"k\": true}\n```", "prefs").unwrap();
        assert_eq!(value["k"], true);
        assert!(parse_json_object::<serde_json::Value>("[1]", "prefs").is_err());
    }
}
