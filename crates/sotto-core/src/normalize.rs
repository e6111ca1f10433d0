//! Best-effort extraction of human text from heterogeneous API responses.
//!
//! Every transcription and processing dialect funnels its response body
//! through here. The extractor knows the handful of shapes the supported
//! API families produce, plus a fixed list of generic fallback keys, and
//! never fails: an unrecognized object is serialized back to JSON so the
//! caller always gets *something* displayable.

use serde_json::Value;

/// Normalize a raw response body: parse as JSON when possible, otherwise
/// treat the body itself as the text.
pub fn normalize_body(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => extract_text(&value),
        Err(_) => body.trim().to_string(),
    }
}

/// Extract display text from a parsed response.
///
/// Rules are ordered, first match wins:
/// 1. null → empty
/// 2. string → trimmed as-is
/// 3. chat-completion shape: `choices[0].message.content`
/// 4. completion shape: `choices[0].text`
/// 5. generate shape: `response`
/// 6. chat shape: `message.content`
/// 7. fallback keys, fixed priority: `text`, `content`, `generated_text`,
///    `output`, `result`; first non-empty value wins, scalars coerced
/// 8. anything else: objects serialize to JSON, scalars coerce to strings
pub fn extract_text(data: &Value) -> String {
    match data {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        Value::Object(_) => extract_from_object(data),
        other => coerce_scalar(other),
    }
}

const FALLBACK_KEYS: [&str; 5] = ["text", "content", "generated_text", "output", "result"];

fn extract_from_object(data: &Value) -> String {
    let known_paths = [
        "/choices/0/message/content",
        "/choices/0/text",
        "/response",
        "/message/content",
    ];
    for path in known_paths {
        if let Some(s) = data.pointer(path).and_then(Value::as_str)
            && !s.is_empty()
        {
            return s.trim().to_string();
        }
    }

    for key in FALLBACK_KEYS {
        match data.get(key) {
            Some(Value::String(s)) if !s.is_empty() => return s.trim().to_string(),
            Some(v @ (Value::Number(_) | Value::Bool(_))) => return coerce_scalar(v),
            _ => {}
        }
    }

    // Unrecognized object: hand back its JSON rather than losing it.
    serde_json::to_string(data).unwrap_or_default()
}

fn coerce_scalar(value: &Value) -> String {
    match value {
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_is_empty() {
        assert_eq!(extract_text(&Value::Null), "");
    }

    #[test]
    fn plain_string_is_trimmed() {
        assert_eq!(extract_text(&json!("  hello world \n")), "hello world");
    }

    #[test]
    fn chat_completion_shape() {
        let data = json!({"choices": [{"message": {"content": " Polished. "}}]});
        assert_eq!(extract_text(&data), "Polished.");
    }

    #[test]
    fn completion_shape() {
        let data = json!({"choices": [{"text": "completion text"}]});
        assert_eq!(extract_text(&data), "completion text");
    }

    #[test]
    fn generate_shape() {
        let data = json!({"response": "Hello world.", "done": true});
        assert_eq!(extract_text(&data), "Hello world.");
    }

    #[test]
    fn chat_shape() {
        let data = json!({"message": {"role": "assistant", "content": "hi"}});
        assert_eq!(extract_text(&data), "hi");
    }

    #[test]
    fn chat_completion_wins_over_generate() {
        let data = json!({
            "choices": [{"message": {"content": "from chat"}}],
            "response": "from generate"
        });
        assert_eq!(extract_text(&data), "from chat");
    }

    #[test]
    fn fallback_key_priority() {
        let data = json!({"output": "later", "text": "first"});
        assert_eq!(extract_text(&data), "first");
    }

    #[test]
    fn empty_fallback_value_is_skipped() {
        let data = json!({"text": "", "content": "second choice"});
        assert_eq!(extract_text(&data), "second choice");
    }

    #[test]
    fn numeric_fallback_is_coerced() {
        let data = json!({"result": 42});
        assert_eq!(extract_text(&data), "42");
    }

    #[test]
    fn unrecognized_object_serializes_to_json() {
        let data = json!({"status": "ok", "elapsed_ms": 12});
        let out = extract_text(&data);
        let round: Value = serde_json::from_str(&out).expect("valid JSON");
        assert_eq!(round, data);
    }

    #[test]
    fn scalars_coerce() {
        assert_eq!(extract_text(&json!(3.5)), "3.5");
        assert_eq!(extract_text(&json!(true)), "true");
    }

    #[test]
    fn body_that_is_not_json_is_passed_through() {
        assert_eq!(normalize_body("plain transcript\n"), "plain transcript");
    }

    #[test]
    fn body_that_is_json_is_extracted() {
        assert_eq!(normalize_body(r#"{"text":" hi "}"#), "hi");
    }

    #[test]
    fn whitespace_only_json_string_normalizes_to_empty() {
        assert_eq!(normalize_body("\"   \""), "");
    }

    #[test]
    fn empty_body_normalizes_to_empty() {
        assert_eq!(normalize_body(""), "");
    }
}
