//! Response normalization: pull model-generated text out of whichever nested
//! envelope shape the provider used, then parse it into the question schema.
//!
//! Stage A walks the envelope along a fixed priority of top-level keys.
//! Stage B is a strict JSON parse into `Vec<GeneratedQuestion>`. The two
//! stages fail with distinct errors so operators can tell "provider returned
//! nothing usable" apart from "provider returned non-JSON prose".

use serde_json::Value;

use crate::domain::GeneratedQuestion;
use crate::error::ApiError;

/// Top-level keys probed in priority order: the provider's primary output
/// key, then the chat-style key, then a generic fallback.
const ENVELOPE_KEYS: [&str; 3] = ["output", "choices", "response"];

/// Stage A. The first key (in priority order) that yields any non-empty text
/// wins. Sequences are scanned in order for the first item with derivable
/// text; single items are derived directly.
pub fn extract_response_text(envelope: &Value) -> Result<String, ApiError> {
  for key in ENVELOPE_KEYS {
    let Some(chunk) = envelope.get(key) else { continue };
    if chunk.is_null() {
      continue;
    }
    match chunk {
      Value::Array(items) => {
        for item in items {
          if let Some(text) = text_from_item(item) {
            return Ok(text);
          }
        }
      }
      single => {
        if let Some(text) = text_from_item(single) {
          return Ok(text);
        }
      }
    }
  }
  Err(ApiError::Extraction)
}

/// Derive text from one envelope item. Cases, in order:
/// - plain string: used as-is;
/// - object with a `content` array: concatenation of each piece's text
///   (`text` field, else `content` field, else the piece itself when it is a
///   string), skipping pieces that yield nothing;
/// - object with a `content` string: used directly;
/// - otherwise an object's `text` field.
/// Empty derivations never win.
fn text_from_item(item: &Value) -> Option<String> {
  match item {
    Value::String(s) => non_empty(s),
    Value::Object(map) => {
      let from_content = match map.get("content") {
        Some(Value::Array(pieces)) => {
          let mut out = String::new();
          for piece in pieces {
            match piece {
              Value::Object(p) => match p.get("text").and_then(Value::as_str) {
                Some(t) if !t.is_empty() => out.push_str(t),
                _ => {
                  if let Some(c) = p.get("content").and_then(Value::as_str) {
                    out.push_str(c);
                  }
                }
              },
              Value::String(s) => out.push_str(s),
              _ => {}
            }
          }
          non_empty(&out)
        }
        Some(Value::String(s)) => non_empty(s),
        _ => None,
      };
      from_content.or_else(|| map.get("text").and_then(Value::as_str).and_then(|t| non_empty(t)))
    }
    _ => None,
  }
}

fn non_empty(s: &str) -> Option<String> {
  if s.is_empty() { None } else { Some(s.to_string()) }
}

/// Stage B. All-or-nothing: either the whole text is a JSON array matching
/// the question schema, or the request fails.
pub fn parse_questions(text: &str) -> Result<Vec<GeneratedQuestion>, ApiError> {
  serde_json::from_str::<Vec<GeneratedQuestion>>(text).map_err(|e| ApiError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn primary_output_key_beats_choices_and_response() {
    let envelope = json!({
      "response": "lowest",
      "choices": ["middle"],
      "output": [{"content": [{"type": "output_text", "text": "highest"}]}],
    });
    assert_eq!(extract_response_text(&envelope).unwrap(), "highest");
  }

  #[test]
  fn choices_beats_response_when_both_have_text() {
    let envelope = json!({
      "choices": [{"text": "from choices"}],
      "response": "from response",
    });
    assert_eq!(extract_response_text(&envelope).unwrap(), "from choices");
  }

  #[test]
  fn null_primary_key_falls_through_to_next() {
    let envelope = json!({"output": null, "response": "fallback"});
    assert_eq!(extract_response_text(&envelope).unwrap(), "fallback");
  }

  #[test]
  fn plain_string_chunk_is_used_as_is() {
    let envelope = json!({"output": "direct text"});
    assert_eq!(extract_response_text(&envelope).unwrap(), "direct text");
  }

  #[test]
  fn content_array_concatenates_pieces_in_order() {
    let envelope = json!({
      "output": [{"content": [
        {"text": "uno "},
        {"no_text_here": 1},
        "dos ",
        {"content": "tres"},
      ]}],
    });
    assert_eq!(extract_response_text(&envelope).unwrap(), "uno dos tres");
  }

  #[test]
  fn content_string_is_used_directly() {
    let envelope = json!({"choices": [{"content": "inline"}]});
    assert_eq!(extract_response_text(&envelope).unwrap(), "inline");
  }

  #[test]
  fn text_field_is_the_fallback_when_content_yields_nothing() {
    let envelope = json!({"output": [{"content": [], "text": "from text"}]});
    assert_eq!(extract_response_text(&envelope).unwrap(), "from text");
  }

  #[test]
  fn sequence_skips_items_without_text() {
    let envelope = json!({"output": [{"irrelevant": true}, "", {"text": "third"}]});
    assert_eq!(extract_response_text(&envelope).unwrap(), "third");
  }

  #[test]
  fn no_known_key_is_an_extraction_failure() {
    let envelope = json!({"data": {"text": "hidden"}, "id": "resp_1"});
    assert!(matches!(extract_response_text(&envelope), Err(ApiError::Extraction)));
  }

  #[test]
  fn empty_text_everywhere_is_an_extraction_failure() {
    let envelope = json!({"output": [{"content": [{"text": ""}]}], "choices": [""]});
    assert!(matches!(extract_response_text(&envelope), Err(ApiError::Extraction)));
  }

  #[test]
  fn parse_accepts_a_question_array() {
    let text = r#"[
      {"question": "¿Qué es la ética?", "question_type": "Desarrollo",
       "cognitive_level": "Análisis", "answer_hint": "Relaciona moral y razón."}
    ]"#;
    let qs = parse_questions(text).unwrap();
    assert_eq!(qs.len(), 1);
    assert_eq!(qs[0].question_type, "Desarrollo");
  }

  #[test]
  fn parse_rejects_prose_with_a_parse_error() {
    assert!(matches!(parse_questions("not json"), Err(ApiError::Parse(_))));
  }

  #[test]
  fn parse_rejects_a_non_array_object() {
    assert!(matches!(parse_questions(r#"{"question": "x"}"#), Err(ApiError::Parse(_))));
  }
}
