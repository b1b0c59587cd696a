//! The single JSON-coercion seam between free-form model output and the
//! typed artifact records. Models wrap JSON in code fences, prose, or both;
//! everything downstream of [`coerce`] sees only validated types.

use serde::de::DeserializeOwned;

use crate::error::{AgentError, AgentResult};

/// Extract the first complete JSON object or array embedded in `text`.
///
/// Prefers a ```json fenced block when present, otherwise scans for the
/// first balanced `{...}` or `[...]`, honoring strings and escapes.
pub fn extract_json(text: &str) -> Option<&str> {
    if let Some(fenced) = fenced_block(text) {
        if let Some(found) = balanced_value(fenced) {
            return Some(found);
        }
    }
    balanced_value(text)
}

/// Extract and deserialize one JSON value of type `T` from model output.
pub fn coerce<T: DeserializeOwned>(text: &str) -> AgentResult<T> {
    let raw = extract_json(text).ok_or(AgentError::NoJson)?;
    Ok(serde_json::from_str(raw)?)
}

fn fenced_block(text: &str) -> Option<&str> {
    let start = text.find("```")?;
    let after_fence = &text[start + 3..];
    // Skip the language tag on the opening fence line.
    let body_start = after_fence.find('\n')? + 1;
    let body = &after_fence[body_start..];
    let end = body.find("```")?;
    Some(&body[..end])
}

fn balanced_value(text: &str) -> Option<&str> {
    let open = text.find(['{', '['])?;
    let bytes = text.as_bytes();
    let (open_ch, close_ch) = if bytes[open] == b'{' {
        (b'{', b'}')
    } else {
        (b'[', b']')
    };

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate().skip(open) {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            _ if b == open_ch => depth += 1,
            _ if b == close_ch => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[open..=i]);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_bare_object() {
        let out = extract_json(r#"{"a": 1}"#).unwrap();
        assert_eq!(out, r#"{"a": 1}"#);
    }

    #[test]
    fn test_object_wrapped_in_prose() {
        let text = r#"Sure! Here is the result: {"name": "Lamp", "price": "10€"} Hope it helps."#;
        let out = extract_json(text).unwrap();
        assert_eq!(out, r#"{"name": "Lamp", "price": "10€"}"#);
    }

    #[test]
    fn test_fenced_block_preferred() {
        let text = "prose {not json\n```json\n{\"ok\": true}\n```\n";
        let out = extract_json(text).unwrap();
        assert_eq!(out, "{\"ok\": true}");
    }

    #[test]
    fn test_array_extraction() {
        let text = "The profiles:\n[{\"id\": 1}, {\"id\": 2}]";
        let v: Value = serde_json::from_str(extract_json(text).unwrap()).unwrap();
        assert_eq!(v.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_braces_inside_strings_do_not_confuse_scan() {
        let text = r#"{"title": "rated {5}", "note": "quote \" and brace }"}"#;
        let v: Value = serde_json::from_str(extract_json(text).unwrap()).unwrap();
        assert_eq!(v["title"], "rated {5}");
    }

    #[test]
    fn test_no_json_yields_none() {
        assert!(extract_json("I could not access the page, sorry.").is_none());
        assert!(extract_json("unclosed { brace").is_none());
    }

    #[test]
    fn test_coerce_reports_shape_errors() {
        #[derive(serde::Deserialize)]
        struct Point {
            #[allow(dead_code)]
            x: i32,
        }
        assert!(matches!(
            coerce::<Point>("no json here"),
            Err(AgentError::NoJson)
        ));
        assert!(matches!(
            coerce::<Point>(r#"{"y": 2}"#),
            Err(AgentError::Shape(_))
        ));
        assert!(coerce::<Point>(r#"{"x": 2}"#).is_ok());
    }
}
