//! Rich-text description flattening.

use serde_json::Value;

/// Flattens a description value to plain text.
///
/// A string is returned verbatim. A block array becomes one line per block:
/// `paragraph` blocks contribute the concatenated `text` of their children,
/// any other block contributes an empty line. Returns `None` for any other
/// JSON type so the caller can apply its default.
#[must_use]
pub fn flatten_description(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(blocks) => Some(
            blocks
                .iter()
                .map(block_text)
                .collect::<Vec<_>>()
                .join("\n"),
        ),
        _ => None,
    }
}

fn block_text(block: &Value) -> String {
    if block.get("type").and_then(Value::as_str) != Some("paragraph") {
        return String::new();
    }
    let Some(children) = block.get("children").and_then(Value::as_array) else {
        return String::new();
    };
    children
        .iter()
        .filter_map(|child| child.get("text").and_then(Value::as_str))
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn string_is_returned_verbatim() {
        let value = json!("  Soft cotton tee\nwith pocket ");
        assert_eq!(
            flatten_description(&value).as_deref(),
            Some("  Soft cotton tee\nwith pocket ")
        );
    }

    #[test]
    fn paragraphs_are_joined_with_newlines() {
        let value = json!([
            {"type": "paragraph", "children": [{"text": "Hi "}, {"text": "there"}]},
            {"type": "paragraph", "children": [{"text": "Bye"}]}
        ]);
        assert_eq!(flatten_description(&value).as_deref(), Some("Hi there\nBye"));
    }

    #[test]
    fn non_paragraph_blocks_contribute_empty_lines() {
        let value = json!([
            {"type": "heading", "level": 2, "children": [{"text": "Specs"}]},
            {"type": "paragraph", "children": [{"text": "100% wool"}]}
        ]);
        assert_eq!(flatten_description(&value).as_deref(), Some("\n100% wool"));
    }

    #[test]
    fn paragraph_without_children_array_is_empty() {
        let value = json!([{"type": "paragraph"}, {"type": "paragraph", "children": "x"}]);
        assert_eq!(flatten_description(&value).as_deref(), Some("\n"));
    }

    #[test]
    fn children_missing_text_are_skipped() {
        let value = json!([
            {"type": "paragraph", "children": [{"text": "a"}, {"bold": true}, {"text": 5}, {"text": "b"}]}
        ]);
        assert_eq!(flatten_description(&value).as_deref(), Some("ab"));
    }

    #[test]
    fn empty_array_is_empty_string() {
        assert_eq!(flatten_description(&json!([])).as_deref(), Some(""));
    }

    #[test]
    fn other_types_are_none() {
        assert!(flatten_description(&json!(null)).is_none());
        assert!(flatten_description(&json!(12)).is_none());
        assert!(flatten_description(&json!({"text": "x"})).is_none());
    }
}
