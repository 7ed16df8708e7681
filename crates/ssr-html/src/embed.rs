//! JSON embedded in inline scripts.

use serde::Serialize;

/// Serialize a value for an inline `<script>` block.
///
/// `<`, `>` and `&` are written as unicode escapes so no substring can close
/// the script element or open a comment. U+2028 and U+2029 are escaped
/// because they terminate lines in older JavaScript parsers. The output is
/// still valid JSON and parses back to the same value.
pub fn serialize_state<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let json = serde_json::to_string(value)?;
    Ok(escape_json_for_script(&json))
}

/// Escape already-serialized JSON for embedding.
pub fn escape_json_for_script(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(c),
        }
    }
    out
}
