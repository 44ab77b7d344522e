//! JSON → PJson serialization.
//!
//! This module provides the [`PJsonWriter`], a tree-walking serializer
//! that turns a parsed [`serde_json::Value`] into PJson text. String
//! values are always emitted as generalized strings with a collision-free
//! tag from [`generate_tag`](crate::generate_tag), so the content needs no
//! escaping; everything else keeps its JSON form, with an unconditional
//! trailing comma after every object entry and array element.
//!
//! ## Usage
//!
//! Most users should use [`to_pjson`](crate::to_pjson) in the crate root:
//!
//! ```rust
//! let pjson = pjson::to_pjson(r#"{"greeting":"hello"}"#).unwrap();
//! assert_eq!(pjson, "{\n\"greeting\": ``hello``,\n}");
//! ```

use crate::options::PJsonOptions;
use crate::tag::{generate_tag, TAG_CHAR};
use serde_json::Value;

/// The PJson serializer.
///
/// Walks a JSON value tree exactly once and accumulates PJson text.
/// Created via [`PJsonWriter::new`] with customizable options.
///
/// # Examples
///
/// ```rust
/// use pjson::{PJsonOptions, PJsonWriter};
///
/// let value = serde_json::json!([1, 2, 3]);
/// let mut writer = PJsonWriter::new(PJsonOptions::default());
/// writer.write_value(&value);
/// assert_eq!(writer.into_inner(), "[1, 2, 3,]");
/// ```
pub struct PJsonWriter {
    output: String,
    options: PJsonOptions,
}

impl PJsonWriter {
    pub fn new(options: PJsonOptions) -> Self {
        PJsonWriter {
            output: String::with_capacity(256),
            options,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Serializes one value at the document root.
    pub fn write_value(&mut self, value: &Value) {
        self.write_node(value, 0);
    }

    /// `depth` is the indent level of the value's own contents; closing
    /// brackets sit one level shallower, so a root container's entries are
    /// flush left.
    fn write_node(&mut self, value: &Value, depth: usize) {
        match value {
            Value::Object(map) => self.write_object(map, depth),
            Value::Array(array) => self.write_array(array, depth),
            Value::String(s) => self.write_string(s),
            // With `arbitrary_precision` the number renders its original
            // textual form.
            Value::Number(n) => self.output.push_str(&n.to_string()),
            Value::Bool(b) => self.output.push_str(if *b { "true" } else { "false" }),
            Value::Null => self.output.push_str("null"),
        }
    }

    fn write_object(&mut self, map: &serde_json::Map<String, Value>, depth: usize) {
        self.output.push('{');

        for (key, value) in map {
            self.output.push('\n');
            self.indent(depth);
            self.write_quoted_key(key);
            self.output.push_str(": ");
            self.write_node(value, depth + 1);
            // A comma after every entry, the last one included; the reader
            // trims it back out.
            self.output.push(',');
        }

        if !map.is_empty() {
            self.output.push('\n');
            self.indent(depth.saturating_sub(1));
        }
        self.output.push('}');
    }

    fn write_array(&mut self, array: &[Value], depth: usize) {
        self.output.push('[');

        if array.iter().any(is_container) {
            for value in array {
                self.output.push('\n');
                self.indent(depth);
                self.write_node(value, depth + 1);
                self.output.push(',');
            }
            self.output.push('\n');
            self.indent(depth.saturating_sub(1));
        } else {
            for (i, value) in array.iter().enumerate() {
                self.write_node(value, depth + 1);
                if i + 1 < array.len() {
                    self.output.push_str(", ");
                } else {
                    self.output.push(',');
                }
            }
        }

        self.output.push(']');
    }

    /// String values become generalized strings: the raw content between
    /// tagged backtick delimiters, no escaping.
    fn write_string(&mut self, content: &str) {
        let tag = generate_tag(content);

        self.output.push(TAG_CHAR);
        self.output.push_str(&tag);
        self.output.push(TAG_CHAR);

        self.output.push_str(content);

        self.output.push(TAG_CHAR);
        self.output.push_str(&tag);
        self.output.push(TAG_CHAR);
    }

    /// Object keys stay ordinary quoted JSON strings.
    fn write_quoted_key(&mut self, key: &str) {
        self.output.push('"');
        for ch in key.chars() {
            match ch {
                '"' => self.output.push_str("\\\""),
                '\\' => self.output.push_str("\\\\"),
                '\n' => self.output.push_str("\\n"),
                '\r' => self.output.push_str("\\r"),
                '\t' => self.output.push_str("\\t"),
                '\u{0008}' => self.output.push_str("\\b"),
                '\u{000C}' => self.output.push_str("\\f"),
                c if (c as u32) < 0x20 => {
                    self.output.push_str(&format!("\\u{:04x}", c as u32));
                }
                c => self.output.push(c),
            }
        }
        self.output.push('"');
    }

    fn indent(&mut self, depth: usize) {
        for _ in 0..depth * self.options.indent {
            self.output.push(' ');
        }
    }
}

fn is_container(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::PJsonOptions;
    use serde_json::json;

    fn write(value: &Value) -> String {
        let mut writer = PJsonWriter::new(PJsonOptions::default());
        writer.write_value(value);
        writer.into_inner()
    }

    #[test]
    fn scalars() {
        assert_eq!(write(&json!(null)), "null");
        assert_eq!(write(&json!(true)), "true");
        assert_eq!(write(&json!(false)), "false");
        assert_eq!(write(&json!(42)), "42");
        assert_eq!(write(&json!(-9.15)), "-9.15");
    }

    #[test]
    fn number_keeps_original_text() {
        let value: Value = serde_json::from_str(r#"{"x":1e3,"y":0.50}"#).unwrap();
        let pjson = write(&value);
        assert!(pjson.contains("1e3"));
        assert!(pjson.contains("0.50"));
    }

    #[test]
    fn empty_containers() {
        assert_eq!(write(&json!({})), "{}");
        assert_eq!(write(&json!([])), "[]");
    }

    #[test]
    fn scalar_array_is_single_line() {
        assert_eq!(write(&json!([1, 2, 3])), "[1, 2, 3,]");
        assert_eq!(write(&json!(["a"])), "[``a``,]");
    }

    #[test]
    fn array_with_container_is_multi_line() {
        let value: Value = serde_json::from_str(r#"[1,{"a":1}]"#).unwrap();
        assert_eq!(write(&value), "[\n1,\n{\n  \"a\": 1,\n},\n]");
    }

    #[test]
    fn object_layout() {
        let value: Value =
            serde_json::from_str(r#"{"name":"John","age":30,"addr":{"city":"NY"}}"#).unwrap();
        let expected = "{\n\"name\": ``John``,\n\"age\": 30,\n\"addr\": {\n  \"city\": ``NY``,\n},\n}";
        assert_eq!(write(&value), expected);
    }

    #[test]
    fn string_with_backtick_avoids_empty_tag() {
        let pjson = write(&json!("has a `backtick`"));
        assert_eq!(pjson, "`_`has a `backtick``_`");
    }

    #[test]
    fn string_with_underscore_tag_escalates() {
        let pjson = write(&json!("uses `_` already"));
        assert!(pjson.starts_with("`__`"));
        assert!(pjson.ends_with("`__`"));
    }

    #[test]
    fn multiline_string_is_embedded_raw() {
        assert_eq!(write(&json!("Line 1\nLine 2")), "``Line 1\nLine 2``");
    }

    #[test]
    fn exotic_key_is_escaped() {
        let value: Value = serde_json::from_str(r#"{"a\"b\\c":1}"#).unwrap();
        assert_eq!(write(&value), "{\n\"a\\\"b\\\\c\": 1,\n}");
    }

    #[test]
    fn custom_indent_width() {
        let value: Value = serde_json::from_str(r#"{"a":{"b":1}}"#).unwrap();
        let mut writer = PJsonWriter::new(PJsonOptions::new().with_indent(4));
        writer.write_value(&value);
        assert_eq!(writer.into_inner(), "{\n\"a\": {\n    \"b\": 1,\n},\n}");
    }
}
