//! # pjson
//!
//! A bidirectional converter between standard JSON and **PJson**, a
//! human-authoring superset of JSON built for hand-edited files.
//!
//! ## What is PJson?
//!
//! PJson keeps JSON's data model and adds the relaxations people actually
//! want while editing config files by hand:
//!
//! - **Unquoted keys**: `check_duration_secs: 86400`
//! - **Line comments**: `// restart once a day`
//! - **Trailing commas**: always allowed before `]` and `}`
//! - **Generalized strings**: backtick-tag-delimited raw literals that can
//!   hold quotes, backslashes, newlines — or a whole embedded PJson
//!   document — without any escaping
//!
//! See the [`format`] module for the full format description.
//!
//! ## Quick Start
//!
//! Reading PJson (producing standard JSON text):
//!
//! ```rust
//! let pjson_text = r#"{
//!     // restart policy
//!     name: "svc",
//!     action: "restart",
//!     check_duration_secs: 86400,
//! }"#;
//!
//! let json = pjson::from_pjson(pjson_text).unwrap();
//! let value: serde_json::Value = serde_json::from_str(&json).unwrap();
//! assert_eq!(value["check_duration_secs"], serde_json::json!(86400));
//! ```
//!
//! Writing PJson from JSON text:
//!
//! ```rust
//! let pjson = pjson::to_pjson(r#"{"motd":"line1\nline2 with \"quotes\""}"#).unwrap();
//! assert_eq!(pjson, "{\n\"motd\": ``line1\nline2 with \"quotes\"``,\n}");
//! ```
//!
//! ## Round Trips
//!
//! Converting JSON to PJson and back yields an equal value tree, with
//! object key order and the literal numeric text preserved:
//!
//! ```rust
//! let original = r#"{"name":"svc","ports":[80,443]}"#;
//! let pjson = pjson::to_pjson(original).unwrap();
//! let json = pjson::from_pjson(&pjson).unwrap();
//!
//! let a: serde_json::Value = serde_json::from_str(original).unwrap();
//! let b: serde_json::Value = serde_json::from_str(&json).unwrap();
//! assert_eq!(a, b);
//! ```
//!
//! ## Design Notes
//!
//! - The reader is a single-pass byte scanner with an explicit state
//!   stack; it rewrites text and never builds a value tree.
//! - The writer walks a [`serde_json::Value`] parsed by `serde_json`
//!   (with key order and numeric text preserved) exactly once.
//! - Each conversion owns its state; independent conversions can run in
//!   parallel without synchronization.
//! - Malformed PJson yields a typed [`Error`] with a byte offset, never
//!   partial output.

pub mod error;
pub mod format;
pub mod options;
pub mod reader;
pub mod tag;
pub mod writer;

pub use error::{Error, Result};
pub use options::PJsonOptions;
pub use reader::PJsonReader;
pub use tag::generate_tag;
pub use writer::PJsonWriter;

use serde_json::Value;

/// Converts PJson text to standard JSON text.
///
/// Strips a leading UTF-8 byte-order mark, quotes bare keys, removes
/// comments and trailing commas, and rewrites generalized strings into
/// quoted JSON strings. The output's whitespace mirrors the input's.
///
/// # Examples
///
/// ```rust
/// let json = pjson::from_pjson("{name:\"X\",action:\"restart\",check_duration_secs:86400,}").unwrap();
/// assert_eq!(json, r#"{"name":"X","action":"restart","check_duration_secs":86400}"#);
/// ```
///
/// # Errors
///
/// Returns a scanner error with a byte offset for malformed input (see
/// [`Error`]).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_pjson(text: &str) -> Result<String> {
    PJsonReader::new(text).convert()
}

/// Converts PJson bytes to standard JSON text.
///
/// Validates that the bytes are UTF-8, then behaves like [`from_pjson`].
///
/// # Errors
///
/// Returns [`Error::InvalidUtf8`] for non-UTF-8 input, otherwise as
/// [`from_pjson`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_pjson_slice(bytes: &[u8]) -> Result<String> {
    let text = std::str::from_utf8(bytes)?;
    from_pjson(text)
}

/// Converts PJson text to JSON text and verifies the result parses.
///
/// The scanner catches structural problems (unterminated strings,
/// unclosed brackets), but deliberately copies value tokens through
/// without validating them; this variant additionally runs the emitted
/// text through the JSON parser, so callers that persist the output never
/// write an invalid document.
///
/// # Examples
///
/// ```rust
/// use pjson::Error;
///
/// // A missing comma between entries is not a scanner concern, but the
/// // validation pass rejects it.
/// let result = pjson::from_pjson_checked("{a:1 b:2}");
/// assert!(matches!(result, Err(Error::JsonParse(_))));
/// ```
///
/// # Errors
///
/// As [`from_pjson`], plus [`Error::JsonParse`] when the emitted text is
/// not valid JSON.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_pjson_checked(text: &str) -> Result<String> {
    let json = from_pjson(text)?;
    serde_json::from_str::<Value>(&json)?;
    Ok(json)
}

/// Converts JSON text to PJson text.
///
/// # Examples
///
/// ```rust
/// let pjson = pjson::to_pjson(r#"{"counts":[1,2,3]}"#).unwrap();
/// assert_eq!(pjson, "{\n\"counts\": [1, 2, 3,],\n}");
/// ```
///
/// # Errors
///
/// Returns [`Error::JsonParse`] if the input is not valid JSON.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_pjson(json: &str) -> Result<String> {
    to_pjson_with_options(json, PJsonOptions::default())
}

/// Converts JSON text to PJson text with custom options.
///
/// # Errors
///
/// Returns [`Error::JsonParse`] if the input is not valid JSON.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_pjson_with_options(json: &str, options: PJsonOptions) -> Result<String> {
    // Tolerate a byte-order mark on this side too; the JSON parser won't.
    let json = json.strip_prefix('\u{feff}').unwrap_or(json);
    let value: Value = serde_json::from_str(json)?;
    Ok(to_pjson_value(&value, options))
}

/// Serializes an already-parsed JSON value tree to PJson text.
///
/// # Examples
///
/// ```rust
/// use pjson::PJsonOptions;
///
/// let value = serde_json::json!({"on": true});
/// let pjson = pjson::to_pjson_value(&value, PJsonOptions::default());
/// assert_eq!(pjson, "{\n\"on\": true,\n}");
/// ```
#[must_use]
pub fn to_pjson_value(value: &Value, options: PJsonOptions) -> String {
    let mut writer = PJsonWriter::new(options);
    writer.write_value(value);
    writer.into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Value {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_round_trip_simple_object() {
        let original = r#"{"name":"John Doe","age":30,"isStudent":false,"courses":["Math","Science","History"],"address":{"street":"123 Main St","city":"New York"}}"#;
        let pjson = to_pjson(original).unwrap();
        let json = from_pjson(&pjson).unwrap();
        assert_eq!(parse(original), parse(&json));
    }

    #[test]
    fn test_round_trip_preserves_key_order_and_number_text() {
        let original = r#"{"zeta":1e3,"alpha":0.50,"mid":-9.15}"#;
        let pjson = to_pjson(original).unwrap();
        let json = from_pjson(&pjson).unwrap();
        assert_eq!(json, "{\n\"zeta\": 1e3,\n\"alpha\": 0.50,\n\"mid\": -9.15\n}");
    }

    #[test]
    fn test_round_trip_strings_with_backticks() {
        let original = r#"{"a":"has `one` backtick","b":"uses `_` and `__` tags","c":"multi\nline"}"#;
        let pjson = to_pjson(original).unwrap();
        let json = from_pjson(&pjson).unwrap();
        assert_eq!(parse(original), parse(&json));
    }

    #[test]
    fn test_from_pjson_slice_strips_bom() {
        let mut bytes = vec![0xef, 0xbb, 0xbf];
        bytes.extend_from_slice(b"{a:1}");
        assert_eq!(from_pjson_slice(&bytes).unwrap(), r#"{"a":1}"#);
    }

    #[test]
    fn test_from_pjson_slice_rejects_invalid_utf8() {
        assert!(matches!(
            from_pjson_slice(&[0xff, 0xfe]),
            Err(Error::InvalidUtf8(_))
        ));
    }

    #[test]
    fn test_checked_rejects_invalid_value_tokens() {
        assert!(matches!(
            from_pjson_checked("{a: nonsense}"),
            Err(Error::JsonParse(_))
        ));
        assert_eq!(
            from_pjson_checked("{a: true,}").unwrap(),
            r#"{"a": true}"#
        );
    }

    #[test]
    fn test_to_pjson_rejects_invalid_json() {
        assert!(matches!(to_pjson("{oops}"), Err(Error::JsonParse(_))));
    }

    #[test]
    fn test_to_pjson_tolerates_bom() {
        let json = "\u{feff}{\"a\":1}";
        assert_eq!(to_pjson(json).unwrap(), "{\n\"a\": 1,\n}");
    }
}
