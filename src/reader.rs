//! PJson → JSON conversion.
//!
//! This module provides the [`PJsonReader`], a single-pass scanner that
//! rewrites PJson text into standard JSON text. It never builds a value
//! tree: the input is copied through byte by byte while a stack of parse
//! contexts decides which PJson relaxations apply at the cursor.
//!
//! ## Overview
//!
//! The scanner normalizes every PJson extension on the fly:
//!
//! - **Unquoted keys**: bare visible-ASCII keys are wrapped in quotes
//! - **Line comments**: `//…` runs are suppressed through the line feed
//! - **Trailing commas**: the comma before any `]`/`}` is trimmed from the
//!   output buffer
//! - **Generalized strings**: backtick-tag-delimited raw content is
//!   re-escaped into one quoted JSON string
//!
//! Malformed input yields a typed [`Error`](crate::Error) with a byte
//! offset; the scanner never returns partial output.
//!
//! ## Usage
//!
//! Most users should use [`from_pjson`](crate::from_pjson) in the crate
//! root:
//!
//! ```rust
//! let json = pjson::from_pjson("{name:\"X\",count:1,}").unwrap();
//! assert_eq!(json, r#"{"name":"X","count":1}"#);
//! ```

use crate::error::{Error, Result};

/// Parse context for one frame of the scanner's state stack.
#[derive(Clone, Copy, Debug, PartialEq)]
enum ScanState {
    /// Top-level document; tolerates bare tokens and comments.
    Document,
    /// Inside `[` … `]`, positioned at an element.
    Array,
    /// Inside `{` … `}`, positioned at a key.
    ObjectKey,
    /// Inside `{` … `}`, positioned at a value.
    ObjectValue,
    /// Inside `"` … `"`.
    QuotedString,
    /// The byte after a `\` in a quoted string.
    Escape,
    /// Inside `//` …, suppressed through the next line feed.
    LineComment,
    /// After the opening backtick, capturing the delimiter tag.
    GenStringTag,
    /// Inside a generalized string body, accumulating raw content.
    GenString,
    /// On the final backtick of a confirmed closing delimiter.
    GenStringClose,
}

#[derive(Clone, Copy)]
struct Frame {
    state: ScanState,
    /// Byte offset where the construct began; reported in errors.
    start: usize,
}

/// A single-use PJson → JSON scanner.
///
/// All mutable scanning state (cursor, output buffer, state stack,
/// generalized-string accumulator) lives in this per-call context, so
/// independent conversions can run in parallel.
///
/// # Examples
///
/// ```rust
/// use pjson::PJsonReader;
///
/// let json = PJsonReader::new("[1, 2, 3,]").convert().unwrap();
/// assert_eq!(json, "[1, 2, 3]");
/// ```
pub struct PJsonReader<'a> {
    input: &'a [u8],
    index: usize,
    out: Vec<u8>,
    states: Vec<Frame>,
    tag: Vec<u8>,
    gen_buf: Vec<u8>,
}

impl<'a> PJsonReader<'a> {
    pub fn new(input: &'a str) -> Self {
        PJsonReader {
            input: input.as_bytes(),
            index: 0,
            out: Vec::with_capacity(input.len()),
            states: vec![Frame {
                state: ScanState::Document,
                start: 0,
            }],
            tag: Vec::new(),
            gen_buf: Vec::new(),
        }
    }

    /// Runs the scan and returns the emitted JSON text.
    ///
    /// # Errors
    ///
    /// Returns a scanner error with a byte offset if the input ends inside
    /// a string, generalized string, or open bracket, or contains a stray
    /// closing bracket or an invalid unquoted-key byte.
    pub fn convert(mut self) -> Result<String> {
        // A leading UTF-8 BOM would otherwise reach the JSON parser.
        if self.input.len() >= 3 && self.input[..3] == [0xef, 0xbb, 0xbf] {
            self.index = 3;
        }

        while self.index < self.input.len() {
            match self.top().state {
                ScanState::Document => self.on_document()?,
                ScanState::Array => self.on_array()?,
                ScanState::ObjectKey => self.on_object_key()?,
                ScanState::ObjectValue => self.on_object_value()?,
                ScanState::QuotedString => self.on_quoted_string(),
                ScanState::Escape => self.on_escape(),
                ScanState::LineComment => self.on_line_comment(),
                ScanState::GenStringTag => self.on_gen_string_tag(),
                ScanState::GenString => self.on_gen_string(),
                ScanState::GenStringClose => self.on_gen_string_close(),
            }
            self.index += 1;
        }

        self.finish()
    }

    fn top(&self) -> Frame {
        *self.states.last().expect("state stack is never empty")
    }

    fn push(&mut self, state: ScanState, start: usize) {
        self.states.push(Frame { state, start });
    }

    fn replace_top(&mut self, state: ScanState) {
        let frame = self.states.last_mut().expect("state stack is never empty");
        frame.state = state;
    }

    fn on_document(&mut self) -> Result<()> {
        let ch = self.input[self.index];
        match ch {
            b'{' => {
                self.out.push(ch);
                self.push(ScanState::ObjectKey, self.index);
            }
            b'[' => {
                self.push(ScanState::Array, self.index);
                self.out.push(ch);
            }
            b'}' | b']' => {
                return Err(Error::UnmatchedCloseBracket { offset: self.index });
            }
            b'/' => self.on_slash()?,
            _ => self.out.push(ch),
        }
        Ok(())
    }

    fn on_array(&mut self) -> Result<()> {
        let ch = self.input[self.index];
        match ch {
            b'"' => {
                self.push(ScanState::QuotedString, self.index);
                self.out.push(ch);
            }
            b'`' => {
                self.push(ScanState::GenStringTag, self.index);
                self.out.push(b'"');
            }
            b'{' => {
                self.out.push(ch);
                self.push(ScanState::ObjectKey, self.index);
            }
            b'[' => {
                self.push(ScanState::Array, self.index);
                self.out.push(ch);
            }
            b']' => {
                self.states.pop();
                self.trim_trailing_comma();
                self.out.push(ch);
            }
            b'/' => self.on_slash()?,
            _ => self.out.push(ch),
        }
        Ok(())
    }

    fn on_object_key(&mut self) -> Result<()> {
        let ch = self.input[self.index];
        match ch {
            b'"' => {
                self.push(ScanState::QuotedString, self.index);
                self.out.push(ch);
            }
            b'`' => {
                self.push(ScanState::GenStringTag, self.index);
                self.out.push(b'"');
            }
            b':' => {
                self.replace_top(ScanState::ObjectValue);
                self.out.push(ch);
            }
            b'}' | b']' => {
                self.states.pop();
                self.trim_trailing_comma();
                self.out.push(ch);
            }
            b'/' => self.on_slash()?,
            _ => {
                if ch.is_ascii_graphic() {
                    self.bare_key();
                } else if ch.is_ascii() {
                    self.out.push(ch);
                } else {
                    return Err(Error::InvalidKeyStart { offset: self.index });
                }
            }
        }
        Ok(())
    }

    /// Consumes a bare key and emits it wrapped in quotes. The span is the
    /// run of visible-ASCII bytes up to (excluding) the `:`.
    fn bare_key(&mut self) {
        self.out.push(b'"');
        while self.index < self.input.len()
            && self.input[self.index] != b':'
            && self.input[self.index].is_ascii_graphic()
        {
            self.out.push(self.input[self.index]);
            self.index += 1;
        }
        self.out.push(b'"');
        // Leave the terminator for the main loop's advance.
        self.index -= 1;
    }

    fn on_object_value(&mut self) -> Result<()> {
        let ch = self.input[self.index];
        match ch {
            b'"' => {
                self.push(ScanState::QuotedString, self.index);
                self.out.push(ch);
            }
            b'`' => {
                self.push(ScanState::GenStringTag, self.index);
                self.out.push(b'"');
            }
            b'{' => {
                self.out.push(ch);
                self.push(ScanState::ObjectKey, self.index);
            }
            b'[' => {
                self.push(ScanState::Array, self.index);
                self.out.push(ch);
            }
            b',' => {
                self.replace_top(ScanState::ObjectKey);
                self.out.push(ch);
            }
            b'}' => {
                self.states.pop();
                self.out.push(ch);
            }
            b']' => {
                // A value position belongs to an object; a stray `]` here is
                // dropped, and the missing `}` surfaces at end of input.
            }
            b'/' => self.on_slash()?,
            _ => self.out.push(ch),
        }
        Ok(())
    }

    fn on_quoted_string(&mut self) {
        let ch = self.input[self.index];
        match ch {
            b'"' => {
                self.states.pop();
                self.out.push(ch);
            }
            b'\\' => {
                // The escape belongs to the string; report the string's
                // start if input ends here.
                let start = self.top().start;
                self.push(ScanState::Escape, start);
                self.out.push(ch);
            }
            _ => self.out.push(ch),
        }
    }

    fn on_escape(&mut self) {
        let ch = self.input[self.index];
        self.states.pop();
        self.out.push(ch);
    }

    fn on_line_comment(&mut self) {
        let ch = self.input[self.index];
        if ch == b'\n' {
            self.states.pop();
            self.out.push(ch);
        }
    }

    /// Handles a `/` in any context that admits comments.
    fn on_slash(&mut self) -> Result<()> {
        match self.input.get(self.index + 1) {
            Some(b'/') => {
                self.push(ScanState::LineComment, self.index);
                Ok(())
            }
            Some(_) => {
                self.out.push(b'/');
                Ok(())
            }
            None => Err(Error::UnterminatedComment { offset: self.index }),
        }
    }

    fn on_gen_string_tag(&mut self) {
        let ch = self.input[self.index];
        if ch == b'`' {
            let open = self.top().start;
            self.tag = self.input[open + 1..self.index].to_vec();
            self.replace_top(ScanState::GenString);
        }
        // Tag bytes are not emitted.
    }

    fn on_gen_string(&mut self) {
        let ch = self.input[self.index];
        if ch == b'`' {
            // A closing backtick counts only when followed by exactly the
            // captured tag and another backtick; the exact-length check is
            // what lets `_` and `__` tags coexist in one document.
            let tag_end = self.index + 1 + self.tag.len();
            if tag_end < self.input.len()
                && self.input[tag_end] == b'`'
                && self.input[self.index + 1..tag_end] == self.tag[..]
            {
                self.replace_top(ScanState::GenStringClose);
                // Skip the tag; the loop's advance lands on the final backtick.
                self.index += self.tag.len();
            } else {
                self.gen_buf.push(ch);
            }
        } else {
            self.gen_buf.push(ch);
        }
    }

    fn on_gen_string_close(&mut self) {
        let ch = self.input[self.index];
        if ch == b'`' {
            self.states.pop();
            self.flush_gen_string();
        }
    }

    /// Escapes the accumulated raw content into the output buffer and
    /// closes the synthesized quoted string.
    fn flush_gen_string(&mut self) {
        let content = std::mem::take(&mut self.gen_buf);
        for &b in &content {
            match b {
                b'"' => self.out.extend_from_slice(b"\\\""),
                b'\\' => self.out.extend_from_slice(b"\\\\"),
                // CRLF tolerance for hand-authored files.
                b'\r' => {}
                b'\n' => self.out.extend_from_slice(b"\\n"),
                b'\t' => self.out.extend_from_slice(b"\\t"),
                0x08 => self.out.extend_from_slice(b"\\b"),
                0x0c => self.out.extend_from_slice(b"\\f"),
                b if b < 0x20 => {
                    let escaped = format!("\\u{:04x}", b);
                    self.out.extend_from_slice(escaped.as_bytes());
                }
                b => self.out.push(b),
            }
        }
        self.out.push(b'"');
    }

    /// Deletes the comma preceding a closing bracket, if any. Scans the
    /// output buffer backward past non-visible-ASCII bytes (whitespace).
    fn trim_trailing_comma(&mut self) {
        let mut p = self.out.len();
        while p > 0 && !self.out[p - 1].is_ascii_graphic() {
            p -= 1;
        }
        if p > 0 && self.out[p - 1] == b',' {
            self.out.remove(p - 1);
        }
    }

    fn finish(mut self) -> Result<String> {
        // A comment still open at end of input is implicitly terminated.
        if self.top().state == ScanState::LineComment {
            self.states.pop();
        }

        let frame = self.top();
        match frame.state {
            ScanState::Document => {
                String::from_utf8(self.out).map_err(|e| Error::InvalidUtf8(e.utf8_error()))
            }
            ScanState::QuotedString | ScanState::Escape => Err(Error::UnterminatedString {
                offset: frame.start,
            }),
            ScanState::GenStringTag | ScanState::GenString | ScanState::GenStringClose => {
                Err(Error::UnterminatedGeneralizedString {
                    offset: frame.start,
                })
            }
            ScanState::Array | ScanState::ObjectKey | ScanState::ObjectValue => {
                Err(Error::UnclosedBracket {
                    offset: frame.start,
                })
            }
            ScanState::LineComment => unreachable!("line comments do not nest"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(input: &str) -> Result<String> {
        PJsonReader::new(input).convert()
    }

    #[test]
    fn plain_json_passes_through() {
        let input = r#"{"a": [1, 2.5, true, null], "b": "text"}"#;
        assert_eq!(convert(input).unwrap(), input);
    }

    #[test]
    fn strips_utf8_bom() {
        let input = "\u{feff}{a:1}";
        assert_eq!(convert(input).unwrap(), r#"{"a":1}"#);
    }

    #[test]
    fn quotes_bare_keys() {
        assert_eq!(
            convert("{name:\"X\",check_duration_secs:86400,}").unwrap(),
            r#"{"name":"X","check_duration_secs":86400}"#
        );
    }

    #[test]
    fn bare_key_stops_at_whitespace_before_colon() {
        assert_eq!(convert("{abc : 1}").unwrap(), r#"{"abc" : 1}"#);
    }

    #[test]
    fn trims_trailing_commas() {
        assert_eq!(convert("[1, 2, 3,]").unwrap(), "[1, 2, 3]");
        assert_eq!(convert("{a:1,}").unwrap(), r#"{"a":1}"#);
        assert_eq!(convert("[1, 2,\n  // note\n]").unwrap(), "[1, 2\n  \n]");
    }

    #[test]
    fn strips_comments_keeps_line_feed() {
        assert_eq!(convert("[1, // one\n2]").unwrap(), "[1, \n2]");
        assert_eq!(convert("// header\n[1]").unwrap(), "\n[1]");
    }

    #[test]
    fn comment_at_end_of_input_is_terminated() {
        assert_eq!(convert("{a:1} // done").unwrap(), r#"{"a":1} "#);
    }

    #[test]
    fn trailing_slash_is_an_unterminated_comment() {
        assert_eq!(convert("[\"x\"] /").unwrap_err().offset(), Some(6));
    }

    #[test]
    fn slash_without_second_slash_is_ordinary_content() {
        assert_eq!(convert("{a:/x/,b:1}").unwrap(), r#"{"a":/x/,"b":1}"#);
    }

    #[test]
    fn quoted_strings_keep_escapes_and_syntax_bytes() {
        assert_eq!(
            convert(r#"{a:"as\n\\df { } [ ] , // not a comment"}"#).unwrap(),
            r#"{"a":"as\n\\df { } [ ] , // not a comment"}"#
        );
    }

    #[test]
    fn generalized_string_with_empty_tag() {
        assert_eq!(convert("[``hello``]").unwrap(), r#"["hello"]"#);
    }

    #[test]
    fn generalized_string_escapes_content() {
        assert_eq!(
            convert("[``say \"hi\"\\now``]").unwrap(),
            r#"["say \"hi\"\\now"]"#
        );
        assert_eq!(convert("[``a\r\nb``]").unwrap(), r#"["a\nb"]"#);
        assert_eq!(convert("[``a\tb``]").unwrap(), r#"["a\tb"]"#);
    }

    #[test]
    fn exact_length_tag_matching() {
        // `_` and `__` delimiters coexist; the shorter tag does not close
        // the longer-tagged string.
        assert_eq!(convert("[`__`keep `_` here`__`]").unwrap(), r#"["keep `_` here"]"#);
        assert_eq!(convert("[`_`tick ` inside`_`]").unwrap(), r#"["tick ` inside"]"#);
    }

    #[test]
    fn generalized_string_as_key() {
        assert_eq!(convert("{`''`a key`''`: 1}").unwrap(), r#"{"a key": 1}"#);
    }

    #[test]
    fn unterminated_string_reports_open_quote() {
        assert_eq!(convert("{a: \"oops").unwrap_err().offset(), Some(4));
        assert_eq!(convert("{a: \"oops\\").unwrap_err().offset(), Some(4));
    }

    #[test]
    fn unterminated_generalized_string_reports_open_backtick() {
        let err = convert("[`tag").unwrap_err();
        assert!(matches!(
            err,
            Error::UnterminatedGeneralizedString { offset: 1 }
        ));
        let err = convert("[`_`body without close").unwrap_err();
        assert!(matches!(
            err,
            Error::UnterminatedGeneralizedString { offset: 1 }
        ));
    }

    #[test]
    fn unmatched_close_bracket() {
        assert!(matches!(
            convert("]").unwrap_err(),
            Error::UnmatchedCloseBracket { offset: 0 }
        ));
        assert!(matches!(
            convert("{a:1} }").unwrap_err(),
            Error::UnmatchedCloseBracket { offset: 6 }
        ));
    }

    #[test]
    fn unclosed_bracket_reports_opening() {
        assert!(matches!(
            convert("[1, [2,").unwrap_err(),
            Error::UnclosedBracket { offset: 4 }
        ));
        assert!(matches!(
            convert("{a: {b: 1}").unwrap_err(),
            Error::UnclosedBracket { offset: 0 }
        ));
    }

    #[test]
    fn non_ascii_key_must_be_quoted() {
        assert!(matches!(
            convert("{注:1}").unwrap_err(),
            Error::InvalidKeyStart { offset: 1 }
        ));
        assert_eq!(convert("{\"注\":1}").unwrap(), "{\"注\":1}");
    }
}
