//! Error types for PJson conversion.
//!
//! The scanner reports malformed PJson as a typed error carrying the byte
//! offset of the construct that failed, instead of emitting partial or
//! invalid JSON. Writer-side failures wrap the underlying `serde_json`
//! parse error.
//!
//! ## Error Categories
//!
//! - **Scanner errors**: unterminated strings/generalized strings/comments,
//!   unmatched or unclosed brackets, invalid key bytes — all localizable to
//!   a byte offset via [`Error::offset`]
//! - **Parse errors**: input to the writer (or validated reader output) is
//!   not valid JSON
//! - **I/O errors**: file reading/writing failures in the conveniences and
//!   the CLI
//!
//! ## Examples
//!
//! ```rust
//! use pjson::{from_pjson, Error};
//!
//! let result = from_pjson("{name: \"unterminated");
//! match result {
//!     Err(Error::UnterminatedString { offset }) => assert_eq!(offset, 7),
//!     other => panic!("expected unterminated string, got {:?}", other),
//! }
//! ```

use thiserror::Error;

/// All errors that can occur while converting between PJson and JSON.
#[derive(Debug, Error)]
pub enum Error {
    /// End of input inside a quoted string. The offset is the opening `"`.
    #[error("unterminated string starting at byte {offset}")]
    UnterminatedString { offset: usize },

    /// End of input inside a generalized string (tag capture, body, or
    /// closing delimiter). The offset is the opening backtick.
    #[error("unterminated generalized string starting at byte {offset}")]
    UnterminatedGeneralizedString { offset: usize },

    /// A `/` at the very end of input where a `//` comment could start.
    #[error("unterminated comment opener at byte {offset}")]
    UnterminatedComment { offset: usize },

    /// A `]` or `}` with no matching open bracket.
    #[error("unmatched closing bracket at byte {offset}")]
    UnmatchedCloseBracket { offset: usize },

    /// End of input with an array or object still open. The offset is the
    /// opening bracket.
    #[error("unclosed bracket opened at byte {offset}")]
    UnclosedBracket { offset: usize },

    /// A non-ASCII byte in object-key position. Unquoted keys are
    /// restricted to visible ASCII; anything else must be quoted.
    #[error("invalid unquoted key byte at offset {offset} (non-ASCII keys must be quoted)")]
    InvalidKeyStart { offset: usize },

    /// Input bytes are not valid UTF-8.
    #[error("input is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// The external JSON parser rejected the text.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// File reading or writing failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns the byte offset for scanner errors, `None` otherwise.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pjson::Error;
    ///
    /// let err = Error::UnmatchedCloseBracket { offset: 12 };
    /// assert_eq!(err.offset(), Some(12));
    /// ```
    #[must_use]
    pub fn offset(&self) -> Option<usize> {
        match self {
            Error::UnterminatedString { offset }
            | Error::UnterminatedGeneralizedString { offset }
            | Error::UnterminatedComment { offset }
            | Error::UnmatchedCloseBracket { offset }
            | Error::UnclosedBracket { offset }
            | Error::InvalidKeyStart { offset } => Some(*offset),
            _ => None,
        }
    }

    /// Returns `true` if this error was produced by the PJson scanner
    /// (as opposed to JSON parsing, UTF-8 validation, or I/O).
    #[must_use]
    pub fn is_syntax(&self) -> bool {
        self.offset().is_some()
    }
}

pub type Result<T> = std::result::Result<T, Error>;
