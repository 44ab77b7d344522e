//! PJson Format Description
//!
//! This module documents the PJson format as implemented by this library.
//! It contains no code; it is the reference for what the reader accepts and
//! what the writer emits.
//!
//! # Overview
//!
//! PJson is a superset of JSON intended for hand-edited files such as
//! service configuration. Any valid JSON document is a valid PJson
//! document. On top of JSON it allows:
//!
//! - unquoted object keys
//! - `//` line comments
//! - a trailing comma before any `]` or `}`
//! - generalized strings: raw string literals delimited by tagged
//!   backticks
//!
//! Conversion is purely textual in the PJson → JSON direction (a
//! single-pass scanner) and tree-driven in the JSON → PJson direction
//! (parse, then serialize).
//!
//! # Unquoted Keys
//!
//! An object key may be written without quotes when it consists solely of
//! visible ASCII characters (`0x21`–`0x7E`) and contains no `:`.
//!
//! ```text
//! {
//!   name: "svc",
//!   check_duration_secs: 86400,
//! }
//! ```
//!
//! converts to `{"name": "svc", "check_duration_secs": 86400}` (modulo
//! whitespace). Keys containing non-ASCII characters must stay quoted.
//!
//! # Comments
//!
//! `//` starts a comment that runs to the end of the line. The comment is
//! removed from the output; the terminating line feed is kept. Comments
//! are recognized at the document top level, between object/array members,
//! and after values — but never inside quoted or generalized strings. A
//! comment on the last line of a file needs no trailing newline.
//!
//! # Trailing Commas
//!
//! A comma directly before a closing `]` or `}` (possibly separated by
//! whitespace or comments) is always tolerated and removed:
//!
//! ```text
//! [1, 2, 3,]        →  [1, 2, 3]
//! {a: 1, b: 2,}     →  {"a": 1, "b": 2}
//! ```
//!
//! The writer relies on this: it appends a comma after *every* entry and
//! element, so hand-appending to a generated file never produces a
//! missing-comma error.
//!
//! # Generalized Strings
//!
//! A generalized string is
//!
//! ```text
//! `tag`arbitrary raw content`tag`
//! ```
//!
//! where `tag` is any run of characters not containing a backtick — most
//! commonly empty (` `` `) or a run of underscores. The content between
//! the delimiters is taken verbatim: quotes, backslashes, newlines, `//`
//! sequences, and even complete embedded PJson documents need no escaping.
//!
//! A closing backtick terminates the string only when it is followed by
//! *exactly* the opening tag and another backtick. The length check is
//! exact, so a document can use `` `_` `` and `` `__` `` delimiters side
//! by side without ambiguity.
//!
//! When converting to JSON, the content is emitted as one quoted string
//! with standard JSON escaping applied (`\`, `"`, and control characters;
//! `\r` is dropped so CRLF files normalize to `\n`).
//!
//! The writer emits *all* string values as generalized strings, choosing
//! the shortest tag (empty, `_`, `__`, …) whose delimiter sequence does
//! not occur in the content.
//!
//! # Writer Layout
//!
//! - Objects are one entry per line; entries indent one level deeper than
//!   the enclosing container, 2 spaces per level by default. A root
//!   object's entries are flush left.
//! - Arrays are single-line (`[1, 2, 3,]`) unless some element is itself
//!   an object or array, in which case they use the one-per-line layout.
//! - Numbers keep their original textual form; `true`/`false`/`null` are
//!   the canonical literals.
//!
//! # Encoding
//!
//! Input is UTF-8. A leading byte-order mark is stripped. Non-ASCII text
//! passes through conversion untouched (inside strings, generalized
//! strings, and quoted keys).
