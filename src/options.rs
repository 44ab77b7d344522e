//! Configuration options for PJson serialization.
//!
//! [`PJsonOptions`] controls formatting aspects of the writer. The reader
//! needs no configuration: PJson's relaxations are unconditional on input.
//!
//! ## Examples
//!
//! ```rust
//! use pjson::{to_pjson_with_options, PJsonOptions};
//!
//! let options = PJsonOptions::new().with_indent(4);
//! let pjson = to_pjson_with_options(r#"{"a":{"b":1}}"#, options).unwrap();
//! assert!(pjson.contains("    \"b\": 1,"));
//! ```

/// Configuration options for PJson serialization.
///
/// # Examples
///
/// ```rust
/// use pjson::PJsonOptions;
///
/// let options = PJsonOptions::default();
/// assert_eq!(options.indent, 2);
///
/// let options = PJsonOptions::new().with_indent(4);
/// assert_eq!(options.indent, 4);
/// ```
#[derive(Clone, Debug)]
pub struct PJsonOptions {
    /// Spaces per nesting level.
    pub indent: usize,
}

impl Default for PJsonOptions {
    fn default() -> Self {
        PJsonOptions { indent: 2 }
    }
}

impl PJsonOptions {
    /// Creates default options (2-space indent).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indentation size (number of spaces per level).
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}
