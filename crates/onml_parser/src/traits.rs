//! Parser trait definition.

use serde_json::Value;

use crate::ParseError;

/// Trait for parsing markup text into an ONML tree.
///
/// Implementations adapt some tokenizer's event stream into the
/// array-based tree model. The built-in implementation is
/// [`XmlParser`](crate::XmlParser).
pub trait Parser {
    /// Returns the name of this parser.
    fn name(&self) -> &str;

    /// Returns the file extensions this parser handles.
    ///
    /// Extensions should not include the leading dot (e.g., `["xml", "svg"]`).
    fn extensions(&self) -> &[&str];

    /// Parses the source text into a tree.
    ///
    /// Returns the document root node, or an error if tokenizing fails.
    fn parse(&self, source: &str) -> Result<Value, ParseError>;

    /// Returns true if this parser can handle the given file extension.
    fn can_parse(&self, extension: &str) -> bool {
        self.extensions()
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}
