//! Parse error types.

use thiserror::Error;

/// Errors that can occur while assembling a tree from tokenizer events.
///
/// Tokenizer errors are propagated unmodified; the adapter does not
/// catch or reinterpret them.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The source text is invalid at the adapter level.
    #[error("invalid source: {message}")]
    InvalidSource {
        /// Error message.
        message: String,
        /// Byte offset where the error occurred.
        offset: Option<usize>,
    },

    /// The source contained no top-level element to return.
    #[error("document has no root element")]
    NoRootElement,

    /// The external tokenizer rejected the markup.
    #[error("tokenizer error: {0}")]
    Tokenizer(#[from] quick_xml::Error),

    /// The external tokenizer rejected an attribute.
    #[error("malformed attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),
}

impl ParseError {
    /// Creates a new invalid source error.
    pub fn invalid_source(message: impl Into<String>) -> Self {
        Self::InvalidSource {
            message: message.into(),
            offset: None,
        }
    }

    /// Creates a new invalid source error with byte offset.
    pub fn invalid_source_at(message: impl Into<String>, offset: usize) -> Self {
        Self::InvalidSource {
            message: message.into(),
            offset: Some(offset),
        }
    }
}
