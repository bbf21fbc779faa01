//! Tree error types.

use serde_json::Value;
use thiserror::Error;

use crate::node;

/// Errors raised when a component is handed a value that is not a tree.
///
/// These are caller contract violations per the error taxonomy: they are
/// raised synchronously at the point of misuse, never swallowed, and
/// never produce partial output.
#[derive(Debug, Error)]
pub enum TreeError {
    /// The serializer was given a root that is not an element sequence.
    #[error("expected an element sequence, found {kind}")]
    NotAnElement {
        /// Runtime shape of the offending value.
        kind: &'static str,
    },

    /// A render adapter was given input that is not tree shaped.
    #[error("{target} renderer requires an element sequence, found {kind}")]
    Render {
        /// Name of the render target.
        target: String,
        /// Runtime shape of the offending value.
        kind: &'static str,
    },
}

impl TreeError {
    /// Creates a not-an-element error describing the given value.
    pub fn not_an_element(value: &Value) -> Self {
        Self::NotAnElement {
            kind: node::value_kind(value),
        }
    }

    /// Creates a render error describing the given value.
    pub fn render(target: impl Into<String>, value: &Value) -> Self {
        Self::Render {
            target: target.into(),
            kind: node::value_kind(value),
        }
    }
}
