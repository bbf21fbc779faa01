//! The tree model contract.
//!
//! An ONML node is a heterogeneous `Value::Array`:
//!
//! - slot 0 is the tag name (a string; an absent or non-string value is
//!   tolerated and read as the empty string),
//! - slot 1 is an attribute map *only when* the runtime shape at that
//!   position is a plain map — otherwise it is already content,
//! - every remaining slot is content: a nested node, a string, a
//!   number, a boolean, or an inert `Value::Null`.
//!
//! Classification of slot 1 is positional and happens once per visit;
//! it is never cached on the node. This module holds the classification
//! helpers and the small node builders. It performs no traversal and no
//! serialization of its own.

use std::borrow::Cow;

use serde_json::Value;

/// Attribute map of an element: string keys in document order.
pub type AttrMap = serde_json::Map<String, Value>;

/// Tag name of an element sequence.
///
/// Returns `""` when slot 0 is absent or not a string.
pub fn name_of(seq: &[Value]) -> &str {
    seq.first().and_then(Value::as_str).unwrap_or("")
}

/// Attribute map of an element sequence, if slot 1 classifies as one.
pub fn attrs_of(seq: &[Value]) -> Option<&AttrMap> {
    match seq.get(1) {
        Some(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Index of the first content slot: 2 when slot 1 is an attribute map,
/// 1 otherwise.
pub fn content_start(seq: &[Value]) -> usize {
    if attrs_of(seq).is_some() { 2 } else { 1 }
}

/// Content slots of an element sequence (everything past the name and
/// the attribute map).
pub fn content_of(seq: &[Value]) -> &[Value] {
    seq.get(content_start(seq)..).unwrap_or(&[])
}

/// Text form of a scalar leaf.
///
/// `None` for sequences, maps, and nulls — those are not scalars.
pub fn scalar_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s)),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
        _ => None,
    }
}

/// Runtime shape of a value, for error messages.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "map",
    }
}

/// Builds an element node `[name, attrs?, ...children]`.
///
/// The attribute map is only included when it is non-empty, matching
/// what the parser adapter produces.
pub fn element(
    name: impl Into<String>,
    attrs: AttrMap,
    children: impl IntoIterator<Item = Value>,
) -> Value {
    let mut seq = vec![Value::String(name.into())];
    if !attrs.is_empty() {
        seq.push(Value::Object(attrs));
    }
    seq.extend(children);
    Value::Array(seq)
}

/// Builds a text node. Text is a plain scalar child.
pub fn text(content: impl Into<String>) -> Value {
    Value::String(content.into())
}

/// Builds a comment node `["!", text]`.
pub fn comment(content: impl Into<String>) -> Value {
    Value::Array(vec![
        Value::String("!".to_string()),
        Value::String(content.into()),
    ])
}
