//! Markup serializer.
//!
//! Renders a tree to XML/SVG/HTML text. A node with no content past its
//! name and attributes gets the self-closing short form. A *flat* node
//! (all content scalar) is inlined on one line with blank lines
//! stripped; anything else breaks the line and indents its content by
//! prefixing — each frame only prefixes its own body, so indentation
//! composes without a depth counter. With an indent width of 0 the
//! whole output degenerates to a single line.
//!
//! Text and attribute values are emitted verbatim: no escaping of
//! quotes, angle brackets, or ampersands is performed. That is a known,
//! documented limitation of the format, not something this module
//! corrects silently.

use serde_json::Value;

use crate::error::TreeError;
use crate::node;

/// Serializes a tree to markup text.
///
/// `indent` is the number of spaces added per nesting level; 0 disables
/// line breaks entirely. A root that is not an element sequence is a
/// contract violation and fails fast with [`TreeError::NotAnElement`].
pub fn stringify(tree: &Value, indent: usize) -> Result<String, TreeError> {
    let Value::Array(seq) = tree else {
        return Err(TreeError::not_an_element(tree));
    };
    let cr = if indent > 0 { "\n" } else { "" };
    Ok(render(seq, cr, indent))
}

fn render(seq: &[Value], cr: &str, indent: usize) -> String {
    let name = node::name_of(seq);
    let mut open = format!("<{name}");

    let content = match seq.get(1) {
        Some(Value::Object(attrs)) => {
            for (key, value) in attrs {
                open.push(' ');
                open.push_str(key);
                open.push_str("=\"");
                open.push_str(&attr_text(value));
                open.push('"');
            }
            seq.get(2..).unwrap_or(&[])
        }
        _ => seq.get(1..).unwrap_or(&[]),
    };

    if content.is_empty() {
        return format!("{open}/>{cr}");
    }
    open.push('>');

    let mut body = String::new();
    let mut flat = true;
    for child in content {
        match child {
            Value::Array(inner) => {
                flat = false;
                body.push_str(&render(inner, cr, indent));
            }
            // Inert leaves render nothing. A stray map past slot 1 is
            // outside the shape contract; it is ignored too.
            Value::Null | Value::Object(_) => {}
            scalar => {
                if let Some(text) = node::scalar_text(scalar) {
                    body.push_str(&text);
                    body.push_str(cr);
                }
            }
        }
    }

    if flat {
        format!("{open}{}</{name}>{cr}", strip_blank_lines(&body))
    } else {
        format!("{open}{cr}{}</{name}>{cr}", prefix_lines(&body, indent))
    }
}

/// Attribute value text: ordered sequences join their scalars with
/// single spaces, everything else uses its scalar form.
fn attr_text(value: &Value) -> String {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(node::scalar_text)
            .collect::<Vec<_>>()
            .join(" "),
        Value::Null => "null".to_string(),
        other => node::scalar_text(other).map(String::from).unwrap_or_default(),
    }
}

fn strip_blank_lines(text: &str) -> String {
    text.split('\n')
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn prefix_lines(text: &str, width: usize) -> String {
    if width == 0 {
        return text.to_string();
    }
    let pad = " ".repeat(width);
    if !text.contains('\n') {
        return format!("{pad}{text}");
    }
    text.split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                line.to_string()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
