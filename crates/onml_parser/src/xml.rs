//! XML/SVG/HTML adapter over the `quick-xml` streaming tokenizer.
//!
//! The tokenizer emits open-tag, close-tag, text, and CDATA events;
//! this adapter maintains an explicit ancestor stack seeded with a
//! synthetic top-level container and assembles the events into an ONML
//! tree. Comments, processing instructions, and declarations are
//! dropped on the floor.

use onml_tree::AttrMap;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde_json::Value;
use tracing::debug;

use crate::{ParseError, Parser};

/// Adapter configuration, passed through to the tokenizer where it has
/// a counterpart.
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    /// Reject mismatched close tags and unclosed elements.
    /// Default: true
    pub strict: bool,
    /// Trim whitespace around text content. Whitespace-only text nodes
    /// are dropped either way.
    /// Default: true
    pub trim: bool,
    /// Lowercase tag and attribute names.
    /// Default: false
    pub lowercase: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            strict: true,
            trim: true,
            lowercase: false,
        }
    }
}

impl ParseOptions {
    /// Creates options with the default settings.
    pub fn new() -> Self {
        Self::default()
    }
}

/// XML parser implementation.
#[derive(Debug, Default)]
pub struct XmlParser {
    options: ParseOptions,
}

impl XmlParser {
    /// Creates a parser with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with the given options.
    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Builds the `[name]` or `[name, attrs]` prefix of an element from
    /// an open-tag event. The attribute map is appended only when it is
    /// non-empty.
    fn open_element(&self, event: &BytesStart<'_>) -> Result<Vec<Value>, ParseError> {
        let mut name = String::from_utf8_lossy(event.name().as_ref()).into_owned();
        if self.options.lowercase {
            name.make_ascii_lowercase();
        }

        let mut attrs = AttrMap::new();
        for attr in event.attributes() {
            let attr = attr?;
            let mut key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            if self.options.lowercase {
                key.make_ascii_lowercase();
            }
            let value = attr.unescape_value()?.into_owned();
            attrs.insert(key, Value::String(value));
        }

        let mut element = vec![Value::String(name)];
        if !attrs.is_empty() {
            element.push(Value::Object(attrs));
        }
        Ok(element)
    }
}

impl Parser for XmlParser {
    fn name(&self) -> &str {
        "xml"
    }

    fn extensions(&self) -> &[&str] {
        &["xml", "svg", "xhtml", "html"]
    }

    fn parse(&self, source: &str) -> Result<Value, ParseError> {
        let mut reader = Reader::from_str(source);
        let config = reader.config_mut();
        config.check_end_names = self.options.strict;
        config.allow_unmatched_ends = !self.options.strict;

        // Bottom of the stack is a synthetic container; real elements
        // sit above it while they are open.
        let mut stack: Vec<Vec<Value>> = vec![Vec::new()];

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    stack.push(self.open_element(&e)?);
                }
                Event::Empty(e) => {
                    let element = self.open_element(&e)?;
                    if let Some(top) = stack.last_mut() {
                        top.push(Value::Array(element));
                    }
                }
                Event::End(_) => {
                    // The synthetic container never pops; an unmatched
                    // close below it is the tokenizer's concern.
                    if stack.len() > 1
                        && let Some(element) = stack.pop()
                        && let Some(top) = stack.last_mut()
                    {
                        top.push(Value::Array(element));
                    }
                }
                Event::Text(e) => {
                    let text = e.unescape()?;
                    let trimmed = text.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    let content = if self.options.trim {
                        trimmed.to_string()
                    } else {
                        text.into_owned()
                    };
                    if let Some(top) = stack.last_mut() {
                        top.push(Value::String(content));
                    }
                }
                Event::CData(e) => {
                    // The CDATA wrapper is discarded; the content is
                    // indistinguishable from ordinary text downstream.
                    let content = String::from_utf8_lossy(&e.into_inner()).into_owned();
                    if let Some(top) = stack.last_mut() {
                        top.push(Value::String(content));
                    }
                }
                Event::Eof => break,
                ev => debug!(event = ?ev, "ignoring tokenizer event"),
            }
        }

        if stack.len() > 1 {
            if self.options.strict {
                return Err(ParseError::invalid_source_at(
                    "unclosed element at end of input",
                    reader.buffer_position() as usize,
                ));
            }
            // Loose mode: auto-close whatever is still open.
            while stack.len() > 1 {
                if let Some(element) = stack.pop()
                    && let Some(top) = stack.last_mut()
                {
                    top.push(Value::Array(element));
                }
            }
        }

        let container = stack.pop().unwrap_or_default();
        // A source with more than one top-level element silently loses
        // all but the first.
        container.into_iter().next().ok_or(ParseError::NoRootElement)
    }
}

/// Parses markup text with the default options.
pub fn parse(text: &str) -> Result<Value, ParseError> {
    XmlParser::new().parse(text)
}
