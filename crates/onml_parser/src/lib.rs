//! # onml_parser
//!
//! Parser adapter: turns markup text into an ONML tree.
//!
//! The heavy lifting is done by the external `quick-xml` streaming
//! tokenizer; this crate only assembles its open-tag, close-tag, text,
//! and CDATA events into the array-based tree defined by `onml_tree`.
//! A `Parser` trait fronts the adapter so other markup tokenizers can
//! be slotted in behind the same interface.
//!
//! ## Example
//!
//! ```rust
//! use onml_parser::parse;
//! use serde_json::json;
//!
//! let tree = parse(r#"<g fill="red"><title>hi</title></g>"#).unwrap();
//! assert_eq!(tree, json!(["g", {"fill": "red"}, ["title", "hi"]]));
//! ```

mod error;
mod traits;
mod xml;

pub use error::ParseError;
pub use traits::Parser;
pub use xml::{ParseOptions, XmlParser, parse};
