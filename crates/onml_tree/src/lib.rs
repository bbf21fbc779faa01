//! # onml_tree
//!
//! Array-based intermediate representation ("ONML tree") for markup
//! documents, with in-place traversal and a pretty-printing serializer.
//!
//! An ONML node is a `serde_json::Value` sequence: slot 0 is the tag
//! name, slot 1 is optionally an attribute map, and everything after
//! that is content — nested nodes, text, numbers, or booleans.
//!
//! ## Architecture
//!
//! - The tree model is plain `serde_json::Value` (with `preserve_order`
//!   so attribute maps keep document order). JSONML is JSON; there is no
//!   parallel node enum to convert in and out of.
//! - [`traverse`] walks a tree depth-first and lets visitors rename,
//!   skip, remove, or replace nodes in place through a [`TraverseCtx`].
//! - [`stringify`] renders a tree back to markup text, inlining nodes
//!   whose content is purely scalar and indenting the rest.
//!
//! ## Example
//!
//! ```rust
//! use onml_tree::{stringify, traverse, on_enter};
//! use serde_json::json;
//!
//! let mut tree = json!(["g", {"fill": "red"}, ["title", "hi"]]);
//!
//! traverse(&mut tree, &mut on_enter(|ctx, node, _parent| {
//!     if node.name() == "title" {
//!         ctx.remove();
//!     }
//! }));
//!
//! assert_eq!(stringify(&tree, 0).unwrap(), r#"<g fill="red"/>"#);
//! ```

mod error;
pub mod node;
mod render;
mod stringify;
mod svg;
mod traverse;

pub use error::TreeError;
pub use node::{AttrMap, comment, element, name_of, text};
pub use render::{RenderOptions, Renderer, string_renderer};
pub use stringify::stringify;
pub use svg::{SVG_NS, XLINK_NS, gen_svg, tt};
pub use traverse::{NodeMeta, NodeView, TraverseCtx, Visitor, on_each, on_enter, on_leave, traverse};

// The tree model itself is the JSON value type.
pub use serde_json::Value;
