//! SVG convenience builders.

use serde_json::Value;

use crate::node::{AttrMap, scalar_text};

/// SVG namespace URI.
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";
/// XLink namespace URI.
pub const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// Builds an SVG root element with namespace declarations and a
/// `viewBox` spanning the given size.
///
/// Width and height may be numbers or strings; the viewBox uses their
/// text form.
pub fn gen_svg(width: impl Into<Value>, height: impl Into<Value>) -> Value {
    let width = width.into();
    let height = height.into();
    let view_box = format!(
        "0 0 {} {}",
        scalar_text(&width).unwrap_or_default(),
        scalar_text(&height).unwrap_or_default()
    );

    let mut attrs = AttrMap::new();
    attrs.insert("xmlns".into(), Value::String(SVG_NS.into()));
    attrs.insert("xmlns:xlink".into(), Value::String(XLINK_NS.into()));
    attrs.insert("width".into(), width);
    attrs.insert("height".into(), height);
    attrs.insert("viewBox".into(), Value::String(view_box));

    Value::Array(vec![Value::String("svg".into()), Value::Object(attrs)])
}

/// Builds a coordinate-translation attribute map, merged over `extra`.
///
/// A zero translation on an axis is dropped from the `translate()`
/// text; a fully zero translation produces no `transform` key at all.
pub fn tt(x: f64, y: f64, extra: AttrMap) -> AttrMap {
    let mut attrs = AttrMap::new();
    if x != 0.0 || y != 0.0 {
        let transform = if y != 0.0 {
            format!("translate({x},{y})")
        } else {
            format!("translate({x})")
        };
        attrs.insert("transform".into(), Value::String(transform));
    }
    attrs.extend(extra);
    attrs
}
