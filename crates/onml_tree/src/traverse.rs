//! Depth-first traversal with in-place structural mutation.
//!
//! [`traverse`] visits every element node of a tree, pre-order `enter`
//! then post-order `leave`. Visitors mutate structure only through the
//! [`TraverseCtx`] handed to each callback: `rename` rewrites the name
//! slot immediately, `skip` curtails descent, and `remove`/`replace`
//! are reported to the parent frame, which splices or substitutes the
//! child slot in the one canonical sequence. There is no snapshot
//! isolation: a rename is visible to any later callback that inspects
//! the same sequence.
//!
//! # Example
//!
//! ```rust
//! use onml_tree::{on_enter, traverse};
//! use serde_json::json;
//!
//! let mut tree = json!(["ul", ["li", "a"], ["li", "b"]]);
//! let mut items = 0;
//! traverse(&mut tree, &mut on_enter(|_ctx, node, _parent| {
//!     if node.name() == "li" {
//!         items += 1;
//!     }
//! }));
//! assert_eq!(items, 2);
//! ```

use std::sync::LazyLock;

use serde_json::Value;

use crate::node::{self, AttrMap};

static EMPTY_ATTRS: LazyLock<AttrMap> = LazyLock::new(AttrMap::new);

/// Pending mutation directives for the node currently being visited.
///
/// One context exists per visited node per pass and is shared between
/// that node's `enter` and `leave` callbacks, so directives accumulate:
/// a `leave` callback can still rename, remove, or replace. `replace`
/// takes precedence over `remove`. Directives issued for the root have
/// no parent slot to apply to and are silently dropped.
#[derive(Debug, Default)]
pub struct TraverseCtx {
    rename: Option<String>,
    skip: bool,
    remove: bool,
    replace: Option<Value>,
}

impl TraverseCtx {
    /// Renames the current node. Applied to the name slot as soon as
    /// the callback returns.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.rename = Some(name.into());
    }

    /// Skips the current node's children *and* its `leave` callback.
    pub fn skip(&mut self) {
        self.skip = true;
    }

    /// Splices the current node out of its parent sequence. Remaining
    /// siblings shift down; none are skipped.
    pub fn remove(&mut self) {
        self.remove = true;
    }

    /// Substitutes the current node's entire subtree with `node` in the
    /// parent sequence. The replacement is not itself visited.
    pub fn replace(&mut self, node: Value) {
        self.replace = Some(node);
    }
}

/// Read view of the node a callback is standing on.
///
/// Wraps the full underlying sequence, so callbacks can inspect it or
/// append new content directly; structural edits (splice, substitute)
/// still go through [`TraverseCtx`].
#[derive(Debug)]
pub struct NodeView<'tree> {
    seq: &'tree mut Vec<Value>,
    has_attrs: bool,
}

impl NodeView<'_> {
    /// Tag name; `""` when the name slot is absent or not a string.
    pub fn name(&self) -> &str {
        node::name_of(self.seq)
    }

    /// Attribute map; an empty map when the node has none.
    pub fn attrs(&self) -> &AttrMap {
        match self.seq.get(1) {
            Some(Value::Object(map)) if self.has_attrs => map,
            _ => &EMPTY_ATTRS,
        }
    }

    /// Mutable attribute map, when slot 1 classified as one.
    pub fn attrs_mut(&mut self) -> Option<&mut AttrMap> {
        if !self.has_attrs {
            return None;
        }
        match self.seq.get_mut(1) {
            Some(Value::Object(map)) => Some(map),
            _ => None,
        }
    }

    /// Whether slot 1 classified as an attribute map for this visit.
    pub fn has_attrs(&self) -> bool {
        self.has_attrs
    }

    /// The full underlying sequence, name slot included.
    pub fn full_mut(&mut self) -> &mut Vec<Value> {
        self.seq
    }

    /// Content slots (everything past the name and attribute map).
    pub fn content(&self) -> &[Value] {
        self.seq.get(self.content_start()..).unwrap_or(&[])
    }

    /// Appends a child after the existing content.
    ///
    /// Children appended during `enter` are visited by the same pass.
    pub fn push(&mut self, child: Value) {
        self.seq.push(child);
    }

    fn content_start(&self) -> usize {
        if self.has_attrs { 2 } else { 1 }
    }
}

/// Name and attribute snapshot of an ancestor node.
///
/// The parent's sequence is mutably borrowed by its in-flight traversal
/// frame, so child callbacks see this snapshot instead of a live view.
/// It is captured when the parent is entered; a rename issued during
/// the parent's own `enter` is not reflected here.
#[derive(Debug, Clone)]
pub struct NodeMeta {
    name: String,
    attrs: AttrMap,
}

impl NodeMeta {
    fn capture(seq: &[Value]) -> Self {
        Self {
            name: node::name_of(seq).to_owned(),
            attrs: node::attrs_of(seq).cloned().unwrap_or_default(),
        }
    }

    /// Tag name at the time the node was entered.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attribute map at the time the node was entered.
    pub fn attrs(&self) -> &AttrMap {
        &self.attrs
    }
}

/// Traversal callbacks.
///
/// Both methods default to no-ops; implement whichever sides of the
/// walk you care about. `parent` is `None` only for the root.
pub trait Visitor {
    /// Called before a node's children are visited.
    fn enter(
        &mut self,
        _ctx: &mut TraverseCtx,
        _node: &mut NodeView<'_>,
        _parent: Option<&NodeMeta>,
    ) {
    }

    /// Called after a node's children were visited. Not called when the
    /// node was skipped, removed, or replaced during `enter`.
    fn leave(
        &mut self,
        _ctx: &mut TraverseCtx,
        _node: &mut NodeView<'_>,
        _parent: Option<&NodeMeta>,
    ) {
    }
}

/// Wraps a closure as an enter-only [`Visitor`].
pub fn on_enter<F>(f: F) -> OnEnter<F>
where
    F: FnMut(&mut TraverseCtx, &mut NodeView<'_>, Option<&NodeMeta>),
{
    OnEnter(f)
}

/// Wraps a closure as a leave-only [`Visitor`].
pub fn on_leave<F>(f: F) -> OnLeave<F>
where
    F: FnMut(&mut TraverseCtx, &mut NodeView<'_>, Option<&NodeMeta>),
{
    OnLeave(f)
}

/// Wraps an enter and a leave closure as a [`Visitor`].
pub fn on_each<E, L>(enter: E, leave: L) -> OnEach<E, L>
where
    E: FnMut(&mut TraverseCtx, &mut NodeView<'_>, Option<&NodeMeta>),
    L: FnMut(&mut TraverseCtx, &mut NodeView<'_>, Option<&NodeMeta>),
{
    OnEach { enter, leave }
}

/// Enter-only closure visitor. See [`on_enter`].
pub struct OnEnter<F>(F);

impl<F> Visitor for OnEnter<F>
where
    F: FnMut(&mut TraverseCtx, &mut NodeView<'_>, Option<&NodeMeta>),
{
    fn enter(&mut self, ctx: &mut TraverseCtx, node: &mut NodeView<'_>, parent: Option<&NodeMeta>) {
        (self.0)(ctx, node, parent);
    }
}

/// Leave-only closure visitor. See [`on_leave`].
pub struct OnLeave<F>(F);

impl<F> Visitor for OnLeave<F>
where
    F: FnMut(&mut TraverseCtx, &mut NodeView<'_>, Option<&NodeMeta>),
{
    fn leave(&mut self, ctx: &mut TraverseCtx, node: &mut NodeView<'_>, parent: Option<&NodeMeta>) {
        (self.0)(ctx, node, parent);
    }
}

/// Two-closure visitor. See [`on_each`].
pub struct OnEach<E, L> {
    enter: E,
    leave: L,
}

impl<E, L> Visitor for OnEach<E, L>
where
    E: FnMut(&mut TraverseCtx, &mut NodeView<'_>, Option<&NodeMeta>),
    L: FnMut(&mut TraverseCtx, &mut NodeView<'_>, Option<&NodeMeta>),
{
    fn enter(&mut self, ctx: &mut TraverseCtx, node: &mut NodeView<'_>, parent: Option<&NodeMeta>) {
        (self.enter)(ctx, node, parent);
    }

    fn leave(&mut self, ctx: &mut TraverseCtx, node: &mut NodeView<'_>, parent: Option<&NodeMeta>) {
        (self.leave)(ctx, node, parent);
    }
}

/// Result of visiting one child, reported to the parent frame.
enum Outcome {
    Keep,
    Remove,
    Replace(Value),
}

/// Traverses `root` depth-first, invoking the visitor's `enter` and
/// `leave` for every element node.
///
/// Scalars, booleans, nulls, and bare maps are leaves by definition:
/// they never receive callbacks. A `remove` or `replace` directive
/// issued for the root has no parent sequence to apply to and is
/// silently dropped; `rename` still takes effect in place.
pub fn traverse<V: Visitor>(root: &mut Value, visitor: &mut V) {
    let _ = visit(root, None, visitor);
}

fn visit<V: Visitor>(value: &mut Value, parent: Option<&NodeMeta>, visitor: &mut V) -> Outcome {
    let Value::Array(seq) = value else {
        return Outcome::Keep;
    };

    // Slot 1 is classified exactly once per visit.
    let has_attrs = node::attrs_of(seq).is_some();
    let meta = NodeMeta::capture(seq);
    let mut ctx = TraverseCtx::default();

    {
        let mut view = NodeView {
            seq: &mut *seq,
            has_attrs,
        };
        visitor.enter(&mut ctx, &mut view, parent);
    }
    apply_rename(&ctx, seq);

    if let Some(replacement) = ctx.replace.take() {
        return Outcome::Replace(replacement);
    }
    if ctx.remove {
        return Outcome::Remove;
    }
    if ctx.skip {
        // Skip suppresses both descent and `leave`.
        return Outcome::Keep;
    }

    let mut index = if has_attrs { 2 } else { 1 };
    while index < seq.len() {
        match visit(&mut seq[index], Some(&meta), visitor) {
            Outcome::Remove => {
                // Splice and re-run the same index so the sibling that
                // shifted into this slot is not missed.
                seq.remove(index);
            }
            Outcome::Replace(replacement) => {
                seq[index] = replacement;
                index += 1;
            }
            Outcome::Keep => index += 1,
        }
    }

    {
        let mut view = NodeView {
            seq: &mut *seq,
            has_attrs,
        };
        visitor.leave(&mut ctx, &mut view, parent);
    }
    apply_rename(&ctx, seq);

    if let Some(replacement) = ctx.replace.take() {
        return Outcome::Replace(replacement);
    }
    if ctx.remove {
        return Outcome::Remove;
    }
    Outcome::Keep
}

fn apply_rename(ctx: &TraverseCtx, seq: &mut Vec<Value>) {
    if let Some(name) = &ctx.rename {
        let name = Value::String(name.clone());
        if seq.is_empty() {
            seq.push(name);
        } else {
            seq[0] = name;
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    /// The reference tree from the traversal contract: six nodes named
    /// "div" (the scalar `'div'` child of the span is not one of them).
    fn example_tree() -> Value {
        json!([
            "b",
            [
                "div",
                {"a": true},
                [
                    "span",
                    "div",
                    ["div", ["div", {}, ["div", {"a": true}]]],
                    ["div", {}, ["div"]]
                ]
            ]
        ])
    }

    #[test]
    fn counts_divs_on_enter_and_leave() {
        let mut tree = example_tree();
        let mut entered = 0;
        let mut left = 0;
        traverse(
            &mut tree,
            &mut on_each(
                |_ctx, node, _parent| {
                    if node.name() == "div" {
                        entered += 1;
                    }
                },
                |_ctx, node, _parent| {
                    if node.name() == "div" {
                        left += 1;
                    }
                },
            ),
        );
        assert_eq!(entered, 6);
        assert_eq!(left, 6);
    }

    #[test]
    fn skip_prevents_descent_and_leave() {
        let mut tree = example_tree();
        let mut entered_divs = 0;
        let mut left_spans = 0;
        traverse(
            &mut tree,
            &mut on_each(
                |ctx, node, _parent| {
                    match node.name() {
                        "span" => ctx.skip(),
                        "div" => entered_divs += 1,
                        _ => {}
                    };
                },
                |_ctx, node, _parent| {
                    if node.name() == "span" {
                        left_spans += 1;
                    }
                },
            ),
        );
        // All inner divs are nested inside the skipped span.
        assert_eq!(entered_divs, 1);
        assert_eq!(left_spans, 0);
    }

    #[test]
    fn replace_on_leave_substitutes_whole_subtree() {
        let mut tree = example_tree();
        traverse(
            &mut tree,
            &mut on_leave(|ctx, node, _parent| {
                if node.name() == "span" {
                    ctx.replace(json!(["wood"]));
                }
            }),
        );
        assert_eq!(tree, json!(["b", ["div", {"a": true}, ["wood"]]]));
    }

    #[test]
    fn remove_on_leave_splices_all_matches() {
        let mut tree = json!([
            "b",
            ["wood"],
            ["div", ["wood"], "keep", ["wood"], ["span"]],
            ["wood"]
        ]);
        traverse(
            &mut tree,
            &mut on_leave(|ctx, node, _parent| {
                if node.name() == "wood" {
                    ctx.remove();
                }
            }),
        );
        assert_eq!(tree, json!(["b", ["div", "keep", ["span"]]]));
    }

    #[test]
    fn adjacent_removals_do_not_skip_siblings() {
        let mut tree = json!(["b", ["x"], ["x"], ["x"], ["keep"]]);
        traverse(
            &mut tree,
            &mut on_enter(|ctx, node, _parent| {
                if node.name() == "x" {
                    ctx.remove();
                }
            }),
        );
        assert_eq!(tree, json!(["b", ["keep"]]));
    }

    #[test]
    fn replace_takes_precedence_over_remove() {
        let mut tree = json!(["b", ["span"]]);
        traverse(
            &mut tree,
            &mut on_enter(|ctx, node, _parent| {
                if node.name() == "span" {
                    ctx.remove();
                    ctx.replace(json!(["wood"]));
                }
            }),
        );
        assert_eq!(tree, json!(["b", ["wood"]]));
    }

    #[test]
    fn rename_is_applied_in_place_after_enter() {
        let mut tree = json!(["b", ["i", "x"]]);
        traverse(
            &mut tree,
            &mut on_enter(|ctx, node, _parent| {
                if node.name() == "i" {
                    ctx.rename("em");
                }
            }),
        );
        assert_eq!(tree, json!(["b", ["em", "x"]]));
    }

    #[test]
    fn rename_is_visible_to_the_same_nodes_leave() {
        let mut tree = json!(["b"]);
        let mut seen = String::new();
        traverse(
            &mut tree,
            &mut on_each(
                |ctx, _node, _parent| ctx.rename("strong"),
                |_ctx, node, _parent| seen = node.name().to_owned(),
            ),
        );
        assert_eq!(seen, "strong");
        assert_eq!(tree, json!(["strong"]));
    }

    #[test]
    fn root_remove_and_replace_are_dropped() {
        let mut tree = json!(["b", "x"]);
        traverse(
            &mut tree,
            &mut on_enter(|ctx, _node, _parent| {
                ctx.remove();
            }),
        );
        assert_eq!(tree, json!(["b", "x"]));

        traverse(
            &mut tree,
            &mut on_leave(|ctx, _node, _parent| {
                ctx.replace(json!(["other"]));
            }),
        );
        // `leave` fires because enter issued no directive this pass.
        assert_eq!(tree, json!(["b", "x"]));
    }

    #[test]
    fn scalars_booleans_and_nulls_get_no_callbacks() {
        let mut tree = json!(["b", "text", 42, true, false, null]);
        let mut visits = 0;
        traverse(
            &mut tree,
            &mut on_enter(|_ctx, _node, _parent| {
                visits += 1;
            }),
        );
        assert_eq!(visits, 1);
    }

    #[test]
    fn parent_meta_reaches_child_callbacks() {
        let mut tree = json!(["b", {"k": "v"}, ["i"]]);
        let mut parent_name = None;
        let mut parent_attr = None;
        traverse(
            &mut tree,
            &mut on_enter(|_ctx, node, parent| {
                if node.name() == "i" {
                    let parent = parent.unwrap();
                    parent_name = Some(parent.name().to_owned());
                    parent_attr = parent.attrs().get("k").cloned();
                }
            }),
        );
        assert_eq!(parent_name.as_deref(), Some("b"));
        assert_eq!(parent_attr, Some(json!("v")));
    }

    #[test]
    fn root_has_no_parent() {
        let mut tree = json!(["b"]);
        let mut root_parent_was_none = false;
        traverse(
            &mut tree,
            &mut on_enter(|_ctx, _node, parent| {
                root_parent_was_none = parent.is_none();
            }),
        );
        assert!(root_parent_was_none);
    }

    #[test]
    fn children_appended_during_enter_are_visited() {
        let mut tree = json!(["b"]);
        let mut saw_late = false;
        traverse(
            &mut tree,
            &mut on_enter(|_ctx, node, _parent| {
                if node.name() == "b" {
                    node.push(json!(["late"]));
                } else if node.name() == "late" {
                    saw_late = true;
                }
            }),
        );
        assert!(saw_late);
        assert_eq!(tree, json!(["b", ["late"]]));
    }

    #[test]
    fn attrs_view_is_empty_when_absent() {
        let mut tree = json!(["b", ["no-attrs", "x"]]);
        traverse(
            &mut tree,
            &mut on_enter(|_ctx, node, _parent| {
                if node.name() == "no-attrs" {
                    assert!(node.attrs().is_empty());
                    assert!(!node.has_attrs());
                    assert!(node.attrs_mut().is_none());
                }
            }),
        );
    }

    #[test]
    fn attrs_mut_edits_land_in_the_tree() {
        let mut tree = json!(["b", {"a": 1}]);
        traverse(
            &mut tree,
            &mut on_enter(|_ctx, node, _parent| {
                if let Some(attrs) = node.attrs_mut() {
                    attrs.insert("b".into(), json!(2));
                }
            }),
        );
        assert_eq!(tree, json!(["b", {"a": 1, "b": 2}]));
    }

    #[test]
    fn attr_slot_once_content_stays_content() {
        // Slot 1 is a nested node, so it is content and gets visited.
        let mut tree = json!(["b", ["first"], ["second"]]);
        let mut names = Vec::new();
        traverse(
            &mut tree,
            &mut on_enter(|_ctx, node, _parent| {
                names.push(node.name().to_owned());
            }),
        );
        assert_eq!(names, ["b", "first", "second"]);
    }
}
