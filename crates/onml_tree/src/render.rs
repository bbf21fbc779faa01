//! Render adapter.
//!
//! A thin factory wrapping a render function for a named target
//! surface. The adapter validates that the input is tree shaped before
//! delegating; the render function itself carries no state.

use serde_json::Value;

use crate::error::TreeError;
use crate::stringify::stringify;

/// Options handed to a render function.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Indent width in spaces; 0 renders on a single line.
    pub indent: usize,
}

impl RenderOptions {
    /// Creates options with the given indent width.
    pub fn indent(indent: usize) -> Self {
        Self { indent }
    }
}

/// A named render target bound to a render function and options.
pub struct Renderer<F>
where
    F: Fn(&Value, &RenderOptions) -> Result<String, TreeError>,
{
    target: String,
    render: F,
    options: RenderOptions,
}

impl<F> Renderer<F>
where
    F: Fn(&Value, &RenderOptions) -> Result<String, TreeError>,
{
    /// Creates a renderer for `target` delegating to `render`.
    pub fn new(target: impl Into<String>, render: F, options: RenderOptions) -> Self {
        Self {
            target: target.into(),
            render,
            options,
        }
    }

    /// Name of the target surface.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Renders a tree, after checking it is actually a tree.
    pub fn render(&self, tree: &Value) -> Result<String, TreeError> {
        if !tree.is_array() {
            return Err(TreeError::render(self.target.as_str(), tree));
        }
        (self.render)(tree, &self.options)
    }
}

/// The built-in target: renders to markup text via [`stringify`].
pub fn string_renderer(
    options: RenderOptions,
) -> Renderer<impl Fn(&Value, &RenderOptions) -> Result<String, TreeError>> {
    Renderer::new("string", |tree, opts| stringify(tree, opts.indent), options)
}
