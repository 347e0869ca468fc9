//! Rendering protocol: the capability traits nodes render through.
//!
//! Exactly one [`SpanRenderer`] and one family of [`NodeRenderer`]s are
//! active per render pass, selected by output format. They are late-bound
//! capabilities assigned during wiring, never subclasses of the node model,
//! so formats can be swapped without touching the tree or the environment.

use std::collections::BTreeMap;

use guides_core::Environment;

use crate::node::Node;
use crate::span::ResolvedReference;

/// Block-level rendering capability.
///
/// Given a node, produce its fully rendered string in the target format.
/// Implementations read the node's semantic content but never mutate it.
pub trait NodeRenderer: Send + Sync {
    /// Render a node to the target format.
    fn render(&self, node: &Node) -> String;
}

/// Inline-level rendering capability, one per target format.
pub trait SpanRenderer: Send + Sync {
    /// Emphasized text.
    fn emphasis(&self, text: &str) -> String;

    /// Strongly emphasized text.
    fn strong_emphasis(&self, text: &str) -> String;

    /// A non-breaking space.
    fn nbsp(&self) -> String;

    /// A hard line break.
    fn br(&self) -> String;

    /// An inline literal.
    fn literal(&self, text: &str) -> String;

    /// Escape format-reserved characters in a span of text.
    fn escape(&self, span: &str) -> String;

    /// Render a hyperlink.
    ///
    /// A `None` URL must still produce valid markup (a non-linked title).
    /// Relative URLs are resolved through the environment's path-resolution
    /// rules.
    fn link(
        &self,
        environment: &Environment,
        url: Option<&str>,
        title: &str,
        attributes: &BTreeMap<String, String>,
    ) -> String;

    /// Render a cross-reference whose target was resolved externally,
    /// using `value` as override link text.
    fn reference(
        &self,
        environment: &Environment,
        reference: &ResolvedReference,
        value: Option<&str>,
    ) -> String;
}

/// A node bound to its rendered string for the duration of one render call.
///
/// Post-processing, caching, and diagnostics can hook into "this node
/// rendered to this text" here without widening the node itself.
#[derive(Debug)]
pub struct RenderedNode<'a> {
    node: &'a Node,
    rendered: String,
}

impl<'a> RenderedNode<'a> {
    /// Bind a node to its rendered output.
    #[must_use]
    pub fn new(node: &'a Node, rendered: String) -> Self {
        Self { node, rendered }
    }

    /// The node that was rendered.
    #[must_use]
    pub fn node(&self) -> &Node {
        self.node
    }

    /// The rendered text.
    #[must_use]
    pub fn rendered(&self) -> &str {
        &self.rendered
    }

    /// Consume the wrapper, keeping the rendered text.
    #[must_use]
    pub fn into_rendered(self) -> String {
        self.rendered
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_rendered_node_binds_node_and_output() {
        let node = Node::paragraph("text");
        let rendered = RenderedNode::new(&node, "<p>text</p>".to_owned());

        assert_eq!(rendered.rendered(), "<p>text</p>");
        assert_eq!(rendered.node().value_string(), "text");
        assert_eq!(rendered.into_rendered(), "<p>text</p>");
    }
}
