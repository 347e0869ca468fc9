//! Renderer selection and tree wiring.

use std::str::FromStr;
use std::sync::Arc;

use guides_core::Environment;
use guides_nodes::{Node, NodeRenderer, NodeValue};
use thiserror::Error;

use crate::html::HtmlRenderer;
use crate::latex::LatexRenderer;

/// The output formats a document set can be rendered to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Semantic HTML5.
    Html,
    /// LaTeX source.
    Latex,
}

/// A format name that no renderer family exists for.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown output format: {0}")]
pub struct UnknownFormat(pub String);

impl FromStr for OutputFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "latex" | "tex" => Ok(Self::Latex),
            other => Err(UnknownFormat(other.to_owned())),
        }
    }
}

/// Builds one renderer family per render pass and wires parsed trees to it.
///
/// Wiring is the phase between parsing and rendering: every node of the tree
/// gets the document's environment and the format's renderer assigned.
/// Swapping formats means attaching a different factory to the same tree;
/// neither the tree nor the environment changes.
pub struct RendererFactory {
    node_renderer: Arc<dyn NodeRenderer>,
}

impl RendererFactory {
    /// Build the renderer family for a format.
    #[must_use]
    pub fn new(format: OutputFormat) -> Self {
        let node_renderer: Arc<dyn NodeRenderer> = match format {
            OutputFormat::Html => Arc::new(HtmlRenderer::new()),
            OutputFormat::Latex => Arc::new(LatexRenderer::new()),
        };

        Self { node_renderer }
    }

    /// Wire a parsed tree for rendering.
    ///
    /// Walks the node, its block children, and any node-valued value,
    /// assigning the shared renderer and the document's environment to each.
    pub fn attach(&self, node: &Node, environment: &Arc<Environment>) {
        node.set_environment(Arc::clone(environment));
        node.set_node_renderer(Arc::clone(&self.node_renderer));

        if let Some(NodeValue::Node(child)) = node.value() {
            self.attach(&child, environment);
        }
        for child in node.children() {
            self.attach(&child, environment);
        }
    }
}
