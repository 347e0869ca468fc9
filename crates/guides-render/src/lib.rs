//! HTML and LaTeX renderer families for the Guides documentation compiler.
//!
//! A render pass activates exactly one family: a block-level `NodeRenderer`
//! plus the matching inline-level `SpanRenderer`, selected by
//! [`OutputFormat`]. The [`RendererFactory`] wires a parsed tree to the
//! family and the document's environment; rendering then walks the tree.
//!
//! # Example
//!
//! ```ignore
//! use guides_render::{OutputFormat, RendererFactory};
//!
//! let factory = RendererFactory::new(OutputFormat::Html);
//! factory.attach(&document, &environment);
//! let html = document.render();
//! ```

mod factory;
mod html;
mod latex;
mod spans;

pub use factory::{OutputFormat, RendererFactory, UnknownFormat};
pub use html::{HtmlRenderer, HtmlSpanRenderer, escape_html};
pub use latex::{LatexRenderer, LatexSpanRenderer, escape_latex};
