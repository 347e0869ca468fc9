//! Document node tree and rendering protocol.
//!
//! A parse pass walks markup tokens and builds a tree of [`Node`]s, calling
//! into the document's `Environment` to register links and resolve title
//! levels as it goes. A wiring phase then assigns a [`NodeRenderer`] (and,
//! for inline content, a [`SpanRenderer`]) selected by output format, and the
//! render pass asks the tree to render itself.
//!
//! Nodes are a shared-reference tree: children are `Arc<Node>` and may be
//! held by more than one parent while the tree is still being assembled, so
//! reparenting during incremental parsing needs no deep copies. Rendering is
//! idempotent — it recomputes from current state on every call.

mod node;
mod render;
mod span;

pub use node::{Node, NodeKind, NodeValue, normalize_lines};
pub use render::{NodeRenderer, RenderedNode, SpanRenderer};
pub use span::{ResolvedReference, Span};
