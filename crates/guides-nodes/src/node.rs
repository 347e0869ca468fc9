//! The document node tree.

use std::fmt;
use std::sync::{Arc, RwLock};

use guides_core::Environment;

use crate::render::{NodeRenderer, RenderedNode};
use crate::span::Span;

/// Value held by a node: terminal text or exactly one wrapped child node,
/// never both.
///
/// A node-valued value models constructs like "a heading whose title is
/// itself an inline-formatted node" without a distinct subtype. The wrapped
/// node is a shared reference; it may still be held elsewhere in the tree.
#[derive(Clone, Debug)]
pub enum NodeValue {
    /// Terminal text.
    Text(String),
    /// A wrapped child node.
    Node(Arc<Node>),
}

impl From<String> for NodeValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for NodeValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<Arc<Node>> for NodeValue {
    fn from(node: Arc<Node>) -> Self {
        Self::Node(node)
    }
}

/// What a node is, with the kind-specific data fixed at parse time.
///
/// A representative set of block and inline kinds; renderers decide markup,
/// nodes carry only format-agnostic semantic data.
#[derive(Clone, Debug)]
pub enum NodeKind {
    /// Root container; renders its children in order.
    Document,
    /// A block of running text.
    Paragraph,
    /// A section heading. `level` comes from the environment's marker-based
    /// assignment; renderers offset it by the configured initial header
    /// level.
    Title {
        /// Title level as assigned during parsing, starting at 1.
        level: usize,
    },
    /// A literal block.
    Code {
        /// Language hint, if the markup provided one.
        language: Option<String>,
    },
    /// A block quote wrapping an inner node.
    Quote,
    /// A named link target.
    Anchor {
        /// Target name.
        name: String,
    },
    /// A transition between blocks.
    Separator,
    /// Content emitted untouched by every format.
    Raw,
    /// Inline content, rendered span by span.
    Span {
        /// The inline constructs, in document order.
        spans: Vec<Span>,
    },
}

/// A unit of the parsed document tree.
///
/// Created during parsing with a value and style classes; the environment
/// and a format-specific renderer are attached in a later wiring phase, and
/// the node is rendered zero or more times after that. The wiring slots are
/// interior-mutable so setters take `&self` and shared nodes can be rewired
/// in place; last write wins.
pub struct Node {
    kind: NodeKind,
    value: RwLock<Option<NodeValue>>,
    classes: RwLock<Vec<String>>,
    children: RwLock<Vec<Arc<Node>>>,
    environment: RwLock<Option<Arc<Environment>>>,
    renderer: RwLock<Option<Arc<dyn NodeRenderer>>>,
}

impl Node {
    /// Create a node with no value.
    #[must_use]
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            value: RwLock::new(None),
            classes: RwLock::new(Vec::new()),
            children: RwLock::new(Vec::new()),
            environment: RwLock::new(None),
            renderer: RwLock::new(None),
        }
    }

    /// Create a node with a value.
    #[must_use]
    pub fn with_value(kind: NodeKind, value: impl Into<NodeValue>) -> Self {
        let node = Self::new(kind);
        *node.value.write().unwrap() = Some(value.into());
        node
    }

    /// A root document container.
    #[must_use]
    pub fn document() -> Self {
        Self::new(NodeKind::Document)
    }

    /// A paragraph holding text or an inline-formatted node.
    #[must_use]
    pub fn paragraph(value: impl Into<NodeValue>) -> Self {
        Self::with_value(NodeKind::Paragraph, value)
    }

    /// A section heading at the given parse-time level.
    #[must_use]
    pub fn title(level: usize, value: impl Into<NodeValue>) -> Self {
        Self::with_value(NodeKind::Title { level }, value)
    }

    /// A literal block built from raw source lines.
    ///
    /// The lines are normalized with [`normalize_lines`] before storage.
    #[must_use]
    pub fn code<S: AsRef<str>>(language: Option<String>, lines: &[S]) -> Self {
        Self::with_value(NodeKind::Code { language }, normalize_lines(lines))
    }

    /// A block quote wrapping an inner node.
    #[must_use]
    pub fn quote(inner: Arc<Node>) -> Self {
        Self::with_value(NodeKind::Quote, inner)
    }

    /// A named link target.
    #[must_use]
    pub fn anchor(name: impl Into<String>) -> Self {
        Self::new(NodeKind::Anchor { name: name.into() })
    }

    /// A transition between blocks.
    #[must_use]
    pub fn separator() -> Self {
        Self::new(NodeKind::Separator)
    }

    /// Content emitted untouched by every format.
    #[must_use]
    pub fn raw(value: impl Into<NodeValue>) -> Self {
        Self::with_value(NodeKind::Raw, value)
    }

    /// Inline content.
    #[must_use]
    pub fn spans(spans: Vec<Span>) -> Self {
        Self::new(NodeKind::Span { spans })
    }

    /// What this node is.
    #[must_use]
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Assign the renderer used by [`render`](Self::render).
    ///
    /// Callable any number of times before the first render; last write
    /// wins.
    pub fn set_node_renderer(&self, renderer: Arc<dyn NodeRenderer>) {
        *self.renderer.write().unwrap() = Some(renderer);
    }

    /// Attach the document's environment.
    pub fn set_environment(&self, environment: Arc<Environment>) {
        *self.environment.write().unwrap() = Some(environment);
    }

    /// The attached environment, if the node has been wired.
    #[must_use]
    pub fn environment(&self) -> Option<Arc<Environment>> {
        self.environment.read().unwrap().clone()
    }

    /// Render this node to a string.
    ///
    /// Recomputes from current state on every call; results are not cached
    /// across calls.
    ///
    /// # Panics
    ///
    /// Panics if no renderer has been assigned. That is a wiring bug in the
    /// pipeline, not an authoring mistake, and must abort the render rather
    /// than produce partial output.
    #[must_use]
    pub fn render(&self) -> String {
        let rendered = RenderedNode::new(self, self.do_render());
        rendered.into_rendered()
    }

    fn do_render(&self) -> String {
        self.renderer().render(self)
    }

    fn renderer(&self) -> Arc<dyn NodeRenderer> {
        self.renderer
            .read()
            .unwrap()
            .clone()
            .expect("a node should always have a node renderer assigned")
    }

    /// The node's value, if any.
    #[must_use]
    pub fn value(&self) -> Option<NodeValue> {
        self.value.read().unwrap().clone()
    }

    /// Replace the node's value.
    pub fn set_value(&self, value: Option<NodeValue>) {
        *self.value.write().unwrap() = value;
    }

    /// Style classes, in the order they were set.
    #[must_use]
    pub fn classes(&self) -> Vec<String> {
        self.classes.read().unwrap().clone()
    }

    /// Replace the style classes. Order-preserving, duplicates allowed.
    pub fn set_classes(&self, classes: Vec<String>) {
        *self.classes.write().unwrap() = classes;
    }

    /// Style classes joined with single spaces.
    #[must_use]
    pub fn classes_string(&self) -> String {
        self.classes.read().unwrap().join(" ")
    }

    /// Recursively unwrap the value down to terminal text.
    ///
    /// Returns the empty string for a node with no value.
    #[must_use]
    pub fn value_string(&self) -> String {
        match &*self.value.read().unwrap() {
            None => String::new(),
            Some(NodeValue::Text(text)) => text.clone(),
            Some(NodeValue::Node(node)) => node.value_string(),
        }
    }

    /// Append a block child. Only meaningful for container kinds.
    pub fn add_child(&self, child: Arc<Node>) {
        self.children.write().unwrap().push(child);
    }

    /// Snapshot of the block children, in document order.
    #[must_use]
    pub fn children(&self) -> Vec<Arc<Node>> {
        self.children.read().unwrap().clone()
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("kind", &self.kind)
            .field("value", &*self.value.read().unwrap())
            .field("classes", &*self.classes.read().unwrap())
            .finish_non_exhaustive()
    }
}

/// Join source lines after stripping their common leading whitespace.
///
/// The prefix length is measured from the first line only: the count of its
/// leading whitespace characters. That many characters are dropped from the
/// front of every line, and the lines are joined with `\n`. An empty input
/// yields the empty string. When the first line is entirely whitespace the
/// prefix spans the whole line, stripping every line down to whatever
/// extends past that length — the first-line-only rule is deliberate.
#[must_use]
pub fn normalize_lines<S: AsRef<str>>(lines: &[S]) -> String {
    let Some(first) = lines.first() else {
        return String::new();
    };

    let prefix = first
        .as_ref()
        .chars()
        .take_while(|c| c.is_whitespace())
        .count();

    lines
        .iter()
        .map(|line| line.as_ref().chars().skip(prefix).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    /// Renders a node's unwrapped value, ignoring its kind.
    struct ValueRenderer;

    impl NodeRenderer for ValueRenderer {
        fn render(&self, node: &Node) -> String {
            node.value_string()
        }
    }

    static_assertions::assert_impl_all!(Node: Send, Sync);

    #[test]
    fn test_value_string_terminal_text() {
        let node = Node::paragraph("hello");

        assert_eq!(node.value_string(), "hello");
    }

    #[test]
    fn test_value_string_unwraps_nested_nodes() {
        let inner = Arc::new(Node::paragraph("deep"));
        let middle = Arc::new(Node::with_value(NodeKind::Paragraph, inner));
        let outer = Node::title(1, middle);

        assert_eq!(outer.value_string(), "deep");
    }

    #[test]
    fn test_value_string_empty_without_value() {
        let node = Node::separator();

        assert_eq!(node.value_string(), "");
    }

    #[test]
    fn test_set_value_last_write_wins() {
        let node = Node::paragraph("first");

        node.set_value(Some("second".into()));

        assert_eq!(node.value_string(), "second");
    }

    #[test]
    fn test_classes_string_joins_with_spaces() {
        let node = Node::paragraph("text");

        node.set_classes(vec!["note".to_owned(), "wide".to_owned()]);

        assert_eq!(node.classes_string(), "note wide");
        assert_eq!(node.classes(), vec!["note".to_owned(), "wide".to_owned()]);
    }

    #[test]
    fn test_shared_child_tolerates_reparenting() {
        let shared = Arc::new(Node::paragraph("shared"));
        let first_parent = Node::with_value(NodeKind::Quote, Arc::clone(&shared));
        let second_parent = Node::with_value(NodeKind::Quote, Arc::clone(&shared));

        shared.set_value(Some("updated".into()));

        assert_eq!(first_parent.value_string(), "updated");
        assert_eq!(second_parent.value_string(), "updated");
    }

    #[test]
    #[should_panic(expected = "a node should always have a node renderer assigned")]
    fn test_render_without_renderer_panics() {
        let node = Node::paragraph("text");

        let _ = node.render();
    }

    #[test]
    fn test_render_delegates_to_renderer() {
        let node = Node::paragraph("text");
        node.set_node_renderer(Arc::new(ValueRenderer));

        assert_eq!(node.render(), "text");
    }

    #[test]
    fn test_render_recomputes_each_call() {
        let node = Node::paragraph("before");
        node.set_node_renderer(Arc::new(ValueRenderer));

        assert_eq!(node.render(), "before");
        node.set_value(Some("after".into()));
        assert_eq!(node.render(), "after");
    }

    #[test]
    fn test_environment_wiring_last_write_wins() {
        use guides_core::{Environment, StandardUrlGenerator};
        use guides_storage::MemoryOrigin;

        fn environment(file_name: &str) -> Arc<Environment> {
            Arc::new(Environment::new(
                file_name,
                "docs",
                1,
                Arc::new(MemoryOrigin::new()),
                Arc::new(StandardUrlGenerator),
            ))
        }

        let node = Node::paragraph("text");
        assert!(node.environment().is_none());

        node.set_environment(environment("a.rst"));
        node.set_environment(environment("b.rst"));

        assert_eq!(node.environment().unwrap().current_file_name(), "b.rst");
    }

    #[test]
    fn test_children_keep_order() {
        let document = Node::document();
        document.add_child(Arc::new(Node::paragraph("one")));
        document.add_child(Arc::new(Node::paragraph("two")));

        let children = document.children();

        assert_eq!(children.len(), 2);
        assert_eq!(children[0].value_string(), "one");
        assert_eq!(children[1].value_string(), "two");
    }

    #[test]
    fn test_code_normalizes_lines() {
        let node = Node::code(
            Some("rust".to_owned()),
            &["    fn main() {", "        body();", "    }"],
        );

        assert_eq!(node.value_string(), "fn main() {\n    body();\n}");
    }

    #[test]
    fn test_normalize_lines_strips_first_line_prefix() {
        assert_eq!(
            normalize_lines(&["    Title", "    Body line"]),
            "Title\nBody line"
        );
    }

    #[test]
    fn test_normalize_lines_empty_input() {
        let lines: [&str; 0] = [];

        assert_eq!(normalize_lines(&lines), "");
    }

    #[test]
    fn test_normalize_lines_prefix_from_first_line_only() {
        // The second line is deeper indented; only the first line's prefix
        // is stripped from it.
        assert_eq!(
            normalize_lines(&["  a", "      b"]),
            "a\n    b"
        );
    }

    #[test]
    fn test_normalize_lines_blank_first_line_strips_to_length() {
        // A fully blank first line makes the prefix its whole length.
        assert_eq!(normalize_lines(&["    ", "      b"]), "\n  b");
    }
}
