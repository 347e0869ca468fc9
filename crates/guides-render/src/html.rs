//! HTML renderer family.
//!
//! Produces semantic HTML5 output suitable for web display.

use std::collections::BTreeMap;
use std::fmt::Write;

use guides_core::Environment;
use guides_nodes::{Node, NodeKind, NodeRenderer, ResolvedReference, SpanRenderer};

use crate::spans::{initial_header_level, render_spans, render_value, resolve_url};

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Inline-level HTML rendering.
#[derive(Debug, Default)]
pub struct HtmlSpanRenderer;

impl SpanRenderer for HtmlSpanRenderer {
    fn emphasis(&self, text: &str) -> String {
        format!("<em>{text}</em>")
    }

    fn strong_emphasis(&self, text: &str) -> String {
        format!("<strong>{text}</strong>")
    }

    fn nbsp(&self) -> String {
        "&nbsp;".to_owned()
    }

    fn br(&self) -> String {
        "<br>".to_owned()
    }

    fn literal(&self, text: &str) -> String {
        format!("<code>{text}</code>")
    }

    fn escape(&self, span: &str) -> String {
        escape_html(span)
    }

    fn link(
        &self,
        environment: &Environment,
        url: Option<&str>,
        title: &str,
        attributes: &BTreeMap<String, String>,
    ) -> String {
        let Some(url) = url else {
            return escape_html(title);
        };

        let href = resolve_url(environment, url);
        let mut out = String::new();
        write!(out, r#"<a href="{}""#, escape_html(&href)).unwrap();
        for (name, value) in attributes {
            write!(out, r#" {name}="{}""#, escape_html(value)).unwrap();
        }
        write!(out, ">{}</a>", escape_html(title)).unwrap();
        out
    }

    fn reference(
        &self,
        environment: &Environment,
        reference: &ResolvedReference,
        value: Option<&str>,
    ) -> String {
        let text = value
            .or_else(|| reference.title())
            .or_else(|| reference.url())
            .unwrap_or_default();

        match reference.url() {
            Some(url) => self.link(environment, Some(url), text, reference.attributes()),
            None => escape_html(text),
        }
    }
}

/// Block-level HTML rendering.
///
/// One instance is shared by every node of a document during a render pass.
#[derive(Debug, Default)]
pub struct HtmlRenderer {
    spans: HtmlSpanRenderer,
}

impl HtmlRenderer {
    /// Create the HTML renderer family.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl NodeRenderer for HtmlRenderer {
    fn render(&self, node: &Node) -> String {
        match node.kind() {
            NodeKind::Document => node
                .children()
                .iter()
                .map(|child| child.render())
                .collect::<Vec<_>>()
                .join("\n"),
            NodeKind::Paragraph => {
                let classes = node.classes_string();
                let value = render_value(node, &self.spans);
                if classes.is_empty() {
                    format!("<p>{value}</p>")
                } else {
                    format!(r#"<p class="{}">{value}</p>"#, escape_html(&classes))
                }
            }
            NodeKind::Title { level } => {
                let depth = level + initial_header_level(node) - 1;
                format!(
                    "<h{depth}>{}</h{depth}>",
                    render_value(node, &self.spans)
                )
            }
            NodeKind::Code { language } => {
                let code = escape_html(&node.value_string());
                match language {
                    Some(language) => format!(
                        r#"<pre><code class="language-{}">{code}</code></pre>"#,
                        escape_html(language)
                    ),
                    None => format!("<pre><code>{code}</code></pre>"),
                }
            }
            NodeKind::Quote => format!(
                "<blockquote>{}</blockquote>",
                render_value(node, &self.spans)
            ),
            NodeKind::Anchor { name } => format!(r#"<a id="{}"></a>"#, escape_html(name)),
            NodeKind::Separator => "<hr>".to_owned(),
            NodeKind::Raw => node.value_string(),
            NodeKind::Span { spans } => render_spans(node, spans, &self.spans),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use guides_core::StandardUrlGenerator;
    use guides_storage::MemoryOrigin;
    use pretty_assertions::assert_eq;

    use guides_nodes::Span;

    use super::*;

    fn wired(node: &Node) -> &Node {
        node.set_node_renderer(Arc::new(HtmlRenderer::new()));
        node.set_environment(Arc::new(Environment::new(
            "guide/intro.rst",
            "docs",
            1,
            Arc::new(MemoryOrigin::new()),
            Arc::new(StandardUrlGenerator),
        )));
        node
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html(r#""quoted""#), "&quot;quoted&quot;");
        assert_eq!(escape_html("it's"), "it&#x27;s");
    }

    #[test]
    fn test_paragraph() {
        let node = Node::paragraph("plain < text");

        assert_eq!(wired(&node).render(), "<p>plain &lt; text</p>");
    }

    #[test]
    fn test_paragraph_with_classes() {
        let node = Node::paragraph("text");
        node.set_classes(vec!["note".to_owned(), "wide".to_owned()]);

        assert_eq!(wired(&node).render(), r#"<p class="note wide">text</p>"#);
    }

    #[test]
    fn test_title_offsets_by_initial_header_level() {
        let node = Node::title(2, "Section");
        node.set_node_renderer(Arc::new(HtmlRenderer::new()));
        node.set_environment(Arc::new(Environment::new(
            "intro.rst",
            "docs",
            2,
            Arc::new(MemoryOrigin::new()),
            Arc::new(StandardUrlGenerator),
        )));

        assert_eq!(node.render(), "<h3>Section</h3>");
    }

    #[test]
    fn test_code_with_language() {
        let node = Node::code(Some("rust".to_owned()), &["fn main() {}"]);

        assert_eq!(
            wired(&node).render(),
            r#"<pre><code class="language-rust">fn main() {}</code></pre>"#
        );
    }

    #[test]
    fn test_code_escapes_content() {
        let node = Node::code(None, &["a < b"]);

        assert_eq!(wired(&node).render(), "<pre><code>a &lt; b</code></pre>");
    }

    #[test]
    fn test_anchor_and_separator() {
        let anchor = Node::anchor("target");
        let separator = Node::separator();

        assert_eq!(wired(&anchor).render(), r#"<a id="target"></a>"#);
        assert_eq!(wired(&separator).render(), "<hr>");
    }

    #[test]
    fn test_raw_is_not_escaped() {
        let node = Node::raw("<video controls>");

        assert_eq!(wired(&node).render(), "<video controls>");
    }

    #[test]
    fn test_spans_inline_formatting() {
        let node = Node::spans(vec![
            Span::Text("a ".to_owned()),
            Span::Emphasis("b".to_owned()),
            Span::Nbsp,
            Span::StrongEmphasis("c".to_owned()),
            Span::Br,
            Span::Literal("d<e>".to_owned()),
        ]);

        assert_eq!(
            wired(&node).render(),
            "a <em>b</em>&nbsp;<strong>c</strong><br><code>d&lt;e&gt;</code>"
        );
    }

    #[test]
    fn test_link_with_relative_url_resolves_through_environment() {
        let node = Node::spans(vec![Span::link("img.png", "image")]);

        assert_eq!(
            wired(&node).render(),
            r#"<a href="docs/guide/img.png">image</a>"#
        );
    }

    #[test]
    fn test_link_with_attributes() {
        let mut attributes = BTreeMap::new();
        attributes.insert("class".to_owned(), "external".to_owned());
        let node = Node::spans(vec![Span::Link {
            url: Some("https://example.com/".to_owned()),
            title: "example".to_owned(),
            attributes,
        }]);

        assert_eq!(
            wired(&node).render(),
            r#"<a href="https://example.com/" class="external">example</a>"#
        );
    }

    #[test]
    fn test_named_link_resolves_from_link_table() {
        let node = Node::spans(vec![Span::named_link("Guides")]);
        wired(&node);
        node.environment()
            .unwrap()
            .set_link("guides", "https://example.com/guides");

        assert_eq!(
            node.render(),
            r#"<a href="https://example.com/guides">Guides</a>"#
        );
    }

    #[test]
    fn test_unknown_named_link_falls_back_to_text() {
        let node = Node::spans(vec![Span::named_link("missing")]);
        wired(&node);

        assert_eq!(node.render(), "missing");
        let errors = node.environment().unwrap().errors();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("missing"));
    }

    #[test]
    fn test_reference_with_url() {
        let node = Node::spans(vec![Span::Reference {
            reference: ResolvedReference::new(
                Some("Install".to_owned()),
                Some("install.html".to_owned()),
            ),
            value: None,
        }]);

        assert_eq!(
            wired(&node).render(),
            r#"<a href="docs/guide/install.html">Install</a>"#
        );
    }

    #[test]
    fn test_reference_value_overrides_title() {
        let node = Node::spans(vec![Span::Reference {
            reference: ResolvedReference::new(
                Some("Install".to_owned()),
                Some("https://example.com/install".to_owned()),
            ),
            value: Some("the install guide".to_owned()),
        }]);

        assert_eq!(
            wired(&node).render(),
            r#"<a href="https://example.com/install">the install guide</a>"#
        );
    }

    #[test]
    fn test_reference_without_url_renders_plain() {
        let node = Node::spans(vec![Span::Reference {
            reference: ResolvedReference::new(Some("Install".to_owned()), None),
            value: None,
        }]);

        assert_eq!(wired(&node).render(), "Install");
    }

    #[test]
    fn test_quote_wraps_inner_node() {
        let inner = Arc::new(Node::paragraph("quoted"));
        let quote = Node::quote(Arc::clone(&inner));
        wired(&quote);
        wired(&inner);

        assert_eq!(
            quote.render(),
            "<blockquote><p>quoted</p></blockquote>"
        );
    }
}
