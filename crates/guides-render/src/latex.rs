//! LaTeX renderer family.

use std::collections::BTreeMap;

use guides_core::Environment;
use guides_nodes::{Node, NodeKind, NodeRenderer, ResolvedReference, SpanRenderer};

use crate::spans::{initial_header_level, render_spans, render_value, resolve_url};

/// Escape LaTeX reserved characters.
#[must_use]
pub fn escape_latex(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => result.push_str(r"\textbackslash{}"),
            '{' => result.push_str(r"\{"),
            '}' => result.push_str(r"\}"),
            '&' => result.push_str(r"\&"),
            '%' => result.push_str(r"\%"),
            '$' => result.push_str(r"\$"),
            '#' => result.push_str(r"\#"),
            '_' => result.push_str(r"\_"),
            '~' => result.push_str(r"\textasciitilde{}"),
            '^' => result.push_str(r"\textasciicircum{}"),
            _ => result.push(c),
        }
    }
    result
}

/// Sectioning macro for a heading depth.
fn section_macro(depth: usize) -> &'static str {
    match depth {
        0 | 1 => "section",
        2 => "subsection",
        3 => "subsubsection",
        _ => "paragraph",
    }
}

/// Inline-level LaTeX rendering.
#[derive(Debug, Default)]
pub struct LatexSpanRenderer;

impl SpanRenderer for LatexSpanRenderer {
    fn emphasis(&self, text: &str) -> String {
        format!(r"\emph{{{text}}}")
    }

    fn strong_emphasis(&self, text: &str) -> String {
        format!(r"\textbf{{{text}}}")
    }

    fn nbsp(&self) -> String {
        "~".to_owned()
    }

    fn br(&self) -> String {
        "\\\\\n".to_owned()
    }

    fn literal(&self, text: &str) -> String {
        format!(r"\texttt{{{text}}}")
    }

    fn escape(&self, span: &str) -> String {
        escape_latex(span)
    }

    // LaTeX has no per-link attribute concept; attributes are dropped.
    fn link(
        &self,
        environment: &Environment,
        url: Option<&str>,
        title: &str,
        _attributes: &BTreeMap<String, String>,
    ) -> String {
        let Some(url) = url else {
            return escape_latex(title);
        };

        let href = resolve_url(environment, url);
        format!(r"\href{{{href}}}{{{}}}", escape_latex(title))
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
            None => escape_latex(text),
        }
    }
}

/// Block-level LaTeX rendering.
#[derive(Debug, Default)]
pub struct LatexRenderer {
    spans: LatexSpanRenderer,
}

impl LatexRenderer {
    /// Create the LaTeX renderer family.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl NodeRenderer for LatexRenderer {
    fn render(&self, node: &Node) -> String {
        match node.kind() {
            NodeKind::Document => node
                .children()
                .iter()
                .map(|child| child.render())
                .collect::<Vec<_>>()
                .join("\n\n"),
            NodeKind::Paragraph => render_value(node, &self.spans),
            NodeKind::Title { level } => {
                let depth = level + initial_header_level(node) - 1;
                format!(
                    r"\{}{{{}}}",
                    section_macro(depth),
                    render_value(node, &self.spans)
                )
            }
            // Verbatim content must stay unescaped.
            NodeKind::Code { .. } => format!(
                "\\begin{{verbatim}}\n{}\n\\end{{verbatim}}",
                node.value_string()
            ),
            NodeKind::Quote => format!(
                "\\begin{{quotation}}\n{}\n\\end{{quotation}}",
                render_value(node, &self.spans)
            ),
            NodeKind::Anchor { name } => format!(r"\label{{{name}}}"),
            NodeKind::Separator => r"\hrule".to_owned(),
            NodeKind::Raw => node.value_string(),
            NodeKind::Span { spans } => render_spans(node, spans, &self.spans),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use guides_core::StandardUrlGenerator;
    use guides_nodes::Span;
    use guides_storage::MemoryOrigin;
    use pretty_assertions::assert_eq;

    use super::*;

    fn wired(node: &Node) -> &Node {
        node.set_node_renderer(Arc::new(LatexRenderer::new()));
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
    fn test_escape_latex() {
        assert_eq!(escape_latex("50% of $10"), r"50\% of \$10");
        assert_eq!(escape_latex("a_b"), r"a\_b");
        assert_eq!(escape_latex("x^2"), r"x\textasciicircum{}2");
        assert_eq!(escape_latex(r"C:\tmp"), r"C:\textbackslash{}tmp");
    }

    #[test]
    fn test_paragraph_escapes_value() {
        let node = Node::paragraph("50% done");

        assert_eq!(wired(&node).render(), r"50\% done");
    }

    #[test]
    fn test_title_uses_section_macros() {
        let section = Node::title(1, "One");
        let subsection = Node::title(2, "Two");
        let deep = Node::title(4, "Four");

        assert_eq!(wired(&section).render(), r"\section{One}");
        assert_eq!(wired(&subsection).render(), r"\subsection{Two}");
        assert_eq!(wired(&deep).render(), r"\paragraph{Four}");
    }

    #[test]
    fn test_code_is_verbatim_and_unescaped() {
        let node = Node::code(Some("sh".to_owned()), &["echo 100%"]);

        assert_eq!(
            wired(&node).render(),
            "\\begin{verbatim}\necho 100%\n\\end{verbatim}"
        );
    }

    #[test]
    fn test_spans_inline_formatting() {
        let node = Node::spans(vec![
            Span::Emphasis("a".to_owned()),
            Span::Nbsp,
            Span::StrongEmphasis("b".to_owned()),
            Span::Literal("c_d".to_owned()),
        ]);

        assert_eq!(
            wired(&node).render(),
            "\\emph{a}~\\textbf{b}\\texttt{c\\_d}"
        );
    }

    #[test]
    fn test_link_resolves_relative_url() {
        let node = Node::spans(vec![Span::link("img.png", "image")]);

        assert_eq!(
            wired(&node).render(),
            r"\href{docs/guide/img.png}{image}"
        );
    }

    #[test]
    fn test_link_without_url_is_plain_text() {
        let node = Node::spans(vec![Span::named_link("missing")]);

        assert_eq!(wired(&node).render(), "missing");
    }

    #[test]
    fn test_reference_without_url_is_plain_text() {
        let node = Node::spans(vec![Span::Reference {
            reference: ResolvedReference::new(Some("Install".to_owned()), None),
            value: None,
        }]);

        assert_eq!(wired(&node).render(), "Install");
    }

    #[test]
    fn test_quote_and_separator() {
        let inner = Arc::new(Node::paragraph("quoted"));
        let quote = Node::quote(Arc::clone(&inner));
        wired(&quote);
        wired(&inner);
        let separator = Node::separator();

        assert_eq!(
            quote.render(),
            "\\begin{quotation}\nquoted\n\\end{quotation}"
        );
        assert_eq!(wired(&separator).render(), r"\hrule");
    }
}
