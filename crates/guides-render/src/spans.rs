//! Span and value rendering shared by every renderer family.

use guides_core::Environment;
use guides_nodes::{Node, NodeValue, Span, SpanRenderer};

/// Render a span node's inline constructs through the active span renderer.
///
/// Link and reference spans consult the node's environment. A named link
/// whose target was never registered records a diagnostic and falls back to
/// plain text, so one bad reference never blocks the rest of the document.
/// An unwired node (no environment) has nothing to resolve against and
/// renders links and references as plain text.
pub(crate) fn render_spans(node: &Node, spans: &[Span], renderer: &dyn SpanRenderer) -> String {
    let environment = node.environment();
    let mut out = String::new();

    for span in spans {
        match span {
            Span::Text(text) => out.push_str(&renderer.escape(text)),
            Span::Emphasis(text) => out.push_str(&renderer.emphasis(&renderer.escape(text))),
            Span::StrongEmphasis(text) => {
                out.push_str(&renderer.strong_emphasis(&renderer.escape(text)));
            }
            Span::Literal(text) => out.push_str(&renderer.literal(&renderer.escape(text))),
            Span::Nbsp => out.push_str(&renderer.nbsp()),
            Span::Br => out.push_str(&renderer.br()),
            Span::Link {
                url,
                title,
                attributes,
            } => match &environment {
                Some(env) => {
                    let target = match url {
                        Some(url) => Some(url.clone()),
                        None => {
                            let found = env.link(title);
                            if found.is_none() {
                                env.add_error(format!("reference to unknown link \"{title}\""));
                            }
                            found
                        }
                    };
                    out.push_str(&renderer.link(env, target.as_deref(), title, attributes));
                }
                None => out.push_str(&renderer.escape(title)),
            },
            Span::Reference { reference, value } => match &environment {
                Some(env) => {
                    out.push_str(&renderer.reference(env, reference, value.as_deref()));
                }
                None => {
                    let text = value
                        .as_deref()
                        .or_else(|| reference.title())
                        .unwrap_or_default();
                    out.push_str(&renderer.escape(text));
                }
            },
        }
    }

    out
}

/// Render a node's value: terminal text is escaped, a wrapped node renders
/// itself.
pub(crate) fn render_value(node: &Node, renderer: &dyn SpanRenderer) -> String {
    match node.value() {
        None => String::new(),
        Some(NodeValue::Text(text)) => renderer.escape(&text),
        Some(NodeValue::Node(child)) => child.render(),
    }
}

/// Heading depth the document is embedded at; 1 for an unwired node.
pub(crate) fn initial_header_level(node: &Node) -> usize {
    node.environment()
        .map_or(1, |env| env.initial_header_level())
}

/// Whether a URL must be resolved against the current document before being
/// emitted. External URLs, fragments, and rooted paths pass through.
fn needs_resolution(url: &str) -> bool {
    !(url.starts_with("http://")
        || url.starts_with("https://")
        || url.starts_with("//")
        || url.starts_with("mailto:")
        || url.starts_with("tel:")
        || url.starts_with('#')
        || url.starts_with('/'))
}

/// Resolve a link target through the environment's path-resolution rules
/// when it is relative.
pub(crate) fn resolve_url(environment: &Environment, url: &str) -> String {
    if needs_resolution(url) {
        environment.absolute_relative_path(url)
    } else {
        url.to_owned()
    }
}
