//! Inline content model.

use std::collections::BTreeMap;

/// A cross-reference whose target has already been determined by an external
/// resolver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedReference {
    title: Option<String>,
    url: Option<String>,
    attributes: BTreeMap<String, String>,
}

impl ResolvedReference {
    /// Create a resolved reference from its target title and URL.
    #[must_use]
    pub fn new(title: Option<String>, url: Option<String>) -> Self {
        Self {
            title,
            url,
            attributes: BTreeMap::new(),
        }
    }

    /// Add a markup attribute to carry through to the rendered output.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Title of the referenced target.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// URL of the referenced target, if it has one.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Markup attributes, ordered by name.
    #[must_use]
    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }
}

/// An inline construct inside a span node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Span {
    /// Plain text.
    Text(String),
    /// Emphasized text.
    Emphasis(String),
    /// Strongly emphasized text.
    StrongEmphasis(String),
    /// Inline literal.
    Literal(String),
    /// Non-breaking space.
    Nbsp,
    /// Hard line break.
    Br,
    /// A hyperlink. Without an inline URL the title is looked up in the
    /// environment's link table at render time.
    Link {
        /// Inline target, if the markup carried one.
        url: Option<String>,
        /// Link text, also the lookup name for named references.
        title: String,
        /// Markup attributes, ordered by name.
        attributes: BTreeMap<String, String>,
    },
    /// An externally resolved cross-reference.
    Reference {
        /// The resolved target.
        reference: ResolvedReference,
        /// Override link text; falls back to the target's title.
        value: Option<String>,
    },
}

impl Span {
    /// A hyperlink with an inline target.
    #[must_use]
    pub fn link(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self::Link {
            url: Some(url.into()),
            title: title.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// A named link reference, resolved against the environment's link table
    /// when rendered.
    #[must_use]
    pub fn named_link(title: impl Into<String>) -> Self {
        Self::Link {
            url: None,
            title: title.into(),
            attributes: BTreeMap::new(),
        }
    }
}
