//! Per-document parse and render state.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock};

use guides_storage::Origin;
use url::Url;

use crate::urls::UrlGenerator;

/// Title-level assignment accumulated while headings are parsed.
///
/// Section depth is inferred purely from which underline character was used
/// and in what order it was first encountered, not from declared depth. The
/// first character seen gets level 1, the next new character level 2, and a
/// character is never re-assigned until [`Environment::reset`].
#[derive(Debug, Default)]
struct TitleLevels {
    letters: Vec<(usize, char)>,
    current: usize,
}

impl TitleLevels {
    fn level_for(&mut self, letter: char) -> usize {
        if let Some(level) = self
            .letters
            .iter()
            .find_map(|&(level, known)| (known == letter).then_some(level))
        {
            return level;
        }

        self.current += 1;
        self.letters.push((self.current, letter));
        self.current
    }

    fn clear(&mut self) {
        self.letters.clear();
        self.current = 0;
    }
}

/// Per-document compilation state.
///
/// One instance exists per document being compiled. The parse pass mutates it
/// as links and headings are encountered; the render pass reads it back to
/// resolve references. It is discarded once the document's output is emitted
/// and never shared between documents — a project-wide link table is the
/// responsibility of the layer above.
///
/// The document's identity (file name, directory, configured initial header
/// level) is fixed at construction; accumulated state lives behind locks so a
/// shared `Arc<Environment>` serves both phases.
///
/// # Thread Safety
///
/// `Environment` is `Send + Sync`, but parsing and rendering of a single
/// document must stay sequential: the link table and title levels are
/// order-dependent (first-seen-wins), so interleaving parse events would
/// change observable output.
pub struct Environment {
    url_generator: Arc<dyn UrlGenerator>,
    initial_header_level: usize,
    current_file_name: String,
    current_directory: String,
    origin: Arc<dyn Origin>,
    titles: RwLock<TitleLevels>,
    links: RwLock<HashMap<String, String>>,
    anonymous: RwLock<VecDeque<String>>,
    errors: RwLock<Vec<String>>,
}

impl Environment {
    /// Create the environment for one document.
    ///
    /// # Arguments
    ///
    /// * `current_file_name` - Logical path of the document (e.g. `"guide/intro.rst"`)
    /// * `current_directory` - Directory the document set is rooted at
    /// * `initial_header_level` - Heading depth the document is embedded at
    /// * `origin` - Read-only filesystem the document set is read from
    /// * `url_generator` - URL-generation policy
    #[must_use]
    pub fn new(
        current_file_name: impl Into<String>,
        current_directory: impl Into<String>,
        initial_header_level: usize,
        origin: Arc<dyn Origin>,
        url_generator: Arc<dyn UrlGenerator>,
    ) -> Self {
        Self {
            url_generator,
            initial_header_level,
            current_file_name: current_file_name.into(),
            current_directory: current_directory.into(),
            origin,
            titles: RwLock::new(TitleLevels::default()),
            links: RwLock::new(HashMap::new()),
            anonymous: RwLock::new(VecDeque::new()),
            errors: RwLock::new(Vec::new()),
        }
    }

    /// Clear the title-level state.
    ///
    /// Used when a new sub-document scope begins (e.g. an included file) so
    /// its first heading starts fresh at level 1. Links, the anonymous queue,
    /// and recorded errors are kept.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn reset(&self) {
        tracing::debug!(file = %self.current_file_name, "resetting title levels");
        self.titles.write().unwrap().clear();
    }

    /// Heading depth this document is embedded at.
    #[must_use]
    pub fn initial_header_level(&self) -> usize {
        self.initial_header_level
    }

    /// Register a link target.
    ///
    /// Names are lower-cased and trimmed before storage; the URL is trimmed.
    /// Registering the same name twice overwrites the earlier target.
    ///
    /// The name `"_"` resolves the oldest pending anonymous reference
    /// instead: the front of the anonymous queue is popped and the URL is
    /// bound to that name. If no anonymous reference is pending, the URL is
    /// an authoring error; a diagnostic is recorded and the target dropped.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn set_link(&self, name: &str, url: &str) {
        let mut name = name.trim().to_lowercase();

        if name == "_" {
            match self.anonymous.write().unwrap().pop_front() {
                Some(pending) => name = pending,
                None => {
                    self.add_error(format!(
                        "anonymous link target \"{}\" has no pending anonymous reference",
                        url.trim()
                    ));
                    return;
                }
            }
        }

        self.links.write().unwrap().insert(name, url.trim().to_owned());
    }

    /// Queue an anonymous reference name, oldest first.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn push_anonymous(&self, name: &str) {
        self.anonymous
            .write()
            .unwrap()
            .push_back(name.trim().to_lowercase());
    }

    /// Drop all pending anonymous references.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn reset_anonymous_stack(&self) {
        self.anonymous.write().unwrap().clear();
    }

    /// Look up a link target by name.
    ///
    /// The name is normalized the same way [`set_link`](Self::set_link)
    /// normalizes it, so lookups are case- and whitespace-insensitive.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn link(&self, name: &str) -> Option<String> {
        self.links
            .read()
            .unwrap()
            .get(&name.trim().to_lowercase())
            .cloned()
    }

    /// Snapshot of the full link table.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn links(&self) -> HashMap<String, String> {
        self.links.read().unwrap().clone()
    }

    /// Title level for a section marker character.
    ///
    /// The first time a character is seen it is assigned the next unused
    /// level; later headings using the same character reuse that level. A new
    /// character always gets a strictly higher level than every character
    /// seen before it, regardless of the nesting the author intended.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn level_for(&self, letter: char) -> usize {
        self.titles.write().unwrap().level_for(letter)
    }

    /// Logical path of the document being compiled.
    #[must_use]
    pub fn current_file_name(&self) -> &str {
        &self.current_file_name
    }

    /// Directory the document set is rooted at.
    #[must_use]
    pub fn current_directory(&self) -> &str {
        &self.current_directory
    }

    /// Canonical URL of the document, its file name.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.current_file_name
    }

    /// Read-only filesystem the document set is read from.
    #[must_use]
    pub fn origin(&self) -> &Arc<dyn Origin> {
        &self.origin
    }

    /// Directory component of the current file name.
    ///
    /// Empty for a root-level file, never `"."`.
    #[must_use]
    pub fn dir_name(&self) -> String {
        match self.current_file_name.rsplit_once('/') {
            Some((dir, _)) => dir.to_owned(),
            None => String::new(),
        }
    }

    /// Resolve a markup-authored URL to a path relative to the project root.
    ///
    /// An absolute path keeps only the current directory as prefix; anything
    /// else is resolved below the current file's directory through the URL
    /// generator.
    #[must_use]
    pub fn absolute_relative_path(&self, url: &str) -> String {
        if is_absolute_path(url) {
            return format!(
                "{}/{}",
                self.current_directory,
                url.trim_start_matches('/')
            );
        }

        format!(
            "{}/{}/{}",
            self.current_directory,
            self.dir_name(),
            self.url_generator.relative_url(url)
        )
    }

    /// Absolute path of the current file on the origin filesystem.
    ///
    /// Node kinds that embed other files (diagrams, includes) load them
    /// relative to this path; see [`origin`](Self::origin) for the
    /// filesystem to use it on.
    #[must_use]
    pub fn current_absolute_path(&self) -> String {
        self.url_generator
            .absolute_url(&self.current_directory, &self.current_file_name)
    }

    /// Record a non-fatal authoring error and continue.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn add_error(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(file = %self.current_file_name, "{message}");
        self.errors.write().unwrap().push(message);
    }

    /// Diagnostics recorded so far, in the order they occurred.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        self.errors.read().unwrap().clone()
    }
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
            .field("current_file_name", &self.current_file_name)
            .field("current_directory", &self.current_directory)
            .field("initial_header_level", &self.initial_header_level)
            .finish_non_exhaustive()
    }
}

/// Whether a URL is an absolute path: a relative reference (no scheme, no
/// authority) whose path starts at the root.
fn is_absolute_path(url: &str) -> bool {
    Url::parse(url).is_err() && url.starts_with('/') && !url.starts_with("//")
}
