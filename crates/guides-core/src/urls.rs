//! URL generation collaborator.

/// URL-generation policy injected into each document's environment.
///
/// The compiler consumes this service when resolving markup-authored URLs;
/// it never defines the policy itself. Site builders substitute their own
/// implementation to control how output URLs are laid out.
pub trait UrlGenerator: Send + Sync {
    /// Turn a markup-authored URL into a URL relative to the current file.
    fn relative_url(&self, url: &str) -> String;

    /// Absolute path of a file on the backing filesystem.
    fn absolute_url(&self, directory: &str, file_name: &str) -> String;
}

/// Default URL generation.
///
/// Relative URLs pass through unchanged; absolute paths keep their leading
/// separator and skip the directory prefix.
#[derive(Debug, Default)]
pub struct StandardUrlGenerator;

impl UrlGenerator for StandardUrlGenerator {
    fn relative_url(&self, url: &str) -> String {
        url.to_owned()
    }

    fn absolute_url(&self, directory: &str, file_name: &str) -> String {
        if file_name.starts_with('/') {
            return file_name.to_owned();
        }

        format!("{directory}/{file_name}")
    }
}
