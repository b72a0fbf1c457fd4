//! Request path to file resolution
//!
//! Joins the request path onto the web root, reads the file and guesses its
//! MIME type. Every failure collapses to "not found".

use std::path::PathBuf;

use crate::http::mime::mime_type;

const INDEX_PATH: &str = "/index.html";

/// A file read from disk, ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
    /// Location on disk after canonicalization
    pub path: PathBuf,
    /// Raw file contents
    pub contents: Vec<u8>,
    /// MIME type derived from the extension
    pub content_type: &'static str,
}

#[derive(Debug, Clone)]
pub struct FileResolver {
    web_root: PathBuf,
}

impl FileResolver {
    pub fn new(web_root: impl Into<PathBuf>) -> Self {
        Self {
            web_root: web_root.into(),
        }
    }

    /// The on-disk candidate for `request_path`, before any checks.
    ///
    /// `/` becomes `/index.html`; the path is appended to the web root as a
    /// plain string, so query strings and `..` segments are kept verbatim.
    pub fn candidate_path(&self, request_path: &str) -> PathBuf {
        let path = if request_path == "/" {
            INDEX_PATH
        } else {
            request_path
        };

        let mut joined = self.web_root.clone().into_os_string();
        joined.push(path);
        PathBuf::from(joined)
    }

    /// Reads the file behind `request_path`.
    ///
    /// Returns `None` when the file is missing, unreadable, a directory, or
    /// resolves to a location outside the web root.
    pub async fn resolve(&self, request_path: &str) -> Option<ResolvedFile> {
        let candidate = self.candidate_path(request_path);

        let root = tokio::fs::canonicalize(&self.web_root).await.ok()?;
        let path = tokio::fs::canonicalize(&candidate).await.ok()?;

        if !path.starts_with(&root) {
            tracing::debug!(path = %candidate.display(), "Path escapes web root");
            return None;
        }

        let meta = tokio::fs::metadata(&path).await.ok()?;
        if !meta.is_file() {
            return None;
        }

        let contents = tokio::fs::read(&path).await.ok()?;
        let content_type = mime_type(&candidate);

        Some(ResolvedFile {
            path,
            contents,
            content_type,
        })
    }
}
