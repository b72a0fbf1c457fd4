use std::path::Path;

/// Content type of generated HTML bodies (404, 405).
pub const DEFAULT_CONTENT_TYPE: &str = "text/html";

/// Fallback for unknown or missing extensions.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Guesses a MIME type from the file extension.
///
/// Matching is exact and case-sensitive: `INDEX.HTML` is served as
/// `application/octet-stream`.
pub fn mime_type(path: &Path) -> &'static str {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    match ext {
        "html" => "text/html",
        "css" => "text/css",
        "js" => "application/javascript",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "ico" => "image/x-icon",
        _ => OCTET_STREAM,
    }
}
