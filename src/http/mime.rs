//! MIME type resolution module
//!
//! Maps a file extension to a Content-Type string, falling back to plain
//! text when the extension is missing or unknown.

/// Extract the extension from a path: the text after the last `.`.
///
/// Returns `None` when the path contains no dot at all.
pub fn extension(path: &str) -> Option<&str> {
    path.rsplit_once('.').map(|(_, ext)| ext)
}

/// Get MIME Content-Type based on file extension
///
/// Extension comparison is case-sensitive; unknown or missing extensions
/// degrade to `text/plain`. Never fails.
///
/// # Examples
/// ```
/// use staticd::http::mime::content_type;
/// assert_eq!(content_type("static/app.js"), "text/javascript");
/// assert_eq!(content_type("logo.png"), "image/png");
/// assert_eq!(content_type("README"), "text/plain");
/// ```
pub fn content_type(path: &str) -> &'static str {
    match extension(path) {
        Some("css") => "text/css",
        Some("gif") => "image/gif",
        Some("html") => "text/html",
        Some("ico") => "image/x-icon",
        Some("jpeg" | "jpg") => "image/jpeg",
        Some("png") => "image/png",
        Some("txt") => "text/plain",
        Some("json") => "application/json",
        Some("js") => "text/javascript",

        // Default
        _ => "text/plain",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_types() {
        assert_eq!(content_type("style.css"), "text/css");
        assert_eq!(content_type("index.html"), "text/html");
        assert_eq!(content_type("app.js"), "text/javascript");
        assert_eq!(content_type("data.json"), "application/json");
        assert_eq!(content_type("photo.jpeg"), "image/jpeg");
        assert_eq!(content_type("photo.jpg"), "image/jpeg");
        assert_eq!(content_type("favicon.ico"), "image/x-icon");
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(content_type("archive.xyz"), "text/plain");
        assert_eq!(content_type("no_extension"), "text/plain");
    }

    #[test]
    fn test_case_sensitive_lookup() {
        // Upper-cased extensions are not in the table and fall back.
        assert_eq!(content_type("APP.JS"), "text/plain");
    }

    #[test]
    fn test_extension_after_last_dot() {
        assert_eq!(extension("archive.tar.gz"), Some("gz"));
        assert_eq!(extension("plain"), None);
        assert_eq!(content_type("jquery.min.js"), "text/javascript");
    }
}
