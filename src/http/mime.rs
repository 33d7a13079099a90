//! MIME type detection module
//!
//! Returns the Content-Type used when serving remapped assets and SPA files.
//! The table mirrors what the production static server sends for the same
//! asset set; anything not listed degrades to `application/octet-stream`.

/// Get the MIME Content-Type for a file path, by extension (case-insensitive).
///
/// # Examples
/// ```
/// use devrouter::http::mime::mime_for;
/// assert_eq!(mime_for("/dist/app.js"), "application/javascript; charset=utf-8");
/// assert_eq!(mime_for("/LOGO.PNG"), "image/png");
/// assert_eq!(mime_for("/no-extension"), "application/octet-stream");
/// ```
#[must_use]
pub fn mime_for(path: &str) -> &'static str {
    let ext = path
        .rsplit('/')
        .next()
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase());

    match ext.as_deref() {
        Some("html") => "text/html; charset=utf-8",
        Some("js") => "application/javascript; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        // Source maps are JSON documents
        Some("map") => "application/json; charset=utf-8",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_types() {
        assert_eq!(mime_for("/index.html"), "text/html; charset=utf-8");
        assert_eq!(
            mime_for("/dist/app.js"),
            "application/javascript; charset=utf-8"
        );
        assert_eq!(mime_for("/dist/styles.css"), "text/css; charset=utf-8");
        assert_eq!(mime_for("/logo.png"), "image/png");
        assert_eq!(mime_for("/photo.jpg"), "image/jpeg");
        assert_eq!(mime_for("/photo.jpeg"), "image/jpeg");
        assert_eq!(mime_for("/anim.gif"), "image/gif");
        assert_eq!(mime_for("/icon.svg"), "image/svg+xml");
        assert_eq!(
            mime_for("/dist/app.js.map"),
            "application/json; charset=utf-8"
        );
        assert_eq!(mime_for("/font.woff"), "font/woff");
        assert_eq!(mime_for("/font.woff2"), "font/woff2");
        assert_eq!(mime_for("/font.ttf"), "font/ttf");
        assert_eq!(mime_for("/favicon.ico"), "image/x-icon");
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(mime_for("/INDEX.HTML"), "text/html; charset=utf-8");
        assert_eq!(mime_for("/Logo.PnG"), "image/png");
    }

    #[test]
    fn test_unknown_extension_and_edge_cases() {
        assert_eq!(mime_for("/archive.xyz"), "application/octet-stream");
        assert_eq!(mime_for("/no-extension"), "application/octet-stream");
        // A dot in a directory name is not an extension
        assert_eq!(mime_for("/v1.2/readme"), "application/octet-stream");
        assert_eq!(mime_for(""), "application/octet-stream");
    }
}
