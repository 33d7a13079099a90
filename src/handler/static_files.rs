//! Static file serving module
//!
//! Loads files under the document root (direct hits and remapped tenant
//! assets) and the SPA shell, with MIME detection and ETag handling.

use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Check whether a regular file exists at a root-relative request path.
///
/// This is the existence predicate the routing decision runs on; it shares
/// the traversal guard with the actual file loads.
pub fn file_exists_under_root(root: &Path, request_path: &str) -> bool {
    resolve_under_root(root, request_path).is_some()
}

/// Resolve a root-relative request path to a regular file under the root.
///
/// Returns `None` when the file does not exist or when the resolved path
/// escapes the document root (traversal attempts are logged and blocked).
fn resolve_under_root(root: &Path, request_path: &str) -> Option<PathBuf> {
    let relative = request_path.trim_start_matches('/');
    if relative.is_empty() {
        return None;
    }

    let candidate = root.join(relative);

    let root_canonical = root.canonicalize().ok()?;
    // Nonexistent files are the common case here, not worth logging
    let candidate_canonical = candidate.canonicalize().ok()?;

    if !candidate_canonical.starts_with(&root_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {request_path} -> {}",
            candidate_canonical.display()
        ));
        return None;
    }

    if candidate_canonical.is_file() {
        Some(candidate_canonical)
    } else {
        None
    }
}

/// Serve a file under the document root at a root-relative path.
///
/// Used for both direct static hits and remapped tenant assets; the
/// Content-Type is derived from the request path's extension.
pub async fn serve_asset(
    ctx: &RequestContext<'_>,
    root: &Path,
    asset_path: &str,
) -> Response<Full<Bytes>> {
    let Some(file_path) = resolve_under_root(root, asset_path) else {
        // Routing saw the file but it vanished or was never resolvable
        return http::build_404_response();
    };

    let content = match fs::read(&file_path).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {e}",
                file_path.display()
            ));
            return http::build_404_response();
        }
    };

    let content_type = mime::mime_for(asset_path);
    let etag = cache::generate_etag(&content);

    if cache::check_etag_match(ctx.if_none_match.as_deref(), &etag) {
        return http::build_304_response(&etag);
    }

    http::response::build_file_response(Bytes::from(content), content_type, &etag, ctx.is_head)
}

/// Serve the SPA's HTML entry point.
///
/// The shell is never cached: the client-side router's routes change with
/// every rebuild and browsers must always pick up the current shell.
pub async fn serve_spa_shell(
    ctx: &RequestContext<'_>,
    root: &Path,
    shell: &str,
) -> Response<Full<Bytes>> {
    let shell_path = root.join(shell);
    let content = match fs::read(&shell_path).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "SPA shell '{}' unavailable: {e}",
                shell_path.display()
            ));
            return http::build_404_response();
        }
    };

    let content_length = content.len();
    let body = if ctx.is_head {
        Bytes::new()
    } else {
        Bytes::from(content)
    };

    Response::builder()
        .status(200)
        .header("Content-Type", mime::mime_for(shell))
        .header("Content-Length", content_length)
        .header("Cache-Control", "no-cache")
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            logger::log_error(&format!("Failed to build SPA shell response: {e}"));
            Response::new(Full::new(Bytes::new()))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_root() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("dist")).unwrap();
        std::fs::write(dir.path().join("dist/app.js"), b"console.log('app')").unwrap();
        std::fs::write(dir.path().join("index.html"), b"<html>shell</html>").unwrap();
        dir
    }

    fn ctx(path: &str) -> RequestContext<'_> {
        RequestContext {
            path,
            is_head: false,
            if_none_match: None,
        }
    }

    #[test]
    fn test_file_exists_under_root() {
        let root = make_root();
        assert!(file_exists_under_root(root.path(), "/dist/app.js"));
        assert!(!file_exists_under_root(root.path(), "/dist/missing.js"));
        // Directories are not files
        assert!(!file_exists_under_root(root.path(), "/dist"));
        assert!(!file_exists_under_root(root.path(), "/"));
    }

    #[test]
    fn test_traversal_blocked() {
        let root = make_root();
        let outside = root.path().join("dist");
        assert!(!file_exists_under_root(&outside, "/../index.html"));
    }

    #[tokio::test]
    async fn test_serve_asset() {
        let root = make_root();
        let resp = serve_asset(&ctx("/dist/app.js"), root.path(), "/dist/app.js").await;
        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers().get("Content-Type").unwrap(),
            "application/javascript; charset=utf-8"
        );
        assert!(resp.headers().contains_key("ETag"));
    }

    #[tokio::test]
    async fn test_serve_asset_etag_revalidation() {
        let root = make_root();
        let first = serve_asset(&ctx("/dist/app.js"), root.path(), "/dist/app.js").await;
        let etag = first.headers().get("ETag").unwrap().to_str().unwrap().to_string();

        let revalidate = RequestContext {
            path: "/dist/app.js",
            is_head: false,
            if_none_match: Some(etag),
        };
        let resp = serve_asset(&revalidate, root.path(), "/dist/app.js").await;
        assert_eq!(resp.status(), 304);
    }

    #[tokio::test]
    async fn test_serve_asset_missing() {
        let root = make_root();
        let resp = serve_asset(&ctx("/dist/gone.js"), root.path(), "/dist/gone.js").await;
        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn test_serve_spa_shell() {
        let root = make_root();
        let resp = serve_spa_shell(&ctx("/some/route"), root.path(), "index.html").await;
        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers().get("Content-Type").unwrap(),
            "text/html; charset=utf-8"
        );
        assert_eq!(resp.headers().get("Cache-Control").unwrap(), "no-cache");
        // Content-Length reflects the shell file ("<html>shell</html>")
        assert_eq!(resp.headers().get("Content-Length").unwrap(), "18");
    }

    #[tokio::test]
    async fn test_serve_spa_shell_missing() {
        let root = tempfile::tempdir().unwrap();
        let resp = serve_spa_shell(&ctx("/"), root.path(), "index.html").await;
        assert_eq!(resp.status(), 404);
    }
}
