//! Routing decision module
//!
//! Implements the dev-server routing rules that emulate the production
//! reverse-proxy layout in front of the SPA and the REST backend.

use crate::config::TenantPrefix;

/// Literal marker identifying requests meant for the REST backend.
///
/// This is a substring match, not a segment match: `/barid/rest/users`
/// matches, but so does `/restaurants/menu`. The original deployment
/// behaved this way and downstream tooling relies on `/{tenant}/rest/...`
/// being caught, so the looseness is kept.
pub const REST_MARKER: &str = "/rest";

/// The outcome of routing a single request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// A regular file exists at the request path under the document root.
    ServeStaticFile(String),
    /// A tenant-prefixed asset path, rewritten to the real `/dist/...` path.
    ServeRemappedAsset(String),
    /// Hand the request off to the REST application.
    ForwardToRestApp,
    /// Fall back to the SPA's HTML entry point.
    ServeSpaShell,
}

/// Decide how to handle a request path. First match wins.
///
/// Rules, in order:
/// 1. Direct static hit (only when `direct_static` is enabled; a deployment
///    behind a dedicated static file server disables it).
/// 2. Tenant-prefixed asset remap: `/{prefix}/dist/...` -> `/dist/...`,
///    prefixes scanned in configuration order, first existing file wins.
/// 3. Any path containing [`REST_MARKER`] forwards to the REST app.
/// 4. Everything else (root, base paths, unknown client-side routes) gets
///    the SPA shell so the client router can take over.
///
/// `file_exists` receives root-relative paths with a leading slash and must
/// answer whether a regular file exists there under the document root. The
/// function itself never touches the filesystem, which keeps the decision
/// table trivially testable.
pub fn route(
    path: &str,
    file_exists: impl Fn(&str) -> bool,
    tenant_prefixes: &[TenantPrefix],
    direct_static: bool,
) -> RouteDecision {
    // 1. Let the dev server serve existing files directly
    if direct_static && file_exists(path) {
        return RouteDecision::ServeStaticFile(path.to_string());
    }

    // 2. Map '/{tenant}/dist/...' to the real '/dist/...'
    for prefix in tenant_prefixes {
        if let Some(mapped) = remap_tenant_asset(path, prefix) {
            if file_exists(mapped) {
                return RouteDecision::ServeRemappedAsset(mapped.to_string());
            }
            // No file behind this prefix: keep scanning the remaining
            // prefixes before falling through.
        }
    }

    // 3. REST backend traffic (supports '/{tenant}/rest' as well)
    if path.contains(REST_MARKER) {
        return RouteDecision::ForwardToRestApp;
    }

    // 4. Root, '/{tenant}' base paths and deep client-side routes all
    // resolve to the SPA shell; the distinction only matters for logging.
    RouteDecision::ServeSpaShell
}

/// Strip the tenant segment from a `/{prefix}/dist/...` path.
///
/// Returns the remapped root-relative path (borrowed from `path`), or
/// `None` when the path does not carry this tenant's dist prefix.
fn remap_tenant_asset<'a>(path: &'a str, prefix: &TenantPrefix) -> Option<&'a str> {
    let rest = path
        .strip_prefix('/')
        .and_then(|p| p.strip_prefix(prefix.as_str()))?;
    if rest.starts_with("/dist/") {
        Some(rest)
    } else {
        None
    }
}

/// Check whether a path is the root or a single-segment base path,
/// e.g. `/`, `/barid` or `/barid/`.
///
/// Base paths are where a tenant deployment is mounted; they serve the SPA
/// shell just like unknown deep links do, but access logs tell them apart.
#[must_use]
pub fn is_base_path(path: &str) -> bool {
    if path == "/" {
        return true;
    }
    let Some(segment) = path.strip_prefix('/') else {
        return false;
    };
    let segment = segment.strip_suffix('/').unwrap_or(segment);
    !segment.is_empty() && !segment.contains('/')
}
