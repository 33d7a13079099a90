//! REST backend forwarding module
//!
//! Proxies requests whose path carries the REST marker to the configured
//! upstream application. The upstream's config loader requires a server
//! address; it is synthesized here into an explicit context and carried on
//! the proxied request, instead of mutating process-wide state.

use crate::config::{AppState, RestConfig};
use crate::http;
use crate::logger;
use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::header::{HeaderName, HeaderValue, CONTENT_LENGTH, HOST};
use hyper::{Request, Response, Uri};

/// Header carrying the synthesized server address to the REST app
pub const SERVER_ADDR_HEADER: &str = "x-server-addr";

/// Hop-by-hop headers that must not be forwarded
const HOP_BY_HOP: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// Per-request forwarding context.
///
/// Built from configuration hints before each forward; the REST app reads
/// the address from [`SERVER_ADDR_HEADER`] rather than its environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestContext {
    pub server_addr: String,
}

impl RestContext {
    /// Build the context from the REST configuration hints.
    #[must_use]
    pub fn from_config(rest: &RestConfig) -> Self {
        Self {
            server_addr: resolve_server_addr(
                rest.server_addr.as_deref(),
                rest.server_name.as_deref(),
            ),
        }
    }
}

/// Synthesize the server address the REST app's config loader requires.
///
/// The explicit address hint wins; otherwise the server-name hint is used;
/// with neither available the loopback literal is the safe dev default.
#[must_use]
pub fn resolve_server_addr(addr_hint: Option<&str>, name_hint: Option<&str>) -> String {
    let non_empty = |s: &&str| !s.trim().is_empty();
    addr_hint
        .filter(non_empty)
        .or_else(|| name_hint.filter(non_empty))
        .unwrap_or("127.0.0.1")
        .to_string()
}

/// Forward a request to the REST upstream and relay its response.
///
/// The full request body is buffered before sending (body size is bounded
/// by the handler's Content-Length check). Upstream failures surface as
/// 502 to the client.
pub async fn forward(
    req: Request<Incoming>,
    state: &AppState,
    ctx: &RestContext,
) -> Response<Full<Bytes>> {
    let (parts, body) = req.into_parts();

    let Some(uri) = upstream_uri(&state.config.rest.upstream, &parts.uri) else {
        return http::build_502_response();
    };

    let body = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            logger::log_error(&format!("Failed to read request body for forwarding: {e}"));
            return http::build_502_response();
        }
    };

    let mut builder = Request::builder().method(parts.method).uri(uri.clone());
    if let Some(headers) = builder.headers_mut() {
        for (name, value) in &parts.headers {
            if name == &HOST || HOP_BY_HOP.contains(&name.as_str()) {
                continue;
            }
            headers.insert(name.clone(), value.clone());
        }
        if let Some(host) = uri.authority().map(ToString::to_string) {
            if let Ok(value) = HeaderValue::from_str(&host) {
                headers.insert(HOST, value);
            }
        }
        if let Ok(value) = HeaderValue::from_str(&ctx.server_addr) {
            headers.insert(HeaderName::from_static(SERVER_ADDR_HEADER), value);
        }
    }

    let out_req = match builder.body(Full::new(body)) {
        Ok(r) => r,
        Err(e) => {
            logger::log_error(&format!("Failed to build upstream request: {e}"));
            return http::build_502_response();
        }
    };

    match state.rest_client.request(out_req).await {
        Ok(upstream_resp) => relay_response(upstream_resp).await,
        Err(e) => {
            logger::log_error(&format!(
                "REST upstream '{}' unreachable: {e}",
                state.config.rest.upstream
            ));
            http::build_502_response()
        }
    }
}

/// Join the upstream base URL with the request's path and query.
fn upstream_uri(upstream: &str, original: &Uri) -> Option<Uri> {
    let path_and_query = original
        .path_and_query()
        .map_or_else(|| original.path(), |pq| pq.as_str());
    let joined = format!("{}{path_and_query}", upstream.trim_end_matches('/'));
    match joined.parse::<Uri>() {
        Ok(uri) => Some(uri),
        Err(e) => {
            logger::log_error(&format!("Invalid upstream URI '{joined}': {e}"));
            None
        }
    }
}

/// Buffer the upstream response and rebuild it for the client.
async fn relay_response(resp: Response<Incoming>) -> Response<Full<Bytes>> {
    let (parts, body) = resp.into_parts();

    let body = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            logger::log_error(&format!("Failed to read upstream response body: {e}"));
            return http::build_502_response();
        }
    };

    let mut builder = Response::builder().status(parts.status);
    if let Some(headers) = builder.headers_mut() {
        for (name, value) in &parts.headers {
            // Content-Length is recomputed from the buffered body
            if name == &CONTENT_LENGTH || HOP_BY_HOP.contains(&name.as_str()) {
                continue;
            }
            headers.insert(name.clone(), value.clone());
        }
    }

    builder.body(Full::new(body)).unwrap_or_else(|e| {
        logger::log_error(&format!("Failed to rebuild upstream response: {e}"));
        http::build_502_response()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_server_addr_prefers_explicit_hint() {
        assert_eq!(
            resolve_server_addr(Some("10.0.0.5"), Some("example.com")),
            "10.0.0.5"
        );
    }

    #[test]
    fn test_resolve_server_addr_synthesized_from_name() {
        assert_eq!(
            resolve_server_addr(None, Some("example.com")),
            "example.com"
        );
        // Empty hints count as absent
        assert_eq!(resolve_server_addr(Some(""), Some("example.com")), "example.com");
    }

    #[test]
    fn test_resolve_server_addr_default() {
        assert_eq!(resolve_server_addr(None, None), "127.0.0.1");
        assert_eq!(resolve_server_addr(Some("  "), Some("")), "127.0.0.1");
    }

    #[test]
    fn test_context_from_config() {
        let rest = RestConfig {
            upstream: "http://127.0.0.1:9000".to_string(),
            server_addr: None,
            server_name: Some("example.com".to_string()),
        };
        assert_eq!(
            RestContext::from_config(&rest),
            RestContext {
                server_addr: "example.com".to_string()
            }
        );
    }

    #[test]
    fn test_upstream_uri_joins_path_and_query() {
        let original: Uri = "/barid/rest/users?page=2".parse().unwrap();
        let uri = upstream_uri("http://127.0.0.1:9000/", &original).unwrap();
        assert_eq!(uri.to_string(), "http://127.0.0.1:9000/barid/rest/users?page=2");
    }
}
