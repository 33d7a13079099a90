//! Request dispatch module
//!
//! Entry point for HTTP request processing: computes the routing decision
//! and hands the request to the matching serving path.

use crate::config::AppState;
use crate::handler::{rest, static_files};
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::routing::{self, RouteDecision};
use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

/// Request context for the file-serving paths
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
    pub if_none_match: Option<String>,
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(ToString::to_string);
    let user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);
    let http_version = match req.version() {
        hyper::Version::HTTP_10 => "1.0",
        _ => "1.1",
    };

    let access_log = state.config.logging.access_log;
    logger::log_headers_count(req.headers().len(), state.config.logging.show_headers);

    let decision = routing::route(
        &path,
        |p| static_files::file_exists_under_root(state.document_root(), p),
        &state.tenants,
        state.config.router.direct_static_passthrough,
    );

    // Oversized bodies are rejected before any serving path runs
    if let Some(resp) = check_body_size(&req, state.config.router.max_body_size) {
        return Ok(resp);
    }

    let response = dispatch(req, &state, &decision, &method).await;

    if access_log {
        let mut entry = AccessLogEntry::new(
            peer_addr.ip().to_string(),
            method.to_string(),
            path.clone(),
        );
        entry.query = query;
        entry.http_version = http_version.to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = content_length_of(&response);
        entry.user_agent = user_agent;
        entry.decision = decision_label(&decision, &path).to_string();
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Dispatch a decided request to its serving path
async fn dispatch(
    req: Request<Incoming>,
    state: &Arc<AppState>,
    decision: &RouteDecision,
    method: &Method,
) -> Response<Full<Bytes>> {
    // The REST app accepts any method; everything else is read-only
    if matches!(decision, RouteDecision::ForwardToRestApp) {
        let ctx = rest::RestContext::from_config(&state.config.rest);
        return rest::forward(req, state, &ctx).await;
    }

    if let Some(resp) = check_http_method(method, state.config.router.enable_cors) {
        return resp;
    }

    let ctx = RequestContext {
        path: req.uri().path(),
        is_head: *method == Method::HEAD,
        if_none_match: req
            .headers()
            .get("if-none-match")
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string),
    };

    match decision {
        RouteDecision::ServeStaticFile(asset) | RouteDecision::ServeRemappedAsset(asset) => {
            static_files::serve_asset(&ctx, state.document_root(), asset).await
        }
        _ => {
            static_files::serve_spa_shell(&ctx, state.document_root(), &state.config.router.spa_shell)
                .await
        }
    }
}

/// Check HTTP method and return a response for non-GET/HEAD methods
fn check_http_method(method: &Method, enable_cors: bool) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::HEAD => None,
        Method::OPTIONS => Some(http::build_options_response(enable_cors)),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size(req: &Request<Incoming>, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_error(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(http::build_413_response())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}

/// Routing decision tag for access log entries
fn decision_label(decision: &RouteDecision, path: &str) -> &'static str {
    match decision {
        RouteDecision::ServeStaticFile(_) => "static-file",
        RouteDecision::ServeRemappedAsset(_) => "remapped-asset",
        RouteDecision::ForwardToRestApp => "rest-forward",
        RouteDecision::ServeSpaShell => {
            if routing::is_base_path(path) {
                "spa-shell-base"
            } else {
                "spa-shell"
            }
        }
    }
}

/// Body size advertised by a response, for access logging
fn content_length_of(response: &Response<Full<Bytes>>) -> usize {
    response
        .headers()
        .get("content-length")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_gate() {
        assert!(check_http_method(&Method::GET, false).is_none());
        assert!(check_http_method(&Method::HEAD, false).is_none());

        let resp = check_http_method(&Method::OPTIONS, false).unwrap();
        assert_eq!(resp.status(), 204);

        let resp = check_http_method(&Method::POST, false).unwrap();
        assert_eq!(resp.status(), 405);
    }

    #[test]
    fn test_decision_labels() {
        assert_eq!(
            decision_label(&RouteDecision::ForwardToRestApp, "/rest/x"),
            "rest-forward"
        );
        assert_eq!(
            decision_label(&RouteDecision::ServeSpaShell, "/barid"),
            "spa-shell-base"
        );
        assert_eq!(
            decision_label(&RouteDecision::ServeSpaShell, "/deep/client/route"),
            "spa-shell"
        );
    }
}
