//! devrouter - development-mode SPA request router
//!
//! A single-process web server that emulates the production URL routing in
//! front of a single-page application and a REST backend: static files are
//! served directly, tenant-prefixed asset paths are remapped, `/rest`
//! traffic is forwarded upstream, and everything else falls back to the
//! SPA's HTML entry point.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod routing;
pub mod server;
