//! Request handler module
//!
//! Turns routing decisions into responses: static file serving, tenant
//! asset remaps, REST upstream forwarding and the SPA shell fallback.

pub mod rest;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
