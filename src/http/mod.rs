//! HTTP protocol layer module
//!
//! HTTP-level base functionality (MIME types, cache validation, response
//! builders), decoupled from the routing decision logic.

pub mod cache;
pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_304_response, build_404_response, build_405_response, build_413_response,
    build_502_response, build_options_response,
};
