//! Routing module
//!
//! Pure routing decision logic; no I/O happens here.

mod router;

pub use router::{is_base_path, route, RouteDecision, REST_MARKER};
