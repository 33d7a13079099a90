//! Server module
//!
//! Listener setup and the accept loop.

mod connection;
mod listener;

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

use crate::config::{AppState, Config};
use crate::logger;

pub use listener::create_reusable_listener;

/// Bind the configured address and serve requests until the process exits.
pub async fn run(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = create_reusable_listener(addr)?;

    let state = Arc::new(AppState::new(cfg));
    let connections = Arc::new(AtomicUsize::new(0));

    logger::log_server_start(&addr, &state.config, state.tenants.len());

    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => {
                connection::accept_connection(stream, peer_addr, &state, &connections);
            }
            Err(e) => {
                logger::log_error(&format!("Failed to accept connection: {e}"));
            }
        }
    }
}
