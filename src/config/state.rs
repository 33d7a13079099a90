// Application state module
// Per-process state shared across connections

use std::path::{Path, PathBuf};

use http_body_util::Full;
use hyper::body::Bytes;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;

use super::tenants::{load_tenant_prefixes, TenantPrefix};
use super::types::Config;

/// Shared application state.
///
/// Everything here is read-only after startup: the tenant prefix list is
/// loaded once per process and routing is a pure function of it, so no
/// locking is needed across connections.
pub struct AppState {
    pub config: Config,
    pub tenants: Vec<TenantPrefix>,
    /// Reused HTTP client for REST upstream forwarding
    pub rest_client: Client<HttpConnector, Full<Bytes>>,
}

impl AppState {
    /// Build state from loaded configuration.
    ///
    /// The tenant config path is resolved relative to the document root
    /// when it is not absolute, matching where the asset pipeline drops it.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let tenant_path = resolve_tenant_path(&config);
        let tenants = load_tenant_prefixes(&tenant_path);

        let rest_client = Client::builder(TokioExecutor::new()).build_http();

        Self {
            config,
            tenants,
            rest_client,
        }
    }

    /// Document root as a path
    #[must_use]
    pub fn document_root(&self) -> &Path {
        Path::new(&self.config.router.document_root)
    }
}

fn resolve_tenant_path(config: &Config) -> PathBuf {
    let configured = Path::new(&config.router.tenant_config);
    if configured.is_absolute() {
        configured.to_path_buf()
    } else {
        Path::new(&config.router.document_root).join(configured)
    }
}
