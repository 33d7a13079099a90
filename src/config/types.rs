// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub router: RouterConfig,
    pub rest: RestConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    pub show_headers: bool,
    /// Access log format (combined, common or json)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

/// Router configuration
///
/// Controls the dev-mode routing rules that emulate the production
/// reverse-proxy layout.
#[derive(Debug, Deserialize, Clone)]
pub struct RouterConfig {
    /// Directory the static assets and the SPA shell live under
    pub document_root: String,
    /// SPA entry point, relative to the document root
    pub spa_shell: String,
    /// JSON file declaring tenant path prefixes (optional; missing or
    /// malformed degrades to an empty prefix list)
    pub tenant_config: String,
    /// Serve files that exist under the document root directly. Disable
    /// when a dedicated static file server or CDN sits in front.
    pub direct_static_passthrough: bool,
    /// Answer CORS preflight on non-REST paths
    pub enable_cors: bool,
    /// Reject request bodies larger than this many bytes
    pub max_body_size: u64,
}

/// REST backend forwarding configuration
#[derive(Debug, Deserialize, Clone)]
pub struct RestConfig {
    /// Base URL of the REST application, e.g. "http://127.0.0.1:9000"
    pub upstream: String,
    /// Explicit server-address hint for the REST app's config loader
    #[serde(default)]
    pub server_addr: Option<String>,
    /// Server-name hint used to synthesize the address when no explicit
    /// one is configured
    #[serde(default)]
    pub server_name: Option<String>,
}
