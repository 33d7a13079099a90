// Configuration module entry point
// Manages application configuration and per-process state

mod state;
mod tenants;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use tenants::{load_tenant_prefixes, TenantPrefix};
pub use types::{
    Config, LoggingConfig, PerformanceConfig, RestConfig, RouterConfig, ServerConfig,
};

impl Config {
    /// Load configuration from the default "config.toml"
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from specified file path (without extension)
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("SERVER"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.show_headers", false)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("router.document_root", ".")?
            .set_default("router.spa_shell", "index.html")?
            .set_default("router.tenant_config", "custom/custom.json")?
            .set_default("router.direct_static_passthrough", true)?
            .set_default("router.enable_cors", false)?
            .set_default("router.max_body_size", 10_485_760)? // 10MB
            .set_default("rest.upstream", "http://127.0.0.1:9000")?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_config_file() {
        let cfg = Config::load_from("/nonexistent/devrouter-config").unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 8080);
        assert!(cfg.router.direct_static_passthrough);
        assert_eq!(cfg.router.spa_shell, "index.html");
        assert_eq!(cfg.rest.upstream, "http://127.0.0.1:9000");
        assert!(cfg.rest.server_addr.is_none());
        assert_eq!(cfg.logging.access_log_format, "combined");
    }

    #[test]
    fn test_socket_addr() {
        let cfg = Config::load_from("/nonexistent/devrouter-config").unwrap();
        let addr = cfg.get_socket_addr().unwrap();
        assert_eq!(addr.port(), 8080);
    }
}
