use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub bind_addr: String,
    pub port: u16,

    /// Origin used in canonical, hreflang and sitemap URLs
    pub public_base_url: String,

    // Registry
    /// Registry JSON file; the embedded registry is used when unset
    pub registry_file: Option<PathBuf>,

    // Module loading
    pub module_load_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("PORT must be a port number, got '{}'", raw))?,
            Err(_) => 8080,
        };

        let module_load_timeout_ms: u64 = match std::env::var("MODULE_LOAD_TIMEOUT_MS") {
            Ok(raw) => raw.parse().with_context(|| {
                format!("MODULE_LOAD_TIMEOUT_MS must be milliseconds, got '{}'", raw)
            })?,
            Err(_) => 5000,
        };

        Ok(Self {
            // Server
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port,
            public_base_url: std::env::var("PUBLIC_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| format!("http://localhost:{}", port)),

            // Registry
            registry_file: std::env::var("REGISTRY_FILE")
                .ok()
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),

            // Module loading
            module_load_timeout: Duration::from_millis(module_load_timeout_ms),
        })
    }

    /// `host:port` to bind the listener to.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}
