use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Gateway configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GatewayConfig {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Root directory scanned for endpoint manifests
    #[serde(default = "default_api_dir")]
    pub api_dir: String,

    /// Directory holding the playground frontend and error pages
    #[serde(default = "default_ui_dir")]
    pub ui_dir: String,

    /// Branding/settings file served via /set
    #[serde(default = "default_settings_file")]
    pub settings_file: String,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            api_dir: default_api_dir(),
            ui_dir: default_ui_dir(),
            settings_file: default_settings_file(),
            enable_cors: default_true(),
            log_level: default_log_level(),
        }
    }
}

impl GatewayConfig {
    /// Load configuration from environment variables and config files
    pub fn load() -> anyhow::Result<Self> {
        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name("restdock").required(false))
            // Override with environment variables
            .add_source(config::Environment::with_prefix("RESTDOCK").separator("__"));

        let mut config: GatewayConfig = builder.build()?.try_deserialize()?;

        // Bare PORT wins over everything; it is the deploy-time contract.
        if let Ok(port) = std::env::var("PORT") {
            config.port = port
                .parse()
                .map_err(|_| anyhow::anyhow!("invalid PORT value: {port}"))?;
        }

        Ok(config)
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4000
}

fn default_api_dir() -> String {
    "api".to_string()
}

fn default_ui_dir() -> String {
    "ui".to_string()
}

fn default_settings_file() -> String {
    "settings.toml".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = GatewayConfig::default();
        assert_eq!(cfg.port, 4000);
        assert_eq!(cfg.api_dir, "api");
        assert_eq!(cfg.ui_dir, "ui");
        assert_eq!(cfg.settings_file, "settings.toml");
        assert!(cfg.enable_cors);
    }

    #[test]
    fn test_socket_addr() {
        let cfg = GatewayConfig::default();
        let addr = cfg.socket_addr().unwrap();
        assert_eq!(addr.port(), 4000);
    }
}
