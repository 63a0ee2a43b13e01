//! HTTP server configuration

use serde::Deserialize;

/// Address the HTTP server binds to
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Create a new ServerConfig from environment variables
    ///
    /// # Environment Variables
    /// - `SERVER_HOST`: Bind host (default: "0.0.0.0")
    /// - `SERVER_PORT`: Bind port (default: 8080)
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8080_i64)?
            .add_source(config::Environment::with_prefix("SERVER"))
            .build()?
            .try_deserialize()
    }

    /// `host:port` string for binding
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
