//! HTTP server configuration.
//!
//! The bind address can be overridden with `CURSOR_HUB_HOST` and `CURSOR_HUB_PORT`.

use log::warn;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;

/// Maximum accepted size (in bytes) of a publish request body.
pub const PUBLISH_BODY_LIMIT: usize = 8192;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Build the config from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let host = std::env::var("CURSOR_HUB_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = match std::env::var("CURSOR_HUB_PORT") {
            Ok(raw) => parse_port(&raw).unwrap_or_else(|| {
                warn!("[Config] Invalid CURSOR_HUB_PORT '{}', using {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            Err(_) => DEFAULT_PORT,
        };
        Self { host, port }
    }
}

fn parse_port(raw: &str) -> Option<u16> {
    raw.trim().parse::<u16>().ok().filter(|port| *port != 0)
}
