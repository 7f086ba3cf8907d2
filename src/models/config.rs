//! Configuration model loaded from external sources.

use std::time::Duration;

use serde::Deserialize;

/// Minimum length of `secret`; the cookie key is derived from its bytes.
pub const MIN_SECRET_LEN: usize = 64;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    /// GraphQL endpoint of the character API.
    pub api_url: String,
    pub templates_dir: String,
    pub secret: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_viewer_idle_timeout_secs")]
    pub viewer_idle_timeout_secs: u64,
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_viewer_idle_timeout_secs() -> u64 {
    30 * 60
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn viewer_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.viewer_idle_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeouts_default_when_missing() {
        let config: ServerConfig = serde_json::from_value(serde_json::json!({
            "address": "127.0.0.1",
            "port": 8080,
            "api_url": "https://rickandmortyapi.com/graphql",
            "templates_dir": "templates/**/*.html",
            "secret": "x",
        }))
        .unwrap();

        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.viewer_idle_timeout(), Duration::from_secs(1800));
    }
}
