//! Server configuration loaded via OrthoConfig.

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::token::DEFAULT_ACCESS_TTL_SECS;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

/// Settings controlling the HTTP listener and token issuance.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SAFEGAS")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// Secret used to sign access and refresh tokens.
    ///
    /// When unset, debug builds generate an ephemeral secret and release
    /// builds refuse to start.
    pub token_secret: Option<String>,
    /// Access token lifetime in seconds.
    pub token_ttl_secs: Option<i64>,
    /// Accept any well-formed login without checking the registry.
    #[ortho_config(default = false)]
    pub allow_any_credentials: bool,
}

impl ServerSettings {
    /// Configured bind address, falling back to the default.
    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Configured access token lifetime, falling back to 24 hours.
    pub fn token_ttl_secs(&self) -> i64 {
        self.token_ttl_secs.unwrap_or(DEFAULT_ACCESS_TTL_SECS)
    }
}
