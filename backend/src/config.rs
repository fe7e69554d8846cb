//! Server settings loaded via OrthoConfig.
//!
//! Values come from `REGISTRATION_*` environment variables or the matching
//! command-line flags; anything unset falls back to a default.

use std::net::{IpAddr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The configured host is not an IP address literal.
    #[error("invalid listen host {host:?}: {source}")]
    InvalidHost {
        /// Host as configured.
        host: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

/// Listener and storage settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "REGISTRATION")]
pub struct ServerSettings {
    /// Interface to listen on.
    #[ortho_config(default = String::from(DEFAULT_HOST))]
    pub host: String,
    /// TCP port to listen on.
    #[ortho_config(default = DEFAULT_PORT)]
    pub port: u16,
    /// PostgreSQL URL. Registrations are kept in memory when unset.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    #[ortho_config(default = DEFAULT_DB_MAX_CONNECTIONS)]
    pub db_max_connections: u32,
}

impl ServerSettings {
    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Socket address built from `host` and `port`.
    ///
    /// # Errors
    /// Returns [`SettingsError::InvalidHost`] when the host is not an IP
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| SettingsError::InvalidHost {
                host: self.host.clone(),
                source,
            })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}
