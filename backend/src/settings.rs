//! Runtime settings loaded via OrthoConfig.
//!
//! Values come from `SHUTTLE_*` environment variables, an optional
//! configuration file, and command-line flags, in increasing precedence.

use std::net::SocketAddr;
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{DEFAULT_BASE_FARE, Fare, PricingRule};
use crate::inbound::http::session_config::SessionOptions;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";

/// Settings for the shuttle booking server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SHUTTLE")]
pub struct ShuttleSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<SocketAddr>,
    /// Directory holding the stored account and booking documents.
    pub data_dir: Option<PathBuf>,
    /// Daytime fare in minor currency units.
    pub base_fare_minor_units: Option<u64>,
    /// File containing the session signing key.
    pub session_key_file: Option<PathBuf>,
    /// Mark session cookies `Secure`.
    pub cookie_secure: Option<bool>,
    /// Fall back to a generated session key when the key file is unreadable.
    #[ortho_config(default = false)]
    pub allow_ephemeral_session: bool,
}

impl ShuttleSettings {
    /// Configured bind address, falling back to port 8080 on all interfaces.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)))
    }

    /// Configured data directory, falling back to `./data`.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
    }

    /// Pricing rule built from the configured base fare.
    #[must_use]
    pub fn pricing(&self) -> PricingRule {
        PricingRule::new(
            self.base_fare_minor_units
                .map_or(DEFAULT_BASE_FARE, Fare::from_minor_units),
        )
    }

    /// Session cookie options.
    #[must_use]
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            key_file: self
                .session_key_file
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_KEY_FILE)),
            cookie_secure: self.cookie_secure.unwrap_or(true),
            allow_ephemeral: self.allow_ephemeral_session,
        }
    }
}
