//! HTTP server configuration object.

use std::net::SocketAddr;
use std::path::PathBuf;

use shuttle_pool::domain::PricingRule;
use shuttle_pool::inbound::http::session_config::SessionSettings;
use shuttle_pool::settings::ShuttleSettings;

/// Everything needed to assemble and bind the HTTP server.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) data_dir: PathBuf,
    pub(crate) pricing: PricingRule,
}

impl ServerConfig {
    /// Combine loaded settings with validated session settings.
    #[must_use]
    pub fn new(settings: &ShuttleSettings, session: SessionSettings) -> Self {
        Self {
            session,
            bind_addr: settings.bind_addr(),
            data_dir: settings.data_dir(),
            pricing: settings.pricing(),
        }
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
