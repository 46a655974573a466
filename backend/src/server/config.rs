//! HTTP server configuration object.

use std::net::SocketAddr;

use crate::outbound::persistence::DbPool;

/// Builder-style configuration for [`create_server`](super::create_server).
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
}

impl ServerConfig {
    /// Configuration listening on `bind_addr` and backed by `db_pool`.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, db_pool: DbPool) -> Self {
        Self { bind_addr, db_pool }
    }

    /// Socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
