//! Shared HTTP adapter state.
//!
//! Handlers receive this via `web::Data` and only see the driving ports, so
//! they can be exercised against doubles without a database.

use std::sync::Arc;

use crate::domain::ports::{UsersCommand, UsersQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Read-side port.
    pub users: Arc<dyn UsersQuery>,
    /// Write-side port.
    pub users_command: Arc<dyn UsersCommand>,
}

impl HttpState {
    /// Construct state from separate query and command implementations.
    pub fn new(users: Arc<dyn UsersQuery>, users_command: Arc<dyn UsersCommand>) -> Self {
        Self {
            users,
            users_command,
        }
    }

    /// Construct state from one service implementing both ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use user_service::domain::UserService;
    /// use user_service::inbound::http::state::HttpState;
    /// use user_service::outbound::persistence::{DbPool, DieselUserRepository};
    ///
    /// fn wire(pool: DbPool) -> HttpState {
    ///     let service = UserService::new(Arc::new(DieselUserRepository::new(pool)));
    ///     HttpState::from_service(Arc::new(service))
    /// }
    /// ```
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: UsersQuery + UsersCommand + 'static,
    {
        Self {
            users: service.clone(),
            users_command: service,
        }
    }
}
