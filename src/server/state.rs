// src/server/state.rs

//! Application state for the backend server.
//!
//! Holds the address of the main lobby hub and the settings applied to every
//! new client session. Shared between HTTP/WebSocket handlers.

use actix::Addr;

use crate::config::session::SessionConfig;
use crate::server::hub::Hub;

/// Shared application state, injected into HTTP/WebSocket handlers.
pub struct AppState {
    /// Address of the main lobby (room directory, entry point of every client).
    pub lobby: Addr<Hub>,
    /// Settings for new client sessions.
    pub session: SessionConfig,
}

impl AppState {
    pub fn new(lobby: Addr<Hub>, session: SessionConfig) -> Self {
        AppState { lobby, session }
    }
}
