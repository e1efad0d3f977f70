//! Main configuration module.
//!
//! Re-exports submodules for hub, session and HTTP server configuration.

pub mod hub;
pub mod server;
pub mod session;
