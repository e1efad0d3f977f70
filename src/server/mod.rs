// src/server/mod.rs

//! Server layer root module.
//!
//! This module organizes the main backend server components, including:
//! - Application state management
//! - HTTP/WebSocket routing and the publish endpoint
//! - Hubs (main lobby and rooms) and their broadcast policy
//! - Per-connection client sessions

pub mod state;
pub mod router;
pub mod hub;
pub mod client;
pub mod publish;
pub mod error;
pub mod rate_limit;
