//! Main entry point for the cursor hub server.
//!
//! Initializes logging, starts the main lobby hub, and launches the HTTP
//! server with the WebSocket, publish and room listing endpoints.

use actix::Actor;
use actix_web::{web, App, HttpServer};
use log::info;

use config::hub::HubConfig;
use config::server::ServerConfig;
use config::session::SessionConfig;
use server::hub::Hub;

pub mod config;
mod server;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger from environment variable (default to info level).
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let server_config = ServerConfig::from_env();

    // Start the main lobby (room directory, entry point of every client).
    let lobby = Hub::lobby(HubConfig::default()).start();

    // Shared application state for HTTP/WebSocket handlers.
    let state = web::Data::new(server::state::AppState::new(lobby, SessionConfig::default()));

    info!("[Server] Listening on {}:{}", server_config.host, server_config.port);
    HttpServer::new(move || {
        App::new()
            .wrap(
                actix_web::middleware::DefaultHeaders::new()
                    .add(("Access-Control-Allow-Origin", "*"))
                    .add(("Access-Control-Allow-Headers", "*"))
            )
            .app_data(state.clone())
            .configure(crate::server::router::config)
    })
    .bind((server_config.host.as_str(), server_config.port))?
    .run()
    .await
}
