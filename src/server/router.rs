//! HTTP and WebSocket routing configuration.
//!
//! `/ws` upgrades to a client session, `/publish` injects a command on
//! behalf of a connected client and `/rooms` lists the rooms.

use actix_web::{error, http::StatusCode, web};

use crate::config::server::PUBLISH_BODY_LIMIT;
use crate::server::client::session::ws_subscribe;
use crate::server::error::http_error_response;
use crate::server::publish::{publish, rooms};

/// Configure the application's HTTP/WebSocket routes.
pub fn config(cfg: &mut web::ServiceConfig) {
    let publish_body = web::JsonConfig::default()
        .limit(PUBLISH_BODY_LIMIT)
        .error_handler(|err, _req| {
            let response = http_error_response(
                "INVALID_BODY",
                &err.to_string(),
                None,
                StatusCode::BAD_REQUEST,
            );
            error::InternalError::from_response(err, response).into()
        });

    cfg.service(web::resource("/ws").to(ws_subscribe))
        .service(
            web::resource("/publish")
                .app_data(publish_body)
                .route(web::post().to(publish)),
        )
        .service(web::resource("/rooms").route(web::get().to(rooms)));
}
