//! HTTP endpoints backed by the main lobby.

use actix_web::{http::StatusCode, web, HttpResponse};
use log::debug;
use serde::Deserialize;

use crate::server::error::{http_error_response, HubError};
use crate::server::hub::messages::{GetRooms, Publish};
use crate::server::hub::protocol::{Command, CommandRecord};
use crate::server::hub::types::ClientId;
use crate::server::state::AppState;

/// Body of `POST /publish`: a command record plus the client it is sent for.
#[derive(Deserialize, Debug)]
pub struct PublishRequest {
    #[serde(rename = "UserID", alias = "userId")]
    pub user_id: ClientId,
    #[serde(flatten)]
    pub record: CommandRecord,
}

/// Inject a command as if the named client had sent it over its socket.
pub async fn publish(body: web::Json<PublishRequest>, data: web::Data<AppState>) -> HttpResponse {
    let PublishRequest { user_id, record } = body.into_inner();
    let command = match Command::try_from(record) {
        Ok(command) => command,
        Err(e) => {
            return http_error_response(
                "INVALID_COMMAND",
                &e.to_string(),
                Some(&user_id.to_string()),
                StatusCode::BAD_REQUEST,
            );
        }
    };
    debug!("[Publish] {:?} for {}", command, user_id);

    match data.lobby.send(Publish { client: user_id, command }).await {
        Ok(Ok(())) => HttpResponse::Accepted().finish(),
        Ok(Err(e)) => e.to_http_response(),
        Err(_) => HubError::Unavailable.to_http_response(),
    }
}

/// List the rooms known to the main lobby.
pub async fn rooms(data: web::Data<AppState>) -> HttpResponse {
    match data.lobby.send(GetRooms).await {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(_) => HubError::Unavailable.to_http_response(),
    }
}
