//! Error types shared by the hub, the client sessions and the HTTP layer.
//!
//! Hub errors are policy rejections: they are reported to the instigating
//! client as an `error` envelope and never change hub state. Protocol errors
//! are fatal to the connection that produced them.

use actix_web::{HttpResponse, http::StatusCode};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum HubError {
    #[error("room already exists")]
    RoomExists(String),
    #[error("room does not exist")]
    RoomNotFound(String),
    #[error("rooms can only be created from the main lobby")]
    NotLobby,
    #[error("room name must not be empty")]
    EmptyRoomName,
    #[error("publish rate limit exceeded")]
    Throttled,
    #[error("unknown client {0}")]
    UnknownClient(Uuid),
    #[error("hub unavailable")]
    Unavailable,
}

impl HubError {
    /// Stable machine-readable code used in HTTP error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            HubError::RoomExists(_) => "ROOM_EXISTS",
            HubError::RoomNotFound(_) => "ROOM_NOT_FOUND",
            HubError::NotLobby => "NOT_LOBBY",
            HubError::EmptyRoomName => "EMPTY_ROOM_NAME",
            HubError::Throttled => "THROTTLED",
            HubError::UnknownClient(_) => "UNKNOWN_CLIENT",
            HubError::Unavailable => "UNAVAILABLE",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            HubError::Throttled => StatusCode::TOO_MANY_REQUESTS,
            HubError::UnknownClient(_) | HubError::RoomNotFound(_) => StatusCode::NOT_FOUND,
            HubError::RoomExists(_) => StatusCode::CONFLICT,
            HubError::NotLobby | HubError::EmptyRoomName => StatusCode::BAD_REQUEST,
            HubError::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// A malformed inbound command record.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed command: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("unknown action '{0}'")]
    UnknownAction(String),
}

/// Returns an HTTP error response with a JSON body.
///
/// # Arguments
/// - `code`: Unique error code.
/// - `message`: Human-readable error message.
/// - `context`: Optional context string (e.g. the client id).
/// - `status`: HTTP status code.
pub fn http_error_response(
    code: &str,
    message: &str,
    context: Option<&str>,
    status: StatusCode,
) -> HttpResponse {
    let body = serde_json::json!({
        "error": {
            "code": code,
            "message": message,
            "context": context.unwrap_or(""),
        }
    });
    HttpResponse::build(status).json(body)
}

impl HubError {
    pub fn to_http_response(&self) -> HttpResponse {
        let context = match self {
            HubError::RoomExists(name) | HubError::RoomNotFound(name) => Some(name.clone()),
            HubError::UnknownClient(id) => Some(id.to_string()),
            _ => None,
        };
        http_error_response(self.code(), &self.to_string(), context.as_deref(), self.status())
    }
}
