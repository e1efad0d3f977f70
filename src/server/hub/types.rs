use actix::Recipient;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

use super::messages::SessionSignal;

/// Process-unique client identity, assigned when the connection is accepted.
pub type ClientId = Uuid;

/// An encoded outbound message, shared between all recipients of a broadcast.
pub type Frame = Arc<str>;

/// One client's last known cursor position.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    #[serde(rename = "UserID")]
    pub user_id: ClientId,
    #[serde(rename = "MouseX")]
    pub mouse_x: i16,
    #[serde(rename = "MouseY")]
    pub mouse_y: i16,
}

/// Positions of every member of a hub, assembled fresh on each tick.
pub type PositionSnapshot = Vec<Position>;

/// A room name and its current member count.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct RoomInfo {
    #[serde(rename = "RoomName")]
    pub room_name: String,
    #[serde(rename = "NumUsers")]
    pub num_users: usize,
}

pub type RoomSummary = Vec<RoomInfo>;

/// A client as seen by the hub that currently owns it.
///
/// The entry moves between registries on a room transfer, carrying the
/// delivery queue and the tracked position with it.
pub struct Member {
    pub id: ClientId,
    pub mouse_x: i16,
    pub mouse_y: i16,
    pub(super) outbox: mpsc::Sender<Frame>,
    pub(super) session: Recipient<SessionSignal>,
}

impl Member {
    pub fn new(id: ClientId, outbox: mpsc::Sender<Frame>, session: Recipient<SessionSignal>) -> Self {
        Self {
            id,
            mouse_x: 0,
            mouse_y: 0,
            outbox,
            session,
        }
    }

    pub fn position(&self) -> Position {
        Position {
            user_id: self.id,
            mouse_x: self.mouse_x,
            mouse_y: self.mouse_y,
        }
    }
}
