//! Wire records exchanged with clients.
//!
//! Keys follow the casing the browser frontend already speaks (`Action`,
//! `MouseX`, ...). Inbound records also accept camelCase keys.

use serde::{Deserialize, Serialize};

use super::types::{ClientId, Frame, PositionSnapshot, RoomSummary};
use crate::server::error::ProtocolError;

/// A decoded client request. The instigator is whoever submitted it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Move { x: i16, y: i16 },
    CreateRoom { name: String },
    JoinRoom { name: String },
}

/// Raw inbound command record. Fields unrelated to the action are ignored.
#[derive(Deserialize, Debug, Clone)]
pub struct CommandRecord {
    #[serde(rename = "Action", alias = "action")]
    pub action: String,
    #[serde(rename = "RoomID", alias = "roomId", default)]
    pub room_id: String,
    #[serde(rename = "MouseX", alias = "mouseX", default)]
    pub mouse_x: i16,
    #[serde(rename = "MouseY", alias = "mouseY", default)]
    pub mouse_y: i16,
}

impl TryFrom<CommandRecord> for Command {
    type Error = ProtocolError;

    fn try_from(record: CommandRecord) -> Result<Self, Self::Error> {
        match record.action.as_str() {
            "move" => Ok(Command::Move {
                x: record.mouse_x,
                y: record.mouse_y,
            }),
            "createRoom" => Ok(Command::CreateRoom { name: record.room_id }),
            "joinRoom" => Ok(Command::JoinRoom { name: record.room_id }),
            _ => Err(ProtocolError::UnknownAction(record.action)),
        }
    }
}

/// Decode one inbound message into a command.
pub fn decode(raw: &[u8]) -> Result<Command, ProtocolError> {
    let record: CommandRecord = serde_json::from_slice(raw)?;
    Command::try_from(record)
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    Tick,
    Rooms,
    Subscribe,
    Success,
    Error,
    JoinSuccess,
}

/// Payload of an envelope; its shape depends on the action.
#[derive(Serialize, Clone, Debug)]
#[serde(untagged)]
pub enum Body {
    Positions(PositionSnapshot),
    Rooms(RoomSummary),
    Empty,
}

/// Outbound record sent to clients.
#[derive(Serialize, Clone, Debug)]
pub struct Envelope {
    #[serde(rename = "Action")]
    pub action: Action,
    #[serde(rename = "Msg")]
    pub msg: String,
    #[serde(rename = "Body")]
    pub body: Body,
}

impl Envelope {
    fn new(action: Action, msg: impl Into<String>, body: Body) -> Self {
        Self {
            action,
            msg: msg.into(),
            body,
        }
    }

    pub fn tick(positions: PositionSnapshot) -> Self {
        Self::new(Action::Tick, "", Body::Positions(positions))
    }

    pub fn rooms(rooms: RoomSummary) -> Self {
        Self::new(Action::Rooms, "", Body::Rooms(rooms))
    }

    pub fn subscribe(id: ClientId) -> Self {
        Self::new(Action::Subscribe, id.to_string(), Body::Empty)
    }

    pub fn success(msg: impl Into<String>) -> Self {
        Self::new(Action::Success, msg, Body::Empty)
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self::new(Action::Error, msg, Body::Empty)
    }

    pub fn join_success(room: impl Into<String>) -> Self {
        Self::new(Action::JoinSuccess, room, Body::Empty)
    }

    pub fn encode(&self) -> Result<Frame, serde_json::Error> {
        serde_json::to_string(self).map(Frame::from)
    }
}
