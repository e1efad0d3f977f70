use actix::prelude::*;

use super::protocol::Command;
use super::server::Hub;
use super::types::{ClientId, Frame, Member, PositionSnapshot, RoomSummary};
use crate::server::error::HubError;

/// Message: a freshly connected client joins the main lobby.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Register {
    pub member: Member,
}

/// Message: a client leaves its current hub for good.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Unregister {
    pub id: ClientId,
}

/// Message: a client submits a decoded command to its owning hub.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Submit {
    pub instigator: ClientId,
    pub command: Command,
}

/// Message: fan a frame out to every member, outside the periodic tick.
#[derive(Message)]
#[rtype(result = "Result<(), HubError>")]
pub struct Broadcast(pub Frame);

/// Message: take ownership of a member handed off by another hub.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Adopt {
    pub member: Member,
    pub room: String,
}

/// Message: assemble and broadcast a snapshot now.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Tick;

#[derive(Message)]
#[rtype(result = "PositionSnapshot")]
pub struct GetSnapshot;

/// Message (lobby only): current room summary.
#[derive(Message)]
#[rtype(result = "RoomSummary")]
pub struct GetRooms;

/// Message (lobby only): resolve a room name to its hub.
#[derive(Message)]
#[rtype(result = "Result<Addr<Hub>, HubError>")]
pub struct LookupRoom {
    pub name: String,
}

/// Message (room -> lobby): the room's member count changed.
#[derive(Message)]
#[rtype(result = "()")]
pub struct RoomOccupancy {
    pub name: String,
    pub members: usize,
}

/// Message (lobby only): inject a command on behalf of a connected client.
#[derive(Message)]
#[rtype(result = "Result<(), HubError>")]
pub struct Publish {
    pub client: ClientId,
    pub command: Command,
}

/// Message (lobby only): a client's connection is gone.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Departed {
    pub id: ClientId,
}

/// Control signals sent from a hub to a client session.
#[derive(Message)]
#[rtype(result = "()")]
pub enum SessionSignal {
    /// The client now belongs to another hub; submit future commands there.
    Rehome(Addr<Hub>),
    /// The client's delivery queue overflowed.
    Evicted,
    /// A command published on the client's behalf.
    Inject(Command),
}
