//! Room directory and membership transfer.
//!
//! The directory lives on the main lobby and is only touched from the lobby's
//! own message handlers, which is what keeps room names unique. Transfers are
//! driven by the hub the client is leaving: it removes the member, hands it to
//! the target and only then points the client session at the target.

use actix::prelude::*;
use log::{debug, info};

use super::messages::{Adopt, LookupRoom, SessionSignal};
use super::protocol::Envelope;
use super::server::{Hub, HubRole, RoomEntry};
use super::types::{ClientId, RoomInfo, RoomSummary};
use crate::config::hub::LOBBY_ROOM_NAME;
use crate::server::error::HubError;

impl Hub {
    /// Create a new room hub and register it in the directory.
    pub(super) fn create_room(
        &mut self,
        name: String,
        ctx: &mut Context<Self>,
    ) -> Result<String, HubError> {
        let HubRole::Lobby { rooms, .. } = &mut self.role else {
            return Err(HubError::NotLobby);
        };
        if name.is_empty() {
            return Err(HubError::EmptyRoomName);
        }
        if name == LOBBY_ROOM_NAME || rooms.contains_key(&name) {
            return Err(HubError::RoomExists(name));
        }
        let addr = Hub::room(name.clone(), ctx.address(), self.config.clone()).start();
        rooms.insert(name.clone(), RoomEntry { addr, members: 0 });
        info!("[Hub] Room {} created ({} rooms)", name, rooms.len());
        Ok(name)
    }

    /// Resolve a room name against the directory. Only the lobby can answer.
    pub(super) fn resolve_room(
        &self,
        name: &str,
        ctx: &mut Context<Self>,
    ) -> Result<Addr<Hub>, HubError> {
        let HubRole::Lobby { rooms, .. } = &self.role else {
            return Err(HubError::NotLobby);
        };
        if name.is_empty() {
            return Err(HubError::EmptyRoomName);
        }
        if name == LOBBY_ROOM_NAME {
            return Ok(ctx.address());
        }
        rooms
            .get(name)
            .map(|room| room.addr.clone())
            .ok_or_else(|| HubError::RoomNotFound(name.to_string()))
    }

    /// Room names with their member counts, sorted by name.
    pub fn room_summary(&self) -> RoomSummary {
        let HubRole::Lobby { rooms, .. } = &self.role else {
            return Vec::new();
        };
        let mut summary: RoomSummary = rooms
            .iter()
            .map(|(name, room)| RoomInfo {
                room_name: name.clone(),
                num_users: room.members,
            })
            .collect();
        summary.sort_by(|a, b| a.room_name.cmp(&b.room_name));
        summary
    }

    /// Broadcast the room summary outside the tick, if the publish limiter allows it.
    pub(super) fn publish_room_summary_now(&mut self) {
        if !self.publish_limiter.try_acquire() {
            debug!("[Hub] Room summary throttled, deferred to the next periodic summary");
            return;
        }
        let rooms = self.room_summary();
        self.publish(&Envelope::rooms(rooms));
    }

    /// Handle a join request from one of this hub's members.
    pub(super) fn join_room(&mut self, instigator: ClientId, name: String, ctx: &mut Context<Self>) {
        if self.is_lobby() {
            match self.resolve_room(&name, ctx) {
                Ok(target) => self.transfer(instigator, target, name, ctx),
                Err(e) => self.reply_error(&instigator, &e),
            }
            return;
        }
        if name == self.label() {
            self.reply(&instigator, &Envelope::join_success(name));
            return;
        }
        let HubRole::Room { lobby, .. } = &self.role else {
            return;
        };
        let lobby = lobby.clone();

        // Block this hub's mailbox until the lobby answers, so the client's
        // later commands are not processed ahead of its join.
        let lookup = lobby.send(LookupRoom { name: name.clone() });
        ctx.wait(lookup.into_actor(self).map(move |res, act, ctx| match res {
            Ok(Ok(target)) => act.transfer(instigator, target, name, ctx),
            Ok(Err(e)) => act.reply_error(&instigator, &e),
            Err(_) => act.reply_error(&instigator, &HubError::Unavailable),
        }));
    }

    /// Move a member from this hub to `target`.
    ///
    /// The member is removed here and handed to the target before the session
    /// learns about its new owner. The target's mailbox therefore holds the
    /// `Adopt` ahead of any command or unregister the session routes to it. At
    /// no point is the member held by two registries, and its delivery queue
    /// stays open throughout.
    pub(super) fn transfer(
        &mut self,
        instigator: ClientId,
        target: Addr<Hub>,
        room: String,
        ctx: &mut Context<Self>,
    ) {
        if target == ctx.address() {
            self.reply(&instigator, &Envelope::join_success(room));
            return;
        }
        let Some(member) = self.members.remove(&instigator) else {
            debug!("[Hub] {} left before joining {}", instigator, room);
            return;
        };
        let session = member.session.clone();
        info!("[Hub] Client {} moving from {} to {}", instigator, self.label(), room);
        target.do_send(Adopt { member, room });
        session.do_send(SessionSignal::Rehome(target));
        self.membership_changed();
    }
}
