//! Hub actor.
//!
//! Owns one room's client registry, processes register/unregister/command
//! requests one at a time and drives the periodic snapshot tick. The main
//! lobby is a hub too: it additionally owns the room directory and the index
//! of connected sessions used by the publish endpoint.

use actix::prelude::*;
use actix::MessageResult;
use std::collections::HashMap;
use log::{debug, info, warn};

use super::messages::{
    Adopt, Broadcast, Departed, GetRooms, GetSnapshot, LookupRoom, Publish, Register, RoomOccupancy,
    SessionSignal, Submit, Tick, Unregister,
};
use super::protocol::{Command, Envelope};
use super::types::{ClientId, Member, PositionSnapshot};
use crate::config::hub::HubConfig;
use crate::server::error::HubError;
use crate::server::rate_limit::RateLimiter;

/// A room registered in the main lobby's directory.
pub(super) struct RoomEntry {
    pub addr: Addr<Hub>,
    pub members: usize,
}

/// What distinguishes the main lobby from the rooms it created.
pub(super) enum HubRole {
    Lobby {
        rooms: HashMap<String, RoomEntry>,
        sessions: HashMap<ClientId, Recipient<SessionSignal>>,
    },
    Room {
        name: String,
        lobby: Addr<Hub>,
    },
}

pub struct Hub {
    pub(super) role: HubRole,
    pub(super) members: HashMap<ClientId, Member>,
    pub(super) ticks: u64,
    pub(super) config: HubConfig,
    pub(super) publish_limiter: RateLimiter,
}

impl Hub {
    /// Create the main lobby.
    pub fn lobby(config: HubConfig) -> Self {
        Self::with_role(
            HubRole::Lobby {
                rooms: HashMap::new(),
                sessions: HashMap::new(),
            },
            config,
        )
    }

    /// Create a room owned by the given lobby.
    pub fn room(name: String, lobby: Addr<Hub>, config: HubConfig) -> Self {
        Self::with_role(HubRole::Room { name, lobby }, config)
    }

    fn with_role(role: HubRole, config: HubConfig) -> Self {
        let publish_limiter = RateLimiter::new(config.publish_interval, config.publish_burst);
        Self {
            role,
            members: HashMap::new(),
            ticks: 0,
            config,
            publish_limiter,
        }
    }

    pub fn is_lobby(&self) -> bool {
        matches!(self.role, HubRole::Lobby { .. })
    }

    /// Name used in logs.
    pub(super) fn label(&self) -> &str {
        match &self.role {
            HubRole::Lobby { .. } => "lobby",
            HubRole::Room { name, .. } => name,
        }
    }

    /// Build the current position snapshot, one entry per member.
    pub fn snapshot(&self) -> PositionSnapshot {
        self.members.values().map(Member::position).collect()
    }

    /// Periodic tick: positions, or the room summary every Nth tick on the lobby.
    fn tick(&mut self) {
        self.ticks += 1;
        if self.members.is_empty() {
            return;
        }
        let summary_due = self.config.room_summary_every > 0
            && self.ticks % self.config.room_summary_every == 0;
        if self.is_lobby() && summary_due {
            let rooms = self.room_summary();
            self.publish(&Envelope::rooms(rooms));
        } else {
            let positions = self.snapshot();
            self.publish(&Envelope::tick(positions));
        }
    }

    /// Insert a member, reporting it if it was already registered.
    fn insert_member(&mut self, member: Member) -> Option<ClientId> {
        if self.members.contains_key(&member.id) {
            warn!("[Hub] {} already registered in {}", member.id, self.label());
            return None;
        }
        let id = member.id;
        self.members.insert(id, member);
        Some(id)
    }

    /// Drop a member from the registry; its delivery queue closes with it.
    fn remove_member(&mut self, id: &ClientId) -> Option<Member> {
        let member = self.members.remove(id)?;
        self.membership_changed();
        Some(member)
    }

    /// Let the lobby know about this room's new member count.
    pub(super) fn membership_changed(&self) {
        if self.members.is_empty() {
            debug!("[Hub] {} is idle", self.label());
        }
        if let HubRole::Room { name, lobby } = &self.role {
            lobby.do_send(RoomOccupancy {
                name: name.clone(),
                members: self.members.len(),
            });
        }
    }

    fn handle_command(&mut self, instigator: ClientId, command: Command, ctx: &mut Context<Self>) {
        match command {
            Command::Move { x, y } => {
                if let Some(member) = self.members.get_mut(&instigator) {
                    member.mouse_x = x;
                    member.mouse_y = y;
                }
            }
            Command::CreateRoom { name } => match self.create_room(name, ctx) {
                Ok(name) => {
                    self.reply(&instigator, &Envelope::success(name));
                    self.publish_room_summary_now();
                }
                Err(e) => self.reply_error(&instigator, &e),
            },
            Command::JoinRoom { name } => self.join_room(instigator, name, ctx),
        }
    }
}

impl Actor for Hub {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!("[Hub] {} started", self.label());
        ctx.run_interval(self.config.tick_interval, |act, _ctx| act.tick());
    }
}

impl Handler<Register> for Hub {
    type Result = ();

    /// Handles a client connecting to the main lobby.
    fn handle(&mut self, msg: Register, _ctx: &mut Self::Context) -> Self::Result {
        let session = msg.member.session.clone();
        let Some(id) = self.insert_member(msg.member) else {
            return;
        };
        if let HubRole::Lobby { sessions, .. } = &mut self.role {
            sessions.insert(id, session);
        }
        info!("[Hub] Client {} connected to {}", id, self.label());
        self.reply(&id, &Envelope::subscribe(id));
    }
}

impl Handler<Unregister> for Hub {
    type Result = ();

    fn handle(&mut self, msg: Unregister, _ctx: &mut Self::Context) -> Self::Result {
        if self.remove_member(&msg.id).is_some() {
            info!("[Hub] Client {} left {}", msg.id, self.label());
        }
    }
}

impl Handler<Submit> for Hub {
    type Result = ();

    fn handle(&mut self, msg: Submit, ctx: &mut Self::Context) -> Self::Result {
        if !self.members.contains_key(&msg.instigator) {
            // Sent before the client learned about a transfer, or after it left.
            debug!(
                "[Hub] Dropping stale command from {} in {}",
                msg.instigator,
                self.label()
            );
            return;
        }
        self.handle_command(msg.instigator, msg.command, ctx);
    }
}

impl Handler<Broadcast> for Hub {
    type Result = Result<(), HubError>;

    fn handle(&mut self, msg: Broadcast, _ctx: &mut Self::Context) -> Self::Result {
        if !self.publish_limiter.try_acquire() {
            warn!("[Hub] Broadcast throttled in {}", self.label());
            return Err(HubError::Throttled);
        }
        self.fan_out(&msg.0);
        Ok(())
    }
}

impl Handler<Adopt> for Hub {
    type Result = ();

    /// Final step of a room transfer: the member now belongs to this hub.
    fn handle(&mut self, msg: Adopt, _ctx: &mut Self::Context) -> Self::Result {
        let Some(id) = self.insert_member(msg.member) else {
            return;
        };
        info!("[Hub] Client {} joined {}", id, self.label());
        self.membership_changed();
        self.reply(&id, &Envelope::join_success(msg.room));
    }
}

impl Handler<Tick> for Hub {
    type Result = ();

    fn handle(&mut self, _msg: Tick, _ctx: &mut Self::Context) -> Self::Result {
        self.tick();
    }
}

impl Handler<GetSnapshot> for Hub {
    type Result = MessageResult<GetSnapshot>;

    fn handle(&mut self, _msg: GetSnapshot, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(self.snapshot())
    }
}

impl Handler<GetRooms> for Hub {
    type Result = MessageResult<GetRooms>;

    fn handle(&mut self, _msg: GetRooms, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(self.room_summary())
    }
}

impl Handler<LookupRoom> for Hub {
    type Result = Result<Addr<Hub>, HubError>;

    fn handle(&mut self, msg: LookupRoom, ctx: &mut Self::Context) -> Self::Result {
        self.resolve_room(&msg.name, ctx)
    }
}

impl Handler<RoomOccupancy> for Hub {
    type Result = ();

    fn handle(&mut self, msg: RoomOccupancy, _ctx: &mut Self::Context) -> Self::Result {
        if let HubRole::Lobby { rooms, .. } = &mut self.role {
            if let Some(room) = rooms.get_mut(&msg.name) {
                room.members = msg.members;
            }
        }
    }
}

impl Handler<Publish> for Hub {
    type Result = Result<(), HubError>;

    /// Forwards a published command to the named client's session, which
    /// submits it to whichever hub currently owns the client.
    fn handle(&mut self, msg: Publish, _ctx: &mut Self::Context) -> Self::Result {
        let HubRole::Lobby { sessions, .. } = &self.role else {
            return Err(HubError::NotLobby);
        };
        let Some(session) = sessions.get(&msg.client).cloned() else {
            return Err(HubError::UnknownClient(msg.client));
        };
        if !self.publish_limiter.try_acquire() {
            warn!("[Hub] Publish for {} throttled", msg.client);
            return Err(HubError::Throttled);
        }
        session.do_send(SessionSignal::Inject(msg.command));
        Ok(())
    }
}

impl Handler<Departed> for Hub {
    type Result = ();

    fn handle(&mut self, msg: Departed, _ctx: &mut Self::Context) -> Self::Result {
        if let HubRole::Lobby { sessions, .. } = &mut self.role {
            sessions.remove(&msg.id);
        }
    }
}
