//! WebSocket session handler for a cursor client.
//!
//! This actor owns a single connection. It decodes inbound messages into
//! commands and submits them to the hub that currently owns the client, and
//! drains the client's bounded delivery queue onto the socket. Whatever ends
//! the session (close frame, protocol fault, stalled peer, eviction), the
//! client is unregistered exactly once, from `stopped`.

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use log::{debug, info, warn};
use std::time::Instant;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use uuid::Uuid;

use super::liveness::Liveness;
use crate::config::session::SessionConfig;
use crate::server::hub::messages::{Departed, Register, SessionSignal, Submit, Unregister};
use crate::server::hub::protocol::decode;
use crate::server::hub::server::Hub;
use crate::server::hub::types::{ClientId, Frame, Member};
use crate::server::rate_limit::RateLimiter;

const SLOW_CONSUMER_REASON: &str = "connection too slow to keep up with messages";
const STALLED_REASON: &str = "write timed out";

pub struct ClientSession {
    pub id: ClientId,
    /// Hub currently owning this client; changes on each room transfer.
    hub: Addr<Hub>,
    lobby: Addr<Hub>,
    config: SessionConfig,
    liveness: Liveness,
    inbound_limiter: RateLimiter,
}

impl ClientSession {
    pub fn new(lobby: Addr<Hub>, config: SessionConfig) -> Self {
        let inbound_limiter = RateLimiter::new(config.inbound_interval, config.inbound_burst);
        Self {
            id: Uuid::new_v4(),
            hub: lobby.clone(),
            lobby,
            config,
            liveness: Liveness::new(),
            inbound_limiter,
        }
    }

    /// Decode one inbound message and hand it to the owning hub.
    /// A message that does not decode ends the session.
    fn submit(&mut self, raw: &[u8], ctx: &mut ws::WebsocketContext<Self>) {
        self.liveness.seen();
        if !self.inbound_limiter.try_acquire() {
            debug!("[Session] Dropping inbound message from {} (flood)", self.id);
            return;
        }
        match decode(raw) {
            Ok(command) => self.hub.do_send(Submit {
                instigator: self.id,
                command,
            }),
            Err(e) => {
                warn!("[Session] Protocol fault from {}: {}", self.id, e);
                close(ctx, ws::CloseCode::Invalid, e.to_string());
            }
        }
    }

    /// Pings every heartbeat interval. The outstanding ping is checked on a
    /// shorter cadence so a stalled peer is dropped close to its write timeout.
    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(self.config.stall_check_interval, |act, ctx| {
            let now = Instant::now();
            if act.liveness.is_stalled(now, act.config.write_timeout) {
                warn!("[Session] Client {} stopped reading, closing", act.id);
                close(ctx, ws::CloseCode::Away, STALLED_REASON.to_string());
                return;
            }
            if act.liveness.ping_due(now, act.config.heartbeat_interval) {
                ctx.ping(b"");
                act.liveness.pinged(now);
            }
        });
    }
}

fn close(ctx: &mut ws::WebsocketContext<ClientSession>, code: ws::CloseCode, description: String) {
    ctx.close(Some(ws::CloseReason {
        code,
        description: Some(description),
    }));
    ctx.stop();
}

impl Actor for ClientSession {
    type Context = ws::WebsocketContext<Self>;

    /// Opens the delivery queue and registers the client in the main lobby.
    fn started(&mut self, ctx: &mut Self::Context) {
        let (outbox, queue) = mpsc::channel::<Frame>(self.config.subscriber_buffer.max(1));
        ctx.add_stream(ReceiverStream::new(queue));
        self.lobby.do_send(Register {
            member: Member::new(self.id, outbox, ctx.address().recipient()),
        });
        self.start_heartbeat(ctx);
    }

    /// Unregisters the client from whichever hub owns it now.
    fn stopped(&mut self, _ctx: &mut Self::Context) {
        info!("[Session] Client {} disconnected", self.id);
        self.hub.do_send(Unregister { id: self.id });
        self.lobby.do_send(Departed { id: self.id });
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for ClientSession {
    /// Handles incoming WebSocket messages from the client.
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Text(text)) => self.submit(text.as_bytes(), ctx),
            Ok(ws::Message::Binary(bin)) => self.submit(&bin, ctx),
            Ok(ws::Message::Ping(msg)) => {
                self.liveness.seen();
                ctx.pong(&msg);
            }
            Ok(ws::Message::Pong(_)) => self.liveness.seen(),
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) | Ok(ws::Message::Nop) => (),
            Err(e) => {
                warn!("[Session] Transport error for {}: {}", self.id, e);
                ctx.stop();
            }
        }
    }
}

impl StreamHandler<Frame> for ClientSession {
    /// Writes the next queued frame to the socket.
    fn handle(&mut self, frame: Frame, ctx: &mut Self::Context) {
        ctx.text(&*frame);
    }

    /// The owning hub dropped this client's queue.
    fn finished(&mut self, ctx: &mut Self::Context) {
        debug!("[Session] Delivery queue of {} closed", self.id);
        ctx.stop();
    }
}

impl Handler<SessionSignal> for ClientSession {
    type Result = ();

    fn handle(&mut self, msg: SessionSignal, ctx: &mut Self::Context) {
        match msg {
            SessionSignal::Rehome(hub) => self.hub = hub,
            SessionSignal::Evicted => {
                warn!("[Session] Client {} evicted as slow consumer", self.id);
                close(ctx, ws::CloseCode::Policy, SLOW_CONSUMER_REASON.to_string());
            }
            SessionSignal::Inject(command) => self.hub.do_send(Submit {
                instigator: self.id,
                command,
            }),
        }
    }
}

/// WebSocket endpoint: every connection starts in the main lobby.
pub async fn ws_subscribe(
    req: HttpRequest,
    stream: web::Payload,
    data: web::Data<crate::server::state::AppState>,
) -> Result<HttpResponse, Error> {
    let session = ClientSession::new(data.lobby.clone(), data.session.clone());
    info!("[Session] Accepting connection {}", session.id);
    ws::start(session, &req, stream)
}
