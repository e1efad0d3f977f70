//! Delivery to members: best-effort once, never blocking.
//!
//! A full delivery queue marks the member as a slow consumer. It is dropped
//! from the registry and its session is told to close the connection. A
//! closed queue means the session is already gone and the entry is pruned.

use log::{debug, error, warn};
use tokio::sync::mpsc::error::TrySendError;

use super::messages::SessionSignal;
use super::protocol::Envelope;
use super::server::Hub;
use super::types::{ClientId, Frame};
use crate::server::error::HubError;

enum Delivery {
    Sent,
    Full,
    Closed,
}

impl Hub {
    /// Encode an envelope and send it to every member.
    pub(super) fn publish(&mut self, envelope: &Envelope) {
        match envelope.encode() {
            Ok(frame) => self.fan_out(&frame),
            Err(e) => error!("[Hub] Failed to encode {:?} envelope: {}", envelope.action, e),
        }
    }

    /// Send a frame to every member without waiting on any of them.
    pub(super) fn fan_out(&mut self, frame: &Frame) {
        let mut slow = Vec::new();
        let mut gone = Vec::new();
        for (id, member) in &self.members {
            match try_deliver(member.outbox.try_send(frame.clone())) {
                Delivery::Sent => {}
                Delivery::Full => slow.push(*id),
                Delivery::Closed => gone.push(*id),
            }
        }
        if slow.is_empty() && gone.is_empty() {
            return;
        }
        for id in slow {
            self.evict(&id);
        }
        for id in gone {
            self.members.remove(&id);
            debug!("[Hub] Pruned closed client {} from {}", id, self.label());
        }
        self.membership_changed();
    }

    /// Unicast reply to one member, with the same eviction rule as broadcasts.
    pub(super) fn reply(&mut self, id: &ClientId, envelope: &Envelope) {
        let frame = match envelope.encode() {
            Ok(frame) => frame,
            Err(e) => {
                error!("[Hub] Failed to encode reply for {}: {}", id, e);
                return;
            }
        };
        let Some(member) = self.members.get(id) else {
            return;
        };
        match try_deliver(member.outbox.try_send(frame)) {
            Delivery::Sent => {}
            Delivery::Full => {
                self.evict(id);
                self.membership_changed();
            }
            Delivery::Closed => {
                self.members.remove(id);
                self.membership_changed();
            }
        }
    }

    pub(super) fn reply_error(&mut self, id: &ClientId, err: &HubError) {
        debug!("[Hub] Rejecting request from {}: {}", id, err);
        self.reply(id, &Envelope::error(err.to_string()));
    }

    fn evict(&mut self, id: &ClientId) {
        if let Some(member) = self.members.remove(id) {
            warn!("[Hub] Evicting slow client {} from {}", id, self.label());
            member.session.do_send(SessionSignal::Evicted);
        }
    }
}

fn try_deliver(result: Result<(), TrySendError<Frame>>) -> Delivery {
    match result {
        Ok(()) => Delivery::Sent,
        Err(TrySendError::Full(_)) => Delivery::Full,
        Err(TrySendError::Closed(_)) => Delivery::Closed,
    }
}
