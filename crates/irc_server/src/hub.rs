//! The single-owner actor: the only task that ever touches `Store`. Reader
//! tasks forward parsed lines here; the hub dispatches each one to
//! completion before taking the next, which is what gives this core its
//! "no interleaving" guarantee without an OS-level single thread.

use log::{debug, info, warn};
use tokio::sync::mpsc::{Receiver, Sender};

use crate::client::ClientRecord;
use crate::constants::QUIT_DEFAULT_REASON;
use crate::dispatcher;
use crate::events::OutboundEvent;
use crate::message::parse_line;
use crate::replies::quit_notice;
use crate::store::Store;
use crate::types::ClientId;

/// What a connection task forwards to the hub.
pub enum HubMessage {
    Connect(ClientRecord),
    Line(ClientId, String),
    Disconnect(ClientId),
}

pub struct Hub {
    store: Store,
    inbound: Receiver<HubMessage>,
}

impl Hub {
    pub fn new(password: impl Into<String>, inbound: Receiver<HubMessage>) -> Self {
        Hub {
            store: Store::with_password(password),
            inbound,
        }
    }

    /// Runs until the inbound channel is closed (every connection task and
    /// the listener have dropped their senders).
    pub async fn run(mut self) {
        while let Some(msg) = self.inbound.recv().await {
            match msg {
                HubMessage::Connect(client) => {
                    info!("connection {} attached from {}", client.id, client.host);
                    self.store.attach(client);
                }
                HubMessage::Line(cid, line) => self.handle_line(cid, &line).await,
                HubMessage::Disconnect(cid) => {
                    self.handle_disconnect(cid, QUIT_DEFAULT_REASON).await
                }
            }
        }
    }

    async fn handle_line(&mut self, cid: ClientId, line: &str) {
        if !self.store.clients.contains_key(&cid) {
            return;
        }
        debug!("<{cid} {line}");
        let Some(parsed) = parse_line(line) else {
            return;
        };
        if parsed.command.eq_ignore_ascii_case("QUIT") {
            let reason = parsed
                .params
                .first()
                .cloned()
                .unwrap_or_else(|| QUIT_DEFAULT_REASON.to_string());
            self.handle_disconnect(cid, &reason).await;
            return;
        }
        let events = dispatcher::dispatch(&mut self.store, cid, &parsed);
        self.deliver(cid, events).await;
    }

    /// Removes `cid` and, if it had completed registration, broadcasts
    /// exactly one QUIT notice per channel-mate. Dropping the client's
    /// `ClientRecord` also drops its outbound sender, which is what tells
    /// that connection's writer task to close the socket.
    async fn handle_disconnect(&mut self, cid: ClientId, reason: &str) {
        let Some((hostmask, channels)) = self.store.detach(cid) else {
            return;
        };
        let notice = quit_notice(hostmask, reason);
        let mut peers = std::collections::HashSet::new();
        for channel in channels {
            if let Some(chan) = self.store.channels.get(&channel) {
                peers.extend(chan.members.iter().copied());
            }
        }
        let text = notice.format();
        for member in peers {
            self.send_to(member, text.clone()).await;
        }
    }

    /// `origin` is the connection that issued the command; `ToSelf` events
    /// resolve to it.
    async fn deliver(&mut self, origin: ClientId, events: Vec<OutboundEvent>) {
        for event in events {
            match event {
                OutboundEvent::ToSelf(reply) => self.send_to(origin, reply.format()).await,
                OutboundEvent::ToClient(cid, reply) => self.send_to(cid, reply.format()).await,
                OutboundEvent::ToChannel {
                    recipients,
                    reply,
                    exclude,
                } => {
                    let text = reply.format();
                    for cid in recipients {
                        if Some(cid) == exclude {
                            continue;
                        }
                        self.send_to(cid, text.clone()).await;
                    }
                }
            }
        }
    }

    async fn send_to(&mut self, cid: ClientId, line: String) {
        if let Some(client) = self.store.clients.get(&cid) {
            if client.outbound.send(line).await.is_err() {
                warn!("outbound channel to client {cid} is closed, dropping reply");
            }
        }
    }
}

pub fn channel(buffer: usize) -> (Sender<HubMessage>, Receiver<HubMessage>) {
    tokio::sync::mpsc::channel(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn registered(store: &mut Store, id: ClientId, nick: &str) -> mpsc::Receiver<String> {
        let (tx, rx) = mpsc::channel(8);
        let mut c = ClientRecord::new(id, "localhost".into(), tx);
        c.nick = Some(nick.to_string());
        c.user = Some(nick.to_string());
        c.password_ok = true;
        c.registered = true;
        store.attach(c);
        store.nicks.insert(nick.to_string(), id);
        rx
    }

    #[tokio::test]
    async fn quit_notice_is_not_duplicated_across_shared_channels() {
        let (_tx, rx) = mpsc::channel(1);
        let mut hub = Hub::new("secret", rx);
        let mut peer_rx = registered(&mut hub.store, 1, "alice");
        let _quitter_rx = registered(&mut hub.store, 2, "bob");
        hub.store.channel_join(1, "#a");
        hub.store.channel_join(2, "#a");
        hub.store.channel_join(1, "#b");
        hub.store.channel_join(2, "#b");

        hub.handle_disconnect(2, "bye").await;

        let mut received = 0;
        while peer_rx.try_recv().is_ok() {
            received += 1;
        }
        assert_eq!(received, 1);
    }
}
