//! The in-memory state graph: connections, the nickname index, and
//! channels, plus the atomic mutations that keep their invariants intact.
//! Owned exclusively by the hub task (see `hub.rs`) — single ownership is
//! what replaces locking in this core's concurrency model.

use std::collections::HashMap;

use crate::channel::Channel;
use crate::client::ClientRecord;
use crate::types::{ChannelName, ClientId};

#[derive(Default)]
pub struct Store {
    pub clients: HashMap<ClientId, ClientRecord>,
    pub nicks: HashMap<String, ClientId>,
    pub channels: HashMap<ChannelName, Channel>,
    /// The server password PASS is checked against.
    pub expected_password: String,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_password(password: impl Into<String>) -> Self {
        Store {
            expected_password: password.into(),
            ..Self::default()
        }
    }

    pub fn attach(&mut self, client: ClientRecord) {
        self.clients.insert(client.id, client);
    }

    /// Removes a connection entirely: nickname binding, channel
    /// memberships (deleting any channel this leaves empty), and the
    /// client record itself. Returns the set of channels it had been in
    /// and its hostmask, so the caller can broadcast a QUIT notice before
    /// the membership edges disappear.
    pub fn detach(&mut self, cid: ClientId) -> Option<(crate::replies::Hostmask, Vec<ChannelName>)> {
        let client = self.clients.remove(&cid)?;
        if let Some(nick) = &client.nick {
            if self.nicks.get(nick) == Some(&cid) {
                self.nicks.remove(nick);
            }
        }
        let channels: Vec<ChannelName> = client.channels.iter().cloned().collect();
        for name in &channels {
            if let Some(chan) = self.channels.get_mut(name) {
                chan.remove_member(cid);
                if chan.is_empty() {
                    self.channels.remove(name);
                }
            }
        }
        let was_registered = client.registered;
        let hostmask = client.hostmask();
        if was_registered {
            Some((hostmask, channels))
        } else {
            None
        }
    }

    pub fn nick_taken(&self, nick: &str) -> bool {
        self.nicks.contains_key(nick)
    }

    /// Renames `cid` to `new_nick`. Caller must have already checked
    /// `!nick_taken(new_nick)`.
    pub fn rename(&mut self, cid: ClientId, new_nick: String) {
        if let Some(client) = self.clients.get(&cid) {
            if let Some(old) = &client.nick {
                self.nicks.remove(old);
            }
        }
        self.nicks.insert(new_nick.clone(), cid);
        if let Some(client) = self.clients.get_mut(&cid) {
            client.nick = Some(new_nick);
        }
    }

    pub fn channel_create_if_absent(&mut self, name: &str) -> &mut Channel {
        self.channels
            .entry(name.to_string())
            .or_insert_with(|| Channel::new(name))
    }

    pub fn channel_join(&mut self, cid: ClientId, name: &str) {
        let chan = self.channel_create_if_absent(name);
        chan.add_member(cid);
        if let Some(client) = self.clients.get_mut(&cid) {
            client.channels.insert(name.to_string());
        }
    }

    /// Removes `cid` from `name`'s roster, deleting the channel if this
    /// empties it. Returns `true` if the channel still exists afterwards.
    pub fn channel_part(&mut self, cid: ClientId, name: &str) -> bool {
        if let Some(client) = self.clients.get_mut(&cid) {
            client.channels.remove(name);
        }
        let Some(chan) = self.channels.get_mut(name) else {
            return false;
        };
        chan.remove_member(cid);
        if chan.is_empty() {
            self.channels.remove(name);
            false
        } else {
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn client(id: ClientId) -> ClientRecord {
        let (tx, _rx) = mpsc::channel(8);
        let mut c = ClientRecord::new(id, "localhost".into(), tx);
        c.nick = Some(format!("n{id}"));
        c.user = Some("u".into());
        c.password_ok = true;
        c.registered = true;
        c
    }

    #[test]
    fn join_then_part_deletes_empty_channel() {
        let mut s = Store::new();
        s.attach(client(1));
        s.channel_join(1, "#x");
        assert!(s.channels.contains_key("#x"));
        assert!(!s.channel_part(1, "#x"));
        assert!(!s.channels.contains_key("#x"));
    }

    #[test]
    fn detach_rebroadcasts_and_cleans_membership() {
        let mut s = Store::new();
        s.attach(client(1));
        s.attach(client(2));
        s.channel_join(1, "#x");
        s.channel_join(2, "#x");
        let (hostmask, channels) = s.detach(1).unwrap();
        assert_eq!(hostmask.nick, "n1");
        assert_eq!(channels, vec!["#x".to_string()]);
        assert!(s.channels.get("#x").unwrap().is_member(2));
        assert!(!s.channels.get("#x").unwrap().is_member(1));
    }

    #[test]
    fn nick_index_is_bijective_after_rename() {
        let mut s = Store::new();
        s.attach(client(1));
        s.nicks.insert("n1".into(), 1);
        s.rename(1, "n1-renamed".into());
        assert!(!s.nick_taken("n1"));
        assert_eq!(s.nicks.get("n1-renamed"), Some(&1));
    }
}
