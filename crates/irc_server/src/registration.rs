//! Registration FSM: NEW -> PASSED/NICKED/USERED (any order) -> REGISTERED.
//! Pure functions over the `Store`, returning the events the hub must
//! deliver; the hub is the only place that actually writes to a socket.

use crate::client::is_valid_nickname;
use crate::events::{all_to_self, OutboundEvent};
use crate::replies::*;
use crate::store::Store;
use crate::types::ClientId;

pub fn handle_pass(store: &mut Store, cid: ClientId, password: &str, expected: &str) -> Vec<OutboundEvent> {
    let nick = store.clients[&cid].display_nick().to_string();
    if store.clients[&cid].registered {
        return all_to_self(vec![err_already_registered(&nick)]);
    }
    if password == expected {
        store.clients.get_mut(&cid).unwrap().password_ok = true;
        Vec::new()
    } else {
        all_to_self(vec![err_passwd_mismatch(&nick)])
    }
}

pub fn handle_nick(store: &mut Store, cid: ClientId, requested: &str) -> Vec<OutboundEvent> {
    let nick = store.clients[&cid].display_nick().to_string();
    if requested.is_empty() {
        return all_to_self(vec![err_no_nickname_given(&nick)]);
    }
    if !store.clients[&cid].password_ok {
        return all_to_self(vec![err_password_required(&nick)]);
    }
    if !is_valid_nickname(requested) {
        return all_to_self(vec![err_erroneus_nickname(&nick, requested)]);
    }
    if let Some(&owner) = store.nicks.get(requested) {
        if owner != cid {
            return all_to_self(vec![err_nickname_in_use(&nick, requested)]);
        }
    }

    let was_registered = store.clients[&cid].registered;
    let old_hostmask = store.clients[&cid].hostmask();
    let channels: Vec<String> = store.clients[&cid].channels.iter().cloned().collect();
    store.rename(cid, requested.to_string());

    let mut out = Vec::new();
    if was_registered {
        out.push(OutboundEvent::to_self(nick_notice(old_hostmask.clone(), requested)));
        for channel in channels {
            let recipients = store.channels[&channel].members.clone();
            out.push(OutboundEvent::to_members_except(
                recipients,
                nick_notice(old_hostmask.clone(), requested),
                cid,
            ));
        }
    }

    let completed = store.clients.get_mut(&cid).unwrap().try_complete_registration();
    if completed {
        let user = store.clients[&cid].user.clone().unwrap_or_default();
        let host = store.clients[&cid].host.clone();
        out.extend(all_to_self(welcome_burst(requested, &user, &host)));
    }
    out
}

pub fn handle_user(
    store: &mut Store,
    cid: ClientId,
    user: &str,
    realname: &str,
) -> Vec<OutboundEvent> {
    let nick = store.clients[&cid].display_nick().to_string();
    if store.clients[&cid].registered {
        return all_to_self(vec![err_already_registered(&nick)]);
    }
    if !store.clients[&cid].password_ok {
        return all_to_self(vec![err_password_required(&nick)]);
    }
    {
        let c = store.clients.get_mut(&cid).unwrap();
        c.user = Some(user.to_string());
        c.realname = Some(realname.to_string());
    }

    let completed = store.clients.get_mut(&cid).unwrap().try_complete_registration();
    if completed {
        let c = &store.clients[&cid];
        let display = c.display_nick().to_string();
        let host = c.host.clone();
        all_to_self(welcome_burst(&display, user, &host))
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn new_store_with_client() -> (Store, ClientId) {
        let mut s = Store::new();
        let (tx, _rx) = mpsc::channel(8);
        s.attach(crate::client::ClientRecord::new(1, "localhost".into(), tx));
        (s, 1)
    }

    #[test]
    fn pass_then_nick_then_user_registers() {
        let (mut s, cid) = new_store_with_client();
        assert!(handle_pass(&mut s, cid, "secret", "secret").is_empty());
        assert!(handle_nick(&mut s, cid, "alice").is_empty());
        let events = handle_user(&mut s, cid, "alice", "Alice");
        assert_eq!(events.len(), 7);
        assert!(s.clients[&cid].registered);
    }

    #[test]
    fn nick_before_pass_is_rejected() {
        let (mut s, cid) = new_store_with_client();
        let events = handle_nick(&mut s, cid, "alice");
        assert_eq!(events.len(), 1);
        assert!(!s.clients[&cid].registered);
    }

    #[test]
    fn wrong_password_yields_464() {
        let (mut s, cid) = new_store_with_client();
        let events = handle_pass(&mut s, cid, "bad", "secret");
        assert_eq!(events.len(), 1);
        assert!(!s.clients[&cid].password_ok);
    }

    #[test]
    fn duplicate_nick_yields_433() {
        let mut s = Store::new();
        let (tx1, _r1) = mpsc::channel(8);
        let (tx2, _r2) = mpsc::channel(8);
        s.attach(crate::client::ClientRecord::new(1, "localhost".into(), tx1));
        s.attach(crate::client::ClientRecord::new(2, "localhost".into(), tx2));
        handle_pass(&mut s, 1, "x", "x");
        handle_pass(&mut s, 2, "x", "x");
        assert!(handle_nick(&mut s, 1, "alice").is_empty());
        let events = handle_nick(&mut s, 2, "alice");
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn registered_nick_change_echoes_to_self_and_shared_channels() {
        let mut s = Store::new();
        let (tx1, _r1) = mpsc::channel(8);
        s.attach(crate::client::ClientRecord::new(1, "localhost".into(), tx1));
        handle_pass(&mut s, 1, "x", "x");
        handle_nick(&mut s, 1, "alice");
        handle_user(&mut s, 1, "alice", "Alice");
        s.channel_join(1, "#x");
        let events = handle_nick(&mut s, 1, "alice2");
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], OutboundEvent::ToSelf(_)));
        assert!(matches!(events[1], OutboundEvent::ToChannel { .. }));
    }
}
