//! PRIVMSG and NOTICE: direct-to-nick and channel fan-out.

use crate::events::OutboundEvent;
use crate::replies::*;
use crate::store::Store;
use crate::types::{ClientId, MessageTarget};

pub fn handle_privmsg(store: &Store, cid: ClientId, params: &[String]) -> Vec<OutboundEvent> {
    dispatch_message(store, cid, params, "PRIVMSG")
}

/// PRIVMSG with no auto-reply, per the originating source's NOTICE
/// handling: same delivery rules, never an error reply back to the sender.
pub fn handle_notice(store: &Store, cid: ClientId, params: &[String]) -> Vec<OutboundEvent> {
    let Some(target) = params.first() else {
        return Vec::new();
    };
    let Some(text) = params.get(1) else {
        return Vec::new();
    };
    let hostmask = store.clients[&cid].hostmask();
    match MessageTarget::parse(target) {
        MessageTarget::Channel(channel) => {
            let Some(chan) = store.channels.get(&channel) else {
                return Vec::new();
            };
            if !chan.is_member(cid) {
                return Vec::new();
            }
            let recipients = chan.members.clone();
            vec![OutboundEvent::to_members_except(
                recipients,
                IrcReply::from_user(hostmask, "NOTICE", format!("{channel} :{text}")),
                cid,
            )]
        }
        MessageTarget::Nickname(nick) => {
            let Some(&target_cid) = store.nicks.get(&nick) else {
                return Vec::new();
            };
            vec![OutboundEvent::to_client(
                target_cid,
                IrcReply::from_user(hostmask, "NOTICE", format!("{nick} :{text}")),
            )]
        }
    }
}

fn dispatch_message(store: &Store, cid: ClientId, params: &[String], command: &str) -> Vec<OutboundEvent> {
    let nick = store.clients[&cid].display_nick().to_string();
    let Some(target) = params.first() else {
        return vec![OutboundEvent::to_self(err_need_more_params(&nick, command))];
    };
    let Some(text) = params.get(1) else {
        return vec![OutboundEvent::to_self(err_need_more_params(&nick, command))];
    };
    let hostmask = store.clients[&cid].hostmask();

    match MessageTarget::parse(target) {
        MessageTarget::Channel(channel) => {
            let Some(chan) = store.channels.get(&channel) else {
                return vec![OutboundEvent::to_self(err_no_such_channel(&nick, &channel))];
            };
            if !chan.is_member(cid) {
                return vec![OutboundEvent::to_self(err_not_on_channel(&nick, &channel))];
            }
            let recipients = chan.members.clone();
            vec![OutboundEvent::to_members_except(
                recipients,
                privmsg_notice(hostmask, &channel, text),
                cid,
            )]
        }
        MessageTarget::Nickname(nick_to) => {
            let Some(&target_cid) = store.nicks.get(&nick_to) else {
                return vec![OutboundEvent::to_self(err_no_such_nick(&nick, &nick_to))];
            };
            vec![OutboundEvent::to_client(
                target_cid,
                privmsg_notice(hostmask, &nick_to, text),
            )]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn registered(store: &mut Store, id: ClientId, nick: &str) {
        let (tx, _rx) = mpsc::channel(8);
        let mut c = crate::client::ClientRecord::new(id, "localhost".into(), tx);
        c.nick = Some(nick.to_string());
        c.user = Some(nick.to_string());
        c.password_ok = true;
        c.registered = true;
        store.attach(c);
        store.nicks.insert(nick.to_string(), id);
    }

    #[test]
    fn direct_message_goes_only_to_addressee() {
        let mut s = Store::new();
        registered(&mut s, 1, "alice");
        registered(&mut s, 2, "bob");
        let events = handle_privmsg(&s, 1, &["bob".to_string(), "hi".to_string()]);
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], OutboundEvent::ToClient(2, _)));
    }

    #[test]
    fn channel_message_excludes_sender() {
        let mut s = Store::new();
        registered(&mut s, 1, "alice");
        registered(&mut s, 2, "bob");
        s.channel_join(1, "#x");
        s.channel_join(2, "#x");
        let events = handle_privmsg(&s, 1, &["#x".to_string(), "hi".to_string()]);
        assert_eq!(events.len(), 1);
        match &events[0] {
            OutboundEvent::ToChannel { recipients, exclude, .. } => {
                assert_eq!(*exclude, Some(1));
                assert_eq!(recipients, &vec![1, 2]);
            }
            _ => panic!("expected ToChannel"),
        }
    }

    #[test]
    fn unknown_nick_yields_401() {
        let mut s = Store::new();
        registered(&mut s, 1, "alice");
        let events = handle_privmsg(&s, 1, &["ghost".to_string(), "hi".to_string()]);
        assert_eq!(events.len(), 1);
    }
}
