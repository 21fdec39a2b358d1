//! Maps an uppercased command token to its handler and pre-gates
//! registration. One lookup site, not a chain of `if`/`else` per command.

use crate::events::{all_to_self, OutboundEvent};
use crate::handlers::{channel_ops, messaging, misc, query};
use crate::message::ParsedMessage;
use crate::registration;
use crate::replies::*;
use crate::store::Store;
use crate::types::ClientId;

/// Commands usable before registration completes.
const PRE_REGISTRATION_COMMANDS: &[&str] = &["PASS", "NICK", "USER", "CAP", "PING", "QUIT"];

/// Dispatches one already-parsed line against the store, returning the
/// events to deliver. `QUIT` is recognized here only to exempt it from the
/// registration gate; the hub handles the actual teardown separately.
pub fn dispatch(store: &mut Store, cid: ClientId, msg: &ParsedMessage) -> Vec<OutboundEvent> {
    let command = msg.command.to_ascii_uppercase();
    let nick = store.clients[&cid].display_nick().to_string();

    if !PRE_REGISTRATION_COMMANDS.contains(&command.as_str()) && !store.clients[&cid].registered {
        return all_to_self(vec![err_not_registered(&nick)]);
    }

    match command.as_str() {
        "PASS" => match msg.params.first() {
            Some(p) => registration::handle_pass(store, cid, p, &store.expected_password.clone()),
            None => all_to_self(vec![err_need_more_params(&nick, "PASS")]),
        },
        "NICK" => registration::handle_nick(store, cid, msg.params.first().map(String::as_str).unwrap_or("")),
        "USER" => {
            if msg.params.len() < 4 {
                all_to_self(vec![err_need_more_params(&nick, "USER")])
            } else {
                registration::handle_user(store, cid, &msg.params[0], &msg.params[3])
            }
        }
        "CAP" => misc::handle_cap(store, cid, &msg.params),
        "PING" => misc::handle_ping(store, cid, &msg.params),
        "JOIN" => channel_ops::handle_join(store, cid, &msg.params),
        "PART" => channel_ops::handle_part(store, cid, &msg.params),
        "TOPIC" => channel_ops::handle_topic(store, cid, &msg.params),
        "NAMES" => channel_ops::handle_names(store, cid, &msg.params),
        "LIST" => channel_ops::handle_list(store, cid, &msg.params),
        "WHO" => channel_ops::handle_who(store, cid, &msg.params),
        "INVITE" => channel_ops::handle_invite(store, cid, &msg.params),
        "KICK" => channel_ops::handle_kick(store, cid, &msg.params),
        "MODE" => channel_ops::handle_mode(store, cid, &msg.params),
        "PRIVMSG" => messaging::handle_privmsg(store, cid, &msg.params),
        "NOTICE" => messaging::handle_notice(store, cid, &msg.params),
        "WHOIS" => query::handle_whois(store, cid, &msg.params),
        "USERHOST" => query::handle_userhost(store, cid, &msg.params),
        "QUIT" => Vec::new(),
        _ => all_to_self(vec![err_unknown_command(&nick, &command)]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientRecord;
    use tokio::sync::mpsc;

    fn store_with_client() -> (Store, ClientId) {
        let mut s = Store::new();
        s.expected_password = "secret".into();
        let (tx, _rx) = mpsc::channel(8);
        s.attach(ClientRecord::new(1, "localhost".into(), tx));
        (s, 1)
    }

    #[test]
    fn gated_command_before_registration_yields_451() {
        let (mut s, cid) = store_with_client();
        let msg = ParsedMessage {
            prefix: None,
            command: "JOIN".into(),
            params: vec!["#x".into()],
        };
        let events = dispatch(&mut s, cid, &msg);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn unknown_command_yields_421() {
        let (mut s, cid) = store_with_client();
        let msg = ParsedMessage {
            prefix: None,
            command: "BOGUS".into(),
            params: vec![],
        };
        let events = dispatch(&mut s, cid, &msg);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn full_registration_then_join_succeeds() {
        let (mut s, cid) = store_with_client();
        for (cmd, params) in [
            ("PASS", vec!["secret".to_string()]),
            ("NICK", vec!["alice".to_string()]),
            (
                "USER",
                vec!["alice".into(), "0".into(), "*".into(), "Alice".into()],
            ),
        ] {
            let msg = ParsedMessage {
                prefix: None,
                command: cmd.into(),
                params,
            };
            dispatch(&mut s, cid, &msg);
        }
        assert!(s.clients[&cid].registered);
        let msg = ParsedMessage {
            prefix: None,
            command: "JOIN".into(),
            params: vec!["#x".into()],
        };
        let events = dispatch(&mut s, cid, &msg);
        assert!(!events.is_empty());
        assert!(s.channels.contains_key("#x"));
    }
}
