//! PING and the IRCv3 CAP stub. QUIT is handled by the hub directly (it
//! needs to tear the connection down, not just produce replies) — see
//! `hub.rs`.

use crate::events::OutboundEvent;
use crate::replies::*;
use crate::store::Store;
use crate::types::ClientId;

pub fn handle_ping(store: &Store, cid: ClientId, params: &[String]) -> Vec<OutboundEvent> {
    let nick = store.clients[&cid].display_nick().to_string();
    match params.first() {
        Some(token) => vec![OutboundEvent::to_self(pong(token))],
        None => vec![OutboundEvent::to_self(err_no_origin(&nick))],
    }
}

pub fn handle_cap(store: &Store, cid: ClientId, params: &[String]) -> Vec<OutboundEvent> {
    let nick = store.clients[&cid].display_nick().to_string();
    match params.first().map(|s| s.to_ascii_uppercase()).as_deref() {
        Some("LS") => vec![OutboundEvent::to_self(cap_ls(&nick))],
        Some("REQ") => vec![OutboundEvent::to_self(cap_nak(
            &nick,
            params.get(1).map(String::as_str).unwrap_or(""),
        ))],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn client(store: &mut Store, id: ClientId) {
        let (tx, _rx) = mpsc::channel(8);
        store.attach(crate::client::ClientRecord::new(id, "localhost".into(), tx));
    }

    #[test]
    fn ping_with_token_yields_matching_pong() {
        let mut s = Store::new();
        client(&mut s, 1);
        let events = handle_ping(&s, 1, &["tok".to_string()]);
        assert_eq!(events.len(), 1);
        if let OutboundEvent::ToSelf(reply) = &events[0] {
            assert!(reply.format().contains("PONG"));
            assert!(reply.format().contains("tok"));
        } else {
            panic!("expected ToSelf");
        }
    }

    #[test]
    fn ping_without_token_yields_409() {
        let mut s = Store::new();
        client(&mut s, 1);
        let events = handle_ping(&s, 1, &[]);
        assert_eq!(events.len(), 1);
    }
}
