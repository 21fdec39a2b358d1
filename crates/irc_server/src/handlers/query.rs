//! WHOIS and USERHOST: the read-only user lookups supplemented from the
//! pre-distillation source (see DESIGN.md).

use crate::events::OutboundEvent;
use crate::replies::*;
use crate::store::Store;
use crate::types::ClientId;

pub fn handle_whois(store: &Store, cid: ClientId, params: &[String]) -> Vec<OutboundEvent> {
    let nick = store.clients[&cid].display_nick().to_string();
    let Some(target_nick) = params.first() else {
        return vec![OutboundEvent::to_self(err_need_more_params(&nick, "WHOIS"))];
    };
    let Some(&target_cid) = store.nicks.get(target_nick) else {
        return vec![OutboundEvent::to_self(err_no_such_nick(&nick, target_nick))];
    };
    let target = &store.clients[&target_cid];
    let channels: Vec<String> = target.channels.iter().cloned().collect();

    vec![
        OutboundEvent::to_self(rpl_whois_user(
            &nick,
            target.display_nick(),
            target.user.as_deref().unwrap_or("?"),
            &target.host,
            target.realname.as_deref().unwrap_or(""),
        )),
        OutboundEvent::to_self(rpl_whois_server(&nick, target.display_nick())),
        OutboundEvent::to_self(rpl_whois_channels(&nick, target.display_nick(), &channels)),
        OutboundEvent::to_self(rpl_end_of_whois(&nick, target.display_nick())),
    ]
}

pub fn handle_userhost(store: &Store, cid: ClientId, params: &[String]) -> Vec<OutboundEvent> {
    let nick = store.clients[&cid].display_nick().to_string();
    let entries: Vec<String> = params
        .iter()
        .take(5)
        .filter_map(|n| store.nicks.get(n))
        .map(|&target_cid| {
            let target = &store.clients[&target_cid];
            format!(
                "{}=-{}@{}",
                target.display_nick(),
                target.user.as_deref().unwrap_or("?"),
                target.host
            )
        })
        .collect();
    vec![OutboundEvent::to_self(rpl_userhost(&nick, &entries))]
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
    fn whois_unknown_nick_yields_401() {
        let mut s = Store::new();
        registered(&mut s, 1, "alice");
        let events = handle_whois(&s, 1, &["ghost".to_string()]);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn whois_known_nick_yields_four_lines() {
        let mut s = Store::new();
        registered(&mut s, 1, "alice");
        registered(&mut s, 2, "bob");
        let events = handle_whois(&s, 1, &["bob".to_string()]);
        assert_eq!(events.len(), 4);
    }

    #[test]
    fn userhost_caps_at_five_entries() {
        let mut s = Store::new();
        registered(&mut s, 1, "alice");
        for i in 0..6 {
            registered(&mut s, 10 + i, &format!("n{i}"));
        }
        let names: Vec<String> = (0..6).map(|i| format!("n{i}")).collect();
        let events = handle_userhost(&s, 1, &names);
        assert_eq!(events.len(), 1);
        if let OutboundEvent::ToSelf(reply) = &events[0] {
            let text = reply.format();
            assert_eq!(text.matches('=').count(), 5);
        } else {
            panic!("expected ToSelf");
        }
    }
}
