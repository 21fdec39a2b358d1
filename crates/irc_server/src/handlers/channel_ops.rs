//! JOIN, PART, MODE, TOPIC, NAMES, LIST, INVITE, KICK, WHO.
//!
//! Every handler takes the already-tokenized parameter list (see
//! `message::ParsedMessage`) and the caller's id, and returns the events
//! the hub must deliver. None of these touch a socket directly.

use crate::constants::*;
use crate::events::OutboundEvent;
use crate::replies::*;
use crate::store::Store;
use crate::types::ClientId;

fn normalize_channel(raw: &str) -> String {
    if raw.starts_with('#') {
        raw.to_string()
    } else {
        format!("#{raw}")
    }
}

fn names_list(store: &Store, channel: &str) -> Vec<String> {
    let chan = &store.channels[channel];
    chan.members
        .iter()
        .map(|cid| {
            let nick = store.clients[cid].display_nick();
            if chan.is_operator(*cid) {
                format!("@{nick}")
            } else {
                nick.to_string()
            }
        })
        .collect()
}

pub fn handle_join(store: &mut Store, cid: ClientId, params: &[String]) -> Vec<OutboundEvent> {
    let nick = store.clients[&cid].display_nick().to_string();
    if params.is_empty() {
        return vec![OutboundEvent::to_self(err_need_more_params(&nick, "JOIN"))];
    }
    let channels: Vec<String> = params[0].split(',').map(normalize_channel).collect();
    let keys: Vec<Option<&str>> = params
        .get(1)
        .map(|k| k.split(',').map(Some).collect())
        .unwrap_or_default();

    let mut out = Vec::new();
    for (i, channel) in channels.iter().enumerate() {
        let key = keys.get(i).copied().flatten();
        out.extend(join_one(store, cid, channel, key));
    }
    out
}

fn join_one(store: &mut Store, cid: ClientId, channel: &str, key: Option<&str>) -> Vec<OutboundEvent> {
    let nick = store.clients[&cid].display_nick().to_string();
    if store.clients[&cid].channels.contains(channel) {
        return Vec::new();
    }

    if let Some(chan) = store.channels.get(channel) {
        if chan.invite_only && !chan.invited.contains(&cid) {
            return vec![OutboundEvent::to_self(err_invite_only_chan(&nick, channel))];
        }
        if let Some(limit) = chan.user_limit {
            if chan.members.len() >= limit {
                return vec![OutboundEvent::to_self(err_channel_is_full(&nick, channel))];
            }
        }
        if let Some(required) = &chan.key {
            if !required.is_empty() && key != Some(required.as_str()) {
                return vec![OutboundEvent::to_self(err_bad_channel_key(&nick, channel))];
            }
        }
    }

    store.channel_join(cid, channel);
    if let Some(chan) = store.channels.get_mut(channel) {
        chan.invited.remove(&cid);
    }

    let hostmask = store.clients[&cid].hostmask();
    let recipients = store.channels[channel].members.clone();
    let mut out = vec![OutboundEvent::to_members(recipients, join_notice(hostmask, channel))];

    let names = names_list(store, channel);
    out.push(OutboundEvent::to_self(rpl_names_reply(&nick, channel, &names)));
    out.push(OutboundEvent::to_self(rpl_end_of_names(&nick, channel)));
    out
}

pub fn handle_part(store: &mut Store, cid: ClientId, params: &[String]) -> Vec<OutboundEvent> {
    let nick = store.clients[&cid].display_nick().to_string();
    if params.is_empty() {
        return vec![OutboundEvent::to_self(err_need_more_params(&nick, "PART"))];
    }
    let channel = normalize_channel(&params[0]);
    if !store.clients[&cid].channels.contains(&channel) {
        return vec![OutboundEvent::to_self(err_not_on_channel(&nick, &channel))];
    }
    let reason = params.get(1).cloned().unwrap_or_else(|| nick.clone());
    let hostmask = store.clients[&cid].hostmask();
    let recipients = store.channels[&channel].members.clone();
    let notice = part_notice(hostmask, &channel, &reason);
    let out = vec![OutboundEvent::to_members(recipients, notice)];
    store.channel_part(cid, &channel);
    out
}

pub fn handle_topic(store: &mut Store, cid: ClientId, params: &[String]) -> Vec<OutboundEvent> {
    let nick = store.clients[&cid].display_nick().to_string();
    if params.is_empty() {
        return vec![OutboundEvent::to_self(err_need_more_params(&nick, "TOPIC"))];
    }
    let channel = normalize_channel(&params[0]);
    let Some(chan) = store.channels.get(&channel) else {
        return vec![OutboundEvent::to_self(err_no_such_channel(&nick, &channel))];
    };
    if !chan.is_member(cid) {
        return vec![OutboundEvent::to_self(err_not_on_channel(&nick, &channel))];
    }

    match params.get(1) {
        None => {
            if chan.topic.is_empty() {
                vec![OutboundEvent::to_self(rpl_no_topic(&nick, &channel))]
            } else {
                vec![OutboundEvent::to_self(rpl_topic(&nick, &channel, &chan.topic))]
            }
        }
        Some(topic) => {
            if chan.topic_locked && !chan.is_operator(cid) {
                return vec![OutboundEvent::to_self(err_chanop_privs_needed(&nick, &channel))];
            }
            let hostmask = store.clients[&cid].hostmask();
            let recipients = store.channels[&channel].members.clone();
            store.channels.get_mut(&channel).unwrap().topic = topic.clone();
            vec![OutboundEvent::to_members(recipients, topic_notice(hostmask, &channel, topic))]
        }
    }
}

pub fn handle_names(store: &Store, cid: ClientId, params: &[String]) -> Vec<OutboundEvent> {
    let nick = store.clients[&cid].display_nick().to_string();
    let targets: Vec<String> = if let Some(first) = params.first() {
        first.split(',').map(normalize_channel).collect()
    } else {
        store.channels.keys().cloned().collect()
    };

    let mut out = Vec::new();
    for channel in targets {
        if !store.channels.contains_key(&channel) {
            continue;
        }
        let names = names_list(store, &channel);
        out.push(OutboundEvent::to_self(rpl_names_reply(&nick, &channel, &names)));
        out.push(OutboundEvent::to_self(rpl_end_of_names(&nick, &channel)));
    }
    out
}

pub fn handle_list(store: &Store, cid: ClientId, _params: &[String]) -> Vec<OutboundEvent> {
    let nick = store.clients[&cid].display_nick().to_string();
    let mut out = vec![OutboundEvent::to_self(rpl_list_start(&nick))];
    for chan in store.channels.values() {
        out.push(OutboundEvent::to_self(rpl_list_item(
            &nick,
            &chan.name,
            chan.members.len(),
            &chan.topic,
        )));
    }
    out.push(OutboundEvent::to_self(rpl_list_end(&nick)));
    out
}

pub fn handle_who(store: &Store, cid: ClientId, params: &[String]) -> Vec<OutboundEvent> {
    let nick = store.clients[&cid].display_nick().to_string();
    let Some(mask) = params.first() else {
        return vec![OutboundEvent::to_self(rpl_end_of_who(&nick, ""))];
    };
    let channel = normalize_channel(mask);
    let Some(chan) = store.channels.get(&channel) else {
        return vec![OutboundEvent::to_self(rpl_end_of_who(&nick, mask))];
    };
    let mut out: Vec<OutboundEvent> = chan
        .members
        .iter()
        .map(|m| {
            let c = &store.clients[m];
            OutboundEvent::to_self(rpl_who_reply(
                &nick,
                &channel,
                c.user.as_deref().unwrap_or("?"),
                &c.host,
                c.display_nick(),
                c.realname.as_deref().unwrap_or(""),
            ))
        })
        .collect();
    out.push(OutboundEvent::to_self(rpl_end_of_who(&nick, mask)));
    out
}

pub fn handle_invite(store: &mut Store, cid: ClientId, params: &[String]) -> Vec<OutboundEvent> {
    let nick = store.clients[&cid].display_nick().to_string();
    if params.len() < 2 {
        return vec![OutboundEvent::to_self(err_need_more_params(&nick, "INVITE"))];
    }
    let target_nick = &params[0];
    let channel = normalize_channel(&params[1]);

    let Some(chan) = store.channels.get(&channel) else {
        return vec![OutboundEvent::to_self(err_no_such_channel(&nick, &channel))];
    };
    if !chan.is_member(cid) {
        return vec![OutboundEvent::to_self(err_not_on_channel(&nick, &channel))];
    }
    if chan.invite_only && !chan.is_operator(cid) {
        return vec![OutboundEvent::to_self(err_chanop_privs_needed(&nick, &channel))];
    }
    let Some(&target_cid) = store.nicks.get(target_nick) else {
        return vec![OutboundEvent::to_self(err_no_such_nick(&nick, target_nick))];
    };
    if chan.is_member(target_cid) {
        return vec![OutboundEvent::to_self(err_user_on_channel(&nick, target_nick, &channel))];
    }

    store.channels.get_mut(&channel).unwrap().invited.insert(target_cid);
    let hostmask = store.clients[&cid].hostmask();
    vec![
        OutboundEvent::to_client(target_cid, invite_notice(hostmask, target_nick, &channel)),
        OutboundEvent::to_self(rpl_inviting(&nick, target_nick, &channel)),
    ]
}

pub fn handle_kick(store: &mut Store, cid: ClientId, params: &[String]) -> Vec<OutboundEvent> {
    let nick = store.clients[&cid].display_nick().to_string();
    if params.len() < 2 {
        return vec![OutboundEvent::to_self(err_need_more_params(&nick, "KICK"))];
    }
    let channel = normalize_channel(&params[0]);
    let target_nick = &params[1];
    let reason = params.get(2).cloned().unwrap_or_else(|| "Kicked".to_string());

    let Some(chan) = store.channels.get(&channel) else {
        return vec![OutboundEvent::to_self(err_no_such_channel(&nick, &channel))];
    };
    if !chan.is_member(cid) {
        return vec![OutboundEvent::to_self(err_not_on_channel(&nick, &channel))];
    }
    if !chan.is_operator(cid) {
        return vec![OutboundEvent::to_self(err_chanop_privs_needed(&nick, &channel))];
    }
    let Some(&target_cid) = store.nicks.get(target_nick) else {
        return vec![OutboundEvent::to_self(err_no_such_nick(&nick, target_nick))];
    };
    if !chan.is_member(target_cid) {
        return vec![OutboundEvent::to_self(err_user_not_in_channel(&nick, target_nick, &channel))];
    }

    let hostmask = store.clients[&cid].hostmask();
    let recipients = store.channels[&channel].members.clone();
    let notice = kick_notice(hostmask, &channel, target_nick, &reason);
    let out = vec![OutboundEvent::to_members(recipients, notice)];
    store.channel_part(target_cid, &channel);
    out
}

pub fn handle_mode(store: &mut Store, cid: ClientId, params: &[String]) -> Vec<OutboundEvent> {
    let nick = store.clients[&cid].display_nick().to_string();
    if params.is_empty() {
        return vec![OutboundEvent::to_self(err_need_more_params(&nick, "MODE"))];
    }
    let target = &params[0];
    if !target.starts_with('#') {
        // User-mode target: this core implements no user modes beyond
        // what registration sets; acknowledge with a no-op read.
        return vec![OutboundEvent::to_self(IrcReply::numeric(
            RPL_UMODEIS,
            &nick,
            "+",
        ))];
    }
    let channel = normalize_channel(target);
    let Some(chan) = store.channels.get(&channel) else {
        return vec![OutboundEvent::to_self(err_no_such_channel(&nick, &channel))];
    };
    if !chan.is_member(cid) {
        return vec![OutboundEvent::to_self(err_not_on_channel(&nick, &channel))];
    }

    let Some(modestring) = params.get(1) else {
        let mut args = Vec::new();
        if let Some(key) = &chan.key {
            args.push(key.clone());
        }
        if let Some(limit) = chan.user_limit {
            args.push(limit.to_string());
        }
        return vec![OutboundEvent::to_self(rpl_channel_mode_is(
            &nick,
            &channel,
            &chan.mode_string(),
            &args,
        ))];
    };

    if !modestring.chars().any(|c| "itklo".contains(c)) {
        return Vec::new();
    }
    if !chan.is_operator(cid) {
        return vec![OutboundEvent::to_self(err_chanop_privs_needed(&nick, &channel))];
    }

    let mut extra_args = params[2..].iter();
    let mut sign = true;
    let mut applied = String::new();
    let mut applied_args: Vec<String> = Vec::new();
    let chan = store.channels.get_mut(&channel).unwrap();

    for c in modestring.chars() {
        match c {
            '+' => sign = true,
            '-' => sign = false,
            'i' => {
                chan.invite_only = sign;
                applied.push(if sign { '+' } else { '-' });
                applied.push('i');
            }
            't' => {
                chan.topic_locked = sign;
                applied.push(if sign { '+' } else { '-' });
                applied.push('t');
            }
            'k' => {
                if sign {
                    if let Some(key) = extra_args.next() {
                        chan.key = Some(key.clone());
                        applied.push('+');
                        applied.push('k');
                        applied_args.push(key.clone());
                    }
                } else {
                    chan.key = None;
                    applied.push('-');
                    applied.push('k');
                }
            }
            'l' => {
                if sign {
                    if let Some(n) = extra_args
                        .next()
                        .and_then(|s| s.parse::<usize>().ok())
                        .filter(|&n| n > 0)
                    {
                        chan.user_limit = Some(n);
                        applied.push('+');
                        applied.push('l');
                        applied_args.push(n.to_string());
                    }
                } else {
                    chan.user_limit = None;
                    applied.push('-');
                    applied.push('l');
                }
            }
            'o' => {
                if let Some(target_nick) = extra_args.next() {
                    if let Some(&target_cid) = store.nicks.get(target_nick) {
                        if chan.is_member(target_cid) {
                            if sign {
                                chan.operators.insert(target_cid);
                            } else {
                                chan.operators.remove(&target_cid);
                            }
                            applied.push(if sign { '+' } else { '-' });
                            applied.push('o');
                            applied_args.push(target_nick.clone());
                        }
                    }
                }
            }
            _ => {}
        }
    }

    if applied.is_empty() {
        return Vec::new();
    }
    let hostmask = store.clients[&cid].hostmask();
    let recipients = store.channels[&channel].members.clone();
    vec![OutboundEvent::to_members(
        recipients,
        mode_notice(hostmask, &channel, &applied, &applied_args),
    )]
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
    fn first_joiner_gets_operator_and_names_reply() {
        let mut s = Store::new();
        registered(&mut s, 1, "alice");
        let events = handle_join(&mut s, 1, &["x".to_string()]);
        assert!(s.channels.contains_key("#x"));
        assert!(s.channels["#x"].is_operator(1));
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn rejoin_is_silent_noop() {
        let mut s = Store::new();
        registered(&mut s, 1, "alice");
        handle_join(&mut s, 1, &["#x".to_string()]);
        let events = handle_join(&mut s, 1, &["#x".to_string()]);
        assert!(events.is_empty());
    }

    #[test]
    fn keyed_channel_rejects_missing_key() {
        let mut s = Store::new();
        registered(&mut s, 1, "alice");
        handle_join(&mut s, 1, &["#x".to_string()]);
        handle_mode(&mut s, 1, &["#x".to_string(), "+k".to_string(), "secret".to_string()]);
        registered(&mut s, 2, "bob");
        let events = handle_join(&mut s, 2, &["#x".to_string()]);
        assert_eq!(events.len(), 1);
        assert!(!s.channels["#x"].is_member(2));
    }

    #[test]
    fn kick_requires_operator() {
        let mut s = Store::new();
        registered(&mut s, 1, "alice");
        registered(&mut s, 2, "bob");
        handle_join(&mut s, 1, &["#x".to_string()]);
        handle_join(&mut s, 2, &["#x".to_string()]);
        let events = handle_kick(&mut s, 2, &["#x".to_string(), "alice".to_string()]);
        assert_eq!(events.len(), 1);
        assert!(s.channels["#x"].is_member(1));
    }

    #[test]
    fn mode_limit_blocks_join_at_capacity() {
        let mut s = Store::new();
        registered(&mut s, 1, "alice");
        handle_join(&mut s, 1, &["#x".to_string()]);
        handle_mode(&mut s, 1, &["#x".to_string(), "+l".to_string(), "1".to_string()]);
        registered(&mut s, 2, "bob");
        let events = handle_join(&mut s, 2, &["#x".to_string()]);
        assert_eq!(events.len(), 1);
    }
}
