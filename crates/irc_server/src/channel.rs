//! Channel state. Owned exclusively by the hub (see `hub.rs`), so plain
//! collections are used rather than the concurrent `dashmap` primitives —
//! there is never more than one mutator. Member order is preserved for
//! RPL_NAMREPLY, hence `Vec<ClientId>` rather than a hash set.

use crate::types::ClientId;
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct Channel {
    pub name: String,
    pub members: Vec<ClientId>,
    pub operators: HashSet<ClientId>,
    pub invited: HashSet<ClientId>,
    pub topic: String,
    pub key: Option<String>,
    pub user_limit: Option<usize>,
    pub invite_only: bool,
    /// Defaults to `true`: a freshly created channel locks TOPIC to
    /// operators until explicitly relaxed with `MODE -t`.
    pub topic_locked: bool,
}

impl Channel {
    pub fn new(name: impl Into<String>) -> Self {
        Channel {
            name: name.into(),
            members: Vec::new(),
            operators: HashSet::new(),
            invited: HashSet::new(),
            topic: String::new(),
            key: None,
            user_limit: None,
            invite_only: false,
            topic_locked: true,
        }
    }

    pub fn is_member(&self, cid: ClientId) -> bool {
        self.members.contains(&cid)
    }

    pub fn is_operator(&self, cid: ClientId) -> bool {
        self.operators.contains(&cid)
    }

    /// Adds `cid` to members, promoting to operator if this is the first
    /// member. Returns `false` (no-op) if already a member.
    pub fn add_member(&mut self, cid: ClientId) -> bool {
        if self.is_member(cid) {
            return false;
        }
        let first = self.members.is_empty();
        self.members.push(cid);
        if first {
            self.operators.insert(cid);
        }
        true
    }

    pub fn remove_member(&mut self, cid: ClientId) {
        self.members.retain(|&m| m != cid);
        self.operators.remove(&cid);
        self.invited.remove(&cid);
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn mode_string(&self) -> String {
        let mut s = String::from("+");
        if self.invite_only {
            s.push('i');
        }
        if self.topic_locked {
            s.push('t');
        }
        if self.key.is_some() {
            s.push('k');
        }
        if self.user_limit.is_some() {
            s.push('l');
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_member_becomes_operator() {
        let mut c = Channel::new("#x");
        assert!(c.add_member(1));
        assert!(c.is_operator(1));
        assert!(c.add_member(2));
        assert!(!c.is_operator(2));
    }

    #[test]
    fn rejoin_is_noop() {
        let mut c = Channel::new("#x");
        c.add_member(1);
        assert!(!c.add_member(1));
        assert_eq!(c.members.len(), 1);
    }

    #[test]
    fn topic_locked_defaults_true() {
        assert!(Channel::new("#x").topic_locked);
    }

    #[test]
    fn remove_last_member_empties_channel() {
        let mut c = Channel::new("#x");
        c.add_member(1);
        c.remove_member(1);
        assert!(c.is_empty());
    }
}
