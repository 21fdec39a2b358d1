//! The hub's record of one connection: registration substate, channel
//! memberships, and the outbound handle used to push formatted lines back
//! to that connection's writer task.

use std::collections::HashSet;
use tokio::sync::mpsc::Sender;

use crate::types::{ChannelName, ClientId};

#[derive(Debug)]
pub struct ClientRecord {
    pub id: ClientId,
    pub host: String,
    pub password_ok: bool,
    pub nick: Option<String>,
    pub user: Option<String>,
    pub realname: Option<String>,
    pub registered: bool,
    pub channels: HashSet<ChannelName>,
    /// Formatted lines (no trailing CRLF) destined for this connection's
    /// socket, drained by its writer task.
    pub outbound: Sender<String>,
}

impl ClientRecord {
    pub fn new(id: ClientId, host: String, outbound: Sender<String>) -> Self {
        ClientRecord {
            id,
            host,
            password_ok: false,
            nick: None,
            user: None,
            realname: None,
            registered: false,
            channels: HashSet::new(),
            outbound,
        }
    }

    /// The nickname to use in replies before registration completes.
    pub fn display_nick(&self) -> &str {
        self.nick.as_deref().unwrap_or("*")
    }

    pub fn hostmask(&self) -> crate::replies::Hostmask {
        crate::replies::Hostmask {
            nick: self.nick.clone().unwrap_or_else(|| "*".to_string()),
            user: self.user.clone().unwrap_or_default(),
            host: self.host.clone(),
        }
    }

    /// Flips to REGISTERED iff all three preconditions hold; returns `true`
    /// exactly on the transition (so the caller sends the welcome burst
    /// once).
    pub fn try_complete_registration(&mut self) -> bool {
        if self.registered {
            return false;
        }
        if self.password_ok && self.nick.is_some() && self.user.is_some() {
            self.registered = true;
            true
        } else {
            false
        }
    }
}

pub fn is_valid_nickname(nick: &str) -> bool {
    use crate::constants::NICKNAME_MAX_LEN;
    if nick.is_empty() || nick.len() > NICKNAME_MAX_LEN {
        return false;
    }
    let mut chars = nick.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_ascii_alphabetic() {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || "-_[]{}\\|".contains(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_too_long_nickname() {
        assert!(!is_valid_nickname("abcdefghij"));
        assert!(is_valid_nickname("abcdefghi"));
    }

    #[test]
    fn rejects_digit_first() {
        assert!(!is_valid_nickname("1abc"));
    }

    #[test]
    fn accepts_special_chars() {
        assert!(is_valid_nickname("a-_[]{}\\|"));
    }
}
