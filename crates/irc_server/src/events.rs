//! The uniform shape every handler returns: a list of places a formatted
//! reply needs to go. `ToChannel` carries the recipient snapshot taken by
//! the handler at construction time (not re-resolved later by the hub) so
//! that a broadcast built before a PART/KICK mutation still reaches the
//! member being removed.

use crate::replies::IrcReply;
use crate::types::ClientId;

#[derive(Debug, Clone)]
pub enum OutboundEvent {
    /// Sent only to the connection that issued the command.
    ToSelf(IrcReply),
    /// Sent to one specific connection other than (or including) the caller.
    ToClient(ClientId, IrcReply),
    /// Sent to every id in `recipients` (a membership snapshot the handler
    /// already resolved), optionally skipping one id.
    ToChannel {
        recipients: Vec<ClientId>,
        reply: IrcReply,
        exclude: Option<ClientId>,
    },
}

impl OutboundEvent {
    pub fn to_self(reply: IrcReply) -> Self {
        OutboundEvent::ToSelf(reply)
    }

    pub fn to_client(cid: ClientId, reply: IrcReply) -> Self {
        OutboundEvent::ToClient(cid, reply)
    }

    pub fn to_members(recipients: Vec<ClientId>, reply: IrcReply) -> Self {
        OutboundEvent::ToChannel {
            recipients,
            reply,
            exclude: None,
        }
    }

    pub fn to_members_except(recipients: Vec<ClientId>, reply: IrcReply, exclude: ClientId) -> Self {
        OutboundEvent::ToChannel {
            recipients,
            reply,
            exclude: Some(exclude),
        }
    }
}

/// Wraps every reply in `replies` as a self-directed event, for handlers
/// (registration, PASS/NICK/USER errors) that never address anyone else.
pub fn all_to_self(replies: Vec<IrcReply>) -> Vec<OutboundEvent> {
    replies.into_iter().map(OutboundEvent::ToSelf).collect()
}
