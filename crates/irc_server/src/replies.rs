//! Reply formatting: numeric replies (`:server NNN target ...`) and
//! user-origin messages (`:nick!user@host CMD ...`).

use crate::constants::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hostmask {
    pub nick: String,
    pub user: String,
    pub host: String,
}

impl Hostmask {
    pub fn prefix(&self) -> String {
        format!("{}!{}@{}", self.nick, self.user, self.host)
    }
}

/// One textual reply line, without the trailing `\r\n` (added at the
/// outbound queue boundary so every reply variant stays easy to unit test).
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IrcReply {
    Numeric {
        code: u16,
        target: String,
        text: String,
    },
    FromUser {
        who: Hostmask,
        command: String,
        text: String,
    },
    Raw(String),
}

impl IrcReply {
    pub fn numeric(code: u16, target: impl Into<String>, text: impl Into<String>) -> Self {
        IrcReply::Numeric {
            code,
            target: target.into(),
            text: text.into(),
        }
    }

    pub fn from_user(who: Hostmask, command: impl Into<String>, text: impl Into<String>) -> Self {
        IrcReply::FromUser {
            who,
            command: command.into(),
            text: text.into(),
        }
    }

    pub fn format(&self) -> String {
        match self {
            IrcReply::Numeric { code, target, text } => {
                format!(":{SERVER_NAME} {code:03} {target} {text}")
            }
            IrcReply::FromUser { who, command, text } => {
                format!(":{} {command} {text}", who.prefix())
            }
            IrcReply::Raw(line) => line.clone(),
        }
    }
}

pub fn err_need_more_params(nick: &str, command: &str) -> IrcReply {
    IrcReply::numeric(
        ERR_NEEDMOREPARAMS,
        nick,
        format!("{command} :{ERR_NEEDMOREPARAMS_STR}"),
    )
}

pub fn err_not_registered(nick: &str) -> IrcReply {
    IrcReply::numeric(ERR_NOTREGISTERED, nick, format!(":{ERR_NOTREGISTERED_STR}"))
}

pub fn err_unknown_command(nick: &str, command: &str) -> IrcReply {
    IrcReply::numeric(
        ERR_UNKNOWNCOMMAND,
        nick,
        format!("{command} :{ERR_UNKNOWNCOMMAND_STR}"),
    )
}

pub fn err_no_such_nick(nick: &str, target: &str) -> IrcReply {
    IrcReply::numeric(ERR_NOSUCHNICK, nick, format!("{target} :{ERR_NOSUCHNICK_STR}"))
}

pub fn err_no_such_channel(nick: &str, channel: &str) -> IrcReply {
    IrcReply::numeric(
        ERR_NOSUCHCHANNEL,
        nick,
        format!("{channel} :{ERR_NOSUCHCHANNEL_STR}"),
    )
}

pub fn err_not_on_channel(nick: &str, channel: &str) -> IrcReply {
    IrcReply::numeric(
        ERR_NOTONCHANNEL,
        nick,
        format!("{channel} :{ERR_NOTONCHANNEL_STR}"),
    )
}

pub fn err_user_on_channel(nick: &str, target_nick: &str, channel: &str) -> IrcReply {
    IrcReply::numeric(
        ERR_USERONCHANNEL,
        nick,
        format!("{target_nick} {channel} :{ERR_USERONCHANNEL_STR}"),
    )
}

pub fn err_user_not_in_channel(nick: &str, target_nick: &str, channel: &str) -> IrcReply {
    IrcReply::numeric(
        ERR_USERNOTINCHANNEL,
        nick,
        format!("{target_nick} {channel} :{ERR_USERNOTINCHANNEL_STR}"),
    )
}

pub fn err_chanop_privs_needed(nick: &str, channel: &str) -> IrcReply {
    IrcReply::numeric(
        ERR_CHANOPRIVSNEEDED,
        nick,
        format!("{channel} :{ERR_CHANOPRIVSNEEDED_STR}"),
    )
}

pub fn err_channel_is_full(nick: &str, channel: &str) -> IrcReply {
    IrcReply::numeric(
        ERR_CHANNELISFULL,
        nick,
        format!("{channel} :{ERR_CHANNELISFULL_STR}"),
    )
}

pub fn err_invite_only_chan(nick: &str, channel: &str) -> IrcReply {
    IrcReply::numeric(
        ERR_INVITEONLYCHAN,
        nick,
        format!("{channel} :{ERR_INVITEONLYCHAN_STR}"),
    )
}

pub fn err_bad_channel_key(nick: &str, channel: &str) -> IrcReply {
    IrcReply::numeric(
        ERR_BADCHANNELKEY,
        nick,
        format!("{channel} :{ERR_BADCHANNELKEY_STR}"),
    )
}

pub fn err_no_origin(nick: &str) -> IrcReply {
    IrcReply::numeric(ERR_NOORIGIN, nick, format!(":{ERR_NOORIGIN_STR}"))
}

pub fn err_passwd_mismatch(nick: &str) -> IrcReply {
    IrcReply::numeric(ERR_PASSWDMISMATCH, nick, format!(":{ERR_PASSWDMISMATCH_STR}"))
}

pub fn err_password_required(nick: &str) -> IrcReply {
    IrcReply::numeric(
        ERR_PASSWDMISMATCH,
        nick,
        format!(":{ERR_PASSWDREQUIRED_STR}"),
    )
}

pub fn err_already_registered(nick: &str) -> IrcReply {
    IrcReply::numeric(
        ERR_ALREADYREGISTRED,
        nick,
        format!(":{ERR_ALREADYREGISTRED_STR}"),
    )
}

pub fn err_no_nickname_given(nick: &str) -> IrcReply {
    IrcReply::numeric(
        ERR_NONICKNAMEGIVEN,
        nick,
        format!(":{ERR_NONICKNAMEGIVEN_STR}"),
    )
}

pub fn err_erroneus_nickname(nick: &str, attempted: &str) -> IrcReply {
    IrcReply::numeric(
        ERR_ERRONEUSNICKNAME,
        nick,
        format!("{attempted} :{ERR_ERRONEUSNICKNAME_STR}"),
    )
}

pub fn err_nickname_in_use(nick: &str, attempted: &str) -> IrcReply {
    IrcReply::numeric(
        ERR_NICKNAMEINUSE,
        nick,
        format!("{attempted} :{ERR_NICKNAMEINUSE_STR}"),
    )
}

pub fn welcome_burst(nick: &str, user: &str, host: &str) -> Vec<IrcReply> {
    vec![
        IrcReply::numeric(
            RPL_WELCOME,
            nick,
            format!(":Welcome to the Internet Relay Network {nick}!{user}@{host}"),
        ),
        IrcReply::numeric(
            RPL_YOURHOST,
            nick,
            format!(":Your host is {SERVER_NAME}, running version {SERVER_VERSION}"),
        ),
        IrcReply::numeric(RPL_CREATED, nick, ":This server was created today"),
        IrcReply::numeric(
            RPL_MYINFO,
            nick,
            format!("{SERVER_NAME} {SERVER_VERSION} o itkl"),
        ),
        IrcReply::numeric(RPL_MOTDSTART, nick, format!(":- {SERVER_NAME} {RPL_MOTDSTART_STR}")),
        IrcReply::numeric(RPL_MOTD, nick, ":- Welcome."),
        IrcReply::numeric(RPL_ENDOFMOTD, nick, format!(":{RPL_ENDOFMOTD_STR}")),
    ]
}

pub fn rpl_topic(nick: &str, channel: &str, topic: &str) -> IrcReply {
    IrcReply::numeric(RPL_TOPIC, nick, format!("{channel} :{topic}"))
}

pub fn rpl_no_topic(nick: &str, channel: &str) -> IrcReply {
    IrcReply::numeric(RPL_NOTOPIC, nick, format!("{channel} :{RPL_NOTOPIC_STR}"))
}

pub fn rpl_names_reply(nick: &str, channel: &str, names: &[String]) -> IrcReply {
    IrcReply::numeric(RPL_NAMREPLY, nick, format!("= {channel} :{}", names.join(" ")))
}

pub fn rpl_end_of_names(nick: &str, channel: &str) -> IrcReply {
    IrcReply::numeric(
        RPL_ENDOFNAMES,
        nick,
        format!("{channel} :{RPL_ENDOFNAMES_STR}"),
    )
}

pub fn rpl_channel_mode_is(nick: &str, channel: &str, modes: &str, args: &[String]) -> IrcReply {
    let mut text = format!("{channel} {modes}");
    for a in args {
        text.push(' ');
        text.push_str(a);
    }
    IrcReply::numeric(RPL_CHANNELMODEIS, nick, text)
}

pub fn rpl_inviting(nick: &str, target_nick: &str, channel: &str) -> IrcReply {
    IrcReply::numeric(RPL_INVITING, nick, format!("{target_nick} {channel}"))
}

pub fn rpl_who_reply(
    asker: &str,
    channel: &str,
    user: &str,
    host: &str,
    nick: &str,
    realname: &str,
) -> IrcReply {
    IrcReply::numeric(
        RPL_WHOREPLY,
        asker,
        format!("{channel} {user} {host} {SERVER_NAME} {nick} H :0 {realname}"),
    )
}

pub fn rpl_end_of_who(asker: &str, mask: &str) -> IrcReply {
    IrcReply::numeric(RPL_ENDOFWHO, asker, format!("{mask} :{RPL_ENDOFWHO_STR}"))
}

pub fn rpl_list_start(asker: &str) -> IrcReply {
    IrcReply::numeric(RPL_LISTSTART, asker, "Channel :Users  Name")
}

pub fn rpl_list_item(asker: &str, channel: &str, count: usize, topic: &str) -> IrcReply {
    let topic = if topic.is_empty() { "No topic" } else { topic };
    IrcReply::numeric(RPL_LIST, asker, format!("{channel} {count} :{topic}"))
}

pub fn rpl_list_end(asker: &str) -> IrcReply {
    IrcReply::numeric(RPL_LISTEND, asker, format!(":{RPL_LISTEND_STR}"))
}

pub fn rpl_whois_user(asker: &str, nick: &str, user: &str, host: &str, realname: &str) -> IrcReply {
    IrcReply::numeric(
        RPL_WHOISUSER,
        asker,
        format!("{nick} {user} {host} * :{realname}"),
    )
}

pub fn rpl_whois_server(asker: &str, nick: &str) -> IrcReply {
    IrcReply::numeric(
        RPL_WHOISSERVER,
        asker,
        format!("{nick} {SERVER_NAME} :IRC server"),
    )
}

pub fn rpl_whois_channels(asker: &str, nick: &str, channels: &[String]) -> IrcReply {
    IrcReply::numeric(RPL_WHOISCHANNELS, asker, format!("{nick} :{}", channels.join(" ")))
}

pub fn rpl_end_of_whois(asker: &str, nick: &str) -> IrcReply {
    IrcReply::numeric(RPL_ENDOFWHOIS, asker, format!("{nick} :{RPL_ENDOFWHOIS_STR}"))
}

pub fn rpl_userhost(asker: &str, entries: &[String]) -> IrcReply {
    IrcReply::numeric(RPL_USERHOST, asker, format!(":{}", entries.join(" ")))
}

pub fn join_notice(who: Hostmask, channel: &str) -> IrcReply {
    IrcReply::from_user(who, "JOIN", format!(":{channel}"))
}

pub fn part_notice(who: Hostmask, channel: &str, reason: &str) -> IrcReply {
    IrcReply::from_user(who, "PART", format!("{channel} :{reason}"))
}

pub fn quit_notice(who: Hostmask, reason: &str) -> IrcReply {
    IrcReply::from_user(who, "QUIT", format!(":{reason}"))
}

pub fn nick_notice(who: Hostmask, new_nick: &str) -> IrcReply {
    IrcReply::from_user(who, "NICK", format!(":{new_nick}"))
}

pub fn privmsg_notice(who: Hostmask, target: &str, text: &str) -> IrcReply {
    IrcReply::from_user(who, "PRIVMSG", format!("{target} :{text}"))
}

pub fn topic_notice(who: Hostmask, channel: &str, topic: &str) -> IrcReply {
    IrcReply::from_user(who, "TOPIC", format!("{channel} :{topic}"))
}

pub fn kick_notice(who: Hostmask, channel: &str, target_nick: &str, reason: &str) -> IrcReply {
    IrcReply::from_user(who, "KICK", format!("{channel} {target_nick} :{reason}"))
}

pub fn invite_notice(who: Hostmask, target_nick: &str, channel: &str) -> IrcReply {
    IrcReply::from_user(who, "INVITE", format!("{target_nick} :{channel}"))
}

pub fn mode_notice(who: Hostmask, channel: &str, modechanges: &str, params: &[String]) -> IrcReply {
    let mut text = format!("{channel} {modechanges}");
    for p in params {
        text.push(' ');
        text.push_str(p);
    }
    IrcReply::from_user(who, "MODE", text)
}

pub fn pong(token: &str) -> IrcReply {
    IrcReply::Raw(format!(":{SERVER_NAME} PONG {SERVER_NAME} :{token}"))
}

pub fn cap_ls(nick: &str) -> IrcReply {
    IrcReply::Raw(format!("CAP {nick} LS :"))
}

pub fn cap_nak(nick: &str, caps: &str) -> IrcReply {
    IrcReply::Raw(format!("CAP {nick} NAK :{caps}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_has_server_prefix() {
        let r = err_not_registered("*");
        assert_eq!(r.format(), format!(":{SERVER_NAME} 451 * :You have not registered"));
    }

    #[test]
    fn user_origin_has_hostmask_prefix() {
        let who = Hostmask {
            nick: "alice".into(),
            user: "alice".into(),
            host: "localhost".into(),
        };
        let r = join_notice(who, "#x");
        assert_eq!(r.format(), ":alice!alice@localhost JOIN :#x");
    }

    #[test]
    fn welcome_burst_has_seven_lines() {
        assert_eq!(welcome_burst("alice", "alice", "localhost").len(), 7);
    }
}
