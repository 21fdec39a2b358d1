//! Numeric reply codes and fixed text this server emits.
//!
//! Numbers and canonical text come from RFC 1459 / RFC 2812 section 5.

pub const SERVER_NAME: &str = "A_DreamServ";
pub const SERVER_VERSION: &str = "1.0.0";

pub const NICKNAME_MAX_LEN: usize = 9;
pub const INBOUND_BUFFER_CAP: usize = 8 * 1024;

// 001-004: welcome burst
pub const RPL_WELCOME: u16 = 1;
pub const RPL_YOURHOST: u16 = 2;
pub const RPL_CREATED: u16 = 3;
pub const RPL_MYINFO: u16 = 4;

pub const RPL_UMODEIS: u16 = 221;
pub const RPL_USERHOST: u16 = 302;

pub const RPL_WHOISUSER: u16 = 311;
pub const RPL_WHOISSERVER: u16 = 312;
pub const RPL_ENDOFWHOIS: u16 = 318;
pub const RPL_WHOISCHANNELS: u16 = 319;

pub const RPL_ENDOFWHO: u16 = 315;
pub const RPL_LISTSTART: u16 = 321;
pub const RPL_LIST: u16 = 322;
pub const RPL_LISTEND: u16 = 323;
pub const RPL_CHANNELMODEIS: u16 = 324;
pub const RPL_NOTOPIC: u16 = 331;
pub const RPL_TOPIC: u16 = 332;
pub const RPL_INVITING: u16 = 341;
pub const RPL_WHOREPLY: u16 = 352;
pub const RPL_NAMREPLY: u16 = 353;
pub const RPL_ENDOFNAMES: u16 = 366;
pub const RPL_MOTD: u16 = 372;
pub const RPL_MOTDSTART: u16 = 375;
pub const RPL_ENDOFMOTD: u16 = 376;

pub const ERR_NOSUCHNICK: u16 = 401;
pub const ERR_NOSUCHCHANNEL: u16 = 403;
pub const ERR_NOORIGIN: u16 = 409;
pub const ERR_UNKNOWNCOMMAND: u16 = 421;
pub const ERR_NONICKNAMEGIVEN: u16 = 431;
pub const ERR_ERRONEUSNICKNAME: u16 = 432;
pub const ERR_NICKNAMEINUSE: u16 = 433;
pub const ERR_USERNOTINCHANNEL: u16 = 441;
pub const ERR_NOTONCHANNEL: u16 = 442;
pub const ERR_USERONCHANNEL: u16 = 443;
pub const ERR_NOTREGISTERED: u16 = 451;
pub const ERR_NEEDMOREPARAMS: u16 = 461;
pub const ERR_ALREADYREGISTRED: u16 = 462;
pub const ERR_PASSWDMISMATCH: u16 = 464;
pub const ERR_CHANNELISFULL: u16 = 471;
pub const ERR_INVITEONLYCHAN: u16 = 473;
pub const ERR_BADCHANNELKEY: u16 = 475;
pub const ERR_UMODEUNKNOWNFLAG: u16 = 501;
pub const ERR_USERSDONTMATCH: u16 = 502;
pub const ERR_CHANOPRIVSNEEDED: u16 = 482;

pub const ERR_UNKNOWNCOMMAND_STR: &str = "Unknown command";
pub const ERR_NEEDMOREPARAMS_STR: &str = "Not enough parameters";
pub const ERR_NOTREGISTERED_STR: &str = "You have not registered";
pub const ERR_NICKNAMEINUSE_STR: &str = "Nickname is already in use";
pub const ERR_NONICKNAMEGIVEN_STR: &str = "No nickname given";
pub const ERR_ERRONEUSNICKNAME_STR: &str = "Erroneous nickname";
pub const ERR_ALREADYREGISTRED_STR: &str = "You may not reregister";
pub const ERR_PASSWDMISMATCH_STR: &str = "Password incorrect";
pub const ERR_PASSWDREQUIRED_STR: &str = "Password required";
pub const ERR_NOORIGIN_STR: &str = "No origin specified";
pub const ERR_NOSUCHNICK_STR: &str = "No such nick/channel";
pub const ERR_NOSUCHCHANNEL_STR: &str = "No such channel";
pub const ERR_NOTONCHANNEL_STR: &str = "You're not on that channel";
pub const ERR_USERONCHANNEL_STR: &str = "is already on channel";
pub const ERR_USERNOTINCHANNEL_STR: &str = "They aren't on that channel";
pub const ERR_CHANOPRIVSNEEDED_STR: &str = "You're not channel operator";
pub const ERR_CHANNELISFULL_STR: &str = "Cannot join channel (+l)";
pub const ERR_INVITEONLYCHAN_STR: &str = "Cannot join channel (+i)";
pub const ERR_BADCHANNELKEY_STR: &str = "Cannot join channel (+k)";
pub const ERR_UMODEUNKNOWNFLAG_STR: &str = "Unknown MODE flag";
pub const ERR_USERSDONTMATCH_STR: &str = "Cannot change mode for other users";
pub const RPL_NOTOPIC_STR: &str = "No topic is set";
pub const RPL_ENDOFNAMES_STR: &str = "End of NAMES list";
pub const RPL_ENDOFWHO_STR: &str = "End of WHO list";
pub const RPL_ENDOFWHOIS_STR: &str = "End of WHOIS list";
pub const RPL_LISTEND_STR: &str = "End of LIST";
pub const RPL_MOTDSTART_STR: &str = "Message of the day";
pub const RPL_ENDOFMOTD_STR: &str = "End of MOTD command";
pub const QUIT_DEFAULT_REASON: &str = "Client disconnected";
