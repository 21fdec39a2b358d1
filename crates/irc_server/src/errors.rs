use thiserror::Error;

/// Errors that cross a boundary the reply formatter cannot turn into a
/// textual numeric reply by itself. Handler-internal denials (bad password,
/// no such channel, ...) are represented as `IrcReply` values, not as
/// members of this enum — see `replies::IrcReply`.
#[derive(Error, Debug)]
pub enum IrcError {
    #[error("malformed message line: {0}")]
    Parse(String),

    #[error("invariant violation in state store: {0}")]
    StateInvariant(&'static str),

    #[error("outbound channel to client {0} is closed")]
    DeadClient(u64),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("startup error: {0}")]
    Startup(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
