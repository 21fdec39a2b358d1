//! One module per command family. Each function takes `(&mut Store,
//! ClientId, &[String])` and returns the `OutboundEvent`s the hub should
//! deliver; see `dispatcher.rs` for the command-to-handler mapping.

pub mod channel_ops;
pub mod messaging;
pub mod misc;
pub mod query;
