//! Per-connection byte plumbing. These tasks never touch `Store`: the
//! reader frames and forwards lines to the hub, the writer drains the
//! outbound queue the hub assigned to this connection. All state lives in
//! the hub (see `hub.rs`).

use log::{debug, warn};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;

use crate::constants::INBOUND_BUFFER_CAP;
use crate::framing::{FeedResult, LineFramer};
use crate::hub::HubMessage;
use crate::types::ClientId;

/// Accepts one connection: spawns its reader and writer halves, registers
/// it with the hub, and returns once both halves finish.
pub async fn handle_connection(socket: TcpStream, cid: ClientId, to_hub: mpsc::Sender<HubMessage>) {
    let host = socket
        .peer_addr()
        .map(|a| a.ip().to_string())
        .unwrap_or_else(|_| "unknown".to_string());
    let (outbound_tx, outbound_rx) = mpsc::channel::<String>(64);

    let record = crate::client::ClientRecord::new(cid, host, outbound_tx);
    if to_hub.send(HubMessage::Connect(record)).await.is_err() {
        return;
    }

    let (read_half, write_half) = socket.into_split();
    let writer = tokio::spawn(writer_task(write_half, outbound_rx));
    let reader = reader_task(read_half, cid, to_hub.clone()).await;
    let _ = reader;
    writer.abort();
    let _ = to_hub.send(HubMessage::Disconnect(cid)).await;
}

async fn reader_task(
    mut read_half: tokio::net::tcp::OwnedReadHalf,
    cid: ClientId,
    to_hub: mpsc::Sender<HubMessage>,
) {
    let mut framer = LineFramer::new();
    let mut buf = [0u8; 4096];
    loop {
        let n = match read_half.read(&mut buf).await {
            Ok(0) => return,
            Ok(n) => n,
            Err(e) => {
                debug!("connection {cid} read error: {e}");
                return;
            }
        };
        if framer.feed(&buf[..n]) == FeedResult::Overflow {
            warn!("connection {cid} exceeded {INBOUND_BUFFER_CAP}-byte inbound buffer, closing");
            return;
        }
        while let Some(maybe_line) = framer.next_line() {
            if let Some(line) = maybe_line {
                if to_hub.send(HubMessage::Line(cid, line)).await.is_err() {
                    return;
                }
            }
        }
    }
}

async fn writer_task(
    mut write_half: tokio::net::tcp::OwnedWriteHalf,
    mut outbound_rx: mpsc::Receiver<String>,
) {
    while let Some(line) = outbound_rx.recv().await {
        let mut framed = line.into_bytes();
        framed.extend_from_slice(b"\r\n");
        if write_half.write_all(&framed).await.is_err() {
            return;
        }
    }
    let _ = write_half.shutdown().await;
}
