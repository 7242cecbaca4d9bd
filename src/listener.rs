//! Loopback handoff listener feeding the panel's message loop.

use crate::app::Message;
use iced::futures::Stream;
use iced::futures::channel::mpsc;
use lingva_core::handoff::parse_inbound;
use std::net::Ipv4Addr;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info, warn};

const REBIND_DELAY: Duration = Duration::from_secs(5);

/// Accept newline-delimited JSON messages on `127.0.0.1:port` and turn each
/// valid `translate-text` message into [`Message::HandoffReceived`].
pub fn listen(port: u16) -> impl Stream<Item = Message> {
    iced::stream::channel(16, move |mut output| async move {
        loop {
            let listener = match TcpListener::bind((Ipv4Addr::LOCALHOST, port)).await {
                Ok(listener) => listener,
                Err(err) => {
                    warn!(port, "Handoff listener unavailable: {err}");
                    tokio::time::sleep(REBIND_DELAY).await;
                    continue;
                }
            };
            info!(port, "Listening for handoff messages");

            loop {
                let stream = match listener.accept().await {
                    Ok((stream, peer)) => {
                        debug!(%peer, "Handoff connection accepted");
                        stream
                    }
                    Err(err) => {
                        warn!("Handoff accept failed: {err}");
                        break;
                    }
                };
                if !forward_lines(stream, &mut output).await {
                    return;
                }
            }
        }
    })
}

/// Returns `false` once the panel side has gone away.
async fn forward_lines(stream: TcpStream, output: &mut mpsc::Sender<Message>) -> bool {
    let mut lines = BufReader::new(stream).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                let Some(payload) = parse_inbound(&line) else {
                    continue;
                };
                if let Err(err) = output.try_send(Message::HandoffReceived(payload)) {
                    if err.is_disconnected() {
                        return false;
                    }
                    warn!("Dropping handoff message, panel is busy");
                }
            }
            Ok(None) => return true,
            Err(err) => {
                debug!("Handoff connection closed: {err}");
                return true;
            }
        }
    }
}
