//! Twitch IRC connection.
//!
//! ```text
//! connect ─▶ CAP REQ / PASS / NICK / JOIN
//!              │
//!              ▼
//!        tokio::select! ◀──────────────────────────┐
//!          │ inbound line          │ outbound line │
//!          ▼                       ▼               │
//!   PING ─▶ PONG            write to socket ───────┘
//!   PRIVMSG ─▶ spawn session.on_message
//!   RECONNECT / EOF ─▶ return, reconnect after delay
//! ```

use futures_util::{SinkExt, StreamExt};
use lexicard_irc::{Line, encode};
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_util::codec::{Framed, LinesCodec};
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info, warn};

use super::TwitchMessage;
use crate::command::ChatMessage;
use crate::config::ChatConfig;
use crate::error::ChatError;
use crate::metrics;
use crate::session::Session;
use crate::telemetry::spans;

/// Longest accepted inbound line; tagged Twitch lines stay well below.
const MAX_LINE_LENGTH: usize = 8192;

const CAPABILITIES: &[&str] = &["twitch.tv/tags", "twitch.tv/commands"];

type ChatFramed = Framed<TcpStream, LinesCodec>;

/// Write one line with its CRLF terminator.
async fn send_line(framed: &mut ChatFramed, line: &str) -> Result<(), ChatError> {
    framed.send(format!("{}\r", line)).await?;
    Ok(())
}

/// Connect, log in and serve one connection until it ends.
///
/// Returns `Ok(())` when the server asks for a reconnect and
/// [`ChatError::Closed`] when it closes the socket.
pub async fn run_once(
    config: &ChatConfig,
    session: &Arc<Session>,
    outbound: &mut mpsc::Receiver<String>,
) -> Result<(), ChatError> {
    let channel = encode::channel_name(&config.channel);
    let stream = TcpStream::connect(&config.server).await?;
    let mut framed = Framed::new(stream, LinesCodec::new_with_max_length(MAX_LINE_LENGTH));

    send_line(&mut framed, &encode::cap_req(CAPABILITIES)).await?;
    if let Some(ref token) = config.token {
        send_line(&mut framed, &encode::pass(token)).await?;
    }
    send_line(&mut framed, &encode::nick(&config.nick)).await?;
    send_line(&mut framed, &encode::join(&channel)).await?;
    info!(server = %config.server, nick = %config.nick, "Connected to chat");
    metrics::record_chat_connection("connected");

    loop {
        tokio::select! {
            inbound = framed.next() => {
                let raw = match inbound {
                    Some(Ok(raw)) => raw,
                    Some(Err(e)) => return Err(e.into()),
                    None => return Err(ChatError::Closed),
                };
                let line = match Line::parse(&raw) {
                    Ok(line) => line,
                    Err(e) => {
                        debug!(error = %e, raw = %raw, "Skipping unparsable line");
                        continue;
                    }
                };

                match line.command() {
                    "PING" => {
                        let token = line.param(0).unwrap_or("tmi.twitch.tv");
                        send_line(&mut framed, &encode::pong(token)).await?;
                    }
                    "RECONNECT" => {
                        info!("Server requested reconnect");
                        return Ok(());
                    }
                    "PRIVMSG" => {
                        if line.param(0).is_some_and(|target| target.eq_ignore_ascii_case(&channel)) {
                            dispatch(session, &line);
                        }
                    }
                    "NOTICE" => {
                        warn!(notice = line.trailing().unwrap_or_default(), "Chat notice");
                    }
                    "JOIN" if line.source_nickname().is_some_and(|n| n.eq_ignore_ascii_case(&config.nick)) => {
                        info!("Joined channel");
                    }
                    _ => {}
                }
            }

            Some(out) = outbound.recv() => {
                debug!(line = %out, "Sending chat line");
                send_line(&mut framed, &out).await?;
            }
        }
    }
}

/// Run the session cycle for a PRIVMSG on its own task.
///
/// Triggers arriving while a cycle runs are then dropped by the session
/// instead of waiting behind it.
fn dispatch(session: &Arc<Session>, line: &Line<'_>) {
    let Some(msg) = TwitchMessage::from_line(line) else {
        return;
    };
    let session = Arc::clone(session);
    tokio::spawn(
        async move {
            let outcome = session.on_message(&msg).await;
            debug!(user = %msg.username(), outcome = outcome.label(), "Message handled");
        }
        .in_current_span(),
    );
}

/// Keep a chat connection alive until `shutdown` fires.
pub async fn run(
    config: ChatConfig,
    session: Arc<Session>,
    mut outbound: mpsc::Receiver<String>,
    shutdown: CancellationToken,
) {
    let span = spans::chat(&encode::channel_name(&config.channel));
    async move {
        loop {
            let result = tokio::select! {
                biased;
                _ = shutdown.cancelled() => return,
                result = run_once(&config, &session, &mut outbound) => result,
            };
            match result {
                Ok(()) => {}
                Err(ChatError::Closed) => info!("Chat connection closed"),
                Err(e) => {
                    metrics::record_chat_connection("error");
                    warn!(error = %e, "Chat connection failed");
                }
            }

            let delay = config.reconnect_delay();
            info!(delay = ?delay, "Reconnecting to chat");
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => return,
                _ = tokio::time::sleep(delay) => {}
            }
        }
    }
    .instrument(span)
    .await
}
