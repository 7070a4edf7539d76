//! Scripted IRC server for chat connection tests.

#![allow(dead_code)]

use futures_util::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio_util::codec::{Framed, LinesCodec};

/// Listens on an ephemeral local port; one [`FakeIrcPeer`] per accepted client.
pub struct FakeIrcServer {
    listener: TcpListener,
}

impl FakeIrcServer {
    pub async fn bind() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        Self { listener }
    }

    pub fn addr(&self) -> SocketAddr {
        self.listener.local_addr().unwrap()
    }

    pub async fn accept(&self) -> FakeIrcPeer {
        let (stream, _) = tokio::time::timeout(Duration::from_secs(5), self.listener.accept())
            .await
            .expect("client did not connect")
            .unwrap();
        FakeIrcPeer {
            framed: Framed::new(stream, LinesCodec::new()),
        }
    }
}

pub struct FakeIrcPeer {
    framed: Framed<TcpStream, LinesCodec>,
}

impl FakeIrcPeer {
    /// Next line from the client, without its terminator.
    pub async fn recv(&mut self) -> String {
        let line = tokio::time::timeout(Duration::from_secs(5), self.framed.next())
            .await
            .expect("timed out waiting for client line")
            .expect("client closed the connection")
            .unwrap();
        line.trim_end_matches('\r').to_string()
    }

    pub async fn send(&mut self, line: &str) {
        self.framed.send(format!("{line}\r")).await.unwrap();
    }

    /// Skip client lines until one starts with `prefix`.
    pub async fn expect_prefix(&mut self, prefix: &str) -> String {
        loop {
            let line = self.recv().await;
            if line.starts_with(prefix) {
                return line;
            }
        }
    }
}
