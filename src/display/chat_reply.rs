//! Single-item output as a chat reply.

use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use nonzero_ext::nonzero;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::Publisher;
use crate::content::{ContentItem, Headline};
use lexicard_irc::encode;

/// Twitch drops messages longer than 500 characters.
const MAX_REPLY_CHARS: usize = 480;

/// Publishes one item per lookup as a PRIVMSG to the configured channel.
///
/// Lines are handed to the chat connection's outbound queue; replies are
/// paced so the account stays under Twitch's message rate.
pub struct ChatReplyPublisher {
    channel: String,
    outbound: mpsc::Sender<String>,
    limiter: DefaultDirectRateLimiter,
}

impl ChatReplyPublisher {
    pub fn new(
        channel: &str,
        outbound: mpsc::Sender<String>,
        reply_interval: std::time::Duration,
    ) -> Self {
        let quota =
            Quota::with_period(reply_interval).unwrap_or_else(|| Quota::per_second(nonzero!(1u32)));
        Self {
            channel: encode::channel_name(channel),
            outbound,
            limiter: RateLimiter::direct(quota),
        }
    }
}

/// `word /pron/ (category): text`, cut to fit one chat message.
pub fn format_reply(headline: &Headline, item: &ContentItem) -> String {
    let mut reply = headline.word.clone();
    if let Some(ref pronunciation) = headline.pronunciation {
        reply.push(' ');
        reply.push_str(pronunciation);
    }
    if !item.category.is_empty() {
        reply.push_str(" (");
        reply.push_str(&item.category);
        reply.push(')');
    }
    reply.push_str(": ");
    reply.push_str(&item.text);

    if reply.chars().count() > MAX_REPLY_CHARS {
        let cut: String = reply.chars().take(MAX_REPLY_CHARS - 1).collect();
        reply = format!("{}…", cut.trim_end());
    }
    reply
}

#[async_trait]
impl Publisher for ChatReplyPublisher {
    async fn publish(&self, headline: &Headline, item: &ContentItem) {
        self.limiter.until_ready().await;

        let line = encode::privmsg(&self.channel, &format_reply(headline, item));
        debug!(channel = %self.channel, word = %headline.word, "Publishing chat reply");
        if self.outbound.send(line).await.is_err() {
            warn!(channel = %self.channel, "Chat connection gone, reply dropped");
        }
    }
}
