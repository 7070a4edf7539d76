//! # lexicard-irc
//!
//! Minimal IRC protocol support for reading Twitch chat:
//!
//! - Zero-copy line parsing with IRCv3 tags, prefix, command and parameters
//! - IRCv3 tag value unescaping
//! - Builders for the handful of client lines a chat reader sends
//!
//! ```rust
//! use lexicard_irc::Line;
//!
//! let raw = "@badges=broadcaster/1;mod=0 :wolf!wolf@wolf.tmi.twitch.tv PRIVMSG #den :!define howl";
//! let line = Line::parse(raw).unwrap();
//!
//! assert_eq!(line.command(), "PRIVMSG");
//! assert_eq!(line.source_nickname(), Some("wolf"));
//! assert_eq!(line.tag_value("mod").as_deref(), Some("0"));
//! assert_eq!(line.trailing(), Some("!define howl"));
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod encode;
mod error;
mod line;
pub mod tags;

pub use error::ParseError;
pub use line::Line;
