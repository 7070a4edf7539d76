//! Integration test common infrastructure.
//!
//! Fakes for the seams of the pipeline: chat messages, content providers,
//! display surfaces, and a scripted IRC server over TCP.

pub mod fakes;
pub mod irc;

#[allow(unused_imports)]
pub use fakes::{Gate, RecordingSurface, ScriptedProvider, Seen, TestMessage};
#[allow(unused_imports)]
pub use irc::FakeIrcServer;

use lexicard::config::Config;

/// Parse a TOML config, panicking with the parse error on failure.
#[allow(dead_code)]
pub fn config(toml: &str) -> Config {
    toml::from_str(toml).unwrap_or_else(|e| panic!("bad test config: {e}"))
}
